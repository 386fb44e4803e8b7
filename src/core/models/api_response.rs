use std::fmt::Display;

use serde_json::{Value, json};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Outcome of a core operation, ready for the transport to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: STATUS_OK,
            body,
        }
    }

    pub fn created(body: Value) -> Self {
        Self {
            status: STATUS_CREATED,
            body,
        }
    }

    /// `400` with `{"error": <message>}`.
    pub fn bad_request(err: &impl Display) -> Self {
        Self {
            status: STATUS_BAD_REQUEST,
            body: json!({ "error": err.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` message of a failed response.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}
