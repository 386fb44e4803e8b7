use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::debug;

use crate::core::models::api_response::ApiResponse;
use crate::http::AppState;

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

/// A missing or unparsable body reaches the core as `null`, which every
/// operation rejects as malformed input.
fn body_or_null(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "request body not accepted");
            Value::Null
        }
    }
}

pub async fn hello() -> Json<Value> {
    Json(json!({ "Hello": "Cascade Fintech RESTful API" }))
}

pub async fn new_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let body = body_or_null(body);
    state.service.lock().await.register_account(&body)
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let body = body_or_null(body);
    state.service.lock().await.login(&body)
}

pub async fn logs(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let body = body_or_null(body);
    state.service.lock().await.query_logs(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_keeps_status() {
        let resp = ApiResponse::created(json!({})).into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = ApiResponse {
            status: 1000,
            body: Value::Null,
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
