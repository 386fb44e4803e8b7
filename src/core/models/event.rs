use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::models::timestamp::Timestamp;

/// Categories of events recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    #[serde(alias = "USER ADDED")]
    UserAdded,
    Login,
    #[serde(alias = "FAILED LOGIN")]
    FailedLogin,
    #[serde(alias = "LOG REQUEST")]
    LogRequest,
    #[serde(alias = "FAILED LOG REQUEST")]
    FailedLogRequest,
    /// Accepted as a filter value; nothing records it.
    #[serde(alias = "SESSION TIMEOUT")]
    SessionTimeout,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::UserAdded,
        EventKind::Login,
        EventKind::FailedLogin,
        EventKind::LogRequest,
        EventKind::FailedLogRequest,
        EventKind::SessionTimeout,
    ];

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::UserAdded => "USER_ADDED",
            EventKind::Login => "LOGIN",
            EventKind::FailedLogin => "FAILED_LOGIN",
            EventKind::LogRequest => "LOG_REQUEST",
            EventKind::FailedLogRequest => "FAILED_LOG_REQUEST",
            EventKind::SessionTimeout => "SESSION_TIMEOUT",
        }
    }

    /// Parse a wire name. The legacy spelling with spaces
    /// (`"FAILED LOGIN"`) is accepted too.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name || kind.as_str().replace('_', " ") == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable entry in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub created: Timestamp,
    pub data: Map<String, Value>,
}

impl Event {
    /// The `data.user` field, if the event carries one.
    pub fn user(&self) -> Option<&Value> {
        self.data.get("user")
    }
}

/// Build the `{user: ...}` payload shared by account and login events.
pub fn user_data(user: Value) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("user".to_string(), user);
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_serialize_with_underscores() {
        let json = serde_json::to_value(EventKind::FailedLogRequest).unwrap();
        assert_eq!(json, json!("FAILED_LOG_REQUEST"));
        assert_eq!(EventKind::UserAdded.to_string(), "USER_ADDED");
    }

    #[test]
    fn parse_accepts_canonical_and_spaced_names() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::parse("USER ADDED"), Some(EventKind::UserAdded));
        assert_eq!(
            EventKind::parse("SESSION TIMEOUT"),
            Some(EventKind::SessionTimeout)
        );
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(EventKind::parse("login"), None);
        assert_eq!(EventKind::parse("LOGOUT"), None);
        assert_eq!(EventKind::parse(""), None);
        assert_eq!(EventKind::parse("all"), None);
    }

    #[test]
    fn deserialize_accepts_alias() {
        let kind: EventKind = serde_json::from_value(json!("FAILED LOGIN")).unwrap();
        assert_eq!(kind, EventKind::FailedLogin);
    }

    #[test]
    fn event_serializes_with_type_key() {
        let event = Event {
            kind: EventKind::Login,
            created: "20240101120000".parse().unwrap(),
            data: user_data(json!("a@b.co")),
        };

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "LOGIN",
                "created": "20240101120000",
                "data": { "user": "a@b.co" }
            })
        );
        assert_eq!(event.user(), Some(&json!("a@b.co")));
    }
}
