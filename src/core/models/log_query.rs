use std::collections::BTreeSet;

use serde_json::Value;

use crate::core::errors::QueryError;
use crate::core::models::event::{Event, EventKind};
use crate::core::models::timestamp::{TimeRange, Timestamp};

/// Wildcard accepted by every filter.
pub const ALL: &str = "all";

/// Keys a `filters` object must carry, no more and no less.
const FILTER_KEYS: [&str; 2] = ["user", "createdRange"];

/// Which event kinds to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Kinds(BTreeSet<EventKind>),
}

impl TypeFilter {
    pub fn matches(&self, kind: EventKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Kinds(kinds) => kinds.contains(&kind),
        }
    }
}

/// Which user's events to keep, by `data.user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    All,
    Email(String),
}

impl UserFilter {
    /// Events without a string `data.user` never match a specific email.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::Email(email) => event
                .user()
                .and_then(Value::as_str)
                .is_some_and(|user| user == email),
        }
    }
}

/// Which creation window to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeFilter {
    All,
    Within(TimeRange),
}

impl RangeFilter {
    pub fn matches(&self, created: Timestamp) -> bool {
        match self {
            RangeFilter::All => true,
            RangeFilter::Within(range) => range.contains(created),
        }
    }
}

/// A validated audit-log query. All three filters must hold for an
/// event to be returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub kinds: TypeFilter,
    pub user: UserFilter,
    pub created: RangeFilter,
}

impl LogQuery {
    /// Query that returns the whole log.
    pub fn all() -> Self {
        Self {
            kinds: TypeFilter::All,
            user: UserFilter::All,
            created: RangeFilter::All,
        }
    }

    /// Validate the raw `type` and `filters` values of a log request.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// type set, filter keys, user filter (against `is_registered`),
    /// then the created range.
    pub fn from_request(
        kinds: &Value,
        filters: &Value,
        is_registered: impl Fn(&str) -> bool,
    ) -> Result<Self, QueryError> {
        let kinds = parse_type_filter(kinds)?;

        let filters = filters
            .as_object()
            .filter(|map| map.len() == FILTER_KEYS.len())
            .filter(|map| FILTER_KEYS.iter().all(|key| map.contains_key(*key)))
            .ok_or(QueryError::InvalidFilterKeys)?;

        let user = match filters.get("user").and_then(Value::as_str) {
            Some(ALL) => UserFilter::All,
            Some(email) if is_registered(email) => UserFilter::Email(email.to_string()),
            _ => return Err(QueryError::InvalidUserFilter),
        };

        let created = match filters.get("createdRange").and_then(Value::as_str) {
            Some(ALL) => RangeFilter::All,
            Some(raw) => raw
                .parse()
                .map(RangeFilter::Within)
                .map_err(|e| QueryError::InvalidRangeFilter(Some(e)))?,
            None => return Err(QueryError::InvalidRangeFilter(None)),
        };

        Ok(Self {
            kinds,
            user,
            created,
        })
    }

    /// Whether `event` satisfies every filter.
    pub fn matches(&self, event: &Event) -> bool {
        self.kinds.matches(event.kind)
            && self.user.matches(event)
            && self.created.matches(event.created)
    }
}

fn parse_type_filter(raw: &Value) -> Result<TypeFilter, QueryError> {
    match raw {
        Value::String(s) if s == ALL => Ok(TypeFilter::All),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .and_then(EventKind::parse)
                    .ok_or(QueryError::InvalidTypeFilter)
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(TypeFilter::Kinds),
        _ => Err(QueryError::InvalidTypeFilter),
    }
}
