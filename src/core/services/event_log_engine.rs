use serde_json::{Map, Value};
use tracing::info;

use crate::core::errors::QueryError;
use crate::core::models::event::{Event, EventKind};
use crate::core::models::log_query::LogQuery;
use crate::core::models::timestamp::Timestamp;
use crate::core::traits::event_log::EventLog;

/// Appends audit events and answers filtered queries over them,
/// through an `EventLog` backend.
pub struct EventLogEngine<L: EventLog> {
    log: L,
}

impl<L: EventLog> EventLogEngine<L> {
    pub fn new(log: L) -> Self {
        Self { log }
    }

    /// Record an event stamped with the current local time.
    pub fn append(&mut self, kind: EventKind, data: Map<String, Value>) -> Event {
        self.append_at(kind, data, Timestamp::now())
    }

    /// Record an event at `created`.
    ///
    /// A clock that moved backwards (DST fall-back, NTP step) is clamped to
    /// the last recorded timestamp so `created` never decreases in log order.
    pub fn append_at(
        &mut self,
        kind: EventKind,
        data: Map<String, Value>,
        created: Timestamp,
    ) -> Event {
        let created = match self.log.last() {
            Some(last) if last.created > created => last.created,
            _ => created,
        };

        let event = Event {
            kind,
            created,
            data,
        };

        let payload = Value::Object(event.data.clone());
        info!(
            kind = %event.kind,
            created = %event.created,
            data = %payload,
            total = self.log.len() + 1,
            "event recorded"
        );

        self.log.append(event.clone());
        event
    }

    /// Validate a raw log query and run it.
    ///
    /// See `LogQuery::from_request` for the validation order. The engine
    /// does not record the query itself.
    pub fn query(
        &self,
        kinds: &Value,
        filters: &Value,
        is_registered: impl Fn(&str) -> bool,
    ) -> Result<Vec<Event>, QueryError> {
        let query = LogQuery::from_request(kinds, filters, is_registered)?;
        Ok(self.filter(&query))
    }

    /// Events matching every filter of `query`, in append order.
    pub fn filter(&self, query: &LogQuery) -> Vec<Event> {
        self.log
            .events()
            .iter()
            .filter(|event| query.kinds.matches(event.kind))
            .filter(|event| query.user.matches(event))
            .filter(|event| query.created.matches(event.created))
            .cloned()
            .collect()
    }

    pub fn events(&self) -> &[Event] {
        self.log.events()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
