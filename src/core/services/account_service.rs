use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::adapters::account_stores::memory_account_store::MemoryAccountStore;
use crate::adapters::event_logs::memory_event_log::MemoryEventLog;
use crate::core::errors::{AuthError, LogRequestError, LoginError};
use crate::core::models::api_response::ApiResponse;
use crate::core::models::event::{Event, EventKind, user_data};
use crate::core::services::account_registry::{AccountRegistry, has_exact_keys};
use crate::core::services::event_log_engine::EventLogEngine;
use crate::core::traits::account_store::AccountStore;
use crate::core::traits::event_log::EventLog;

const LOGIN_KEYS: [&str; 3] = ["type", "email", "password"];
const LOG_REQUEST_KEYS: [&str; 4] = ["email", "password", "type", "filters"];

/// Value of `type` in a login body.
const LOGIN_TYPE: &str = "LOGIN";

/// Service with both stores held in memory.
pub type InMemoryAccountService = AccountService<MemoryAccountStore, MemoryEventLog>;

/// The core's request-level contract: registration, login and audit-log
/// queries over one account store and one event log.
///
/// Every operation takes an already-parsed JSON body and returns the status
/// and body to send back. Each outcome is recorded in the event log here;
/// the registry and the engine never record events on their own.
///
/// The stores are reachable only through these operations, so no account
/// skips validation and no event skips the log:
///
/// ```compile_fail
/// use cascade::core::services::account_service::InMemoryAccountService;
///
/// let svc = InMemoryAccountService::in_memory();
/// let _ = &svc.accounts;
/// ```
///
/// ```compile_fail
/// use cascade::core::services::account_service::InMemoryAccountService;
///
/// let svc = InMemoryAccountService::in_memory();
/// let _ = &svc.events;
/// ```
pub struct AccountService<S: AccountStore, L: EventLog> {
    accounts: AccountRegistry<S>,
    events: EventLogEngine<L>,
}

impl InMemoryAccountService {
    pub fn in_memory() -> Self {
        Self::new(MemoryAccountStore::new(), MemoryEventLog::new())
    }
}

impl Default for InMemoryAccountService {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<S: AccountStore, L: EventLog> AccountService<S, L> {
    pub fn new(store: S, log: L) -> Self {
        Self {
            accounts: AccountRegistry::new(store),
            events: EventLogEngine::new(log),
        }
    }

    /// Register an account from `{email, password, phone}`.
    ///
    /// `201` and a `USER_ADDED` event on success; `400` and no event otherwise.
    pub fn register_account(&mut self, body: &Value) -> ApiResponse {
        match self.accounts.register(body) {
            Ok(email) => {
                self.events
                    .append(EventKind::UserAdded, user_data(Value::String(email)));
                ApiResponse::created(json!({ "User Status": "User Created." }))
            }
            Err(e) => {
                debug!(error = ?e, "registration rejected");
                ApiResponse::bad_request(&e)
            }
        }
    }

    /// Log in from `{type: "LOGIN", email, password}`.
    ///
    /// Malformed bodies are rejected without an event. A credential check
    /// records `LOGIN` or `FAILED_LOGIN`; both failure causes produce the
    /// same event and message.
    pub fn login(&mut self, body: &Value) -> ApiResponse {
        match self.try_login(body) {
            Ok(()) => ApiResponse::ok(json!({ "Login status": "You are logged in." })),
            Err(e) => {
                debug!(error = ?e, "login rejected");
                ApiResponse::bad_request(&e)
            }
        }
    }

    fn try_login(&mut self, body: &Value) -> Result<(), LoginError> {
        let fields = body
            .as_object()
            .filter(|map| has_exact_keys(map, &LOGIN_KEYS))
            .ok_or(LoginError::MalformedInput)?;

        if fields.get("type").and_then(Value::as_str) != Some(LOGIN_TYPE) {
            return Err(LoginError::WrongType);
        }

        let user = fields.get("email").cloned().unwrap_or(Value::Null);
        match self.check_credentials(fields) {
            Ok(()) => {
                self.events.append(EventKind::Login, user_data(user));
                Ok(())
            }
            Err(e) => {
                self.events.append(EventKind::FailedLogin, user_data(user));
                Err(LoginError::Credentials(e))
            }
        }
    }

    /// Query the audit log from `{email, password, type, filters}`.
    ///
    /// The requester's credentials are checked first, then the query.
    /// Either failure records `FAILED_LOG_REQUEST`. On success the matching
    /// events are returned and a `LOG_REQUEST` describing the query is
    /// recorded after filtering, so it is not part of its own result.
    pub fn query_logs(&mut self, body: &Value) -> ApiResponse {
        match self.try_query_logs(body) {
            Ok(logs) => ApiResponse::ok(json!({ "Logs": logs })),
            Err(e) => {
                debug!(error = ?e, "log request rejected");
                ApiResponse::bad_request(&e)
            }
        }
    }

    fn try_query_logs(&mut self, body: &Value) -> Result<Vec<Event>, LogRequestError> {
        let fields = body
            .as_object()
            .filter(|map| has_exact_keys(map, &LOG_REQUEST_KEYS))
            .ok_or(LogRequestError::MalformedInput)?;

        let requester = fields.get("email").cloned().unwrap_or(Value::Null);

        if let Err(e) = self.check_credentials(fields) {
            self.events
                .append(EventKind::FailedLogRequest, user_data(requester));
            return Err(LogRequestError::Credentials(e));
        }

        let kinds = fields.get("type").unwrap_or(&Value::Null);
        let filters = fields.get("filters").unwrap_or(&Value::Null);

        let accounts = &self.accounts;
        let result = self
            .events
            .query(kinds, filters, |email| accounts.contains(email));

        match result {
            Ok(logs) => {
                let mut data = user_data(requester);
                data.insert(
                    "query".to_string(),
                    json!({ "type": kinds, "filters": filters }),
                );
                self.events.append(EventKind::LogRequest, data);
                Ok(logs)
            }
            Err(e) => {
                warn!(error = %e, "invalid log query");
                self.events
                    .append(EventKind::FailedLogRequest, user_data(requester));
                Err(e.into())
            }
        }
    }

    /// A non-string email counts as unknown, a non-string password as wrong.
    fn check_credentials(&self, fields: &Map<String, Value>) -> Result<(), AuthError> {
        let email = fields
            .get("email")
            .and_then(Value::as_str)
            .ok_or(AuthError::UnknownEmail)?;
        // Stored passwords are never empty, so a non-string one can only fail.
        let password = fields
            .get("password")
            .and_then(Value::as_str)
            .unwrap_or_default();

        self.accounts.authenticate(email, password).map(|_| ())
    }

    /// Read-only view of the audit log in append order.
    pub fn logs(&self) -> &[Event] {
        self.events.events()
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}
