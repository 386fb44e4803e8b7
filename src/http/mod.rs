pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::core::errors::{CascadeError, Result};
use crate::core::services::account_service::InMemoryAccountService;

/// Shared handler state: one service instance behind a single lock, so each
/// request's validate-then-record sequence runs without interleaving.
#[derive(Clone, Default)]
pub struct AppState {
    pub service: Arc<Mutex<InMemoryAccountService>>,
}

impl AppState {
    pub fn new(service: InMemoryAccountService) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }
}

/// Routes of the HTTP shell. `/login` and `/logs` carry a JSON body on GET,
/// and accept POST too.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/newUser", post(handlers::new_user))
        .route("/login", get(handlers::login).post(handlers::login))
        .route("/logs", get(handlers::logs).post(handlers::logs))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub struct HttpServer {
    state: AppState,
    bind_addr: String,
}

impl HttpServer {
    pub fn new(state: AppState, bind_addr: String) -> Self {
        Self { state, bind_addr }
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> Result<()> {
        let app = router(self.state);

        let listener = tokio::net::TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| CascadeError::BindFailed {
                addr: self.bind_addr.clone(),
                reason: e.to_string(),
            })?;

        info!(addr = %self.bind_addr, "server listening");

        axum::serve(listener, app)
            .await
            .map_err(|e| CascadeError::ServerError {
                detail: e.to_string(),
            })
    }
}
