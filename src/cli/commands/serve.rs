use std::path::Path;

use crate::cli::{logging, output};
use crate::config::app_config::{AppConfig, PORT_ENV};
use crate::core::errors::{CascadeError, Result};
use crate::core::services::account_service::InMemoryAccountService;
use crate::http::{AppState, HttpServer};

/// Execute the `cascade serve` command.
///
/// Resolves configuration (defaults, file, `PORT`, flags), installs
/// logging and runs the HTTP server on a single-threaded runtime.
pub fn execute(
    config_path: Option<&str>,
    host: Option<&str>,
    port: Option<u16>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let config = AppConfig::resolve(
        config_path.map(Path::new),
        std::env::var(PORT_ENV).ok().as_deref(),
        host,
        port,
    )?;

    logging::init(logging::default_level(&config.logging.level, verbose, quiet));

    let bind_addr = config.bind_addr();
    if !quiet {
        output::success(&format!("Cascade listening on {bind_addr}"));
    }

    let state = AppState::new(InMemoryAccountService::in_memory());
    let server = HttpServer::new(state, bind_addr);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CascadeError::ServerError {
            detail: format!("Failed to create async runtime: {e}"),
        })?;

    rt.block_on(server.start())
}
