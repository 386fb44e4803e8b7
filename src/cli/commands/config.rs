use std::path::Path;

use crate::cli::output;
use crate::config::app_config::{AppConfig, PORT_ENV};
use crate::core::errors::Result;

/// Execute the `cascade config` command.
///
/// Prints the configuration `serve` would start with, after the
/// config file and the `PORT` environment variable are applied.
pub fn execute(config_path: Option<&str>) -> Result<()> {
    let config = AppConfig::resolve(
        config_path.map(Path::new),
        std::env::var(PORT_ENV).ok().as_deref(),
        None,
        None,
    )?;

    output::header("cascade config");
    output::field("source", config_path.unwrap_or("defaults / ./cascade.toml"));
    output::field("bind", &config.bind_addr());
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}
