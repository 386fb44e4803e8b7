use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::errors::{CascadeError, Result};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "cascade.toml";

/// Environment variable that overrides `[server] port`.
pub const PORT_ENV: &str = "PORT";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level Cascade configuration.
///
/// Every section is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Build the effective configuration: defaults, then the config file,
    /// then the `PORT` value, then command-line flags. Validation runs once,
    /// on the final result, so a later layer can fix an earlier one.
    pub fn resolve(
        path: Option<&Path>,
        port_env: Option<&str>,
        host: Option<&str>,
        port: Option<u16>,
    ) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env(port_env)?;
        config.apply_overrides(host, port);
        config.validate()?;
        Ok(config)
    }

    /// Read the config file layer without validating it.
    ///
    /// An explicit `path` must exist. Without one, `cascade.toml` in the
    /// working directory is used if present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CascadeError::ConfigNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::from_toml_str(&std::fs::read_to_string(path)?)?
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_toml_str(&std::fs::read_to_string(default_path)?)?
                } else {
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CascadeError::InvalidConfig {
            detail: format!("Failed to parse config: {e}"),
        })
    }

    /// Apply the `PORT` environment override, if set. Fails only when the
    /// value is not a number; range checks are left to `validate`.
    pub fn apply_env(&mut self, port: Option<&str>) -> Result<()> {
        if let Some(raw) = port {
            self.server.port = raw.trim().parse().map_err(|_| CascadeError::InvalidConfig {
                detail: format!("{PORT_ENV} must be a port number, got '{raw}'"),
            })?;
        }
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, host: Option<&str>, port: Option<u16>) {
        if let Some(host) = host {
            self.server.host = host.to_string();
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(CascadeError::InvalidConfig {
                detail: "server.host must not be empty".into(),
            });
        }
        if self.server.port == 0 {
            return Err(CascadeError::InvalidConfig {
                detail: "server.port must be between 1 and 65535".into(),
            });
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(CascadeError::InvalidConfig {
                detail: format!(
                    "logging.level must be one of {}, got '{}'",
                    LOG_LEVELS.join(", "),
                    self.logging.level
                ),
            });
        }
        Ok(())
    }

    /// `host:port` to bind the HTTP listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Render as TOML, as printed by `cascade config`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CascadeError::InvalidConfig {
            detail: format!("Failed to render config: {e}"),
        })
    }
}

/// The `[server]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// The `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
