use tracing_subscriber::EnvFilter;

/// Pick the default log filter from the flags and configured level.
/// `-v` and `-q` win over the config file.
pub fn default_level(configured: &str, verbose: bool, quiet: bool) -> &str {
    if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        configured
    }
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides `level`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        assert_eq!(default_level("info", true, false), "debug");
        assert_eq!(default_level("info", false, true), "warn");
        assert_eq!(default_level("error", false, false), "error");
    }
}
