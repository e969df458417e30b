//! Diagnostic logging bootstrap
//!
//! Events go to stderr so that command output on stdout stays clean enough to
//! pipe. The filter comes from `PESOWISE_LOG` when set, otherwise from the
//! `log_level` setting.

use tracing_subscriber::EnvFilter;

use super::settings::Settings;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "PESOWISE_LOG";

/// Build the filter for the given settings
pub fn build_filter(settings: &Settings) -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive)
            .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        _ => EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

/// Install the global subscriber
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging(settings: &Settings) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        let settings = Settings::default();
        init_logging(&settings);
        init_logging(&settings);
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let mut settings = Settings::default();
        settings.log_level = "not a [valid directive".to_string();
        let filter = build_filter(&settings);
        assert!(!filter.to_string().is_empty());
    }
}
