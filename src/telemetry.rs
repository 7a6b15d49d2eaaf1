use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Filter used when neither RUST_LOG nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const VERBOSE_LOG_LEVEL: &str = "debug";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("telemetry error: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Pick the filter directive: `--verbose` beats the config, which beats the
/// default. RUST_LOG, when set, overrides all of them in [`init`].
pub fn resolve_log_level(verbose: bool, configured: Option<&str>) -> String {
    if verbose {
        VERBOSE_LOG_LEVEL.to_string()
    } else {
        configured.unwrap_or(DEFAULT_LOG_LEVEL).to_string()
    }
}

/// Install a compact stderr subscriber.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|source| TelemetryError::EnvFilter {
            value: log_level.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_log_level() {
        assert_eq!(resolve_log_level(false, None), "warn");
        assert_eq!(resolve_log_level(false, Some("info")), "info");
        assert_eq!(resolve_log_level(true, Some("info")), "debug");
    }

    #[test]
    fn test_env_filter_error_message() {
        let source = EnvFilter::try_new("cema_score=loud").unwrap_err();
        let err = TelemetryError::EnvFilter {
            value: "cema_score=loud".to_string(),
            source,
        };
        assert!(err.to_string().contains("cema_score=loud"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
