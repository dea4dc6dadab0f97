//! tracing subscriber setup driven by `tc_log_level`.

use crate::argparser::{ResolvedArgs, ValueOrigin};
use crate::error::{Error, ErrorContext};
use crate::Result;
use tracing_subscriber::EnvFilter;

/// Map a platform log level onto a tracing filter directive.
pub fn filter_directive(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" => "error".to_string(),
        other => other.to_string(),
    }
}

const LOG_LEVEL: &str = "tc_log_level";

/// Install a global fmt subscriber.
///
/// With `level` unset the filter comes from `RUST_LOG` (default `info`).
/// Returns `Ok(false)` if another subscriber is already installed.
pub fn init_tracing(level: Option<&str>) -> Result<bool> {
    install(level, None)
}

/// [`init_tracing`] at the resolved `tc_log_level`.
pub fn init_from_args(args: &ResolvedArgs) -> Result<bool> {
    let level = args.get(LOG_LEVEL).and_then(|v| v.as_str());
    install(level, args.origin(LOG_LEVEL))
}

fn install(level: Option<&str>, origin: Option<ValueOrigin>) -> Result<bool> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(filter_directive(level)).map_err(|e| {
            Error::configuration_with_context(
                "invalid log level",
                ErrorContext::for_option(LOG_LEVEL)
                    .with_value(level)
                    .with_origin(origin)
                    .with_cause(e),
            )
        })?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_levels_map_to_tracing() {
        assert_eq!(filter_directive("warning"), "warn");
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("debug"), "debug");
    }

    #[test]
    fn invalid_level_is_a_configuration_error() {
        let err = init_tracing(Some("tcex=loud")).unwrap_err();
        let ctx = err.context().unwrap();
        assert_eq!(ctx.option.as_deref(), Some("tc_log_level"));
        assert_eq!(ctx.value.as_deref(), Some("tcex=loud"));
        assert_eq!(ctx.origin, None);
    }

    #[test]
    fn invalid_level_reports_its_origin() {
        use crate::argparser::{ArgOption, InputSource, TcExArgParser};

        let mut parser = TcExArgParser::new();
        parser
            .declare(ArgOption::string("tc_log_level").with_default("info"))
            .unwrap();
        let args = parser
            .resolve(&InputSource::new().with_env([("TC_LOG_LEVEL", "tcex=loud")]))
            .unwrap();
        let err = init_from_args(args).unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.origin),
            Some(ValueOrigin::Environment)
        );
        assert!(err.to_string().contains("from environment"), "{err}");
    }
}
