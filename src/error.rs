use crate::argparser::{ArgError, ValueOrigin};
use crate::bootstrap::BootstrapError;
use std::fmt;
use thiserror::Error;

/// Which resolved setting a runtime error traces back to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Argument the setting was read from
    pub option: Option<String>,
    /// Value as supplied
    pub value: Option<String>,
    /// Input layer that supplied the value
    pub origin: Option<ValueOrigin>,
    /// Message from the component that rejected the value
    pub cause: Option<String>,
}

impl ErrorContext {
    pub fn for_option(option: impl Into<String>) -> Self {
        Self {
            option: Some(option.into()),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_origin(mut self, origin: Option<ValueOrigin>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }
}

/// Unified error type for the framework
#[derive(Debug, Error)]
pub enum Error {
    #[error("Argument error: {0}")]
    Argument(#[from] ArgError),

    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut out = String::new();
    if let Some(ref option) = ctx.option {
        out.push_str(&format!(" [{}", option));
        if let Some(ref value) = ctx.value {
            out.push_str(&format!("={:?}", value));
        }
        if let Some(origin) = ctx.origin {
            out.push_str(&format!(" from {}", origin));
        }
        out.push(']');
    }
    if let Some(ref cause) = ctx.cause {
        out.push_str(&format!(": {}", cause));
    }
    out
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// True when the runtime facade is unusable because a dependency was missing.
    pub fn is_facade_unavailable(&self) -> bool {
        matches!(self, Error::Bootstrap(BootstrapError::FacadeUnavailable { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_renders_context() {
        let err = Error::configuration_with_context(
            "invalid log level",
            ErrorContext::for_option("tc_log_level")
                .with_value("loud")
                .with_origin(Some(ValueOrigin::Environment))
                .with_cause("unknown level"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid log level [tc_log_level=\"loud\" from environment]: unknown level"
        );
        assert_eq!(err.context().and_then(|c| c.origin), Some(ValueOrigin::Environment));
    }

    #[test]
    fn empty_context_renders_nothing() {
        let err = Error::configuration_with_context("bad", ErrorContext::default());
        assert_eq!(err.to_string(), "Configuration error: bad");
    }

    #[test]
    fn argument_errors_convert() {
        let err: Error = ArgError::NotResolved {
            name: "api-key".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Argument error: Arguments not yet resolved"));
        assert!(err.context().is_none());
    }
}
