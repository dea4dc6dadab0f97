//! Option definitions

use super::value::{ArgValue, RawValue, ValueType};
use serde::Serialize;

/// Shown in place of secret values.
pub(crate) const REDACTED: &str = "***";

/// A named option and its constraints.
///
/// Constraints are checked when the option is declared on a
/// [`TcExArgParser`](super::TcExArgParser), not when it is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgOption {
    /// Option name, used as `--name` on the command line and as the mapping key
    pub name: String,
    /// Declared value type
    pub value_type: ValueType,
    /// Value used when no source supplies one
    pub default: Option<ArgValue>,
    /// Resolution fails when no source supplies a value
    pub required: bool,
    /// One-line help text
    pub help: Option<String>,
    /// Allowed values, compared after coercion
    pub choices: Option<Vec<ArgValue>>,
    /// Explicit environment variable; derived from the name when unset
    pub env: Option<String>,
    /// Redact the value in debug output and help
    pub secret: bool,
}

impl ArgOption {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: None,
            required: false,
            help: None,
            choices: None,
            env: None,
            secret: false,
        }
    }

    /// A string option
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::String)
    }

    /// An integer option
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Integer)
    }

    /// A float option
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Float)
    }

    /// A boolean option. A bare `--name` on the command line sets it to true.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Boolean)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<ArgValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ArgValue>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Read the environment layer from `key` instead of the derived name.
    pub fn with_env(mut self, key: impl Into<String>) -> Self {
        self.env = Some(key.into());
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Environment key for this option: the explicit key if set, otherwise
    /// `prefix` + the upper-cased name with `-` replaced by `_`.
    pub fn env_key(&self, prefix: Option<&str>) -> String {
        if let Some(ref key) = self.env {
            return key.clone();
        }
        let base = self.name.replace('-', "_").to_ascii_uppercase();
        match prefix {
            Some(p) if !p.is_empty() => format!("{}_{}", p.trim_end_matches('_'), base),
            _ => base,
        }
    }

    /// Supplied value as it may appear in errors and logs.
    pub(crate) fn shown(&self, raw: &RawValue) -> String {
        if self.secret {
            REDACTED.to_string()
        } else {
            raw.display()
        }
    }

    /// Canonical comparison key; `-` and `_` are interchangeable.
    pub(crate) fn match_key(name: &str) -> String {
        name.replace('-', "_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_derivation() {
        let opt = ArgOption::string("api-key");
        assert_eq!(opt.env_key(None), "API_KEY");
        assert_eq!(opt.env_key(Some("TC")), "TC_API_KEY");
        assert_eq!(opt.env_key(Some("TC_")), "TC_API_KEY");
        let opt = opt.with_env("CUSTOM");
        assert_eq!(opt.env_key(Some("TC")), "CUSTOM");
    }

    #[test]
    fn builder_sets_constraints() {
        let opt = ArgOption::integer("batch-size")
            .with_default(500)
            .with_help("records per batch")
            .with_choices([100, 500]);
        assert_eq!(opt.value_type, ValueType::Integer);
        assert_eq!(opt.default, Some(ArgValue::Int(500)));
        assert_eq!(opt.choices.as_ref().map(Vec::len), Some(2));
        assert!(!opt.required);
    }
}
