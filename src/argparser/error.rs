//! Argument schema error types

use super::value::ValueType;

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n Hint: {}", h))
        .unwrap_or_default()
}

/// Errors raised while declaring, resolving or querying arguments.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgError {
    #[error("Invalid declaration for option '{name}': {reason}")]
    InvalidDeclaration { name: String, reason: String },

    #[error("Duplicate option '{name}': an option with this name is already declared")]
    DuplicateOption { name: String },

    #[error("Missing required configuration: {}{}", .names.join(", "), hint_suffix(.hint))]
    MissingRequired {
        names: Vec<String>,
        hint: Option<String>,
    },

    #[error("Invalid value for option '{name}': expected {expected}, got {raw:?}")]
    InvalidValue {
        name: String,
        expected: ValueType,
        raw: String,
    },

    #[error("Invalid value for option '{name}': {raw:?} is not one of [{}]", .choices.join(", "))]
    InvalidChoice {
        name: String,
        raw: String,
        choices: Vec<String>,
    },

    #[error("Invalid command-line argument '{arg}': {reason}")]
    InvalidArgument { arg: String, reason: String },

    #[error("Unknown option '{name}'{}", hint_suffix(.hint))]
    UnknownOption { name: String, hint: Option<String> },

    #[error("Arguments not yet resolved: call resolve() before reading option '{name}'")]
    NotResolved { name: String },

    #[error("Option '{name}' holds a {actual} value, not {requested}")]
    TypeMismatch {
        name: String,
        requested: &'static str,
        actual: &'static str,
    },

    #[error("Failed to load mapping from {path}: {reason}")]
    MappingFile { path: String, reason: String },
}

impl ArgError {
    pub(crate) fn declaration(name: &str, reason: impl Into<String>) -> Self {
        ArgError::InvalidDeclaration {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        match self {
            ArgError::MissingRequired { ref mut hint, .. } => *hint = hint_val,
            ArgError::UnknownOption { ref mut hint, .. } => *hint = hint_val,
            _ => (),
        }
        self
    }

    /// Option names this error is about, if any.
    pub fn option_names(&self) -> Vec<&str> {
        match self {
            ArgError::MissingRequired { names, .. } => names.iter().map(String::as_str).collect(),
            ArgError::InvalidDeclaration { name, .. }
            | ArgError::DuplicateOption { name }
            | ArgError::InvalidValue { name, .. }
            | ArgError::InvalidChoice { name, .. }
            | ArgError::UnknownOption { name, .. }
            | ArgError::NotResolved { name }
            | ArgError::TypeMismatch { name, .. } => vec![name.as_str()],
            ArgError::InvalidArgument { .. } | ArgError::MappingFile { .. } => Vec::new(),
        }
    }
}
