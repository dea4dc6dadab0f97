//! Bootstrap error types

/// What a [`RuntimeLoader`](super::RuntimeLoader) can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The runtime's own dependencies are missing. Recoverable: bootstrap
    /// degrades to an unavailable facade.
    #[error("missing dependency '{dependency}': {reason}")]
    DependencyUnavailable { dependency: String, reason: String },

    /// Anything else. Fatal: bootstrap returns it.
    #[error("{0}")]
    Construction(String),
}

/// Bootstrap and facade access errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapError {
    #[error("TcEx runtime is not available ({dependency}): {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    FacadeUnavailable {
        dependency: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("Failed to construct the TcEx runtime: {reason}")]
    Construction { reason: String },
}
