//! Fail-soft construction of the runtime facade.
//!
//! The runtime is built by a [`RuntimeLoader`]. A loader that reports
//! [`LoadError::DependencyUnavailable`] does not abort initialization: the
//! failure is written to the diagnostic channel (two lines, once) and the
//! facade is stored as [`Facade::Unavailable`]. Every other load error is
//! returned to the caller.
//!
//! [`bootstrap()`] and [`runtime()`] operate on one process-wide slot.

pub mod diagnostics;
pub mod error;

pub use diagnostics::{DiagnosticSink, MemoryDiagnostics, StdoutDiagnostics};
pub use error::{BootstrapError, LoadError};

use crate::identity::Identity;
use crate::runtime::TcEx;
use crate::Result;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Remediation printed after a dependency failure.
pub const REMEDIATION_HINT: &str = "Try running tc_lib";

/// Builds the runtime facade.
pub trait RuntimeLoader: Send + Sync {
    fn load(&self, identity: &'static Identity) -> std::result::Result<TcEx, LoadError>;
}

/// Builds [`TcEx`] when the crate is compiled with the `runtime` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLoader;

impl RuntimeLoader for DefaultLoader {
    #[cfg(feature = "runtime")]
    fn load(&self, identity: &'static Identity) -> std::result::Result<TcEx, LoadError> {
        Ok(TcEx::new(identity))
    }

    #[cfg(not(feature = "runtime"))]
    fn load(&self, _identity: &'static Identity) -> std::result::Result<TcEx, LoadError> {
        Err(LoadError::DependencyUnavailable {
            dependency: "runtime".to_string(),
            reason: "tcex was built without the `runtime` feature".to_string(),
        })
    }
}

/// The runtime after a degraded bootstrap. Every access fails with
/// [`BootstrapError::FacadeUnavailable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unavailable {
    identity: &'static Identity,
    dependency: String,
    reason: String,
}

impl Unavailable {
    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn error(&self) -> BootstrapError {
        BootstrapError::FacadeUnavailable {
            dependency: self.dependency.clone(),
            reason: self.reason.clone(),
            hint: Some(REMEDIATION_HINT.to_string()),
        }
    }
}

/// Outcome of a bootstrap: a usable runtime or an explicit unavailable state.
#[derive(Debug, Clone)]
pub enum Facade {
    Loaded(Arc<TcEx>),
    Unavailable(Unavailable),
}

impl Facade {
    pub fn is_available(&self) -> bool {
        matches!(self, Facade::Loaded(_))
    }

    pub fn identity(&self) -> &'static Identity {
        match self {
            Facade::Loaded(tcex) => tcex.identity(),
            Facade::Unavailable(u) => u.identity,
        }
    }

    pub fn tcex(&self) -> std::result::Result<&TcEx, BootstrapError> {
        match self {
            Facade::Loaded(tcex) => Ok(tcex.as_ref()),
            Facade::Unavailable(u) => Err(u.error()),
        }
    }

    pub fn shared(&self) -> std::result::Result<Arc<TcEx>, BootstrapError> {
        match self {
            Facade::Loaded(tcex) => Ok(Arc::clone(tcex)),
            Facade::Unavailable(u) => Err(u.error()),
        }
    }

    pub fn unavailable(&self) -> Option<&Unavailable> {
        match self {
            Facade::Loaded(_) => None,
            Facade::Unavailable(u) => Some(u),
        }
    }
}

/// Configures and runs one bootstrap.
pub struct Bootstrap {
    identity: &'static Identity,
    loader: Arc<dyn RuntimeLoader>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self {
            identity: Identity::current(),
            loader: Arc::new(DefaultLoader),
            diagnostics: Arc::new(StdoutDiagnostics),
        }
    }

    pub fn with_identity(mut self, identity: &'static Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_loader(mut self, loader: Arc<dyn RuntimeLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Run the loader.
    ///
    /// A missing dependency yields `Ok(Facade::Unavailable)` after writing
    /// the diagnostic; a construction failure yields `Err`.
    pub fn load(self) -> Result<Facade> {
        match self.loader.load(self.identity) {
            Ok(tcex) => {
                tracing::debug!(version = self.identity.version, "tcex runtime loaded");
                Ok(Facade::Loaded(Arc::new(tcex)))
            }
            Err(ref err @ LoadError::DependencyUnavailable {
                ref dependency,
                ref reason,
            }) => {
                self.diagnostics.emit(&format!("Error: {}", err));
                self.diagnostics.emit(REMEDIATION_HINT);
                tracing::warn!(error = %err, "tcex runtime unavailable, continuing without it");
                Ok(Facade::Unavailable(Unavailable {
                    identity: self.identity,
                    dependency: dependency.clone(),
                    reason: reason.clone(),
                }))
            }
            Err(LoadError::Construction(reason)) => {
                Err(BootstrapError::Construction { reason }.into())
            }
        }
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

static FACADE: OnceCell<Facade> = OnceCell::new();

/// Run `bootstrap` unless the process-wide facade is already set, and return
/// the process-wide facade.
///
/// Hosts call this before anything else touches the runtime to choose the
/// loader or the diagnostic sink. A fatal error leaves the slot empty.
pub fn install(bootstrap: Bootstrap) -> Result<&'static Facade> {
    FACADE.get_or_try_init(|| bootstrap.load())
}

/// The process-wide facade, bootstrapped with defaults on first use.
pub fn bootstrap() -> Result<&'static Facade> {
    FACADE.get_or_try_init(|| Bootstrap::new().load())
}

/// The process-wide runtime, or a `FacadeUnavailable` error after a
/// degraded bootstrap.
pub fn runtime() -> Result<&'static TcEx> {
    Ok(bootstrap()?.tcex()?)
}
