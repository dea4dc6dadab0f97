//! Process-wide identity metadata.

use serde::Serialize;
use std::fmt;

/// Package name
pub const NAME: &str = "tcex";
/// Author and support contact
pub const AUTHOR: &str = "ThreatConnect (support@threatconnect.com)";
/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// License identifier
pub const LICENSE: &str = "Apache License, Version 2";

static CURRENT: Identity = Identity {
    name: NAME,
    author: AUTHOR,
    version: VERSION,
    license: LICENSE,
};

/// Name, author, version and license of the framework.
///
/// One immutable instance exists per process; see [`Identity::current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: &'static str,
    pub author: &'static str,
    pub version: &'static str,
    pub license: &'static str,
}

impl Identity {
    /// The process-wide identity. Always the same reference.
    pub fn current() -> &'static Identity {
        &CURRENT
    }

    /// `name/version`, as reported to the platform.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.license)
    }
}
