//! The TcEx runtime facade.
//!
//! `TcEx` is the process-wide handle apps use to reach platform services.
//! It is built once by [`crate::bootstrap`] and shared read-only after that.
//! Per-invocation state (arguments) lives in a [`TcExArgParser`] the app
//! owns.

pub mod logging;

use crate::argparser::{InputSource, ResolvedArgs, TcExArgParser};
use crate::identity::Identity;
use crate::Result;

#[derive(Debug)]
pub struct TcEx {
    identity: &'static Identity,
}

impl TcEx {
    pub fn new(identity: &'static Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &'static Identity {
        self.identity
    }

    /// `name/version` string reported to the platform.
    pub fn user_agent(&self) -> String {
        self.identity.user_agent()
    }

    /// A fresh parser with the standard platform arguments declared. Apps add
    /// their own options before resolving.
    pub fn arg_parser(&self) -> TcExArgParser {
        TcExArgParser::with_standard_args().with_description(format!(
            "{} {} app",
            self.identity.name, self.identity.version
        ))
    }

    /// Resolve `parser` against `source` and hook the resolved log level
    /// into tracing.
    pub fn resolve_args<'p>(
        &self,
        parser: &'p mut TcExArgParser,
        source: &InputSource,
    ) -> Result<&'p ResolvedArgs> {
        let resolved = parser.resolve(source)?;
        self.init_logging(resolved)?;
        Ok(resolved)
    }

    /// Install a tracing subscriber at the resolved `tc_log_level`.
    ///
    /// Returns `false` when a subscriber was already installed by the host.
    pub fn init_logging(&self, args: &ResolvedArgs) -> Result<bool> {
        logging::init_from_args(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argparser::ArgOption;

    #[test]
    fn arg_parser_is_fresh_per_call() {
        let tcex = TcEx::new(Identity::current());
        let mut first = tcex.arg_parser();
        first.declare(ArgOption::string("owner")).unwrap();
        let second = tcex.arg_parser();
        assert!(second.option("owner").is_none());
        assert!(second.option("tc_api_path").is_some());
        assert!(second.description().unwrap().starts_with("tcex "));
    }

    #[test]
    fn resolve_args_returns_values() {
        let tcex = TcEx::new(Identity::current());
        let mut parser = tcex.arg_parser();
        let src = InputSource::new().with_args(["--tc_log_level", "debug"]);
        let resolved = tcex.resolve_args(&mut parser, &src).unwrap();
        assert_eq!(
            resolved.get("tc_log_level").and_then(|v| v.as_str()),
            Some("debug")
        );
    }
}
