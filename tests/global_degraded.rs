//! Process-wide slot after a degraded bootstrap.
//!
//! Runs in its own test binary so the slot starts empty. Keep a single test
//! in this file: the slot is shared by every test in the process.

use std::sync::Arc;
use tcex::argparser::{ArgOption, InputSource, TcExArgParser};
use tcex::bootstrap::{LoadError, MemoryDiagnostics, RuntimeLoader};
use tcex::{Bootstrap, Identity, TcEx};

struct MissingDependency;

impl RuntimeLoader for MissingDependency {
    fn load(&self, _: &'static Identity) -> Result<TcEx, LoadError> {
        Err(LoadError::DependencyUnavailable {
            dependency: "platform-client".to_string(),
            reason: "no platform client library found".to_string(),
        })
    }
}

#[test]
fn test_degraded_process_keeps_working() {
    let sink = Arc::new(MemoryDiagnostics::new());
    let facade = tcex::install(
        Bootstrap::new()
            .with_loader(Arc::new(MissingDependency))
            .with_diagnostics(sink.clone()),
    )
    .expect("degraded bootstrap still initializes the package");
    assert!(!facade.is_available());

    // Later lookups reuse the slot: no second load, no second diagnostic.
    let again = tcex::bootstrap().unwrap();
    assert!(std::ptr::eq(facade, again));
    let err = tcex::runtime().unwrap_err();
    assert!(err.is_facade_unavailable(), "{err}");
    assert_eq!(sink.len(), 2);

    // The argument schema does not care.
    let mut parser = TcExArgParser::new();
    parser
        .declare(ArgOption::string("api-key").required())
        .unwrap();
    parser
        .resolve(&InputSource::from_mapping([("api-key", "abc123")]))
        .unwrap();
    assert_eq!(parser.get_str("api-key").unwrap(), "abc123");
}
