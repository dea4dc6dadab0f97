//! Argument schema for TcEx apps.
//!
//! Standalone: nothing here depends on the runtime facade, so apps can
//! describe and resolve their configuration even when the runtime failed to
//! load.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`TcExArgParser`] | Ordered option declarations, resolution and lookup |
//! | [`ArgOption`] | One option and its constraints |
//! | [`InputSource`] | Command line, environment and explicit mapping snapshot |
//! | [`ResolvedArgs`] | Read-only resolved values |
//! | [`ArgError`] | Declaration, resolution and query errors |

pub mod error;
pub mod option;
pub mod parser;
pub mod resolved;
pub mod source;
pub mod standard;
mod usage;
pub mod value;

pub use error::ArgError;
pub use option::ArgOption;
pub use parser::TcExArgParser;
pub use resolved::{ResolvedArgs, ValueOrigin};
pub use source::InputSource;
pub use value::{ArgValue, RawValue, ValueType};
