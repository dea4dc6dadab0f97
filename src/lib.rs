//! # tcex
//!
//! Integration framework entry point for apps that run on the ThreatConnect
//! platform.
//!
//! ## Overview
//!
//! The crate exposes two things:
//!
//! - **Runtime facade**: [`TcEx`], built once per process by the
//!   [`bootstrap`](mod@bootstrap) module. If the runtime's dependencies are missing the
//!   process keeps running: a diagnostic is printed once and every later use
//!   of the facade returns a descriptive error.
//! - **Argument schema**: [`TcExArgParser`], which apps use to declare and
//!   resolve their configuration. It never depends on the runtime, so it
//!   works whether or not the facade loaded.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tcex::argparser::{ArgOption, InputSource};
//!
//! fn main() -> tcex::Result<()> {
//!     let tcex = tcex::runtime()?;
//!
//!     let mut parser = tcex.arg_parser();
//!     parser.declare(ArgOption::string("owner").required())?;
//!
//!     let args = tcex.resolve_args(&mut parser, &InputSource::from_process())?;
//!     println!("{:?}", args);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`identity`] | Process-wide name, author, version and license |
//! | [`bootstrap`](mod@bootstrap) | Fail-soft construction of the runtime facade |
//! | [`runtime`](mod@runtime) | The [`TcEx`] facade and logging setup |
//! | [`argparser`] | Option declaration, resolution and lookup |

pub mod argparser;
pub mod bootstrap;
pub mod identity;
pub mod runtime;

pub use argparser::{ArgError, ArgOption, ArgValue, InputSource, ResolvedArgs, TcExArgParser};
pub use bootstrap::{bootstrap, install, runtime, Bootstrap, Facade};
pub use identity::{Identity, AUTHOR, LICENSE, NAME, VERSION};
pub use runtime::TcEx;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
