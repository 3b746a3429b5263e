//! Sable CLI: Driver, REPL and Configuration
//!
//! The `sable` binary is a thin wrapper over this library:
//! - [`driver`] - the parse, analyze, check and run pipeline
//! - [`repl`] - interactive loop over a persistent [`Session`]
//! - [`config`] - `key = value` settings read by the driver
//!
//! # Examples
//!
//! ```
//! use sable_cli::{FailedStage, Session};
//! use sable_interpreter::SharedOutput;
//!
//! let output = SharedOutput::new();
//! let mut session = Session::with_io(output.clone(), std::io::empty());
//!
//! assert!(session.run("print(1 + 2);").is_success());
//! assert_eq!(output.contents(), "3\n");
//!
//! let report = session.run("print(true + 1);");
//! assert_eq!(report.failed, Some(FailedStage::Type));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod driver;
pub mod repl;

pub use config::{Config, ConfigError};
pub use driver::{FailedStage, RenderOptions, Report, Session, dump_ast, on_large_stack};
