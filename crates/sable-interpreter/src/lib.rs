//! Sable Interpreter: Direct AST Execution
//!
//! This crate executes checked Sable programs by walking the syntax tree:
//! - [`interpreter`] - statement execution and expression evaluation
//! - [`environment`] - runtime bindings and closures
//! - [`value`] - runtime values and their rendering
//! - [`ops`] - operator semantics
//! - [`native`] - builtin functions
//! - [`io`] - pluggable program output and input
//! - [`error`] - runtime errors
//!
//! # Examples
//!
//! ```
//! use sable_interpreter::{Interpreter, SharedOutput};
//! use sable_syntax::Parser;
//!
//! let output = SharedOutput::new();
//! let mut interpreter = Interpreter::new().with_io(output.clone(), std::io::empty());
//!
//! let program = Parser::new("let s = \"a\"; let n = 1; print(s + n);").parse();
//! interpreter.interpret(&program);
//! assert_eq!(output.contents(), "a1\n");
//! ```

#![warn(missing_docs)]

pub mod environment;
pub mod error;
pub mod interpreter;
pub mod io;
pub mod native;
pub mod ops;
pub mod value;

pub use environment::{EnvRef, Environment};
pub use error::{RuntimeError, RuntimeResult, SpannedError};
pub use interpreter::{ExecResult, Interpreter};
pub use io::{Io, SharedOutput};
pub use native::NativeFunction;
pub use value::{Callable, UserFunction, Value};
