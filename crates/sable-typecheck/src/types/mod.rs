//! Type representation and operations.
//!
//! This module defines the static types used by the checker:
//!
//! - **Ty**: the types a Sable expression can have
//! - **Signature**: parameter and return types of a callable
//! - **Display**: rendering for error messages

pub mod display;
pub mod ty;

pub use ty::{Signature, Ty};
