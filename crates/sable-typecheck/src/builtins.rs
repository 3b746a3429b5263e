//! Signatures of the native functions.
//!
//! Both static passes pre-declare these names in their global scope so calls
//! to them resolve and type-check like calls to user functions. The runtime
//! implementations live in the interpreter's native registry.

use crate::types::{Signature, Ty};

/// Names of every builtin, in registration order.
pub const BUILTIN_NAMES: [&str; 8] = [
    "print",
    "toString",
    "toInt",
    "toFloat",
    "length",
    "substring",
    "concat",
    "input",
];

/// Returns the static signature of the builtin `name`.
#[must_use]
pub fn signature(name: &str) -> Option<Signature> {
    let sig = match name {
        "print" => Signature::variadic(Ty::Void),
        "toString" => Signature::fixed(vec![Ty::Unknown], Ty::String),
        "toInt" => Signature::fixed(vec![Ty::Unknown], Ty::Int),
        "toFloat" => Signature::fixed(vec![Ty::Unknown], Ty::Float),
        "length" => Signature::fixed(vec![Ty::String], Ty::Int),
        "substring" => Signature::fixed(vec![Ty::String, Ty::Int, Ty::Int], Ty::String),
        "concat" => Signature::variadic(Ty::String),
        "input" => Signature::optional(vec![Ty::String], 0, Ty::String),
        _ => return None,
    };
    Some(sig)
}

/// Iterates over every builtin with its signature.
pub fn all() -> impl Iterator<Item = (&'static str, Signature)> {
    BUILTIN_NAMES
        .iter()
        .filter_map(|&name| signature(name).map(|sig| (name, sig)))
}
