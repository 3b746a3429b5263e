//! Type pretty-printing for error messages.
//!
//! Types render as the keyword a user would write (`int`, `string`, ...),
//! so messages read `cannot assign 'string' to 'x' of type 'int'`.

use crate::types::{Signature, Ty};
use std::fmt;

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ty::Int => "int",
            Ty::Float => "float",
            Ty::Bool => "bool",
            Ty::String => "string",
            Ty::Void => "void",
            Ty::Function => "function",
            Ty::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Signature {
    /// Renders `(int, float) -> bool`, with `...` for variadics and `?` on
    /// optional parameters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, ty) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ty}")?;
            if i >= self.required {
                write!(f, "?")?;
            }
        }
        if self.variadic {
            if !self.params.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "...")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

/// Formats `n argument(s)` with the right plural.
pub(crate) fn arguments(n: usize) -> String {
    if n == 1 {
        "1 argument".to_string()
    } else {
        format!("{n} arguments")
    }
}
