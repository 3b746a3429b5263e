//! Core type representation for type checking.
//!
//! Sable has no user-defined types, so the lattice is flat: the five
//! primitive types, an opaque `function` type, and `unknown`.
//!
//! # Design
//!
//! - **Unknown** is produced by untyped or erroneous sources and is
//!   compatible with everything, so one mistake is reported once
//! - **Int/Float** are interchangeable wherever compatibility is asked
//! - **Function** carries no shape; call sites look up the callee's
//!   [`Signature`] on its symbol instead

use sable_syntax::TypeName;

/// Static type of an expression or binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ty {
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Boolean
    Bool,
    /// String
    String,
    /// No value (result of `print`, annotated `void` functions)
    Void,
    /// A callable value
    Function,
    /// Not known statically; compatible with every type
    Unknown,
}

impl Ty {
    /// Returns `true` for `int` and `float`.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Returns `true` for `unknown`.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns `true` if `self` is `expected`, or unknown.
    #[must_use]
    pub fn is_or_unknown(self, expected: Ty) -> bool {
        self == expected || self.is_unknown()
    }

    /// Returns `true` if numeric, or unknown.
    #[must_use]
    pub const fn is_numeric_like(self) -> bool {
        self.is_numeric() || self.is_unknown()
    }

    /// Checks whether a value of type `self` may flow into a slot of type
    /// `other`.
    ///
    /// Compatible means equal, an `int`/`float` pair, or either side unknown.
    ///
    /// # Example
    ///
    /// ```
    /// use sable_typecheck::Ty;
    ///
    /// assert!(Ty::Int.is_compatible(Ty::Float));
    /// assert!(Ty::Unknown.is_compatible(Ty::String));
    /// assert!(!Ty::Bool.is_compatible(Ty::Int));
    /// ```
    #[must_use]
    pub fn is_compatible(self, other: Ty) -> bool {
        self == other
            || (self.is_numeric() && other.is_numeric())
            || self.is_unknown()
            || other.is_unknown()
    }
}

impl From<TypeName> for Ty {
    fn from(name: TypeName) -> Self {
        match name {
            TypeName::Int => Self::Int,
            TypeName::Float => Self::Float,
            TypeName::Bool => Self::Bool,
            TypeName::String => Self::String,
            TypeName::Void => Self::Void,
        }
    }
}

/// Signature of a callable: parameter types and return type.
///
/// User functions always have a fixed parameter list. Builtins may accept
/// optional trailing parameters or any number of arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Parameter types in order
    pub params: Vec<Ty>,
    /// Number of leading parameters that must be supplied
    pub required: usize,
    /// Accepts any number of arguments of any type
    pub variadic: bool,
    /// Return type (`unknown` when not annotated)
    pub ret: Ty,
}

impl Signature {
    /// A signature taking exactly `params`.
    #[must_use]
    pub fn fixed(params: Vec<Ty>, ret: Ty) -> Self {
        Self {
            required: params.len(),
            params,
            variadic: false,
            ret,
        }
    }

    /// A signature accepting any number of arguments.
    #[must_use]
    pub const fn variadic(ret: Ty) -> Self {
        Self {
            params: Vec::new(),
            required: 0,
            variadic: true,
            ret,
        }
    }

    /// A signature whose trailing parameters past `required` may be omitted.
    #[must_use]
    pub fn optional(params: Vec<Ty>, required: usize, ret: Ty) -> Self {
        Self {
            params,
            required,
            variadic: false,
            ret,
        }
    }

    /// Returns `true` if a call with `count` arguments has the right arity.
    #[must_use]
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.required && (self.variadic || count <= self.params.len())
    }

    /// Expected type of the argument at `index`, if constrained.
    #[must_use]
    pub fn param(&self, index: usize) -> Option<Ty> {
        self.params.get(index).copied()
    }
}
