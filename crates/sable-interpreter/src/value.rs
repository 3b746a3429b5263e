//! Runtime values.

use crate::environment::EnvRef;
use crate::native::NativeFunction;
use sable_syntax::FunctionDecl;
use std::fmt;
use std::rc::Rc;

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float
    Float(f64),
    /// Boolean
    Boolean(bool),
    /// String
    String(String),
    /// Absence of a value
    Null,
    /// A callable
    Function(Rc<Callable>),
}

/// Something that can be called.
pub enum Callable {
    /// A function declared in Sable source
    User(UserFunction),
    /// A builtin
    Native(&'static NativeFunction),
}

/// A function declared in Sable source, with the environment it closes over.
///
/// Immutable once created.
pub struct UserFunction {
    /// The declaration (parameters and body)
    pub decl: Rc<FunctionDecl>,
    /// Environment the function was declared in
    pub closure: EnvRef,
}

impl Callable {
    /// Name the callable was declared with.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::User(function) => &function.decl.name,
            Self::Native(native) => native.name,
        }
    }
}

// Closures can reach the environment that holds them, so only names are shown.
impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(function) => write!(f, "User({})", function.decl.name),
            Self::Native(native) => write!(f, "Native({})", native.name),
        }
    }
}

impl Value {
    /// Wraps a user function.
    #[must_use]
    pub fn function(decl: Rc<FunctionDecl>, closure: EnvRef) -> Self {
        Self::Function(Rc::new(Callable::User(UserFunction { decl, closure })))
    }

    /// Wraps a builtin.
    #[must_use]
    pub fn native(native: &'static NativeFunction) -> Self {
        Self::Function(Rc::new(Callable::Native(native)))
    }

    /// `null`, `false`, `0`, `0.0` and `""` are false; everything else is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Float(x) => *x != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Function(_) => true,
        }
    }

    /// Name of this value's type, for messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::Boolean(_) => "bool",
            Self::String(_) => "string",
            Self::Null => "null",
            Self::Function(_) => "function",
        }
    }

    /// The value as a float, if numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            // shortest round-trip form, always with a fractional part
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::Null => write!(f, "null"),
            Self::Function(callable) => match &**callable {
                Callable::User(function) => write!(f, "<fn {}>", function.decl.name),
                Callable::Native(native) => write!(f, "<native fn {}>", native.name),
            },
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
