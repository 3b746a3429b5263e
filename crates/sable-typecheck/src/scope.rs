//! Symbol table for lexical scoping.
//!
//! This module implements the scope table shared by the semantic analyzer
//! and the type checker (each pass owns its own instance).
//!
//! # Design
//!
//! - **Stack of scopes**: each scope maps names to [`Symbol`]s
//! - **Global scope**: the bottom of the stack, level 0, never popped
//! - **Lexical lookup**: innermost scope first, then outwards to global
//!
//! # Example
//!
//! ```
//! use sable_syntax::Span;
//! use sable_typecheck::scope::{ScopeTable, Symbol, SymbolKind};
//!
//! let mut table = ScopeTable::new();
//! let span = Span::point(0, 1, 1);
//! assert!(table.insert(Symbol::new("x", SymbolKind::Variable, 0, span)));
//!
//! table.push_scope();
//! assert!(table.insert(Symbol::new("x", SymbolKind::Variable, 1, span)));
//! assert_eq!(table.lookup("x").map(|s| s.level), Some(1));
//!
//! table.pop_scope();
//! assert_eq!(table.lookup("x").map(|s| s.level), Some(0));
//! ```

use crate::types::{Signature, Ty};
use fxhash::FxHashMap;
use sable_syntax::Span;
use std::fmt;

/// What a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Declared with `let`
    Variable,
    /// Declared with `function`, or a builtin
    Function,
    /// A function parameter
    Parameter,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable => write!(f, "variable"),
            Self::Function => write!(f, "function"),
            Self::Parameter => write!(f, "parameter"),
        }
    }
}

/// A declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Declared name
    pub name: String,
    /// What the name refers to
    pub kind: SymbolKind,
    /// Static type (`unknown` until the type checker fills it in)
    pub ty: Ty,
    /// Call signature, for functions
    pub signature: Option<Signature>,
    /// Depth of the declaring scope (0 = global)
    pub level: usize,
    /// Has a value been stored?
    pub initialized: bool,
    /// Can it be reassigned?
    pub constant: bool,
    /// Has it been read?
    pub used: bool,
    /// Location of the declaration
    pub span: Span,
}

impl Symbol {
    /// Creates a symbol with no type information.
    ///
    /// Functions are constant and initialized; parameters are initialized.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind, level: usize, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            ty: if kind == SymbolKind::Function {
                Ty::Function
            } else {
                Ty::Unknown
            },
            signature: None,
            level,
            initialized: kind != SymbolKind::Variable,
            constant: kind == SymbolKind::Function,
            used: false,
            span,
        }
    }

    /// Sets the static type.
    #[must_use]
    pub fn with_type(mut self, ty: Ty) -> Self {
        self.ty = ty;
        self
    }

    /// Attaches a call signature.
    #[must_use]
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.ty = Ty::Function;
        self.signature = Some(signature);
        self
    }

    /// Sets whether a value has been stored.
    #[must_use]
    pub fn initialized(mut self, initialized: bool) -> Self {
        self.initialized = initialized;
        self
    }
}

/// One lexical scope.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: FxHashMap<String, Symbol>,
    level: usize,
}

impl Scope {
    /// Creates an empty scope at `level`.
    #[must_use]
    pub fn new(level: usize) -> Self {
        Self {
            symbols: FxHashMap::default(),
            level,
        }
    }

    /// Nesting depth of this scope.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Looks up a name declared directly in this scope.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Returns `true` if `name` is declared directly in this scope.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Variables declared here that were never read, in source order.
    #[must_use]
    pub fn unused_variables(&self) -> Vec<&Symbol> {
        let mut unused: Vec<&Symbol> = self
            .symbols
            .values()
            .filter(|s| s.kind == SymbolKind::Variable && !s.used)
            .collect();
        unused.sort_by_key(|s| s.span.start);
        unused
    }
}

/// Stack of scopes, innermost last.
#[derive(Debug, Clone)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
}

impl Default for ScopeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTable {
    /// Creates a table holding only the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(0)],
        }
    }

    /// Depth of the current scope (0 = global).
    #[must_use]
    pub fn level(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Returns `true` while only the global scope is open.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.scopes.len() == 1
    }

    /// Enters a new scope.
    pub fn push_scope(&mut self) {
        let level = self.scopes.len();
        self.scopes.push(Scope::new(level));
    }

    /// Exits the current scope and returns it.
    ///
    /// The global scope is never popped; `None` is returned instead.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Declares `symbol` in the current scope.
    ///
    /// Returns `false` (and leaves the table unchanged) if the name is
    /// already declared in the current scope. Outer declarations are
    /// shadowed.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        let scope = self.current_mut();
        if scope.symbols.contains_key(&symbol.name) {
            return false;
        }
        scope.symbols.insert(symbol.name.clone(), symbol);
        true
    }

    /// Declares `symbol` in the current scope, replacing any declaration of
    /// the same name there.
    pub fn define(&mut self, symbol: Symbol) {
        self.current_mut()
            .symbols
            .insert(symbol.name.clone(), symbol);
    }

    /// Finds the nearest declaration of `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Finds the nearest declaration of `name` for update.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.symbols.get_mut(name))
    }

    /// Finds `name` in the current scope only.
    #[must_use]
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.current().get(name)
    }

    /// The global scope.
    #[must_use]
    pub fn global(&self) -> &Scope {
        &self.scopes[0]
    }

    fn current(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}
