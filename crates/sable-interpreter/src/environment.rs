//! Runtime variable bindings.
//!
//! Environments form a parent chain parallel to the lexical scopes of the
//! program. Each block and each call gets a fresh leaf; closures keep their
//! defining environment alive through the shared [`EnvRef`].

use crate::value::Value;
use fxhash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, mutable handle to an environment.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One level of bindings.
#[derive(Debug, Default)]
pub struct Environment {
    values: FxHashMap<String, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    /// Creates a root environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment nested in `parent`.
    #[must_use]
    pub fn with_parent(parent: EnvRef) -> Self {
        Self {
            values: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Wraps this environment in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Binds `name` here, shadowing any outer binding and replacing any
    /// binding of the same name at this level.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Reads the nearest binding of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.values.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref()?.borrow().get(name),
        }
    }

    /// Overwrites the nearest binding of `name`.
    ///
    /// Returns `false` if no binding exists; nothing is created.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }

    /// Returns `true` if `name` is bound at this level.
    #[must_use]
    pub fn contains_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("x", Value::Integer(1));
        assert_eq!(env.get("x"), Some(Value::Integer(1)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_shadowing_leaves_parent_untouched() {
        let global = Environment::new().into_ref();
        global.borrow_mut().define("x", Value::Integer(1));

        let mut inner = Environment::with_parent(Rc::clone(&global));
        inner.define("x", Value::Integer(2));

        assert_eq!(inner.get("x"), Some(Value::Integer(2)));
        assert_eq!(global.borrow().get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn test_assign_walks_to_nearest_binding() {
        let global = Environment::new().into_ref();
        global.borrow_mut().define("count", Value::Integer(0));

        let mut inner = Environment::with_parent(Rc::clone(&global));
        assert!(inner.assign("count", Value::Integer(5)));
        assert!(!inner.contains_local("count"));
        assert_eq!(global.borrow().get("count"), Some(Value::Integer(5)));
    }

    #[test]
    fn test_assign_never_creates() {
        let mut env = Environment::new();
        assert!(!env.assign("ghost", Value::Null));
        assert_eq!(env.get("ghost"), None);
    }
}
