// ABOUTME: Environment module for managing variable bindings and scopes

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::LispError;
use crate::value::Value;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Binds `name` in THIS frame, overwriting any existing binding in
    /// the same frame. There is no surface form to mutate a binding in
    /// an enclosing frame; `define` at top level is how rebinding works.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Looks up a symbol in this frame, then each parent in turn.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    pub fn lookup(&self, name: &str) -> Result<Value, LispError> {
        self.get(name)
            .ok_or_else(|| LispError::UndefinedSymbol(name.to_string()))
    }

    /// Builds a child frame binding `names` positionally to `values`.
    /// Fails if the two sequences differ in length.
    pub fn extend(self: &Rc<Self>, names: &[String], values: &[Value]) -> Result<Rc<Environment>, LispError> {
        if names.len() != values.len() {
            return Err(LispError::arity(
                "lambda",
                names.len().to_string(),
                values.len(),
            ));
        }
        let child = Environment::with_parent(Rc::clone(self));
        for (name, value) in names.iter().zip(values.iter()) {
            child.define(name.clone(), value.clone());
        }
        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let env = Environment::new();
        env.define("x", Value::Number(42.0));

        match env.get("x") {
            Some(Value::Number(n)) => assert_eq!(n, 42.0),
            _ => panic!("Expected Number(42.0)"),
        }
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
        assert!(env.lookup("undefined").is_err());
    }

    #[test]
    fn test_shadowing() {
        let parent = Environment::new();
        parent.define("x", Value::Number(42.0));

        let child = Environment::with_parent(parent);
        child.define("x", Value::Number(100.0));

        match child.get("x") {
            Some(Value::Number(n)) => assert_eq!(n, 100.0),
            _ => panic!("Expected Number(100.0)"),
        }
    }

    #[test]
    fn test_parent_lookup() {
        let parent = Environment::new();
        parent.define("x", Value::Number(42.0));

        let child = Environment::with_parent(parent);

        match child.get("x") {
            Some(Value::Number(n)) => assert_eq!(n, 42.0),
            _ => panic!("Expected Number(42.0)"),
        }
    }

    #[test]
    fn test_multiple_levels() {
        let grandparent = Environment::new();
        grandparent.define("a", Value::Number(1.0));

        let parent = Environment::with_parent(grandparent);
        parent.define("b", Value::Number(2.0));

        let child = Environment::with_parent(parent);
        child.define("c", Value::Number(3.0));

        match child.get("a") {
            Some(Value::Number(n)) => assert_eq!(n, 1.0),
            _ => panic!("Expected Number(1.0)"),
        }
        match child.get("b") {
            Some(Value::Number(n)) => assert_eq!(n, 2.0),
            _ => panic!("Expected Number(2.0)"),
        }
        match child.get("c") {
            Some(Value::Number(n)) => assert_eq!(n, 3.0),
            _ => panic!("Expected Number(3.0)"),
        }
    }

    #[test]
    fn extend_binds_params_positionally() {
        let root = Environment::new();
        let child = root
            .extend(&["x".to_string(), "y".to_string()], &[Value::Number(1.0), Value::Number(2.0)])
            .unwrap();
        assert_eq!(child.get("x").unwrap().as_number(), Some(1.0));
        assert_eq!(child.get("y").unwrap().as_number(), Some(2.0));
    }

    #[test]
    fn extend_rejects_arity_mismatch() {
        let root = Environment::new();
        assert!(root.extend(&["x".to_string()], &[]).is_err());
    }
}
