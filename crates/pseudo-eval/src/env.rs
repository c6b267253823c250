//! Scoped variable environment for the interpreter.

use pseudo_types::Value;
use std::collections::BTreeMap;

/// A single call frame's bindings.
#[derive(Debug, Clone, Default)]
struct Scope {
    bindings: BTreeMap<String, Value>,
}

/// Variable environment as a stack of scopes.
///
/// The bottom scope is the context's top level and is never popped. Each
/// function call pushes a frame; lookups search from the innermost frame
/// outward and `define` always writes to the innermost frame, so popping a
/// frame restores exactly the bindings that existed before the call.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    /// Create an environment with only the top-level scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Enter a call frame.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Leave the innermost call frame. The top-level scope stays.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of scopes, top level included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Bind a variable in the innermost scope.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.bindings.insert(name.to_string(), value);
        }
    }

    /// Look up a variable, innermost scope first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(name))
    }

    /// Drop every binding and every frame.
    pub fn clear(&mut self) {
        self.scopes.truncate(1);
        if let Some(top) = self.scopes.first_mut() {
            top.bindings.clear();
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_shadows_and_restores() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));

        env.push_scope();
        assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
        env.define("x", Value::Number(2.0));
        env.define("y", Value::Bool(true));
        assert_eq!(env.get("x"), Some(&Value::Number(2.0)));
        env.pop_scope();

        assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_top_level_is_never_popped() {
        let mut env = Environment::new();
        env.pop_scope();
        env.pop_scope();
        assert_eq!(env.depth(), 1);
        env.define("a", Value::Null);
        assert_eq!(env.get("a"), Some(&Value::Null));
    }

    #[test]
    fn test_clear() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.push_scope();
        env.push_scope();
        env.clear();
        assert_eq!(env.depth(), 1);
        assert_eq!(env.get("a"), None);
    }
}
