//! Variable environment
//!
//! A stack of scopes. Scope 0 holds globals (request parameters and the
//! stdlib, which takes precedence on a name clash), scope 1 is the unit scope where function parameters and
//! implicitly assigned variables live, and every block pushes another scope.

use super::errors::{self, ErrorInfo};
use super::stdlib;
use super::types::{Val, VarKind};
use std::collections::HashMap;

/// Index of the unit scope
pub const UNIT_SCOPE: usize = 1;

/// A variable binding
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub value: Val,
    pub kind: VarKind,
}

#[derive(Debug, Clone)]
pub struct Env {
    scopes: Vec<HashMap<String, Binding>>,
}

impl Env {
    /// Create an environment with the given globals and the stdlib injected,
    /// plus an empty unit scope. A global named like a builtin is dropped.
    pub fn new(globals: HashMap<String, Val>) -> Self {
        let mut global_scope = HashMap::new();
        let mut builtins = HashMap::new();
        stdlib::inject_stdlib(&mut builtins);
        for (name, value) in globals.into_iter().chain(builtins) {
            global_scope.insert(
                name,
                Binding {
                    value,
                    kind: VarKind::Let,
                },
            );
        }

        Self {
            scopes: vec![global_scope, HashMap::new()],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Drop every scope above `depth`
    pub fn truncate(&mut self, depth: usize) {
        self.scopes.truncate(depth.max(1));
    }

    /// Look up a variable, innermost scope first
    pub fn get(&self, name: &str) -> Option<&Val> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .map(|binding| &binding.value)
    }

    /// Look up a variable in the unit scope only, ignoring block scopes
    pub fn get_unit(&self, name: &str) -> Option<&Val> {
        self.scopes
            .get(UNIT_SCOPE)
            .and_then(|scope| scope.get(name))
            .map(|binding| &binding.value)
    }

    pub fn get_binding_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
    }

    /// Declare a variable in the innermost scope
    pub fn declare(&mut self, name: &str, value: Val, kind: VarKind) -> Result<(), ErrorInfo> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or_else(|| ErrorInfo::new(errors::INTERNAL_ERROR, "No active scope"))?;

        if scope.contains_key(name) {
            return Err(ErrorInfo::new(
                errors::ALREADY_DECLARED,
                format!("Variable '{}' has already been declared", name),
            ));
        }

        scope.insert(name.to_string(), Binding { value, kind });
        Ok(())
    }

    /// Set an undeclared variable in the unit scope
    pub fn define_implicit(&mut self, name: &str, value: Val) {
        let idx = UNIT_SCOPE.min(self.scopes.len().saturating_sub(1));
        if let Some(scope) = self.scopes.get_mut(idx) {
            scope.insert(
                name.to_string(),
                Binding {
                    value,
                    kind: VarKind::Let,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut env = Env::new(hashmap! {"x".to_string() => Val::Num(1.0)});
        env.push_scope();
        env.declare("x", Val::Num(2.0), VarKind::Let).unwrap();
        assert_eq!(env.get("x"), Some(&Val::Num(2.0)));

        env.truncate(2);
        assert_eq!(env.get("x"), Some(&Val::Num(1.0)));
    }

    #[test]
    fn test_redeclare_in_same_scope_fails() {
        let mut env = Env::new(HashMap::new());
        env.declare("x", Val::Null, VarKind::Let).unwrap();
        let err = env.declare("x", Val::Null, VarKind::Const).unwrap_err();
        assert_eq!(err.code, errors::ALREADY_DECLARED);
    }

    #[test]
    fn test_implicit_definition_lands_in_unit_scope() {
        let mut env = Env::new(HashMap::new());
        env.push_scope();
        env.define_implicit("y", Val::Bool(true));
        env.truncate(UNIT_SCOPE + 1);
        assert_eq!(env.get("y"), Some(&Val::Bool(true)));
    }

    #[test]
    fn test_stdlib_is_visible() {
        let env = Env::new(HashMap::new());
        assert!(matches!(env.get("Math"), Some(Val::Obj(_))));
        assert!(matches!(env.get("String"), Some(Val::NativeFunc(_))));
    }
}
