//! Environments: where the evaluator looks symbols up

use indexmap::IndexMap;
use std::fmt;

use super::value::{Operation, Value};
use crate::ast::Node;
use crate::diagnostics::EvalError;

/// Symbol table consulted by the evaluator
///
/// The evaluator only ever calls [`Environment::lookup`]; how bindings are
/// stored, scoped or mutated is up to the implementor. Literal numbers and
/// texts are turned into host data through `From<f64>` and `From<String>`.
pub trait Environment {
    type Datum: From<f64> + From<String>;

    /// The value bound to `name`, or `None` when unbound
    fn lookup(&self, name: &str) -> Option<Value<Self::Datum, Self>>;
}

/// Insertion-ordered binding table
pub struct Env<T> {
    bindings: IndexMap<String, Value<T, Env<T>>>,
}

impl<T> Env<T> {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Bind `name` to plain data, replacing any previous binding
    pub fn define(&mut self, name: impl Into<String>, datum: impl Into<T>) {
        self.bindings.insert(name.into(), Value::Data(datum.into()));
    }

    /// Bind `name` to a host operation
    pub fn define_op<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&mut Env<T>, &[Node]) -> Result<Value<T, Env<T>>, EvalError> + 'static,
    {
        self.bindings
            .insert(name.into(), Value::Operation(Operation::new(func)));
    }

    /// Bind `name` to an arbitrary value
    pub fn bind(&mut self, name: impl Into<String>, value: Value<T, Env<T>>) {
        self.bindings.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value<T, Env<T>>> {
        self.bindings.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value<T, Env<T>>> {
        self.bindings.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bound names in definition order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<T: Clone> Env<T> {
    /// Copy of this environment for a nested scope; writes to the child
    /// never reach the parent.
    pub fn child(&self) -> Self {
        Self {
            bindings: self.bindings.clone(),
        }
    }
}

impl<T> Default for Env<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + From<f64> + From<String>> Environment for Env<T> {
    type Datum = T;

    fn lookup(&self, name: &str) -> Option<Value<T, Self>> {
        self.bindings.get(name).cloned()
    }
}

impl<T: fmt::Debug> fmt::Debug for Env<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.bindings.iter()).finish()
    }
}

impl<T, N: Into<String>> Extend<(N, Value<T, Env<T>>)> for Env<T> {
    fn extend<I: IntoIterator<Item = (N, Value<T, Env<T>>)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.bind(name, value);
        }
    }
}

impl<T, N: Into<String>> FromIterator<(N, Value<T, Env<T>>)> for Env<T> {
    fn from_iter<I: IntoIterator<Item = (N, Value<T, Env<T>>)>>(iter: I) -> Self {
        let mut env = Env::new();
        env.extend(iter);
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Datum;

    #[test]
    fn test_child_is_isolated() {
        let mut parent: Env<Datum> = Env::new();
        parent.define("x", 1.0);
        let mut child = parent.child();
        child.define("x", 2.0);
        child.define("y", 3.0);
        assert_eq!(parent.lookup("x"), Some(Value::Data(Datum::Number(1.0))));
        assert!(!parent.contains("y"));
        assert_eq!(child.lookup("x"), Some(Value::Data(Datum::Number(2.0))));
    }

    #[test]
    fn test_names_keep_definition_order() {
        let mut env: Env<Datum> = Env::new();
        env.define("b", 1.0);
        env.define("a", 2.0);
        env.define_op("c", |_, _| Ok(Value::Data(Datum::Nil)));
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        env.remove("a");
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_from_iterator() {
        let env: Env<Datum> = [("n", Value::Data(Datum::Number(4.0)))]
            .into_iter()
            .collect();
        assert!(env.get("n").is_some_and(|v| !v.is_operation()));
    }
}
