//! Runtime values for the evaluator

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ast::Node;
use crate::diagnostics::EvalError;

/// A host-supplied callable
///
/// It receives the environment plus the form's arguments, unevaluated, and
/// alone decides which arguments to evaluate, in which order and how many
/// times.
pub struct Operation<T, E: ?Sized> {
    func: Rc<dyn Fn(&mut E, &[Node]) -> Result<Value<T, E>, EvalError>>,
}

impl<T, E: ?Sized> Operation<T, E> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&mut E, &[Node]) -> Result<Value<T, E>, EvalError> + 'static,
    {
        Self {
            func: Rc::new(func),
        }
    }

    pub fn call(&self, env: &mut E, args: &[Node]) -> Result<Value<T, E>, EvalError> {
        (self.func)(env, args)
    }

    /// Whether both handles refer to the same callable
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl<T, E: ?Sized> Clone for Operation<T, E> {
    fn clone(&self) -> Self {
        Self {
            func: Rc::clone(&self.func),
        }
    }
}

impl<T, E: ?Sized> fmt::Debug for Operation<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<operation>")
    }
}

/// What a symbol is bound to, and what evaluation produces
pub enum Value<T, E: ?Sized> {
    /// Plain host data, passed through untouched
    Data(T),
    /// Callable host operation
    Operation(Operation<T, E>),
}

impl<T, E: ?Sized> Value<T, E> {
    /// Wrap a closure as an operation value
    pub fn op<F>(func: F) -> Self
    where
        F: Fn(&mut E, &[Node]) -> Result<Value<T, E>, EvalError> + 'static,
    {
        Value::Operation(Operation::new(func))
    }

    pub fn as_data(&self) -> Option<&T> {
        match self {
            Value::Data(d) => Some(d),
            Value::Operation(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Value::Data(d) => Some(d),
            Value::Operation(_) => None,
        }
    }

    pub fn as_operation(&self) -> Option<&Operation<T, E>> {
        match self {
            Value::Operation(op) => Some(op),
            Value::Data(_) => None,
        }
    }

    pub fn is_operation(&self) -> bool {
        matches!(self, Value::Operation(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Data(_) => "data",
            Value::Operation(_) => "operation",
        }
    }
}

impl<T: Clone, E: ?Sized> Clone for Value<T, E> {
    fn clone(&self) -> Self {
        match self {
            Value::Data(d) => Value::Data(d.clone()),
            Value::Operation(op) => Value::Operation(op.clone()),
        }
    }
}

impl<T: fmt::Debug, E: ?Sized> fmt::Debug for Value<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Data(d) => f.debug_tuple("Data").field(d).finish(),
            Value::Operation(op) => write!(f, "{:?}", op),
        }
    }
}

impl<T: fmt::Display, E: ?Sized> fmt::Display for Value<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Data(d) => write!(f, "{}", d),
            Value::Operation(op) => write!(f, "{:?}", op),
        }
    }
}

impl<T: PartialEq, E: ?Sized> PartialEq for Value<T, E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Operation(a), Value::Operation(b)) => a.same(b),
            _ => false,
        }
    }
}

/// Ready-made host datum for environments that need nothing richer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Datum {
    #[default]
    Nil,
    Number(f64),
    Text(String),
    List(Vec<Datum>),
}

impl Datum {
    pub fn type_name(&self) -> &'static str {
        match self {
            Datum::Nil => "nil",
            Datum::Number(_) => "number",
            Datum::Text(_) => "text",
            Datum::List(_) => "list",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Datum::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Datum::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Datum]> {
        match self {
            Datum::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Datum::Nil)
    }

    /// Numeric view: numbers as is, text when it parses as a number
    pub fn to_number(&self) -> Result<f64, EvalError> {
        match self {
            Datum::Number(n) => Ok(*n),
            Datum::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| EvalError::type_mismatch("number", format!("text {:?}", s))),
            other => Err(EvalError::type_mismatch("number", other.type_name())),
        }
    }
}

impl From<f64> for Datum {
    fn from(n: f64) -> Self {
        Datum::Number(n)
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::Text(s)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Text(s.to_owned())
    }
}

impl From<Vec<Datum>> for Datum {
    fn from(items: Vec<Datum>) -> Self {
        Datum::List(items)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Nil => write!(f, "nil"),
            Datum::Number(n) => write!(f, "{}", n),
            Datum::Text(s) => write!(f, "{}", s),
            Datum::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
