//! Abstract Syntax Tree for milisp
//!
//! A tree is built once by the parser and only read afterwards, so one tree
//! can be evaluated any number of times, against different environments and
//! from several threads at once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of the syntax tree
///
/// A non-empty `List` is a form: by convention its first child names the
/// operation and the remaining children are that operation's arguments,
/// passed unevaluated. Symbols carry no meaning of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Number(f64),
    Text(String),
    Symbol(String),
    List(Vec<Node>),
}

impl Node {
    pub fn symbol(name: impl Into<String>) -> Self {
        Node::Symbol(name.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn list(children: impl IntoIterator<Item = Node>) -> Self {
        Node::List(children.into_iter().collect())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Node::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(children) => Some(children),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Nesting depth: leaves are 0, `()` and `(a)` are 1
    pub fn depth(&self) -> usize {
        match self {
            Node::List(children) => 1 + children.iter().map(Node::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Number(n)
    }
}

/// Renders surface syntax. Parsing the output of a parsed tree gives the
/// same tree back.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{}", n),
            Node::Symbol(s) => write!(f, "{}", s),
            Node::Text(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "\"")
            }
            Node::List(children) => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
