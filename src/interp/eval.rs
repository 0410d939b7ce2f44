//! Tree-walking evaluator

use super::env::Environment;
use super::value::{Datum, Value};
use crate::ast::Node;
use crate::diagnostics::EvalError;
use crate::parser;

/// Result of evaluating a node in environment `E`
pub type EvalResult<E> = Result<Value<<E as Environment>::Datum, E>, EvalError>;

/// Evaluate `node` in `env`
///
/// - numbers and texts evaluate to themselves, converted to host data
/// - a symbol evaluates to its binding
/// - a form evaluates its first child once to get an operation, then calls
///   it with the remaining children unevaluated
///
/// Recursion follows the nesting depth of the tree.
pub fn evaluate<E>(env: &mut E, node: &Node) -> EvalResult<E>
where
    E: Environment + ?Sized,
{
    match node {
        Node::Number(n) => Ok(Value::Data(<E::Datum as From<f64>>::from(*n))),
        Node::Text(s) => Ok(Value::Data(<E::Datum as From<String>>::from(s.clone()))),
        Node::Symbol(name) => env.lookup(name).ok_or_else(|| EvalError::UnboundSymbol {
            name: name.clone(),
        }),
        Node::List(children) => {
            let (head, args) = children.split_first().ok_or(EvalError::EmptyForm)?;
            match evaluate(env, head)? {
                Value::Operation(op) => {
                    tracing::trace!(operation = %head, args = args.len(), "dispatch");
                    op.call(env, args)
                }
                Value::Data(_) => Err(EvalError::NotCallable {
                    form: head.to_string(),
                }),
            }
        }
    }
}

/// Evaluate and insist on plain data
pub fn eval_data<E>(env: &mut E, node: &Node) -> Result<E::Datum, EvalError>
where
    E: Environment + ?Sized,
{
    match evaluate(env, node)? {
        Value::Data(d) => Ok(d),
        Value::Operation(_) => Err(EvalError::type_mismatch(
            "data",
            format!("operation `{}`", node),
        )),
    }
}

/// Evaluate every node in order, stopping at the first failure
pub fn eval_all<E>(env: &mut E, nodes: &[Node]) -> Result<Vec<E::Datum>, EvalError>
where
    E: Environment + ?Sized,
{
    nodes.iter().map(|node| eval_data(env, node)).collect()
}

/// Evaluate to a number; numeric text is accepted
pub fn eval_number<E>(env: &mut E, node: &Node) -> Result<f64, EvalError>
where
    E: Environment<Datum = Datum> + ?Sized,
{
    eval_data(env, node)?.to_number()
}

/// Evaluate to text
pub fn eval_text<E>(env: &mut E, node: &Node) -> Result<String, EvalError>
where
    E: Environment<Datum = Datum> + ?Sized,
{
    match eval_data(env, node)? {
        Datum::Text(s) => Ok(s),
        other => Err(EvalError::type_mismatch("text", other.type_name())),
    }
}

/// Parse and evaluate in one go, for code that runs once
pub fn eval_code<E>(env: &mut E, source: &str) -> EvalResult<E>
where
    E: Environment + ?Sized,
{
    let node = parser::parse(source)?;
    evaluate(env, &node)
}

/// Check that an operation received exactly `expected` arguments
pub fn expect_arity(operation: &str, args: &[Node], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::Arity {
            operation: operation.to_owned(),
            expected: expected.to_string(),
            found: args.len(),
        })
    }
}

/// Check that an operation received at least `min` arguments
pub fn expect_min_arity(operation: &str, args: &[Node], min: usize) -> Result<(), EvalError> {
    if args.len() >= min {
        Ok(())
    } else {
        Err(EvalError::Arity {
            operation: operation.to_owned(),
            expected: format!("at least {}", min),
            found: args.len(),
        })
    }
}
