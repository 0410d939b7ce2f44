//! milisp: a minimal host-extensible expression language
//!
//! The language has parenthesised forms, numbers, quoted texts, symbols and
//! `#` comments, and nothing else. What any symbol means, including things
//! like `if` or `loop`, is decided by the host through the environment it
//! hands to the evaluator.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Parser → Node → evaluate(env, node) → Value
//! ```
//!
//! # Example
//!
//! ```
//! use milisp::{Datum, Env, Value, eval_number, evaluate, parse};
//!
//! let mut env: Env<Datum> = Env::new();
//! env.define("x", 1.0);
//! env.define_op("+", |env, args| {
//!     let mut sum = 0.0;
//!     for arg in args {
//!         sum += eval_number(env, arg)?;
//!     }
//!     Ok(Value::Data(Datum::Number(sum)))
//! });
//!
//! let ast = parse("(+ x 2)").unwrap();
//! let result = evaluate(&mut env, &ast).unwrap();
//! assert_eq!(result, Value::Data(Datum::Number(3.0)));
//! ```

pub mod ast;
pub mod common;
pub mod config;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;

// Re-exports for convenience
pub use ast::Node;
pub use diagnostics::{EvalError, LexError, LispError};
pub use interp::{
    Datum, Env, Environment, Operation, Value, eval_code, eval_data, eval_number, eval_text,
    evaluate,
};
pub use lexer::{Token, TokenKind, lex, tokenize};
pub use parser::{parse, parse_tokens};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
