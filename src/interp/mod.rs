//! Tree-walking evaluator over host-supplied environments
//!
//! The core knows no operators. Every form is dispatched to an operation the
//! host bound in its [`Environment`].

pub mod env;
pub mod eval;
pub mod value;

pub use env::{Env, Environment};
pub use eval::{
    EvalResult, eval_all, eval_code, eval_data, eval_number, eval_text, evaluate, expect_arity,
    expect_min_arity,
};
pub use value::{Datum, Operation, Value};
