//! Demonstration host bindings used by the `milisp` binary
//!
//! Numbers are true when non-zero, texts and lists when non-empty, `nil`
//! never. Comparisons return 1 or 0.

use milisp::interp::{expect_arity, expect_min_arity};
use milisp::{Datum, Env, EvalError, Node, Value, eval_data, eval_number, eval_text, evaluate};

type HostResult = Result<Value<Datum, Env<Datum>>, EvalError>;

fn data(datum: impl Into<Datum>) -> HostResult {
    Ok(Value::Data(datum.into()))
}

fn truthy(datum: &Datum) -> bool {
    match datum {
        Datum::Nil => false,
        Datum::Number(n) => *n != 0.0,
        Datum::Text(s) => !s.is_empty(),
        Datum::List(items) => !items.is_empty(),
    }
}

fn flag(value: bool) -> Datum {
    Datum::Number(if value { 1.0 } else { 0.0 })
}

/// Fold numeric arguments left to right; `unary` handles a single argument
fn arithmetic(
    name: &'static str,
    unary: fn(f64) -> f64,
    combine: fn(f64, f64) -> f64,
) -> impl Fn(&mut Env<Datum>, &[Node]) -> HostResult {
    move |env: &mut Env<Datum>, args: &[Node]| {
        expect_min_arity(name, args, 1)?;
        let first = eval_number(env, &args[0])?;
        if args.len() == 1 {
            return data(unary(first));
        }
        let mut acc = first;
        for arg in &args[1..] {
            acc = combine(acc, eval_number(env, arg)?);
        }
        data(acc)
    }
}

fn comparison(
    name: &'static str,
    holds: fn(f64, f64) -> bool,
) -> impl Fn(&mut Env<Datum>, &[Node]) -> HostResult {
    move |env: &mut Env<Datum>, args: &[Node]| {
        expect_arity(name, args, 2)?;
        let a = eval_number(env, &args[0])?;
        let b = eval_number(env, &args[1])?;
        data(flag(holds(a, b)))
    }
}

/// Build the demonstration environment
pub fn demo_env() -> Env<Datum> {
    let mut env: Env<Datum> = Env::new();

    // (prog e1 e2 ...) evaluates in order, yields the last result
    env.define_op("prog", |env, args| {
        let mut last = Value::Data(Datum::Nil);
        for arg in args {
            last = evaluate(env, arg)?;
        }
        Ok(last)
    });

    // (set "name" value)
    env.define_op("set", |env, args| {
        expect_arity("set", args, 2)?;
        let name = eval_text(env, &args[0])?;
        let value = evaluate(env, &args[1])?;
        env.bind(name, value.clone());
        Ok(value)
    });

    // (loop "i" first last body): body runs with i bound to first..=last
    env.define_op("loop", |env, args| {
        expect_arity("loop", args, 4)?;
        let var = eval_text(env, &args[0])?;
        let first = eval_number(env, &args[1])?.trunc() as i64;
        let last = eval_number(env, &args[2])?.trunc() as i64;
        let mut result = Value::Data(Datum::Nil);
        for i in first..=last {
            env.define(var.as_str(), i as f64);
            result = evaluate(env, &args[3])?;
        }
        Ok(result)
    });

    // (if cond then [else]) evaluates only the chosen branch
    env.define_op("if", |env, args| {
        if !(2..=3).contains(&args.len()) {
            return Err(EvalError::Arity {
                operation: "if".to_owned(),
                expected: "2 or 3".to_owned(),
                found: args.len(),
            });
        }
        if truthy(&eval_data(env, &args[0])?) {
            evaluate(env, &args[1])
        } else if let Some(otherwise) = args.get(2) {
            evaluate(env, otherwise)
        } else {
            data(Datum::Nil)
        }
    });

    // (and a b ...) / (or a b ...) stop at the first deciding argument
    env.define_op("and", |env, args| {
        for arg in args {
            if !truthy(&eval_data(env, arg)?) {
                return data(flag(false));
            }
        }
        data(flag(true))
    });
    env.define_op("or", |env, args| {
        for arg in args {
            if truthy(&eval_data(env, arg)?) {
                return data(flag(true));
            }
        }
        data(flag(false))
    });

    env.define_op("+", arithmetic("+", |a| a, |a, b| a + b));
    env.define_op("-", arithmetic("-", |a| -a, |a, b| a - b));
    env.define_op("*", arithmetic("*", |a| a, |a, b| a * b));
    env.define_op("/", arithmetic("/", |a| 1.0 / a, |a, b| a / b));
    env.define_op("<", comparison("<", |a, b| a < b));
    env.define_op("=", comparison("=", |a, b| a == b));

    // (concat a b ...) joins the textual form of every argument
    env.define_op("concat", |env, args| {
        let mut out = String::new();
        for arg in args {
            out.push_str(&eval_data(env, arg)?.to_string());
        }
        data(out)
    });

    // (list a b ...)
    env.define_op("list", |env, args| {
        let items = milisp::interp::eval_all(env, args)?;
        data(items)
    });

    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use milisp::eval_code;

    fn run(source: &str) -> Datum {
        let mut env = demo_env();
        eval_code(&mut env, source)
            .expect("evaluation")
            .into_data()
            .expect("datum")
    }

    #[test]
    fn test_factorial_loop() {
        let source = r#"
(prog
    (set "x" 1)
    (loop "i" 1 5 (set "x" (* x i)))
    x)
"#;
        assert_eq!(run(source), Datum::Number(120.0));
    }

    #[test]
    fn test_if_only_evaluates_chosen_branch() {
        assert_eq!(run(r#"(if (< 1 2) "yes" unbound)"#), Datum::from("yes"));
        assert_eq!(run("(if 0 1)"), Datum::Nil);
    }

    #[test]
    fn test_and_short_circuits() {
        assert_eq!(run("(and 1 0 unbound)"), Datum::Number(0.0));
        assert_eq!(run("(or 0 1 unbound)"), Datum::Number(1.0));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(run("(- 5)"), Datum::Number(-5.0));
        assert_eq!(run("(- 10 2 3)"), Datum::Number(5.0));
        assert_eq!(run("(/ 9 3)"), Datum::Number(3.0));
        assert_eq!(run(r#"(+ "2" 3)"#), Datum::Number(5.0));
    }

    #[test]
    fn test_concat_and_list() {
        assert_eq!(run(r#"(concat "n=" 3)"#), Datum::from("n=3"));
        assert_eq!(
            run("(list 1 2)"),
            Datum::List(vec![Datum::Number(1.0), Datum::Number(2.0)])
        );
    }

    #[test]
    fn test_arity_errors() {
        let mut env = demo_env();
        let err = eval_code(&mut env, "(set \"x\")").unwrap_err();
        assert!(matches!(err, EvalError::Arity { found: 1, .. }));
    }
}
