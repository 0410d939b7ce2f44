use criterion::{Criterion, black_box, criterion_group, criterion_main};
use milisp::{Datum, Env, Value, eval_number, evaluate, parse};

const PROGRAM: &str = r#"
# sum of products, nested a few levels deep
(+ (* 1 2) (* 3 (+ 4 5)) (* (+ 6 7) (+ 8 (* 9 10))) x "11")
"#;

fn arithmetic_env() -> Env<Datum> {
    let mut env: Env<Datum> = Env::new();
    env.define("x", 12.0);
    env.define_op("+", |env, args| {
        let mut acc = 0.0;
        for arg in args {
            acc += eval_number(env, arg)?;
        }
        Ok(Value::Data(Datum::Number(acc)))
    });
    env.define_op("*", |env, args| {
        let mut acc = 1.0;
        for arg in args {
            acc *= eval_number(env, arg)?;
        }
        Ok(Value::Data(Datum::Number(acc)))
    });
    env
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| parse(black_box(PROGRAM))));
}

fn bench_evaluate(c: &mut Criterion) {
    let ast = parse(PROGRAM).expect("benchmark program parses");
    let mut env = arithmetic_env();
    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(&mut env, black_box(&ast)))
    });
}

criterion_group!(benches, bench_parse, bench_evaluate);
criterion_main!(benches);
