//! Comparison operations: `= < > <= >= eq? equal? not even? odd? zero?`.
//!
//! `= < > <= >=` are binary and numeric only; `eq?`/`equal?` compare
//! arbitrary values under identity and structural equality respectively.

use std::rc::Rc;

use crate::env::Environment;
use crate::error::{LispError, ARITY_ONE, ARITY_TWO};
use crate::value::{Builtin, Value};

fn as_number(function: &str, value: &Value, position: usize) -> Result<f64, LispError> {
    value
        .as_number()
        .ok_or_else(|| LispError::type_error(function, "number", value, position))
}

fn binary_numeric(
    name: &'static str,
    args: &[Value],
    op: impl Fn(f64, f64) -> bool,
) -> Result<Value, LispError> {
    match args {
        [a, b] => Ok(Value::Boolean(op(as_number(name, a, 0)?, as_number(name, b, 1)?))),
        _ => Err(LispError::arity(name, ARITY_TWO, args.len())),
    }
}

pub fn builtin_num_eq(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    binary_numeric("=", args, |a, b| a == b)
}

pub fn builtin_lt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    binary_numeric("<", args, |a, b| a < b)
}

pub fn builtin_gt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    binary_numeric(">", args, |a, b| a > b)
}

pub fn builtin_le(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    binary_numeric("<=", args, |a, b| a <= b)
}

pub fn builtin_ge(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    binary_numeric(">=", args, |a, b| a >= b)
}

/// Reference-or-value identity; see `Value::is_eq`.
pub fn builtin_eq_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a, b] => Ok(Value::Boolean(a.is_eq(b)?)),
        _ => Err(LispError::arity("eq?", ARITY_TWO, args.len())),
    }
}

/// Full structural equality; see `Value::is_equal`.
pub fn builtin_equal_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a, b] => Ok(Value::Boolean(a.is_equal(b)?)),
        _ => Err(LispError::arity("equal?", ARITY_TWO, args.len())),
    }
}

pub fn builtin_not(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a] => Ok(Value::Boolean(!a.is_truthy())),
        _ => Err(LispError::arity("not", ARITY_ONE, args.len())),
    }
}

fn as_integer(function: &str, value: &Value, position: usize) -> Result<i64, LispError> {
    let n = as_number(function, value, position)?;
    if n.floor() != n {
        return Err(LispError::type_error(function, "integer", value, position));
    }
    Ok(n as i64)
}

pub fn builtin_even_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a] => Ok(Value::Boolean(as_integer("even?", a, 0)? % 2 == 0)),
        _ => Err(LispError::arity("even?", ARITY_ONE, args.len())),
    }
}

pub fn builtin_odd_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a] => Ok(Value::Boolean(as_integer("odd?", a, 0)?.abs() % 2 == 1)),
        _ => Err(LispError::arity("odd?", ARITY_ONE, args.len())),
    }
}

pub fn builtin_zero_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a] => Ok(Value::Boolean(as_number("zero?", a, 0)? == 0.0)),
        _ => Err(LispError::arity("zero?", ARITY_ONE, args.len())),
    }
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("=", builtin_num_eq),
        ("<", builtin_lt),
        (">", builtin_gt),
        ("<=", builtin_le),
        (">=", builtin_ge),
        ("eq?", builtin_eq_p),
        ("equal?", builtin_equal_p),
        ("not", builtin_not),
        ("even?", builtin_even_p),
        ("odd?", builtin_odd_p),
        ("zero?", builtin_zero_p),
    ];
    for (name, func) in entries {
        env.define(*name, Value::Builtin(Builtin { name, func: *func }));
    }
}
