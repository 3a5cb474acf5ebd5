//! Arithmetic operations: `+ - * / abs expt quotient remainder modulo`.
//!
//! `+` and `*` are n-ary with identities 0 and 1. `-` and `/` only take
//! one or two arguments: unary negate/reciprocal, or binary
//! difference/quotient.

use std::rc::Rc;

use crate::env::Environment;
use crate::error::{LispError, ARITY_ONE_OR_TWO, ARITY_TWO};
use crate::value::{Builtin, Value};

fn as_number(function: &str, value: &Value, position: usize) -> Result<f64, LispError> {
    value
        .as_number()
        .ok_or_else(|| LispError::type_error(function, "number", value, position))
}

/// Returns the sum of all arguments; `(+)` is `0`.
pub fn builtin_add(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    let mut sum = 0.0;
    for (i, arg) in args.iter().enumerate() {
        sum += as_number("+", arg, i)?;
    }
    Ok(Value::Number(sum))
}

/// Unary negation or binary difference.
pub fn builtin_sub(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a] => Ok(Value::Number(-as_number("-", a, 0)?)),
        [a, b] => Ok(Value::Number(as_number("-", a, 0)? - as_number("-", b, 1)?)),
        _ => Err(LispError::arity("-", ARITY_ONE_OR_TWO, args.len())),
    }
}

/// Returns the product of all arguments; `(*)` is `1`.
pub fn builtin_mul(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    let mut product = 1.0;
    for (i, arg) in args.iter().enumerate() {
        product *= as_number("*", arg, i)?;
    }
    Ok(Value::Number(product))
}

/// Unary reciprocal or binary quotient.
pub fn builtin_div(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a] => {
            let n = as_number("/", a, 0)?;
            if n == 0.0 {
                return Err(LispError::runtime("/", "division by zero"));
            }
            Ok(Value::Number(1.0 / n))
        }
        [a, b] => {
            let x = as_number("/", a, 0)?;
            let y = as_number("/", b, 1)?;
            if y == 0.0 {
                return Err(LispError::runtime("/", "division by zero"));
            }
            Ok(Value::Number(x / y))
        }
        _ => Err(LispError::arity("/", ARITY_ONE_OR_TWO, args.len())),
    }
}

pub fn builtin_abs(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a] => Ok(Value::Number(as_number("abs", a, 0)?.abs())),
        _ => Err(LispError::arity("abs", crate::error::ARITY_ONE, args.len())),
    }
}

/// `expt base exp`; errors if `base` is `0` and `exp` is `<= 0`.
pub fn builtin_expt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [base, exp] => {
            let b = as_number("expt", base, 0)?;
            let e = as_number("expt", exp, 1)?;
            if b == 0.0 && e <= 0.0 {
                return Err(LispError::runtime("expt", "zero base to a non-positive exponent"));
            }
            Ok(Value::Number(b.powf(e)))
        }
        _ => Err(LispError::arity("expt", ARITY_TWO, args.len())),
    }
}

/// Truncated-toward-zero integer division.
pub fn builtin_quotient(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a, b] => {
            let x = as_number("quotient", a, 0)?;
            let y = as_number("quotient", b, 1)?;
            if y == 0.0 {
                return Err(LispError::runtime("quotient", "division by zero"));
            }
            Ok(Value::Number((x / y).trunc()))
        }
        _ => Err(LispError::arity("quotient", ARITY_TWO, args.len())),
    }
}

/// Remainder, taking the sign of the dividend.
pub fn builtin_remainder(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a, b] => {
            let x = as_number("remainder", a, 0)? as i64;
            let y = as_number("remainder", b, 1)? as i64;
            if y == 0 {
                return Err(LispError::runtime("remainder", "division by zero"));
            }
            Ok(Value::Number((x % y.abs()) as f64))
        }
        _ => Err(LispError::arity("remainder", ARITY_TWO, args.len())),
    }
}

/// Modulo, taking the sign of the divisor (floored division).
pub fn builtin_modulo(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a, b] => {
            let x = as_number("modulo", a, 0)? as i64;
            let y = as_number("modulo", b, 1)? as i64;
            if y == 0 {
                return Err(LispError::runtime("modulo", "division by zero"));
            }
            let mut result = x.abs() % y.abs();
            if x * y < 0 && result != 0 {
                result = y.abs() - result;
            }
            Ok(Value::Number(if y > 0 { result } else { -result } as f64))
        }
        _ => Err(LispError::arity("modulo", ARITY_TWO, args.len())),
    }
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("+", builtin_add),
        ("-", builtin_sub),
        ("*", builtin_mul),
        ("/", builtin_div),
        ("abs", builtin_abs),
        ("expt", builtin_expt),
        ("quotient", builtin_quotient),
        ("remainder", builtin_remainder),
        ("modulo", builtin_modulo),
    ];
    for (name, func) in entries {
        env.define(*name, Value::Builtin(Builtin { name, func: *func }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn add_identity_and_sum() {
        assert_eq!(builtin_add(&[], &env()).unwrap().as_number(), Some(0.0));
        assert_eq!(
            builtin_add(&[Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)], &env())
                .unwrap()
                .as_number(),
            Some(6.0)
        );
    }

    #[test]
    fn sub_unary_negates() {
        assert_eq!(builtin_sub(&[Value::Number(5.0)], &env()).unwrap().as_number(), Some(-5.0));
    }

    #[test]
    fn sub_rejects_more_than_two_args() {
        assert!(builtin_sub(&[Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)], &env()).is_err());
    }

    #[test]
    fn div_by_zero_is_an_error() {
        assert!(builtin_div(&[Value::Number(1.0), Value::Number(0.0)], &env()).is_err());
    }

    #[test]
    fn expt_zero_base_nonpositive_exp_errors() {
        assert!(builtin_expt(&[Value::Number(0.0), Value::Number(0.0)], &env()).is_err());
        assert_eq!(
            builtin_expt(&[Value::Number(2.0), Value::Number(10.0)], &env()).unwrap().as_number(),
            Some(1024.0)
        );
    }

    #[test]
    fn quotient_truncates_toward_zero() {
        assert_eq!(
            builtin_quotient(&[Value::Number(-7.0), Value::Number(2.0)], &env()).unwrap().as_number(),
            Some(-3.0)
        );
    }

    #[test]
    fn remainder_takes_sign_of_dividend() {
        assert_eq!(
            builtin_remainder(&[Value::Number(-7.0), Value::Number(3.0)], &env()).unwrap().as_number(),
            Some(-1.0)
        );
    }

    #[test]
    fn modulo_takes_sign_of_divisor() {
        assert_eq!(
            builtin_modulo(&[Value::Number(-7.0), Value::Number(3.0)], &env()).unwrap().as_number(),
            Some(2.0)
        );
        assert_eq!(
            builtin_modulo(&[Value::Number(7.0), Value::Number(-3.0)], &env()).unwrap().as_number(),
            Some(-2.0)
        );
    }
}
