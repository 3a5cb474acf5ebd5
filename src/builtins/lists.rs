//! Pair/list operations: `cons car cdr list length append map filter reduce`.

use std::rc::Rc;

use crate::env::Environment;
use crate::error::{LispError, ARITY_ONE, ARITY_TWO};
use crate::eval::call_procedure;
use crate::value::{Builtin, Value};

pub fn builtin_cons(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [a, d] => Ok(Value::cons(a.clone(), d.clone())),
        _ => Err(LispError::arity("cons", ARITY_TWO, args.len())),
    }
}

pub fn builtin_car(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [Value::Pair(cell)] => Ok(cell.car.clone()),
        [other] => Err(LispError::type_error("car", "pair", other, 0)),
        _ => Err(LispError::arity("car", ARITY_ONE, args.len())),
    }
}

pub fn builtin_cdr(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [Value::Pair(cell)] => Ok(cell.cdr.clone()),
        [other] => Err(LispError::type_error("cdr", "pair", other, 0)),
        _ => Err(LispError::arity("cdr", ARITY_ONE, args.len())),
    }
}

/// `(list v...)`; `(list)` is `Nil`.
pub fn builtin_list(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    Ok(Value::list(args.to_vec()))
}

/// `0` for `Nil`, count of pairs otherwise; an error on non-lists.
pub fn builtin_length(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [value] => {
            if !value.is_list() {
                return Err(LispError::type_error("length", "list", value, 0));
            }
            let mut count = 0i64;
            let mut cur = value.clone();
            while let Value::Pair(cell) = cur {
                count += 1;
                cur = cell.cdr;
            }
            Ok(Value::Number(count as f64))
        }
        _ => Err(LispError::arity("length", ARITY_ONE, args.len())),
    }
}

/// Concatenates proper lists; `Nil` is the identity.
pub fn builtin_append(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.is_empty() {
        return Ok(Value::Nil);
    }
    let mut elements = Vec::new();
    for (i, arg) in args[..args.len() - 1].iter().enumerate() {
        if !arg.is_list() {
            return Err(LispError::type_error("append", "list", arg, i));
        }
        elements.extend(arg.to_vector()?);
    }
    let tail = args.last().unwrap().clone();
    let mut result = tail;
    for item in elements.into_iter().rev() {
        result = Value::cons(item, result);
    }
    Ok(result)
}

/// Applies `p` to each element of `l` in order, collecting results.
pub fn builtin_map(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [proc, list] => {
            if !proc.is_procedure() {
                return Err(LispError::type_error("map", "procedure", proc, 0));
            }
            let items = list
                .to_vector()
                .map_err(|_| LispError::type_error("map", "list", list, 1))?;
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(call_procedure(proc, &[item], env)?);
            }
            Ok(Value::list(out))
        }
        _ => Err(LispError::arity("map", ARITY_TWO, args.len())),
    }
}

/// Retains elements of `l` for which `p` returns a truthy value.
pub fn builtin_filter(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [proc, list] => {
            if !proc.is_procedure() {
                return Err(LispError::type_error("filter", "procedure", proc, 0));
            }
            let items = list
                .to_vector()
                .map_err(|_| LispError::type_error("filter", "list", list, 1))?;
            let mut out = Vec::new();
            for item in items {
                if call_procedure(proc, &[item.clone()], env)?.is_truthy() {
                    out.push(item);
                }
            }
            Ok(Value::list(out))
        }
        _ => Err(LispError::arity("filter", ARITY_TWO, args.len())),
    }
}

/// Right fold: `reduce(p,[x]) = x`, `reduce(p,[x,y,...]) = p(x, reduce(p,[y,...]))`.
pub fn builtin_reduce(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [proc, list] => {
            if !proc.is_procedure() {
                return Err(LispError::type_error("reduce", "procedure", proc, 0));
            }
            let items = list
                .to_vector()
                .map_err(|_| LispError::type_error("reduce", "list", list, 1))?;
            if items.is_empty() {
                return Err(LispError::runtime("reduce", "cannot reduce an empty list"));
            }
            reduce_rec(proc, &items, env)
        }
        _ => Err(LispError::arity("reduce", ARITY_TWO, args.len())),
    }
}

fn reduce_rec(proc: &Value, items: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    match items {
        [x] => Ok(x.clone()),
        [x, rest @ ..] => {
            let folded_rest = reduce_rec(proc, rest, env)?;
            call_procedure(proc, &[x.clone(), folded_rest], env)
        }
        [] => Err(LispError::runtime("reduce", "cannot reduce an empty list")),
    }
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("cons", builtin_cons),
        ("car", builtin_car),
        ("cdr", builtin_cdr),
        ("list", builtin_list),
        ("length", builtin_length),
        ("append", builtin_append),
        ("map", builtin_map),
        ("filter", builtin_filter),
        ("reduce", builtin_reduce),
    ];
    for (name, func) in entries {
        env.define(*name, Value::Builtin(Builtin { name, func: *func }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::new_root_environment;

    fn env() -> Rc<Environment> {
        new_root_environment()
    }

    #[test]
    fn car_and_cdr_of_cons() {
        let env = env();
        let cell = builtin_cons(&[Value::Number(1.0), Value::Number(2.0)], &env).unwrap();
        assert_eq!(builtin_car(&[cell.clone()], &env).unwrap().as_number(), Some(1.0));
        assert_eq!(builtin_cdr(&[cell], &env).unwrap().as_number(), Some(2.0));
    }

    #[test]
    fn length_of_nil_is_zero() {
        let env = env();
        assert_eq!(builtin_length(&[Value::Nil], &env).unwrap().as_number(), Some(0.0));
    }

    #[test]
    fn length_rejects_non_list() {
        let env = env();
        assert!(builtin_length(&[Value::Number(1.0)], &env).is_err());
    }

    #[test]
    fn append_treats_nil_as_identity() {
        let env = env();
        let list = Value::list(vec![Value::Number(1.0)]);
        let result = builtin_append(&[Value::Nil, list.clone()], &env).unwrap();
        assert_eq!(result.write_text(), "(1)");
        let result2 = builtin_append(&[list, Value::Nil], &env).unwrap();
        assert_eq!(result2.write_text(), "(1)");
    }

    #[test]
    fn reduce_is_a_right_fold() {
        let env = env();
        let minus = env.get("-").unwrap();
        let list = Value::list(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
        // (- 1 (- 2 3)) = 1 - (-1) = 2
        let result = builtin_reduce(&[minus, list], &env).unwrap();
        assert_eq!(result.as_number(), Some(2.0));
    }

    #[test]
    fn reduce_of_single_element_is_that_element() {
        let env = env();
        let plus = env.get("+").unwrap();
        let result = builtin_reduce(&[plus, Value::list(vec![Value::Number(9.0)])], &env).unwrap();
        assert_eq!(result.as_number(), Some(9.0));
    }

    #[test]
    fn reduce_of_empty_list_is_an_error() {
        let env = env();
        let plus = env.get("+").unwrap();
        assert!(builtin_reduce(&[plus, Value::Nil], &env).is_err());
    }

    #[test]
    fn map_and_filter() {
        let env = env();
        let double_src = crate::reader::read_one("(lambda (x) (* x 2))").unwrap();
        let double = crate::eval::eval(&double_src, &env).unwrap();
        let list = Value::list(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
        let mapped = builtin_map(&[double, list.clone()], &env).unwrap();
        assert_eq!(mapped.write_text(), "(2 4 6)");

        let even_src = crate::reader::read_one("(lambda (x) (even? x))").unwrap();
        let even = crate::eval::eval(&even_src, &env).unwrap();
        let filtered = builtin_filter(&[even, list], &env).unwrap();
        assert_eq!(filtered.write_text(), "(2)");
    }
}
