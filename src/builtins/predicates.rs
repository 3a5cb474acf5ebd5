//! Type predicates: `boolean? number? integer? string? symbol? null?
//! pair? list? procedure? atom?`.

use std::rc::Rc;

use crate::env::Environment;
use crate::error::{LispError, ARITY_ONE};
use crate::value::{Builtin, Value};

fn unary(name: &'static str, args: &[Value], test: impl Fn(&Value) -> bool) -> Result<Value, LispError> {
    match args {
        [v] => Ok(Value::Boolean(test(v))),
        _ => Err(LispError::arity(name, ARITY_ONE, args.len())),
    }
}

pub fn builtin_boolean_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("boolean?", args, |v| matches!(v, Value::Boolean(_)))
}

pub fn builtin_number_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("number?", args, |v| matches!(v, Value::Number(_)))
}

pub fn builtin_integer_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("integer?", args, |v| matches!(v, Value::Number(n) if n.floor() == *n))
}

pub fn builtin_string_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("string?", args, |v| matches!(v, Value::String(_)))
}

pub fn builtin_symbol_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("symbol?", args, |v| matches!(v, Value::Symbol(_)))
}

pub fn builtin_null_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("null?", args, |v| matches!(v, Value::Nil))
}

pub fn builtin_pair_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("pair?", args, |v| matches!(v, Value::Pair(_)))
}

pub fn builtin_list_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("list?", args, Value::is_list)
}

pub fn builtin_procedure_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("procedure?", args, Value::is_procedure)
}

pub fn builtin_atom_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    unary("atom?", args, Value::is_atom)
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("boolean?", builtin_boolean_p),
        ("number?", builtin_number_p),
        ("integer?", builtin_integer_p),
        ("string?", builtin_string_p),
        ("symbol?", builtin_symbol_p),
        ("null?", builtin_null_p),
        ("pair?", builtin_pair_p),
        ("list?", builtin_list_p),
        ("procedure?", builtin_procedure_p),
        ("atom?", builtin_atom_p),
    ];
    for (name, func) in entries {
        env.define(*name, Value::Builtin(Builtin { name, func: *func }));
    }
}
