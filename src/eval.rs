// ABOUTME: The evaluator: classifies an expression value and reduces it

use std::rc::Rc;

use crate::env::Environment;
use crate::error::LispError;
use crate::special_forms;
use crate::value::Value;

/// Evaluates one expression in the given environment.
///
/// There is no trampoline here: recursive calls consume host stack, and
/// there is no tail-call optimisation, matching the language's Non-goals.
pub fn eval(expr: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    match expr {
        Value::Boolean(_) | Value::Number(_) | Value::String(_) => Ok(expr.clone()),
        Value::Nil => Err(LispError::runtime("eval", "cannot evaluate the empty list")),
        Value::Symbol(name) => env.lookup(name),
        Value::Pair(cell) => {
            let head = &cell.car;
            let args_list = &cell.cdr;

            if let Some(name) = head.as_symbol() {
                if let Some(handler) = special_forms::lookup(name) {
                    let args = args_list
                        .to_vector()
                        .map_err(|_| LispError::runtime(name, "malformed argument list"))?;
                    return handler(&args, env);
                }
            }

            let proc = eval(head, env)?;
            let arg_values = args_list
                .to_vector()
                .map_err(|_| LispError::runtime("apply", "malformed argument list"))?;
            let mut evaluated = Vec::with_capacity(arg_values.len());
            for arg in &arg_values {
                evaluated.push(eval(arg, env)?);
            }
            call_procedure(&proc, &evaluated, env)
        }
        Value::Builtin(_) | Value::Lambda(_) => Err(LispError::runtime(
            "eval",
            "procedures are not self-evaluating syntax",
        )),
    }
}

/// Invokes a procedure value on already-evaluated arguments.
pub fn call_procedure(proc: &Value, args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    match proc {
        Value::Builtin(builtin) => (builtin.func)(args, _env),
        Value::Lambda(lambda) => {
            let call_env = lambda.env.extend(&lambda.params, args)?;
            let mut result = Value::Nil;
            for expr in &lambda.body {
                result = eval(expr, &call_env)?;
            }
            Ok(result)
        }
        other => Err(LispError::NotCallable(other.type_name().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::new_root_environment;
    use crate::reader::read_one;

    fn eval_src(src: &str) -> Value {
        let env = new_root_environment();
        eval(&read_one(src).unwrap(), &env).unwrap()
    }

    #[test]
    fn self_evaluating_atoms() {
        assert_eq!(eval_src("42").as_number(), Some(42.0));
        assert_eq!(eval_src("\"hi\"").as_string(), Some("hi"));
        assert_eq!(eval_src("#t").write_text(), "#t");
    }

    #[test]
    fn quote_returns_argument_verbatim() {
        assert_eq!(eval_src("(quote (1 2 3))").write_text(), "(1 2 3)");
    }

    #[test]
    fn unbound_symbol_is_an_error() {
        let env = new_root_environment();
        assert!(eval(&read_one("undefined-name").unwrap(), &env).is_err());
    }

    #[test]
    fn evaluating_nil_is_an_error() {
        let env = new_root_environment();
        assert!(eval(&read_one("()").unwrap(), &env).is_err());
    }

    #[test]
    fn simple_arithmetic_call() {
        assert_eq!(eval_src("(+ 1 2 3)").as_number(), Some(6.0));
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let env = new_root_environment();
        for form in crate::reader::read_all("(define (make x) (lambda () x)) (define get (make 1))").unwrap() {
            eval(&form, &env).unwrap();
        }
        env.define("x", Value::Number(999.0));
        let result = eval(&read_one("(get)").unwrap(), &env).unwrap();
        assert_eq!(result.as_number(), Some(1.0));
    }

    #[test]
    fn wrong_arity_lambda_call_is_an_error() {
        let env = new_root_environment();
        for form in crate::reader::read_all("(define (f x y) (+ x y))").unwrap() {
            eval(&form, &env).unwrap();
        }
        assert!(eval(&read_one("(f 1)").unwrap(), &env).is_err());
    }
}
