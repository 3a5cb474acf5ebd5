// ABOUTME: Special-form dispatcher; these constructs decide what gets
// evaluated instead of receiving pre-evaluated arguments

use std::rc::Rc;

use crate::env::Environment;
use crate::error::LispError;
use crate::eval::eval;
use crate::value::{Lambda, Value};

/// Returns the keyword's handler if `name` names a special form.
pub fn lookup(name: &str) -> Option<fn(&[Value], &Rc<Environment>) -> Result<Value, LispError>> {
    Some(match name {
        "define" => eval_define,
        "quote" => eval_quote,
        "quasiquote" => eval_quasiquote,
        "if" => eval_if,
        "and" => eval_and,
        "or" => eval_or,
        "lambda" => eval_lambda,
        "cond" => eval_cond,
        "let" => eval_let,
        "begin" => eval_begin,
        _ => return None,
    })
}

fn eval_define(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.is_empty() {
        return Err(LispError::arity("define", "at least 2", args.len()));
    }
    if let Value::Pair(cell) = &args[0] {
        // (define (name p1 ... pk) body...) sugar for a lambda binding;
        // the body is variadic, so no fixed-arity check applies here.
        let name = cell
            .car
            .as_symbol()
            .ok_or_else(|| LispError::runtime("define", "function name must be a symbol"))?
            .to_string();
        let params = cell.cdr.to_vector()?;
        let mut lambda_args = Vec::with_capacity(1 + args.len() - 1);
        lambda_args.push(Value::list(params));
        lambda_args.extend_from_slice(&args[1..]);
        let lambda = eval_lambda(&lambda_args, env)?;
        env.define(name, lambda);
        return Ok(Value::Nil);
    }
    if args.len() != 2 {
        return Err(LispError::arity("define", "2", args.len()));
    }
    let name = args[0]
        .as_symbol()
        .ok_or_else(|| LispError::runtime("define", "binding target must be a symbol"))?
        .to_string();
    let value = eval(&args[1], env)?;
    env.define(name, value);
    Ok(Value::Nil)
}

fn eval_quote(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity("quote", "1", args.len()));
    }
    Ok(args[0].clone())
}

fn eval_quasiquote(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity("quasiquote", "1", args.len()));
    }
    quasiquote_walk(&args[0], env)
}

fn quasiquote_walk(expr: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    match expr {
        Value::Pair(cell) => {
            if let Some("unquote") = cell.car.as_symbol() {
                let inner = cell.cdr.to_vector()?;
                if inner.len() != 1 {
                    return Err(LispError::arity("unquote", "1", inner.len()));
                }
                return eval(&inner[0], env);
            }
            let car = quasiquote_walk(&cell.car, env)?;
            let cdr = quasiquote_walk(&cell.cdr, env)?;
            Ok(Value::cons(car, cdr))
        }
        other => Ok(other.clone()),
    }
}

fn eval_if(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.len() != 2 && args.len() != 3 {
        return Err(LispError::arity("if", "2-3", args.len()));
    }
    let test = eval(&args[0], env)?;
    if test.is_truthy() {
        eval(&args[1], env)
    } else if args.len() == 3 {
        eval(&args[2], env)
    } else {
        Ok(Value::Nil)
    }
}

fn eval_and(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.is_empty() {
        return Ok(Value::Boolean(true));
    }
    let mut result = Value::Boolean(true);
    for arg in args {
        result = eval(arg, env)?;
        if !result.is_truthy() {
            return Ok(result);
        }
    }
    Ok(result)
}

fn eval_or(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.is_empty() {
        return Ok(Value::Boolean(false));
    }
    let mut result = Value::Boolean(false);
    for arg in args {
        result = eval(arg, env)?;
        if result.is_truthy() {
            return Ok(result);
        }
    }
    Ok(result)
}

fn eval_lambda(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.len() < 2 {
        return Err(LispError::arity("lambda", "at least 2", args.len()));
    }
    let param_values = args[0]
        .to_vector()
        .map_err(|_| LispError::runtime("lambda", "parameter list must be a proper list"))?;
    let mut params = Vec::with_capacity(param_values.len());
    for p in param_values {
        let name = p
            .as_symbol()
            .ok_or_else(|| LispError::runtime("lambda", "parameter names must be symbols"))?;
        params.push(name.to_string());
    }
    let body = args[1..].to_vec();
    Ok(Value::Lambda(Rc::new(Lambda {
        params,
        body,
        env: Rc::clone(env),
    })))
}

fn eval_cond(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.is_empty() {
        return Err(LispError::arity("cond", "at least 1", 0));
    }
    for (i, clause) in args.iter().enumerate() {
        let items = clause
            .to_vector()
            .map_err(|_| LispError::runtime("cond", "each clause must be a list"))?;
        if items.is_empty() {
            return Err(LispError::runtime("cond", "empty clause"));
        }
        let is_else = matches!(items[0].as_symbol(), Some("else"));
        if is_else && i != args.len() - 1 {
            return Err(LispError::runtime("cond", "else clause must be last"));
        }
        let test_value = if is_else {
            Value::Boolean(true)
        } else {
            eval(&items[0], env)?
        };
        if test_value.is_truthy() {
            if items.len() == 1 {
                return Ok(test_value);
            }
            let mut result = Value::Nil;
            for expr in &items[1..] {
                result = eval(expr, env)?;
            }
            return Ok(result);
        }
    }
    Err(LispError::runtime("cond", "no true clause"))
}

fn eval_let(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    if args.len() < 2 {
        return Err(LispError::arity("let", "at least 2", args.len()));
    }
    let bindings = args[0]
        .to_vector()
        .map_err(|_| LispError::runtime("let", "bindings must be a list"))?;
    let mut names = Vec::with_capacity(bindings.len());
    let mut values = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let pair = binding
            .to_vector()
            .map_err(|_| LispError::runtime("let", "each binding must be a (name init) pair"))?;
        if pair.len() != 2 {
            return Err(LispError::runtime("let", "each binding must have exactly a name and init"));
        }
        let name = pair[0]
            .as_symbol()
            .ok_or_else(|| LispError::runtime("let", "binding name must be a symbol"))?
            .to_string();
        let value = eval(&pair[1], env)?;
        names.push(name);
        values.push(value);
    }
    let child = env.extend(&names, &values)?;
    let mut result = Value::Nil;
    for expr in &args[1..] {
        result = eval(expr, &child)?;
    }
    Ok(result)
}

fn eval_begin(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    let mut result = Value::Nil;
    for expr in args {
        result = eval(expr, env)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::new_root_environment;

    fn eval_src(src: &str) -> Value {
        let env = new_root_environment();
        let form = crate::reader::read_one(src).unwrap();
        eval(&form, &env).unwrap()
    }

    #[test]
    fn if_picks_branch_by_truthiness() {
        assert_eq!(eval_src("(if #t 1 2)").as_number(), Some(1.0));
        assert_eq!(eval_src("(if #f 1 2)").as_number(), Some(2.0));
        assert_eq!(eval_src("(if #f 1)").write_text(), "()");
    }

    #[test]
    fn and_or_short_circuit_and_default_on_empty() {
        assert_eq!(eval_src("(and)").write_text(), "#t");
        assert_eq!(eval_src("(or)").write_text(), "#f");
        assert_eq!(eval_src("(and 1 #f 2)").write_text(), "#f");
        assert_eq!(eval_src("(or #f 2 3)").as_number(), Some(2.0));
    }

    #[test]
    fn let_evaluates_inits_in_outer_scope() {
        assert_eq!(eval_src("(let ((x 2) (y 3)) (+ x y))").as_number(), Some(5.0));
    }

    #[test]
    fn cond_else_matches_when_nothing_else_does() {
        assert_eq!(
            eval_src("(cond ((= 1 2) 'a) ((= 2 2) 'b) (else 'c))").as_symbol(),
            Some("b")
        );
    }

    #[test]
    fn quasiquote_substitutes_unquoted_subexpression() {
        assert_eq!(eval_src("`(1 ,(+ 1 1) 3)").write_text(), "(1 2 3)");
    }

    #[test]
    fn define_function_sugar_builds_a_lambda() {
        let env = new_root_environment();
        for form in crate::reader::read_all("(define (sq x) (* x x)) (sq 5)").unwrap() {
            let result = eval(&form, &env).unwrap();
            let _ = result;
        }
        let result = eval(&crate::reader::read_one("(sq 5)").unwrap(), &env).unwrap();
        assert_eq!(result.as_number(), Some(25.0));
    }

    #[test]
    fn define_function_sugar_accepts_a_multi_expression_body() {
        let env = new_root_environment();
        for form in crate::reader::read_all(
            "(define (f x) (display x) (newline) (+ x 1)) (f 4)",
        )
        .unwrap()
        {
            eval(&form, &env).unwrap();
        }
        let result = eval(&crate::reader::read_one("(f 4)").unwrap(), &env).unwrap();
        assert_eq!(result.as_number(), Some(5.0));
    }
}
