//! I/O and evaluator-facing procedures: `display displayln newline print
//! readline error exit eval apply`.

use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::env::Environment;
use crate::error::{LispError, ARITY_ONE, ARITY_ZERO_OR_ONE};
use crate::eval::{call_procedure, eval as eval_expr};
use crate::reader::read_one;
use crate::value::{Builtin, Value};

/// Writes the display form of each argument, space-separated, with no
/// trailing newline.
pub fn builtin_display(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    print_joined(args, false);
    Ok(Value::Nil)
}

/// Like `display`, but appends a trailing newline.
pub fn builtin_displayln(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    print_joined(args, true);
    Ok(Value::Nil)
}

fn print_joined(args: &[Value], newline: bool) {
    let mut stdout = io::stdout();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            let _ = write!(stdout, " ");
        }
        let _ = write!(stdout, "{}", arg.display_text());
    }
    if newline {
        let _ = writeln!(stdout);
    }
    let _ = stdout.flush();
}

pub fn builtin_newline(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    if !args.is_empty() {
        return Err(LispError::arity("newline", "0", args.len()));
    }
    println!();
    Ok(Value::Nil)
}

/// Writes the write-form of each argument, one per line.
pub fn builtin_print(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    let mut stdout = io::stdout();
    for arg in args {
        let _ = writeln!(stdout, "{}", arg.write_text());
    }
    let _ = stdout.flush();
    Ok(Value::Nil)
}

/// Aborts the current evaluation with the given message.
pub fn builtin_error(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    let message = args
        .iter()
        .map(|a| a.display_text())
        .collect::<Vec<_>>()
        .join(" ");
    Err(LispError::UserError(message))
}

/// Terminates the process directly; `(exit)` defaults to code `0`.
pub fn builtin_exit(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    let code = match args {
        [] => 0,
        [Value::Number(n)] => *n as i32,
        [other] => return Err(LispError::type_error("exit", "number", other, 0)),
        _ => return Err(LispError::arity("exit", ARITY_ZERO_OR_ONE, args.len())),
    };
    std::process::exit(code);
}

/// Reads one line from standard input, prompts with `>`, and evaluates
/// it in the current environment.
pub fn builtin_readline(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    if !args.is_empty() {
        return Err(LispError::arity("readline", "0", args.len()));
    }
    print!("> ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let stdin = io::stdin();
    stdin
        .lock()
        .read_line(&mut line)
        .map_err(|e| LispError::runtime("readline", e.to_string()))?;
    let datum = read_one(line.trim()).map_err(|e| LispError::runtime("readline", e.to_string()))?;
    eval_expr(&datum, env)
}

/// Evaluates a datum in the current environment.
pub fn builtin_eval(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [expr] => eval_expr(expr, env),
        _ => Err(LispError::arity("eval", ARITY_ONE, args.len())),
    }
}

/// Calls a procedure on the elements of a proper list. The elements are
/// already values; they are not re-evaluated (the clean semantics —
/// see the design notes on the historical re-evaluation wart).
pub fn builtin_apply(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    match args {
        [proc, arg_list] => {
            if !proc.is_procedure() {
                return Err(LispError::NotCallable(proc.type_name().to_string()));
            }
            let values = arg_list
                .to_vector()
                .map_err(|_| LispError::type_error("apply", "list", arg_list, 1))?;
            call_procedure(proc, &values, env)
        }
        _ => Err(LispError::arity("apply", crate::error::ARITY_TWO, args.len())),
    }
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("display", builtin_display),
        ("displayln", builtin_displayln),
        ("newline", builtin_newline),
        ("print", builtin_print),
        ("error", builtin_error),
        ("exit", builtin_exit),
        ("readline", builtin_readline),
        ("eval", builtin_eval),
        ("apply", builtin_apply),
    ];
    for (name, func) in entries {
        env.define(*name, Value::Builtin(Builtin { name, func: *func }));
    }
}
