// ABOUTME: Library surface exposing the lexer, reader, evaluator, and REPL shell

use std::rc::Rc;

pub mod builtins;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod reader;
pub mod special_forms;
pub mod value;

pub use env::Environment;
pub use error::{LispError, SyntaxError};
pub use value::Value;

/// Builds a fresh top-level environment seeded with the whole built-in table.
pub fn new_root_environment() -> Rc<Environment> {
    builtins::new_root_environment()
}

/// Reads and evaluates every top-level form in `source`, returning the
/// value of the last one (or `Nil` if `source` contains no forms).
pub fn evaluate(source: &str, env: &Rc<Environment>) -> Result<Value, LispError> {
    let forms = reader::read_all(source)?;
    let mut result = Value::Nil;
    for form in &forms {
        result = eval::eval(form, env)?;
    }
    Ok(result)
}

/// Human-facing rendering of a value (strings unquoted).
pub fn to_display_text(value: &Value) -> String {
    value.display_text()
}

/// Machine-faithful rendering of a value (strings quoted, dotted pairs
/// rendered with `.`).
pub fn to_write_text(value: &Value) -> String {
    value.write_text()
}
