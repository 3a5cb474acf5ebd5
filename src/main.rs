mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod lexer;
mod reader;
mod special_forms;
mod value;

use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

use config::{CONTINUATION_PROMPT, HISTORY_FILE_NAME, PROMPT, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use env::Environment;
use eval::eval;
use reader::read_all;
use value::Value;

/// A small Scheme-flavored Lisp interpreter.
#[derive(Parser, Debug)]
#[command(name = "rindle")]
#[command(version = config::VERSION)]
#[command(about = "A small Scheme-flavored Lisp interpreter")]
struct CliArgs {
    /// Script file to execute (if omitted, starts the REPL).
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Extra arguments bound as `argc`/`argv` in the script's environment.
    #[arg(trailing_var_arg = true)]
    extra: Vec<String>,
}

fn main() {
    let args = CliArgs::parse();
    let env = Environment::new();
    builtins::register_arithmetic(&env);
    builtins::register_comparison(&env);
    builtins::register_control(&env);
    builtins::register_lists(&env);
    builtins::register_predicates(&env);

    match &args.script {
        Some(path) => {
            bind_argv(&env, path, &args.extra);
            if let Err(e) = run_script(path, &env) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        None => run_repl(&env),
    }
}

fn bind_argv(env: &Rc<Environment>, script: &PathBuf, extra: &[String]) {
    let mut argv = vec![Value::string(script.display().to_string())];
    argv.extend(extra.iter().map(|s| Value::string(s.clone())));
    env.define("argc", Value::Number(argv.len() as f64));
    env.define("argv", Value::list(argv));
}

fn run_script(path: &PathBuf, env: &Rc<Environment>) -> Result<(), String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;
    let forms = read_all(&contents).map_err(|e| format!("syntax error: {}", e))?;
    for form in &forms {
        if let Err(e) = eval(form, env) {
            eprintln!("Error: {}", e);
        }
    }
    Ok(())
}

fn run_repl(env: &Rc<Environment>) {
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), rustyline::history::FileHistory> =
        Editor::with_config(rl_config).expect("failed to initialize line editor");
    let _ = rl.load_history(HISTORY_FILE_NAME);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);

    let mut buffer = String::new();

    loop {
        let depth = paren_depth(&buffer);
        let prompt = if buffer.is_empty() {
            PROMPT.to_string()
        } else {
            format!("{}{}", CONTINUATION_PROMPT, "  ".repeat(depth.max(1)))
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                if buffer.trim().is_empty() {
                    buffer.clear();
                    continue;
                }
                if paren_depth(&buffer) > 0 {
                    continue;
                }

                match read_all(&buffer) {
                    Ok(forms) => {
                        for form in &forms {
                            match eval(form, env) {
                                Ok(value) => println!("{}", value.display_text()),
                                Err(e) => eprintln!("Error: {}", e),
                            }
                        }
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
                buffer.clear();
            }
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
                println!("^C");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE_NAME);
}

/// Counts outstanding open parens, ignoring any inside string literals.
fn paren_depth(buffer: &str) -> usize {
    let mut depth: i64 = 0;
    let mut in_string = false;
    let mut chars = buffer.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if in_string => {
                chars.next();
            }
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth -= 1,
            _ => {}
        }
    }
    depth.max(0) as usize
}
