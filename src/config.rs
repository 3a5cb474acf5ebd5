// ABOUTME: Version info, banner text, and REPL prompt constants

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "rindle";
pub const WELCOME_SUBTITLE: &str = "A small Scheme-flavored Lisp interpreter";

/// Shown when the input buffer is balanced and ready for a new form.
pub const PROMPT: &str = ">>> ";

/// Shown while parentheses remain unbalanced across lines; the caller
/// appends indentation proportional to the outstanding open-paren depth.
pub const CONTINUATION_PROMPT: &str = "...";

pub const HISTORY_FILE_NAME: &str = ".rindle_history";
