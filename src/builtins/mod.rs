//! Built-in procedure library, organized by category.
//!
//! - **[arithmetic]**: `+ - * / abs expt quotient remainder modulo`
//! - **[comparison]**: `= < > <= >= eq? equal? not even? odd? zero?`
//! - **[control]**: I/O and evaluator-facing procedures (`display`, `apply`, `eval`, ...)
//! - **[lists]**: pair/list operations, including `map`/`filter`/`reduce`
//! - **[predicates]**: type predicates (`number?`, `pair?`, ...)

use std::rc::Rc;

use crate::env::Environment;

pub mod arithmetic;
pub mod comparison;
pub mod control;
pub mod lists;
pub mod predicates;

pub use arithmetic::register as register_arithmetic;
pub use comparison::register as register_comparison;
pub use control::register as register_control;
pub use lists::register as register_lists;
pub use predicates::register as register_predicates;

/// Builds a fresh top-level environment with the whole built-in table
/// installed. The table itself is never mutated after construction.
pub fn new_root_environment() -> Rc<Environment> {
    let env = Environment::new();
    register_arithmetic(&env);
    register_comparison(&env);
    register_control(&env);
    register_lists(&env);
    register_predicates(&env);
    env
}
