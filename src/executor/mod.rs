//! # Script executor
//!
//! Resumable, stack-driven interpreter for compiled template units.
//!
//! ## Core Principles
//!
//! 1. **Stack-driven execution**: All state in `frames: Vec<Frame>`, statement
//!    execution never recurses through the host stack
//! 2. **Statement-level execution**: Each frame carries the phase of its
//!    multi-step statement
//! 3. **Centralized control flow**: `Control` manages break/continue/return/throw
//! 4. **Pure executor**: No I/O - it runs a unit body against an environment
//!    until completion, an uncaught error or the step budget runs out

pub mod env;
pub mod errors;
pub mod exec_loop;
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod stdlib;
pub mod types;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use env::Env;
pub use errors::ErrorInfo;
pub use exec_loop::{run_until_done, step};
pub use expressions::EvalResult;
pub use types::{Control, Expr, Stmt, Val};
pub use vm::{Step, VM};
