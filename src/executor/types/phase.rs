//! Execution phase enums for each statement type
//!
//! Each multi-step statement has its own Phase enum that tracks which
//! execution step its frame is currently at.

/// Execution phase for Block statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPhase {
    Execute,
}

/// Execution phase for While statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhilePhase {
    /// Evaluate the test, then run the body or finish
    Test,
}

/// Execution phase for For loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForPhase {
    /// Evaluate the iterable into a snapshot of items
    Init,
    /// Bind the next item and run the body
    Iterate,
}

/// Execution phase for Try statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryPhase {
    /// Try block not started yet
    ExecuteTry,
    /// Try block is running; a throw lands in the catch block
    AwaitTry,
    /// Catch block is running; a throw propagates outward
    ExecuteCatch,
}
