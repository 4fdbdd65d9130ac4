//! Control flow and execution frame types

use super::ast::Stmt;
use super::phase::{BlockPhase, ForPhase, TryPhase, WhilePhase};
use super::values::Val;
use std::rc::Rc;

/* ===================== Control Flow ===================== */

/// Control flow state
///
/// When control != None, the VM unwinds the stack to find the appropriate
/// handler (loop frame for break/continue, try frame for throw).
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    None,
    Break,
    Continue,
    Return(Val),
    Throw(Val),
}

/* ===================== Frames ===================== */

/// Frame kind - the type and state of a statement being executed
#[derive(Debug, Clone)]
pub enum FrameKind {
    Block { phase: BlockPhase, idx: usize },
    Declare,
    Assign,
    If,
    While { phase: WhilePhase },
    ForLoop { phase: ForPhase, items: Rc<Vec<Val>>, idx: usize },
    Return,
    Try { phase: TryPhase },
    Throw,
    Expr,
    Break,
    Continue,
}

/// Execution frame - one per active statement
///
/// The frame stack replaces the system call stack, so deeply nested
/// templates never recurse through statement execution.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The kind and state of this frame
    pub kind: FrameKind,

    /// Number of scopes that existed when this frame was pushed.
    /// Popping the frame truncates the environment back to this depth.
    pub scope_depth: usize,

    /// The statement this frame represents
    pub node: Rc<Stmt>,
}
