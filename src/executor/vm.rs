//! Virtual Machine state
//!
//! The VM holds all execution state:
//! - frames: Stack of active statements
//! - control: Current control flow state (return, break, throw, ...)
//! - env: Variable scopes

use super::env::Env;
use super::types::{BlockPhase, Control, ForPhase, Frame, FrameKind, Stmt, TryPhase, WhilePhase};
use std::rc::Rc;

/* ===================== VM ===================== */

/// Virtual Machine state
#[derive(Debug, Clone)]
pub struct VM {
    /// Stack of execution frames
    pub frames: Vec<Frame>,

    /// Current control flow state
    pub control: Control,

    /// Variable scopes
    pub env: Env,

    /// Number of steps executed so far
    pub steps: u64,

    /// Abort with a non-catchable error once `steps` exceeds this
    pub max_steps: Option<u64>,
}

impl VM {
    /// Create a new VM with a program
    ///
    /// The program is wrapped in a root frame; nothing runs until `step()`.
    pub fn new(program: Stmt, env: Env) -> Self {
        let mut vm = VM {
            frames: vec![],
            control: Control::None,
            env,
            steps: 0,
            max_steps: None,
        };

        push_stmt(&mut vm, &program);

        vm
    }

    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/* ===================== Frame Management ===================== */

/// Push a new frame for a statement onto the stack
///
/// This determines the initial phase based on the statement type. Blocks
/// open their scope here so that unwinding past them drops it.
pub fn push_stmt(vm: &mut VM, stmt: &Stmt) {
    let scope_depth = vm.env.depth();

    let kind = match stmt {
        Stmt::Block { .. } => {
            vm.env.push_scope();
            FrameKind::Block {
                phase: BlockPhase::Execute,
                idx: 0,
            }
        }
        Stmt::Declare { .. } => FrameKind::Declare,
        Stmt::Assign { .. } => FrameKind::Assign,
        Stmt::If { .. } => FrameKind::If,
        Stmt::While { .. } => FrameKind::While {
            phase: WhilePhase::Test,
        },
        Stmt::ForLoop { .. } => FrameKind::ForLoop {
            phase: ForPhase::Init,
            items: Rc::new(Vec::new()),
            idx: 0,
        },
        Stmt::Return { .. } => FrameKind::Return,
        Stmt::Try { .. } => FrameKind::Try {
            phase: TryPhase::ExecuteTry,
        },
        Stmt::Throw { .. } => FrameKind::Throw,
        Stmt::Expr { .. } => FrameKind::Expr,
        Stmt::Break { .. } => FrameKind::Break,
        Stmt::Continue { .. } => FrameKind::Continue,
    };

    vm.frames.push(Frame {
        kind,
        scope_depth,
        node: Rc::new(stmt.clone()),
    });
}

/// Pop the top frame and drop any scopes it opened
pub fn pop_frame(vm: &mut VM) -> Option<Frame> {
    let frame = vm.frames.pop()?;
    vm.env.truncate(frame.scope_depth);
    Some(frame)
}

/// Replace the kind of the top frame
pub fn set_top_kind(vm: &mut VM, kind: FrameKind) {
    if let Some(frame) = vm.frames.last_mut() {
        frame.kind = kind;
    }
}

/* ===================== Step Result ===================== */

/// Result of executing one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Continue to next step
    Continue,
    /// Execution complete
    Done,
}
