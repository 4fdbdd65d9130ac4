//! Type definitions for the executor
//!
//! - AST nodes (Stmt, Expr)
//! - Runtime values (Val)
//! - Control flow (Control, Frame, FrameKind)
//! - Execution phases for multi-step statements

pub mod ast;
pub mod control;
pub mod phase;
pub mod values;

// Re-export all types for convenient access
pub use ast::{AssignOp, BinaryOp, Expr, ForLoopKind, MemberAccess, Span, Stmt, UnaryOp, VarKind};
pub use control::{Control, Frame, FrameKind};
pub use phase::*;
pub use values::Val;
