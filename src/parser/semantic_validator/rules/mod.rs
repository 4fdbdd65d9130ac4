//! Validation Rules
//!
//! Each file in this module contains one validation rule:
//!
//! - `loop_control.rs` - `break` / `continue` outside of a loop
//! - `reserved_binding.rs` - user code rebinding the unit's parameters
//! - `unreachable_code.rs` - Code that can never execute

mod loop_control;
mod reserved_binding;
mod unreachable_code;

pub use loop_control::LoopControlRule;
pub use reserved_binding::{ReservedBindingRule, RESERVED_NAMES};
pub use unreachable_code::UnreachableCodeRule;
