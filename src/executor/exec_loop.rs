//! Core execution loop
//!
//! This module contains the step() function - the heart of the interpreter.
//! It processes one frame at a time, advancing execution phases and managing
//! the frame stack.

use super::errors::{self, ErrorInfo};
use super::statements::{
    execute_assign, execute_block, execute_declare, execute_expr, execute_for, execute_if,
    execute_loop_control, execute_return, execute_throw, execute_try, execute_while,
    ForLoopState,
};
use super::types::{Control, FrameKind, Stmt, TryPhase, Val, VarKind};
use super::vm::{pop_frame, push_stmt, set_top_kind, Step, VM};
use std::rc::Rc;
use tracing::trace;

/* ===================== Public API ===================== */

/// Run the VM until it completes
///
/// After completion, inspect `vm.control` for the final state:
/// `Control::None` or `Control::Return` for success, `Control::Throw` for an
/// uncaught error.
pub fn run_until_done(vm: &mut VM) {
    loop {
        match step(vm) {
            Step::Continue => continue,
            Step::Done => break,
        }
    }
    trace!(steps = vm.steps, "vm finished");
}

/// Execute one step of the VM
///
/// 1. Unwinds if control flow is active
/// 2. Enforces the step budget
/// 3. Dispatches the top frame to its statement handler
pub fn step(vm: &mut VM) -> Step {
    if vm.control != Control::None {
        return unwind(vm);
    }

    let Some(frame) = vm.frames.last() else {
        // No frames left - execution complete
        return Step::Done;
    };
    let (kind, node) = (frame.kind.clone(), Rc::clone(&frame.node));

    vm.steps += 1;
    if let Some(max) = vm.max_steps {
        if vm.steps > max {
            // Not catchable: drop every frame so no try block sees it
            vm.frames.clear();
            vm.control = Control::Throw(Val::Error(ErrorInfo::new(
                errors::STEP_LIMIT_EXCEEDED,
                format!("Execution exceeded the limit of {} steps", max),
            )));
            return Step::Done;
        }
    }

    match (kind, node.as_ref()) {
        (FrameKind::Block { phase, idx }, Stmt::Block { body, .. }) => {
            execute_block(vm, phase, idx, body)
        }

        (
            FrameKind::Declare,
            Stmt::Declare {
                var_kind,
                name,
                init,
                ..
            },
        ) => execute_declare(vm, *var_kind, name, init.as_ref()),

        (
            FrameKind::Assign,
            Stmt::Assign {
                var,
                path,
                op,
                value,
                ..
            },
        ) => execute_assign(vm, var, path, *op, value),

        (
            FrameKind::If,
            Stmt::If {
                test,
                then_s,
                else_s,
                ..
            },
        ) => execute_if(vm, test, then_s, else_s.as_deref()),

        (FrameKind::While { phase }, Stmt::While { test, body, .. }) => {
            execute_while(vm, phase, test, body)
        }

        (
            FrameKind::ForLoop { phase, items, idx },
            Stmt::ForLoop {
                kind,
                var_kind,
                binding,
                iterable,
                body,
                ..
            },
        ) => execute_for(
            vm,
            ForLoopState {
                phase,
                items,
                idx,
                kind: *kind,
                var_kind: *var_kind,
                binding,
                iterable,
                body,
            },
        ),

        (FrameKind::Try { phase }, Stmt::Try { body, .. }) => execute_try(vm, phase, body),

        (FrameKind::Throw, Stmt::Throw { value, .. }) => execute_throw(vm, value),

        (FrameKind::Return, Stmt::Return { value, .. }) => execute_return(vm, value.as_ref()),

        (FrameKind::Expr, Stmt::Expr { expr, .. }) => execute_expr(vm, expr),

        (FrameKind::Break, Stmt::Break { .. }) => execute_loop_control(vm, Control::Break),

        (FrameKind::Continue, Stmt::Continue { .. }) => {
            execute_loop_control(vm, Control::Continue)
        }

        // Frame kind does not match its node: an interpreter bug
        (kind, _) => {
            vm.control = Control::Throw(Val::Error(ErrorInfo::new(
                errors::INTERNAL_ERROR,
                format!("Frame kind {:?} does not match its statement", kind),
            )));
            Step::Continue
        }
    }
}

/* ===================== Control Flow ===================== */

/// Unwind the stack when control flow is active
///
/// - Return: exits the whole unit
/// - Break/Continue: pops to the nearest loop frame
/// - Throw: pops to the nearest try frame whose try block is running
fn unwind(vm: &mut VM) -> Step {
    match vm.control.clone() {
        Control::None => Step::Continue,

        Control::Return(_) => {
            vm.frames.clear();
            Step::Done
        }

        Control::Break | Control::Continue => {
            let is_break = vm.control == Control::Break;

            while let Some(frame) = vm.frames.last() {
                let is_loop = matches!(
                    frame.kind,
                    FrameKind::While { .. } | FrameKind::ForLoop { .. }
                );
                if is_loop {
                    if is_break {
                        pop_frame(vm);
                    }
                    vm.control = Control::None;
                    return Step::Continue;
                }
                pop_frame(vm);
            }

            // The validator rejects this, but hand-built programs can reach it
            let keyword = if is_break { "break" } else { "continue" };
            vm.control = Control::Throw(Val::Error(ErrorInfo::new(
                errors::INTERNAL_ERROR,
                format!("'{}' used outside of a loop", keyword),
            )));
            Step::Done
        }

        Control::Throw(error) => {
            while let Some(frame) = vm.frames.last() {
                let handler = match (&frame.kind, frame.node.as_ref()) {
                    (
                        FrameKind::Try {
                            phase: TryPhase::AwaitTry,
                        },
                        Stmt::Try {
                            catch_var,
                            catch_body,
                            ..
                        },
                    ) => Some((frame.scope_depth, catch_var.clone(), catch_body.clone())),
                    _ => None,
                };

                let Some((scope_depth, catch_var, catch_body)) = handler else {
                    pop_frame(vm);
                    continue;
                };

                trace!(catch_var = %catch_var, "caught error");
                vm.env.truncate(scope_depth);
                set_top_kind(
                    vm,
                    FrameKind::Try {
                        phase: TryPhase::ExecuteCatch,
                    },
                );
                vm.env.push_scope();
                if let Err(err) = vm.env.declare(&catch_var, error, VarKind::Let) {
                    vm.control = Control::Throw(Val::Error(err));
                    return Step::Continue;
                }
                vm.control = Control::None;
                push_stmt(vm, &catch_body);
                return Step::Continue;
            }

            // Uncaught: control stays Throw for the caller to inspect
            Step::Done
        }
    }
}
