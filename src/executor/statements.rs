//! Statement execution handlers
//!
//! Each statement type has its own handler function that processes the
//! statement based on its frame state. Handlers that fail set
//! `Control::Throw` and leave their frame in place; unwinding removes it.

use super::env::Env;
use super::errors::{self, ErrorInfo};
use super::expressions::{eval_expr, list_index, EvalResult};
use super::operators::apply_binary;
use super::types::{
    AssignOp, BlockPhase, Control, Expr, ForLoopKind, ForPhase, FrameKind, MemberAccess, Stmt,
    TryPhase, Val, VarKind, WhilePhase,
};
use super::vm::{pop_frame, push_stmt, set_top_kind, Step, VM};
use std::rc::Rc;

/* ===================== Helpers ===================== */

/// Evaluate an expression, or record the throw and bail out of the handler
macro_rules! eval_or_throw {
    ($vm:expr, $expr:expr) => {
        match eval_expr($expr, &$vm.env) {
            EvalResult::Value { v } => v,
            EvalResult::Throw { error } => return throw($vm, error),
        }
    };
}

fn throw(vm: &mut VM, error: Val) -> Step {
    vm.control = Control::Throw(error);
    Step::Continue
}

fn throw_info(vm: &mut VM, error: ErrorInfo) -> Step {
    throw(vm, Val::Error(error))
}

/* ===================== Statement Handlers ===================== */

/// Execute Block statement
pub fn execute_block(vm: &mut VM, phase: BlockPhase, idx: usize, body: &[Stmt]) -> Step {
    match phase {
        BlockPhase::Execute => {
            let Some(child_stmt) = body.get(idx) else {
                // Block complete, pop frame (drops the block scope)
                pop_frame(vm);
                return Step::Continue;
            };

            set_top_kind(
                vm,
                FrameKind::Block {
                    phase: BlockPhase::Execute,
                    idx: idx + 1,
                },
            );
            push_stmt(vm, child_stmt);

            Step::Continue
        }
    }
}

/// Execute `let` / `const` declaration
pub fn execute_declare(vm: &mut VM, var_kind: VarKind, name: &str, init: Option<&Expr>) -> Step {
    let value = match init {
        Some(expr) => eval_or_throw!(vm, expr),
        None => Val::Null,
    };

    if let Err(err) = vm.env.declare(name, value, var_kind) {
        return throw_info(vm, err);
    }

    pop_frame(vm);
    Step::Continue
}

/// One evaluated segment of an assignment path
enum PathKey {
    Prop(String),
    Index(Val),
}

/// Execute assignment (`x = e`, `x.a[i] += e`, ...)
pub fn execute_assign(
    vm: &mut VM,
    var: &str,
    path: &[MemberAccess],
    op: AssignOp,
    value: &Expr,
) -> Step {
    let v = eval_or_throw!(vm, value);

    let mut keys = Vec::with_capacity(path.len());
    for segment in path {
        match segment {
            MemberAccess::Prop { property, .. } => keys.push(PathKey::Prop(property.clone())),
            MemberAccess::Index { expr, .. } => keys.push(PathKey::Index(eval_or_throw!(vm, expr))),
        }
    }

    if let Err(err) = assign(&mut vm.env, var, &keys, op, v) {
        return throw_info(vm, err);
    }

    pop_frame(vm);
    Step::Continue
}

fn assign(env: &mut Env, var: &str, keys: &[PathKey], op: AssignOp, v: Val) -> Result<(), ErrorInfo> {
    let Some(binding) = env.get_binding_mut(var) else {
        if keys.is_empty() && op == AssignOp::Set {
            env.define_implicit(var, v);
            return Ok(());
        }
        return Err(ErrorInfo::new(
            errors::UNDEFINED_VARIABLE,
            format!("Variable '{}' is not defined", var),
        ));
    };

    if keys.is_empty() {
        if binding.kind == VarKind::Const {
            return Err(ErrorInfo::new(
                errors::CONST_REASSIGNMENT,
                format!("Cannot assign to constant '{}'", var),
            ));
        }
        binding.value = combine(op, &binding.value, v)?;
        return Ok(());
    }

    // Members of a const binding stay mutable
    assign_path(&mut binding.value, keys, op, v)
}

fn assign_path(target: &mut Val, keys: &[PathKey], op: AssignOp, v: Val) -> Result<(), ErrorInfo> {
    let Some((key, rest)) = keys.split_first() else {
        *target = combine(op, target, v)?;
        return Ok(());
    };

    match (target, key) {
        (Val::Obj(map), PathKey::Prop(name)) => assign_entry(map, name.clone(), rest, op, v),
        (Val::Obj(map), PathKey::Index(idx @ (Val::Str(_) | Val::Num(_)))) => {
            assign_entry(map, idx.to_display_string(), rest, op, v)
        }
        (Val::List(items), PathKey::Index(Val::Num(n))) => {
            let len = items.len();
            let Some(i) = list_index(*n, len) else {
                return Err(ErrorInfo::new(
                    errors::INDEX_OUT_OF_BOUNDS,
                    format!("Index {} is out of bounds for list of length {}", n, len),
                ));
            };
            assign_path(&mut items[i], rest, op, v)
        }
        (target, PathKey::Prop(name)) => Err(ErrorInfo::new(
            errors::TYPE_ERROR,
            format!(
                "Cannot set property '{}' on {}",
                name,
                target.type_name()
            ),
        )),
        (target, PathKey::Index(idx)) => Err(ErrorInfo::new(
            errors::TYPE_ERROR,
            format!(
                "Cannot index {} with {}",
                target.type_name(),
                idx.type_name()
            ),
        )),
    }
}

fn assign_entry(
    map: &mut std::collections::HashMap<String, Val>,
    key: String,
    rest: &[PathKey],
    op: AssignOp,
    v: Val,
) -> Result<(), ErrorInfo> {
    if rest.is_empty() && op == AssignOp::Set {
        map.insert(key, v);
        return Ok(());
    }

    match map.get_mut(&key) {
        Some(entry) => assign_path(entry, rest, op, v),
        None => Err(ErrorInfo::new(
            errors::PROPERTY_NOT_FOUND,
            format!("Property '{}' not found", key),
        )),
    }
}

fn combine(op: AssignOp, current: &Val, v: Val) -> Result<Val, ErrorInfo> {
    match op.binary_op() {
        Some(bin) => apply_binary(bin, current, &v),
        None => Ok(v),
    }
}

/// Execute If statement: evaluate the test, then replace this frame with the
/// chosen branch
pub fn execute_if(vm: &mut VM, test: &Expr, then_s: &Stmt, else_s: Option<&Stmt>) -> Step {
    let cond = eval_or_throw!(vm, test);
    pop_frame(vm);

    if cond.is_truthy() {
        push_stmt(vm, then_s);
    } else if let Some(else_s) = else_s {
        push_stmt(vm, else_s);
    }

    Step::Continue
}

/// Execute While statement
pub fn execute_while(vm: &mut VM, phase: WhilePhase, test: &Expr, body: &Stmt) -> Step {
    match phase {
        WhilePhase::Test => {
            let cond = eval_or_throw!(vm, test);
            if cond.is_truthy() {
                // Frame stays on the stack; the test runs again once the body pops
                push_stmt(vm, body);
            } else {
                pop_frame(vm);
            }
            Step::Continue
        }
    }
}

/// Everything the For handler needs from its frame and node
pub struct ForLoopState<'a> {
    pub phase: ForPhase,
    pub items: Rc<Vec<Val>>,
    pub idx: usize,
    pub kind: ForLoopKind,
    pub var_kind: VarKind,
    pub binding: &'a str,
    pub iterable: &'a Expr,
    pub body: &'a Stmt,
}

/// Execute For loop (`for (let x of list)` / `for (let k in obj)`)
pub fn execute_for(vm: &mut VM, state: ForLoopState<'_>) -> Step {
    match state.phase {
        ForPhase::Init => {
            let iterable = eval_or_throw!(vm, state.iterable);
            let items = match iteration_items(state.kind, iterable) {
                Ok(items) => items,
                Err(err) => return throw_info(vm, err),
            };

            set_top_kind(
                vm,
                FrameKind::ForLoop {
                    phase: ForPhase::Iterate,
                    items: Rc::new(items),
                    idx: 0,
                },
            );
            Step::Continue
        }
        ForPhase::Iterate => {
            let Some(scope_depth) = vm.frames.last().map(|f| f.scope_depth) else {
                return Step::Done;
            };
            // Drop the previous iteration's binding scope
            vm.env.truncate(scope_depth);

            let Some(item) = state.items.get(state.idx).cloned() else {
                pop_frame(vm);
                return Step::Continue;
            };

            set_top_kind(
                vm,
                FrameKind::ForLoop {
                    phase: ForPhase::Iterate,
                    items: Rc::clone(&state.items),
                    idx: state.idx + 1,
                },
            );

            vm.env.push_scope();
            if let Err(err) = vm.env.declare(state.binding, item, state.var_kind) {
                return throw_info(vm, err);
            }
            push_stmt(vm, state.body);

            Step::Continue
        }
    }
}

fn iteration_items(kind: ForLoopKind, iterable: Val) -> Result<Vec<Val>, ErrorInfo> {
    let index_list = |len: usize| (0..len).map(|i| Val::Num(i as f64)).collect();

    match (kind, iterable) {
        (ForLoopKind::Of, Val::List(items)) => Ok(items),
        (ForLoopKind::Of, Val::Str(s)) => Ok(s.chars().map(|c| Val::Str(c.to_string())).collect()),
        (ForLoopKind::In, Val::Obj(map)) => {
            let mut keys: Vec<String> = map.into_keys().collect();
            keys.sort();
            Ok(keys.into_iter().map(Val::Str).collect())
        }
        (ForLoopKind::In, Val::List(items)) => Ok(index_list(items.len())),
        (ForLoopKind::In, Val::Str(s)) => Ok(index_list(s.chars().count())),
        (ForLoopKind::Of, Val::Obj(_)) => Err(ErrorInfo::new(
            errors::TYPE_ERROR,
            "Cannot iterate over an object with 'of'; use 'in' to iterate its keys",
        )),
        (_, other) => Err(ErrorInfo::new(
            errors::TYPE_ERROR,
            format!("Cannot iterate over {}", other.type_name()),
        )),
    }
}

/// Execute Try statement
pub fn execute_try(vm: &mut VM, phase: TryPhase, body: &Stmt) -> Step {
    match phase {
        TryPhase::ExecuteTry => {
            set_top_kind(
                vm,
                FrameKind::Try {
                    phase: TryPhase::AwaitTry,
                },
            );
            push_stmt(vm, body);
            Step::Continue
        }
        // Try or catch block finished without throwing
        TryPhase::AwaitTry | TryPhase::ExecuteCatch => {
            pop_frame(vm);
            Step::Continue
        }
    }
}

/// Execute Throw statement
pub fn execute_throw(vm: &mut VM, value: &Expr) -> Step {
    let v = eval_or_throw!(vm, value);
    throw(vm, v)
}

/// Execute Return statement
pub fn execute_return(vm: &mut VM, value: Option<&Expr>) -> Step {
    let val = match value {
        Some(expr) => eval_or_throw!(vm, expr),
        None => Val::Null,
    };

    vm.control = Control::Return(val);
    pop_frame(vm);

    Step::Continue
}

/// Execute expression statement (value is discarded)
pub fn execute_expr(vm: &mut VM, expr: &Expr) -> Step {
    let _ = eval_or_throw!(vm, expr);
    pop_frame(vm);
    Step::Continue
}

/// Execute Break / Continue statements
pub fn execute_loop_control(vm: &mut VM, control: Control) -> Step {
    pop_frame(vm);
    vm.control = control;
    Step::Continue
}
