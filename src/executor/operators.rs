//! Arithmetic and comparison operators
//!
//! Short-circuit operators (`&&`, `||`, `??`) are handled by the expression
//! evaluator because they must not evaluate their right operand eagerly.

use super::errors::{self, ErrorInfo};
use super::types::{BinaryOp, UnaryOp, Val};
use std::cmp::Ordering;

/// Apply a strict binary operator to two evaluated operands
pub fn apply_binary(op: BinaryOp, left: &Val, right: &Val) -> Result<Val, ErrorInfo> {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => arithmetic(op, left, right, |a, b| a - b),
        BinaryOp::Mul => arithmetic(op, left, right, |a, b| a * b),
        BinaryOp::Div => {
            check_divisor(op, left, right)?;
            arithmetic(op, left, right, |a, b| a / b)
        }
        BinaryOp::Mod => {
            check_divisor(op, left, right)?;
            arithmetic(op, left, right, |a, b| a % b)
        }
        BinaryOp::Eq => Ok(Val::Bool(left == right)),
        BinaryOp::Ne => Ok(Val::Bool(left != right)),
        BinaryOp::Lt => compare(op, left, right, Ordering::is_lt),
        BinaryOp::Lte => compare(op, left, right, Ordering::is_le),
        BinaryOp::Gt => compare(op, left, right, Ordering::is_gt),
        BinaryOp::Gte => compare(op, left, right, Ordering::is_ge),
        BinaryOp::And | BinaryOp::Or | BinaryOp::Nullish => Err(ErrorInfo::new(
            errors::INTERNAL_ERROR,
            format!("Operator '{}' must be evaluated lazily", op.symbol()),
        )),
    }
}

pub fn apply_unary(op: UnaryOp, operand: &Val) -> Result<Val, ErrorInfo> {
    match op {
        UnaryOp::Not => Ok(Val::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Val::Num(n) => Ok(Val::Num(-n)),
            other => Err(ErrorInfo::new(
                errors::TYPE_ERROR,
                format!("Cannot negate {}", other.type_name()),
            )),
        },
    }
}

/// `+` adds numbers and concatenates as soon as either side is a string
fn add(left: &Val, right: &Val) -> Result<Val, ErrorInfo> {
    match (left, right) {
        (Val::Num(a), Val::Num(b)) => Ok(Val::Num(a + b)),
        (Val::Str(_), _) | (_, Val::Str(_)) => Ok(Val::Str(format!(
            "{}{}",
            left.to_display_string(),
            right.to_display_string()
        ))),
        (Val::List(a), Val::List(b)) => {
            let mut joined = a.clone();
            joined.extend(b.iter().cloned());
            Ok(Val::List(joined))
        }
        _ => Err(type_mismatch(BinaryOp::Add, left, right)),
    }
}

fn arithmetic(
    op: BinaryOp,
    left: &Val,
    right: &Val,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Val, ErrorInfo> {
    match (left, right) {
        (Val::Num(a), Val::Num(b)) => Ok(Val::Num(f(*a, *b))),
        _ => Err(type_mismatch(op, left, right)),
    }
}

fn check_divisor(op: BinaryOp, left: &Val, right: &Val) -> Result<(), ErrorInfo> {
    if let (Val::Num(_), Val::Num(b)) = (left, right) {
        if *b == 0.0 {
            return Err(ErrorInfo::new(
                errors::DIVISION_BY_ZERO,
                format!("Division by zero in '{}' operation", op.symbol()),
            ));
        }
    }
    Ok(())
}

fn compare(
    op: BinaryOp,
    left: &Val,
    right: &Val,
    test: impl Fn(Ordering) -> bool,
) -> Result<Val, ErrorInfo> {
    let ordering = match (left, right) {
        (Val::Num(a), Val::Num(b)) => a.partial_cmp(b),
        (Val::Str(a), Val::Str(b)) => Some(a.cmp(b)),
        _ => return Err(type_mismatch(op, left, right)),
    };
    // NaN compares false against everything
    Ok(Val::Bool(ordering.map(test).unwrap_or(false)))
}

fn type_mismatch(op: BinaryOp, left: &Val, right: &Val) -> ErrorInfo {
    ErrorInfo::new(
        errors::TYPE_ERROR,
        format!(
            "Cannot apply '{}' to {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ),
    )
}
