//! Expression evaluation
//!
//! Expressions are evaluated recursively to values. Any failure becomes a
//! thrown error value that the statement handlers turn into `Control::Throw`.

use super::env::Env;
use super::errors::{self, ErrorInfo};
use super::operators::{apply_binary, apply_unary};
use super::stdlib::call_stdlib_func;
use super::types::{BinaryOp, Expr, Val};
use std::collections::HashMap;

/// Result of evaluating an expression
#[derive(Debug, Clone, PartialEq)]
pub enum EvalResult {
    /// Expression evaluated to a value
    Value { v: Val },
    /// Expression threw an error
    Throw { error: Val },
}

impl From<Result<Val, ErrorInfo>> for EvalResult {
    fn from(result: Result<Val, ErrorInfo>) -> Self {
        match result {
            Ok(v) => EvalResult::Value { v },
            Err(err) => EvalResult::Throw {
                error: Val::Error(err),
            },
        }
    }
}

/// Evaluate an expression to a value
pub fn eval_expr(expr: &Expr, env: &Env) -> EvalResult {
    eval(expr, env).into()
}

pub(crate) fn eval(expr: &Expr, env: &Env) -> Result<Val, ErrorInfo> {
    match expr {
        Expr::LitBool { v, .. } => Ok(Val::Bool(*v)),

        Expr::LitNum { v, .. } => Ok(Val::Num(*v)),

        Expr::LitStr { v, .. } => Ok(Val::Str(v.clone())),

        Expr::LitNull { .. } => Ok(Val::Null),

        Expr::LitList { elements, .. } => elements
            .iter()
            .map(|e| eval(e, env))
            .collect::<Result<Vec<_>, _>>()
            .map(Val::List),

        Expr::LitObj { properties, .. } => {
            let mut map = HashMap::with_capacity(properties.len());
            for (key, _, value) in properties {
                map.insert(key.clone(), eval(value, env)?);
            }
            Ok(Val::Obj(map))
        }

        Expr::Ident { name, .. } => env.get(name).cloned().ok_or_else(|| {
            ErrorInfo::new(
                errors::UNDEFINED_VARIABLE,
                format!("Variable '{}' is not defined", name),
            )
        }),

        Expr::Member {
            object,
            property,
            optional,
            ..
        } => {
            let obj = eval(object, env)?;
            get_member(&obj, property, *optional)
        }

        Expr::Index { object, index, .. } => {
            let obj = eval(object, env)?;
            let idx = eval(index, env)?;
            get_index(&obj, &idx)
        }

        Expr::Call { callee, args, .. } => {
            let func = eval(callee, env)?;
            let args = args
                .iter()
                .map(|a| eval(a, env))
                .collect::<Result<Vec<_>, _>>()?;

            match func {
                Val::NativeFunc(f) => call_stdlib_func(&f, &args),
                other => Err(ErrorInfo::new(
                    errors::NOT_A_FUNCTION,
                    format!("Cannot call {} value", other.type_name()),
                )),
            }
        }

        Expr::Unary { op, operand, .. } => {
            let v = eval(operand, env)?;
            apply_unary(*op, &v)
        }

        Expr::BinaryOp {
            op, left, right, ..
        } => {
            let l = eval(left, env)?;
            match op {
                BinaryOp::And => {
                    if l.is_truthy() {
                        eval(right, env)
                    } else {
                        Ok(l)
                    }
                }
                BinaryOp::Or => {
                    if l.is_truthy() {
                        Ok(l)
                    } else {
                        eval(right, env)
                    }
                }
                BinaryOp::Nullish => {
                    if l == Val::Null {
                        eval(right, env)
                    } else {
                        Ok(l)
                    }
                }
                _ => {
                    let r = eval(right, env)?;
                    apply_binary(*op, &l, &r)
                }
            }
        }

        Expr::Ternary {
            condition,
            consequent,
            alternate,
            ..
        } => {
            if eval(condition, env)?.is_truthy() {
                eval(consequent, env)
            } else {
                eval(alternate, env)
            }
        }
    }
}

/// Property access (`obj.prop` / `obj?.prop`)
pub(crate) fn get_member(obj: &Val, property: &str, optional: bool) -> Result<Val, ErrorInfo> {
    match obj {
        Val::Obj(map) => match map.get(property) {
            Some(v) => Ok(v.clone()),
            None if optional => Ok(Val::Null),
            None => Err(ErrorInfo::new(
                errors::PROPERTY_NOT_FOUND,
                format!("Property '{}' not found", property),
            )),
        },
        Val::Null if optional => Ok(Val::Null),
        Val::Str(s) if property == "length" => Ok(Val::Num(s.chars().count() as f64)),
        Val::List(items) if property == "length" => Ok(Val::Num(items.len() as f64)),
        Val::Error(err) => match property {
            "code" => Ok(Val::Str(err.code.clone())),
            "message" => Ok(Val::Str(err.message.clone())),
            "cause" => Ok(err
                .cause
                .as_ref()
                .map(|c| Val::Error((**c).clone()))
                .unwrap_or(Val::Null)),
            _ if optional => Ok(Val::Null),
            _ => Err(ErrorInfo::new(
                errors::PROPERTY_NOT_FOUND,
                format!("Property '{}' not found", property),
            )),
        },
        _ if optional => Ok(Val::Null),
        other => Err(ErrorInfo::new(
            errors::TYPE_ERROR,
            format!(
                "Cannot access property '{}' on non-object value ({})",
                property,
                other.type_name()
            ),
        )),
    }
}

/// Index access (`obj[key]`). Missing keys and out-of-range indices read as
/// null, so index access doubles as a safe lookup.
pub(crate) fn get_index(obj: &Val, idx: &Val) -> Result<Val, ErrorInfo> {
    match (obj, idx) {
        (Val::List(items), Val::Num(n)) => Ok(list_index(*n, items.len())
            .and_then(|i| items.get(i).cloned())
            .unwrap_or(Val::Null)),
        (Val::Str(s), Val::Num(n)) => Ok(list_index(*n, usize::MAX)
            .and_then(|i| s.chars().nth(i))
            .map(|c| Val::Str(c.to_string()))
            .unwrap_or(Val::Null)),
        (Val::Obj(map), key @ (Val::Str(_) | Val::Num(_))) => Ok(map
            .get(&key.to_display_string())
            .cloned()
            .unwrap_or(Val::Null)),
        (obj, idx) => Err(ErrorInfo::new(
            errors::TYPE_ERROR,
            format!(
                "Cannot index {} with {}",
                obj.type_name(),
                idx.type_name()
            ),
        )),
    }
}

/// Convert a numeric index into a position, rejecting fractions and negatives
pub(crate) fn list_index(n: f64, len: usize) -> Option<usize> {
    if n < 0.0 || n.fract() != 0.0 || n >= len as f64 {
        return None;
    }
    Some(n as usize)
}
