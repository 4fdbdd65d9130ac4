//! Rule: Reserved Binding
//!
//! The unit's parameters (`request` and the output slot array) belong to the
//! template processor, and every expression line calls `String`. User code
//! may read these names and write individual slots, but must not declare or
//! rebind them.
//!
//! ```text
//! let request = {};        // error
//! __output__ = [];         // error
//! let String = upper;     // error
//! __output__[0] = "x";     // allowed, writes a slot
//! ```

use crate::executor::types::ast::{Span, Stmt};
use crate::parser::UnitDef;

use super::super::{ValidationError, ValidationRule};

/// Names user code must not rebind
pub const RESERVED_NAMES: [&str; 3] = ["request", "__output__", "String"];

/// Rule that rejects declarations and plain reassignment of reserved names.
pub struct ReservedBindingRule;

impl ValidationRule for ReservedBindingRule {
    fn id(&self) -> &'static str {
        "reserved-binding"
    }

    fn description(&self) -> &'static str {
        "'request', '__output__' and 'String' cannot be declared or reassigned"
    }

    fn validate(&self, unit: &UnitDef, _source: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_stmt(&unit.body, self.id(), &mut errors);
        errors
    }
}

fn report(name: &str, span: Span, action: &str, rule_id: &'static str, errors: &mut Vec<ValidationError>) {
    if RESERVED_NAMES.contains(&name) {
        errors.push(ValidationError::error(
            span,
            format!("'{}' is reserved and cannot be {}", name, action),
            rule_id,
        ));
    }
}

fn check_stmt(stmt: &Stmt, rule_id: &'static str, errors: &mut Vec<ValidationError>) {
    match stmt {
        Stmt::Declare { name, span, .. } => report(name, *span, "declared", rule_id, errors),

        Stmt::Assign {
            var, var_span, path, ..
        } if path.is_empty() => report(var, *var_span, "reassigned", rule_id, errors),

        Stmt::ForLoop {
            binding,
            binding_span,
            body,
            ..
        } => {
            report(binding, *binding_span, "declared", rule_id, errors);
            check_stmt(body, rule_id, errors);
        }

        Stmt::Try {
            body,
            catch_var,
            catch_var_span,
            catch_body,
            ..
        } => {
            check_stmt(body, rule_id, errors);
            report(catch_var, *catch_var_span, "declared", rule_id, errors);
            check_stmt(catch_body, rule_id, errors);
        }

        Stmt::Block { body, .. } => {
            for s in body {
                check_stmt(s, rule_id, errors);
            }
        }

        Stmt::If { then_s, else_s, .. } => {
            check_stmt(then_s, rule_id, errors);
            if let Some(else_stmt) = else_s {
                check_stmt(else_stmt, rule_id, errors);
            }
        }

        Stmt::While { body, .. } => check_stmt(body, rule_id, errors),

        _ => {}
    }
}
