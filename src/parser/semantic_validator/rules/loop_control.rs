//! Rule: Loop Control
//!
//! Reports an error when `break` or `continue` appears outside of a loop.
//!
//! ```text
//! if (done) {
//!     break;   // error: not inside while/for
//! }
//! ```

use crate::executor::types::ast::Stmt;
use crate::parser::UnitDef;

use super::super::{ValidationError, ValidationRule};

/// Rule that checks `break` / `continue` placement.
pub struct LoopControlRule;

impl ValidationRule for LoopControlRule {
    fn id(&self) -> &'static str {
        "loop-control"
    }

    fn description(&self) -> &'static str {
        "'break' and 'continue' must appear inside a loop"
    }

    fn validate(&self, unit: &UnitDef, _source: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_stmt(&unit.body, false, self.id(), &mut errors);
        errors
    }
}

fn check_stmt(stmt: &Stmt, in_loop: bool, rule_id: &'static str, errors: &mut Vec<ValidationError>) {
    match stmt {
        Stmt::Break { span } if !in_loop => errors.push(ValidationError::error(
            *span,
            "'break' can only be used inside a loop",
            rule_id,
        )),
        Stmt::Continue { span } if !in_loop => errors.push(ValidationError::error(
            *span,
            "'continue' can only be used inside a loop",
            rule_id,
        )),

        Stmt::While { body, .. } | Stmt::ForLoop { body, .. } => {
            check_stmt(body, true, rule_id, errors)
        }

        Stmt::Block { body, .. } => {
            for s in body {
                check_stmt(s, in_loop, rule_id, errors);
            }
        }

        Stmt::If { then_s, else_s, .. } => {
            check_stmt(then_s, in_loop, rule_id, errors);
            if let Some(else_stmt) = else_s {
                check_stmt(else_stmt, in_loop, rule_id, errors);
            }
        }

        Stmt::Try {
            body, catch_body, ..
        } => {
            check_stmt(body, in_loop, rule_id, errors);
            check_stmt(catch_body, in_loop, rule_id, errors);
        }

        _ => {}
    }
}
