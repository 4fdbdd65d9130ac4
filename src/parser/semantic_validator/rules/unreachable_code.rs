//! Rule: Unreachable Code
//!
//! Reports a warning for the first statement of a block that follows a
//! `return`, `break`, `continue` or `throw` in the same block.

use crate::executor::types::ast::Stmt;
use crate::parser::UnitDef;

use super::super::{ValidationError, ValidationRule};

/// Rule that checks for statements that can never execute.
pub struct UnreachableCodeRule;

impl ValidationRule for UnreachableCodeRule {
    fn id(&self) -> &'static str {
        "unreachable-code"
    }

    fn description(&self) -> &'static str {
        "Statements after return, break, continue or throw never run"
    }

    fn validate(&self, unit: &UnitDef, _source: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_stmt(&unit.body, self.id(), &mut errors);
        errors
    }
}

fn keyword(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Return { .. } => "return",
        Stmt::Break { .. } => "break",
        Stmt::Continue { .. } => "continue",
        _ => "throw",
    }
}

fn check_stmt(stmt: &Stmt, rule_id: &'static str, errors: &mut Vec<ValidationError>) {
    match stmt {
        Stmt::Block { body, .. } => {
            if let Some(pos) = body.iter().position(Stmt::is_terminator) {
                if let Some(next) = body.get(pos + 1) {
                    errors.push(ValidationError::warning(
                        next.span(),
                        format!("Unreachable code after '{}'", keyword(&body[pos])),
                        rule_id,
                    ));
                }
            }
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

        Stmt::While { body, .. } | Stmt::ForLoop { body, .. } => check_stmt(body, rule_id, errors),

        Stmt::Try {
            body, catch_body, ..
        } => {
            check_stmt(body, rule_id, errors);
            check_stmt(catch_body, rule_id, errors);
        }

        _ => {}
    }
}
