//! Semantic validation for compiled units
//!
//! This module provides an extensible rule-based validation system that runs
//! after parsing to catch semantic errors that the grammar can't enforce.
//!
//! # Usage
//!
//! ```ignore
//! use stave_core::parser::{parse_unit, semantic_validator::validate_unit};
//!
//! let unit = parse_unit(source)?;
//! let errors = validate_unit(&unit, source);
//! if errors.iter().any(|e| e.is_error()) {
//!     // Report diagnostics
//! }
//! ```
//!
//! # Architecture
//!
//! 1. **ValidationRule trait** - Each rule implements this trait
//! 2. **Validator** - Collects and runs all rules
//! 3. **ValidationError** - The output of validation (errors, warnings, hints)
//!
//! # Adding a New Rule
//!
//! 1. Create a new file in `semantic_validator/rules/`
//! 2. Implement `ValidationRule` for your struct
//! 3. Add it to the `Validator::new()` constructor

pub mod rules;

use crate::executor::types::ast::Span;

use super::UnitDef;

// ============================================================================
// Validation Error Types
// ============================================================================

/// A validation error produced by semantic analysis.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The source location of the issue
    pub span: Span,
    /// Human-readable message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Which rule produced this error
    pub rule_id: &'static str,
}

/// Severity levels for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Must be fixed - the unit is rejected
    Error,
    /// Probably a mistake - logged, the unit still runs
    Warning,
}

impl ValidationError {
    /// Create a new error
    pub fn error(span: Span, message: impl Into<String>, rule_id: &'static str) -> Self {
        Self {
            span,
            message: message.into(),
            severity: Severity::Error,
            rule_id,
        }
    }

    /// Create a new warning
    pub fn warning(span: Span, message: impl Into<String>, rule_id: &'static str) -> Self {
        Self {
            span,
            message: message.into(),
            severity: Severity::Warning,
            rule_id,
        }
    }

    /// Check if this is an error (not a warning)
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{} at line {}, col {}: {} [{}]",
            severity,
            self.span.start_line + 1,
            self.span.start_col + 1,
            self.message,
            self.rule_id
        )
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait that all validation rules must implement.
///
/// Each rule checks one aspect of the unit and must not depend on other
/// rules' results.
pub trait ValidationRule: Send + Sync {
    /// Unique identifier for this rule (e.g., "loop-control")
    fn id(&self) -> &'static str;

    /// Human-readable description of what this rule checks
    fn description(&self) -> &'static str;

    /// Run the validation and return any errors found. Empty means no issues.
    fn validate(&self, unit: &UnitDef, source: &str) -> Vec<ValidationError>;
}

// ============================================================================
// Validator - Runs All Rules
// ============================================================================

/// The main validator that orchestrates all validation rules.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator with all built-in rules.
    pub fn new() -> Self {
        Self {
            rules: vec![
                // Error rules
                Box::new(rules::LoopControlRule),
                Box::new(rules::ReservedBindingRule),
                // Warning rules
                Box::new(rules::UnreachableCodeRule),
            ],
        }
    }

    /// Run all validation rules and collect errors.
    pub fn validate(&self, unit: &UnitDef, source: &str) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = self
            .rules
            .iter()
            .flat_map(|rule| rule.validate(unit, source))
            .collect();
        errors.sort_by_key(|e| (e.span.start_line, e.span.start_col));
        errors
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Validate a unit and return every finding, in source order.
pub fn validate_unit(unit: &UnitDef, source: &str) -> Vec<ValidationError> {
    Validator::new().validate(unit, source)
}

#[cfg(test)]
mod tests;
