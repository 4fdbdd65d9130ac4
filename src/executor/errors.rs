//! Script error values and their codes
//!
//! Errors raised by the interpreter are ordinary values (`Val::Error`) so that
//! `try`/`catch` can inspect them. The codes are stable strings.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const TYPE_ERROR: &str = "TYPE_ERROR";
pub const PROPERTY_NOT_FOUND: &str = "PROPERTY_NOT_FOUND";
pub const UNDEFINED_VARIABLE: &str = "UNDEFINED_VARIABLE";
pub const NOT_A_FUNCTION: &str = "NOT_A_FUNCTION";
pub const WRONG_ARG_COUNT: &str = "WRONG_ARG_COUNT";
pub const WRONG_ARG_TYPE: &str = "WRONG_ARG_TYPE";
pub const DIVISION_BY_ZERO: &str = "DIVISION_BY_ZERO";
pub const INDEX_OUT_OF_BOUNDS: &str = "INDEX_OUT_OF_BOUNDS";
pub const CONST_REASSIGNMENT: &str = "CONST_REASSIGNMENT";
pub const ALREADY_DECLARED: &str = "ALREADY_DECLARED";
pub const STEP_LIMIT_EXCEEDED: &str = "STEP_LIMIT_EXCEEDED";
/// Raised by `throw` with a non-error value
pub const USER_ERROR: &str = "USER_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Error payload carried by `Val::Error`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    /// The error this one wraps, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ErrorInfo>>,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: ErrorInfo) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The innermost error in the cause chain
    pub fn root_cause(&self) -> &ErrorInfo {
        let mut current = self;
        while let Some(cause) = &current.cause {
            current = cause;
        }
        current
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
