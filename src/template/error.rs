//! Typed failures of the render pipeline

use thiserror::Error;

use super::composer::CompositionError;
use super::result::ScriptResult;
use crate::engine::{Diagnostic, RuntimeFault};

#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    #[error("compilation failed with {} diagnostic(s)", .0.len())]
    Compile(Vec<Diagnostic>),

    #[error("runtime error: {}", .0.deepest_message())]
    Runtime(#[from] RuntimeFault),

    #[error(transparent)]
    Composition(#[from] CompositionError),
}

impl From<&TemplateError> for ScriptResult {
    fn from(err: &TemplateError) -> Self {
        match err {
            TemplateError::Compile(diagnostics) => ScriptResult::compile_errors(diagnostics),
            TemplateError::Runtime(fault) => ScriptResult::runtime_error(fault),
            TemplateError::Composition(inner) => ScriptResult::runtime_message(&inner.to_string()),
        }
    }
}
