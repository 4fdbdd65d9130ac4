//! The processor's outcome and its HTML error pages

use serde::{Deserialize, Serialize};

use crate::engine::{Diagnostic, RuntimeFault};
use crate::html::escape;

/// Outcome of processing one document: the rendered text, or an error page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptResult {
    pub error: bool,
    pub result: String,
}

impl ScriptResult {
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            error: false,
            result: result.into(),
        }
    }

    /// Page listing every compile diagnostic
    pub fn compile_errors(diagnostics: &[Diagnostic]) -> Self {
        let mut page = String::from(
            "<html><body><h1>Script Compilation Errors</h1>\
             <p>The following errors occurred processing the requested resource</p><ul>",
        );
        for d in diagnostics {
            page.push_str(&format!(
                "<li>{}:{} - Error: {}</li>",
                d.line,
                d.column,
                escape(&d.message)
            ));
        }
        page.push_str("</ul></body></html>");

        Self {
            error: true,
            result: page,
        }
    }

    /// Page for a failed run, showing the innermost cause's message
    pub fn runtime_error(fault: &RuntimeFault) -> Self {
        Self::runtime_message(fault.deepest_message())
    }

    pub(crate) fn runtime_message(message: &str) -> Self {
        Self {
            error: true,
            result: format!(
                "<html><body><h1>Runtime Error</h1>\
                 <p>The following runtime error occurred:</p><p>{}</p></body></html>",
                escape(message)
            ),
        }
    }
}
