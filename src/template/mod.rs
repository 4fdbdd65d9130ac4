//! Server-page template processing
//!
//! A document is markup with two kinds of embedded code: statement blocks
//! `{ ... }` and expression blocks `@{ ... }`. Processing runs one
//! synchronous pipeline per document:
//!
//! 1. [`lexer`] splits the document into segments
//! 2. [`synthesizer`] builds the unit source and the markup skeleton
//! 3. the [`ExecutionEngine`] compiles the unit and invokes it once
//! 4. [`composer`] writes the collected values into the skeleton
//!
//! Every failure is converted into a [`ScriptResult`] error page by
//! [`TemplateProcessor::process`]; [`TemplateProcessor::render`] keeps the
//! typed [`TemplateError`] instead.

pub mod composer;
pub mod error;
pub mod lexer;
pub mod result;
pub mod synthesizer;


use tracing::{debug, debug_span, warn};

use crate::engine::{
    CompiledUnit, Diagnostic, EngineConfig, ExecutionEngine, OutputSlots, RequestParams,
    ScriptEngine,
};

pub use composer::{compose, CompositionError};
pub use error::TemplateError;
pub use lexer::{lex, Segment, SegmentKind};
pub use result::ScriptResult;
pub use synthesizer::{synthesize, Skeleton, Synthesis};

/// Drives documents through the pipeline using one execution engine
pub struct TemplateProcessor<E: ExecutionEngine = ScriptEngine> {
    engine: E,
}

impl<E: ExecutionEngine> TemplateProcessor<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Lex and synthesize without touching the engine
    pub fn prepare(&self, document: &str) -> Synthesis {
        let segments = lex(document);
        let synthesis = synthesize(&segments);
        debug!(
            segments = segments.len(),
            expressions = synthesis.expression_count,
            "Synthesized unit"
        );
        synthesis
    }

    /// Compile a document's unit and report its diagnostics, if any
    pub fn check(&self, document: &str) -> Vec<Diagnostic> {
        let synthesis = self.prepare(document);
        match self.engine.compile(&synthesis.unit_source) {
            Ok(_) => Vec::new(),
            Err(diagnostics) => diagnostics,
        }
    }

    /// Render a document, keeping the failure typed
    pub fn render(&self, document: &str, request: &RequestParams) -> Result<String, TemplateError> {
        let span = debug_span!("render", bytes = document.len());
        let _guard = span.enter();

        let synthesis = self.prepare(document);
        let unit = self
            .engine
            .compile(&synthesis.unit_source)
            .map_err(TemplateError::Compile)?;

        let mut slots = OutputSlots::new(synthesis.expression_count);
        unit.invoke(request, &mut slots)?;

        let output = compose(&synthesis.skeleton, &slots)?;
        debug!(bytes = output.len(), "Rendered document");
        Ok(output)
    }

    /// Render a document; failures become an HTML error page
    pub fn process(&self, document: &str, request: &RequestParams) -> ScriptResult {
        match self.render(document, request) {
            Ok(output) => ScriptResult::success(output),
            Err(err) => {
                warn!(error = %err, "Render failed");
                ScriptResult::from(&err)
            }
        }
    }
}

impl TemplateProcessor<ScriptEngine> {
    /// Processor over the bundled script engine
    pub fn with_config(config: EngineConfig) -> Self {
        Self::new(ScriptEngine::new(config))
    }
}

impl Default for TemplateProcessor<ScriptEngine> {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}
