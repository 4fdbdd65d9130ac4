pub mod cli;
pub mod config;
pub mod engine;
pub mod executor;
pub mod html;
pub mod parser;
pub mod template;

// Re-export main types
pub use config::Config;
pub use engine::{
    CompiledUnit, Diagnostic, EngineConfig, ExecutionEngine, OutputSlots, RequestParams,
    RuntimeFault, ScriptEngine,
};
pub use template::{ScriptResult, TemplateError, TemplateProcessor};
