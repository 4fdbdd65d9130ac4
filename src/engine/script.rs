//! The bundled execution engine: Stave script on the frame-stack interpreter

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use super::{CompiledUnit, Diagnostic, ExecutionEngine, OutputSlots, RequestParams, RuntimeFault};
use crate::executor::errors::{self, ErrorInfo};
use crate::executor::types::VarKind;
use crate::executor::{run_until_done, Control, Env, Val, VM};
use crate::parser::semantic_validator::validate_unit;
use crate::parser::{self, UnitDef};

/// Default step budget for one invocation
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Immutable engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Abort a run after this many interpreter steps; `None` disables the limit
    pub max_steps: Option<u64>,
    /// Run semantic validation during compile
    pub validate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(DEFAULT_MAX_STEPS),
            validate: true,
        }
    }
}

/// Compiles unit source with the pest parser and runs it on a fresh VM per
/// invocation
#[derive(Debug, Clone, Default)]
pub struct ScriptEngine {
    config: EngineConfig,
}

impl ScriptEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl ExecutionEngine for ScriptEngine {
    type Unit = ScriptUnit;

    fn compile(&self, source: &str) -> Result<ScriptUnit, Vec<Diagnostic>> {
        let unit = parser::parse_unit(source).map_err(|err| {
            let (line, column) = err.line_col();
            vec![Diagnostic::new(line, column, err.message())]
        })?;

        if self.config.validate {
            let mut diagnostics = Vec::new();
            for finding in validate_unit(&unit, source) {
                let (line, column) = (finding.span.start_line + 1, finding.span.start_col + 1);
                if finding.is_error() {
                    diagnostics.push(Diagnostic::new(line, column, finding.message));
                } else {
                    warn!(rule = finding.rule_id, line, column, "{}", finding.message);
                }
            }
            if !diagnostics.is_empty() {
                return Err(diagnostics);
            }
        }

        debug!(entry = %unit.name, params = unit.params.len(), "compiled unit");

        Ok(ScriptUnit {
            unit,
            max_steps: self.config.max_steps,
        })
    }
}

/// A parsed and validated unit. Plain data, so it can be shared across
/// threads and invoked concurrently.
#[derive(Debug, Clone)]
pub struct ScriptUnit {
    unit: UnitDef,
    max_steps: Option<u64>,
}

impl CompiledUnit for ScriptUnit {
    fn invoke(&self, request: &RequestParams, output: &mut OutputSlots) -> Result<(), RuntimeFault> {
        let params: HashMap<String, Val> = request
            .iter()
            .map(|(k, v)| (k.clone(), Val::Str(v.clone())))
            .collect();

        // Request parameters are also readable as bare globals
        let mut env = Env::new(params.clone());

        // Positional arguments: request mapping, then the slot array
        let args = [Val::Obj(params), Val::List(vec![Val::Null; output.len()])];
        for (name, value) in self.unit.params.iter().zip(args) {
            env.declare(name, value, VarKind::Let)
                .map_err(|err| fault_from_info(&err))?;
        }

        let mut vm = VM::new(self.unit.body.clone(), env).with_max_steps(self.max_steps);
        run_until_done(&mut vm);
        trace!(steps = vm.steps, "unit finished");

        if let Control::Throw(error) = vm.control {
            return Err(fault_from_val(error));
        }

        let Some(slot_param) = self.unit.params.get(1) else {
            return Ok(());
        };

        match vm.env.get_unit(slot_param) {
            Some(Val::List(items)) => {
                for (index, item) in items.iter().enumerate().take(output.len()) {
                    let text = match item {
                        Val::Null => continue,
                        Val::Str(s) => s.clone(),
                        other => other.to_display_string(),
                    };
                    output
                        .set(index, text)
                        .map_err(|err| RuntimeFault::new(errors::INTERNAL_ERROR, err.to_string()))?;
                }
                Ok(())
            }
            Some(other) => Err(RuntimeFault::new(
                errors::TYPE_ERROR,
                format!(
                    "'{}' must remain a list, found {}",
                    slot_param,
                    other.type_name()
                ),
            )),
            None => Ok(()),
        }
    }
}

fn fault_from_info(info: &ErrorInfo) -> RuntimeFault {
    let fault = RuntimeFault::new(&info.code, &info.message);
    match &info.cause {
        Some(cause) => fault.with_cause(fault_from_info(cause)),
        None => fault,
    }
}

/// Uncaught thrown value to fault; non-error values become user errors
fn fault_from_val(value: Val) -> RuntimeFault {
    match value {
        Val::Error(info) => fault_from_info(&info),
        other => RuntimeFault::new(errors::USER_ERROR, other.to_display_string()),
    }
}
