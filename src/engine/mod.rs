//! Execution engine contract
//!
//! The template processor never compiles or runs code itself. It hands the
//! synthesized unit source to an [`ExecutionEngine`], which either returns
//! diagnostics or a [`CompiledUnit`] that can be invoked once per request.
//!
//! # Concurrency
//!
//! Engines and compiled units are `Send + Sync`. The bundled
//! [`ScriptEngine`](script::ScriptEngine) holds nothing but an immutable
//! [`EngineConfig`](script::EngineConfig); every `invoke` builds a fresh
//! interpreter, so a unit may be invoked from many threads at once.

pub mod script;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub use script::{EngineConfig, ScriptEngine, ScriptUnit};

/// Request parameters, passed through to the unit untouched
pub type RequestParams = HashMap<String, String>;

/* ===================== Contract ===================== */

/// Turns unit source into something callable
pub trait ExecutionEngine: Send + Sync {
    type Unit: CompiledUnit;

    /// Compile unit source. Any diagnostic means the unit is unusable.
    fn compile(&self, source: &str) -> Result<Self::Unit, Vec<Diagnostic>>;
}

/// A compiled unit with one entry point taking the request parameters and
/// the output slot array
pub trait CompiledUnit: Send + Sync {
    /// Run the unit. Slot `i` receives the string value of expression `i`;
    /// slots the run never reached stay empty.
    fn invoke(&self, request: &RequestParams, output: &mut OutputSlots) -> Result<(), RuntimeFault>;
}

/* ===================== Diagnostics ===================== */

/// A compile-time problem, positioned in the unit source (1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} - Error: {}", self.line, self.column, self.message)
    }
}

/* ===================== Runtime Faults ===================== */

/// A failure raised while a unit runs
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct RuntimeFault {
    pub code: String,
    pub message: String,
    /// The failure this one wraps
    #[source]
    pub cause: Option<Box<RuntimeFault>>,
}

impl RuntimeFault {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: RuntimeFault) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Message of the innermost cause, or this fault's own message
    pub fn deepest_message(&self) -> &str {
        let mut current = self;
        while let Some(cause) = &current.cause {
            current = cause;
        }
        &current.message
    }
}

/* ===================== Output Slots ===================== */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("output slot {index} is out of range ({len} slots)")]
    OutOfRange { index: usize, len: usize },
}

/// Fixed-size array of per-expression results, all empty at first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSlots {
    slots: Vec<Option<String>>,
}

impl OutputSlots {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Value of slot `index`; `None` when unfilled or out of range
    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<(), SlotError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SlotError::OutOfRange { index, len })?;
        *slot = Some(value.into());
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.slots.iter().map(|slot| slot.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_start_empty() {
        let slots = OutputSlots::new(2);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots.iter().collect::<Vec<_>>(), vec![None, None]);
    }

    #[test]
    fn test_slot_out_of_range() {
        let mut slots = OutputSlots::new(1);
        slots.set(0, "a").unwrap();
        assert_eq!(slots.get(0), Some("a"));
        assert_eq!(
            slots.set(1, "b"),
            Err(SlotError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_deepest_message() {
        let fault = RuntimeFault::new("USER_ERROR", "outer")
            .with_cause(RuntimeFault::new("USER_ERROR", "middle").with_cause(RuntimeFault::new(
                "DIVISION_BY_ZERO",
                "inner",
            )));
        assert_eq!(fault.deepest_message(), "inner");
        assert_eq!(RuntimeFault::new("X", "only").deepest_message(), "only");
    }

    #[test]
    fn test_diagnostic_display() {
        assert_eq!(
            Diagnostic::new(3, 7, "expected expression").to_string(),
            "3:7 - Error: expected expression"
        );
    }
}
