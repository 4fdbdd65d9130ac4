//! Test helpers for executor tests
//!
//! Common utilities for parsing scripts and building VMs

use crate::executor::{run_until_done, Control, Env, ErrorInfo, Stmt, Val, VM};
use crate::parser;
use std::collections::HashMap;

/// Parse a statement list, round-trip it through JSON and build a VM
///
/// The round trip keeps the AST serialization honest; the VM starts with the
/// stdlib plus the given globals.
pub fn parse_and_build_vm(source: &str, globals: HashMap<String, Val>) -> VM {
    let program = parser::parse(source).expect("Parse failed");

    let json = serde_json::to_string(&program).expect("Serialization failed");
    let program: Stmt = serde_json::from_str(&json).expect("Deserialization failed");

    VM::new(program, Env::new(globals))
}

/// Run source to completion with no extra globals
pub fn run(source: &str) -> VM {
    run_with(source, HashMap::new())
}

/// Run source to completion with the given globals
pub fn run_with(source: &str, globals: HashMap<String, Val>) -> VM {
    let mut vm = parse_and_build_vm(source, globals);
    run_until_done(&mut vm);
    vm
}

/// The value returned by the script; panics on anything else
pub fn returned(vm: &VM) -> Val {
    match &vm.control {
        Control::Return(v) => v.clone(),
        other => panic!("Expected Control::Return, got {:?}", other),
    }
}

/// The error thrown by the script; panics on anything else
pub fn thrown(vm: &VM) -> ErrorInfo {
    match &vm.control {
        Control::Throw(Val::Error(err)) => err.clone(),
        other => panic!("Expected Control::Throw with Error, got {:?}", other),
    }
}

pub fn num(n: f64) -> Val {
    Val::Num(n)
}

pub fn s(text: &str) -> Val {
    Val::Str(text.to_string())
}
