//! Standard library function implementations
//!
//! Functions are organized by category. Global functions (`String`, `len`,
//! `escape`, ...) live directly in the global scope; math helpers hang off a
//! `Math` object the way scripts expect.

pub mod collections;
pub mod convert;
pub mod math;
pub mod string;

use super::errors::{self, ErrorInfo};
use super::types::Val;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/* ===================== Standard Library Function Types ===================== */

/// Standard library function identifiers
///
/// Each variant represents a specific stdlib function. They are plain data so
/// they can be stored in the environment like any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StdlibFunc {
    // Conversion
    String,
    Number,
    Error,
    // Strings
    Upper,
    Lower,
    Trim,
    Escape,
    Split,
    Replace,
    // Collections
    Len,
    Join,
    Contains,
    Keys,
    Range,
    // Math
    MathFloor,
    MathCeil,
    MathAbs,
    MathRound,
    MathMin,
    MathMax,
}

impl StdlibFunc {
    /// Name the function is reachable under from scripts
    pub fn name(&self) -> &'static str {
        match self {
            StdlibFunc::String => "String",
            StdlibFunc::Number => "Number",
            StdlibFunc::Error => "Error",
            StdlibFunc::Upper => "upper",
            StdlibFunc::Lower => "lower",
            StdlibFunc::Trim => "trim",
            StdlibFunc::Escape => "escape",
            StdlibFunc::Split => "split",
            StdlibFunc::Replace => "replace",
            StdlibFunc::Len => "len",
            StdlibFunc::Join => "join",
            StdlibFunc::Contains => "contains",
            StdlibFunc::Keys => "keys",
            StdlibFunc::Range => "range",
            StdlibFunc::MathFloor => "Math.floor",
            StdlibFunc::MathCeil => "Math.ceil",
            StdlibFunc::MathAbs => "Math.abs",
            StdlibFunc::MathRound => "Math.round",
            StdlibFunc::MathMin => "Math.min",
            StdlibFunc::MathMax => "Math.max",
        }
    }
}

/* ===================== Stdlib Dispatcher ===================== */

/// Call a standard library function with arguments
pub fn call_stdlib_func(func: &StdlibFunc, args: &[Val]) -> Result<Val, ErrorInfo> {
    match func {
        StdlibFunc::String => convert::string(args),
        StdlibFunc::Number => convert::number(args),
        StdlibFunc::Error => convert::error(args),
        StdlibFunc::Upper => string::upper(args),
        StdlibFunc::Lower => string::lower(args),
        StdlibFunc::Trim => string::trim(args),
        StdlibFunc::Escape => string::escape(args),
        StdlibFunc::Split => string::split(args),
        StdlibFunc::Replace => string::replace(args),
        StdlibFunc::Len => collections::len(args),
        StdlibFunc::Join => collections::join(args),
        StdlibFunc::Contains => collections::contains(args),
        StdlibFunc::Keys => collections::keys(args),
        StdlibFunc::Range => collections::range(args),
        StdlibFunc::MathFloor => math::floor(args),
        StdlibFunc::MathCeil => math::ceil(args),
        StdlibFunc::MathAbs => math::abs(args),
        StdlibFunc::MathRound => math::round(args),
        StdlibFunc::MathMin => math::min(args),
        StdlibFunc::MathMax => math::max(args),
    }
}

/* ===================== Environment Injection ===================== */

/// Inject standard library functions and objects into a scope
pub fn inject_stdlib(env: &mut HashMap<String, Val>) {
    let globals = [
        StdlibFunc::String,
        StdlibFunc::Number,
        StdlibFunc::Error,
        StdlibFunc::Upper,
        StdlibFunc::Lower,
        StdlibFunc::Trim,
        StdlibFunc::Escape,
        StdlibFunc::Split,
        StdlibFunc::Replace,
        StdlibFunc::Len,
        StdlibFunc::Join,
        StdlibFunc::Contains,
        StdlibFunc::Keys,
        StdlibFunc::Range,
    ];
    for func in globals {
        env.insert(func.name().to_string(), Val::NativeFunc(func));
    }

    let mut math_obj = HashMap::new();
    for (name, func) in [
        ("floor", StdlibFunc::MathFloor),
        ("ceil", StdlibFunc::MathCeil),
        ("abs", StdlibFunc::MathAbs),
        ("round", StdlibFunc::MathRound),
        ("min", StdlibFunc::MathMin),
        ("max", StdlibFunc::MathMax),
    ] {
        math_obj.insert(name.to_string(), Val::NativeFunc(func));
    }
    env.insert("Math".to_string(), Val::Obj(math_obj));
}

/* ===================== Argument Helpers ===================== */

pub(crate) fn expect_arg_count(args: &[Val], expected: usize) -> Result<(), ErrorInfo> {
    if args.len() != expected {
        return Err(ErrorInfo::new(
            errors::WRONG_ARG_COUNT,
            format!("Expected {} argument(s), got {}", expected, args.len()),
        ));
    }
    Ok(())
}

pub(crate) fn expect_arg_range(args: &[Val], min: usize, max: usize) -> Result<(), ErrorInfo> {
    if args.len() < min || args.len() > max {
        return Err(ErrorInfo::new(
            errors::WRONG_ARG_COUNT,
            format!(
                "Expected {} to {} arguments, got {}",
                min,
                max,
                args.len()
            ),
        ));
    }
    Ok(())
}

pub(crate) fn expect_str<'a>(value: &'a Val, what: &str) -> Result<&'a str, ErrorInfo> {
    match value {
        Val::Str(s) => Ok(s),
        other => Err(ErrorInfo::new(
            errors::WRONG_ARG_TYPE,
            format!("{} must be a string, got {}", what, other.type_name()),
        )),
    }
}

pub(crate) fn expect_num(value: &Val, what: &str) -> Result<f64, ErrorInfo> {
    match value {
        Val::Num(n) => Ok(*n),
        other => Err(ErrorInfo::new(
            errors::WRONG_ARG_TYPE,
            format!("{} must be a number, got {}", what, other.type_name()),
        )),
    }
}
