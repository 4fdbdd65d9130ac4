//! Math stdlib functions

use super::{expect_arg_count, expect_num};
use crate::executor::errors::{self, ErrorInfo};
use crate::executor::types::Val;

pub fn floor(args: &[Val]) -> Result<Val, ErrorInfo> {
    unary(args, f64::floor)
}

pub fn ceil(args: &[Val]) -> Result<Val, ErrorInfo> {
    unary(args, f64::ceil)
}

pub fn abs(args: &[Val]) -> Result<Val, ErrorInfo> {
    unary(args, f64::abs)
}

/// Rounds half up, so `Math.round(-2.5)` is `-2`
pub fn round(args: &[Val]) -> Result<Val, ErrorInfo> {
    unary(args, |n| (n + 0.5).floor())
}

pub fn min(args: &[Val]) -> Result<Val, ErrorInfo> {
    fold(args, f64::min)
}

pub fn max(args: &[Val]) -> Result<Val, ErrorInfo> {
    fold(args, f64::max)
}

fn unary(args: &[Val], f: impl Fn(f64) -> f64) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 1)?;
    let n = expect_num(&args[0], "Argument")?;
    Ok(Val::Num(f(n)))
}

fn fold(args: &[Val], f: impl Fn(f64, f64) -> f64) -> Result<Val, ErrorInfo> {
    let Some((first, rest)) = args.split_first() else {
        return Err(ErrorInfo::new(
            errors::WRONG_ARG_COUNT,
            "Expected at least 1 argument, got 0",
        ));
    };
    let mut acc = expect_num(first, "Argument")?;
    for arg in rest {
        acc = f(acc, expect_num(arg, "Argument")?);
    }
    Ok(Val::Num(acc))
}
