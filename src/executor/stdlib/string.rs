//! String stdlib functions

use super::{expect_arg_count, expect_str};
use crate::executor::errors::ErrorInfo;
use crate::executor::types::Val;
use crate::html;

pub fn upper(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 1)?;
    Ok(Val::Str(expect_str(&args[0], "Argument")?.to_uppercase()))
}

pub fn lower(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 1)?;
    Ok(Val::Str(expect_str(&args[0], "Argument")?.to_lowercase()))
}

pub fn trim(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 1)?;
    Ok(Val::Str(expect_str(&args[0], "Argument")?.trim().to_string()))
}

/// escape(value) - HTML-escape the string form of any value
pub fn escape(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 1)?;
    Ok(Val::Str(html::escape(&args[0].to_display_string())))
}

/// split(text, separator) - split into a list of strings
pub fn split(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 2)?;
    let text = expect_str(&args[0], "First argument (text)")?;
    let sep = expect_str(&args[1], "Second argument (separator)")?;

    let parts = if sep.is_empty() {
        text.chars().map(|c| Val::Str(c.to_string())).collect()
    } else {
        text.split(sep).map(|s| Val::Str(s.to_string())).collect()
    };
    Ok(Val::List(parts))
}

/// replace(text, from, to) - replace every occurrence
pub fn replace(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 3)?;
    let text = expect_str(&args[0], "First argument (text)")?;
    let from = expect_str(&args[1], "Second argument (from)")?;
    let to = expect_str(&args[2], "Third argument (to)")?;

    if from.is_empty() {
        return Ok(Val::Str(text.to_string()));
    }
    Ok(Val::Str(text.replace(from, to)))
}
