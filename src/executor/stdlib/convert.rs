//! Conversion and error-construction stdlib functions

use super::{expect_arg_count, expect_arg_range, expect_str};
use crate::executor::errors::{self, ErrorInfo};
use crate::executor::types::Val;

/// String(value) - the string conversion used for template output
pub fn string(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 1)?;
    Ok(Val::Str(args[0].to_display_string()))
}

/// Number(value) - numeric conversion; unparsable strings become NaN
pub fn number(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 1)?;
    let n = match &args[0] {
        Val::Num(n) => *n,
        Val::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Val::Null => 0.0,
        Val::Str(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        other => {
            return Err(ErrorInfo::new(
                errors::WRONG_ARG_TYPE,
                format!("Cannot convert {} to a number", other.type_name()),
            ))
        }
    };
    Ok(Val::Num(n))
}

/// Error(message, cause?) - build an error value, optionally wrapping another
pub fn error(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_range(args, 1, 2)?;
    let message = expect_str(&args[0], "First argument (message)")?;
    let mut info = ErrorInfo::new(errors::USER_ERROR, message);

    match args.get(1) {
        None | Some(Val::Null) => {}
        Some(Val::Error(cause)) => info = info.with_cause(cause.clone()),
        Some(other) => {
            info = info.with_cause(ErrorInfo::new(
                errors::USER_ERROR,
                other.to_display_string(),
            ))
        }
    }

    Ok(Val::Error(info))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parses_strings() {
        assert_eq!(number(&[Val::Str(" 42 ".into())]).unwrap(), Val::Num(42.0));
        let Val::Num(n) = number(&[Val::Str("abc".into())]).unwrap() else {
            unreachable!("Number() always returns a number");
        };
        assert!(n.is_nan());
    }

    #[test]
    fn test_error_with_cause() {
        let inner = Val::Error(ErrorInfo::new(errors::DIVISION_BY_ZERO, "Division by zero"));
        let Val::Error(err) = error(&[Val::Str("outer".into()), inner]).unwrap() else {
            unreachable!("Error() always returns an error value");
        };
        assert_eq!(err.message, "outer");
        assert_eq!(err.root_cause().message, "Division by zero");
    }
}
