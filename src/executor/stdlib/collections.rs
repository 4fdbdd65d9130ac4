//! Collection stdlib functions

use super::{expect_arg_count, expect_arg_range, expect_num, expect_str};
use crate::executor::errors::{self, ErrorInfo};
use crate::executor::types::Val;

/// Upper bound on the number of items `range()` will produce
pub const MAX_RANGE_LEN: i64 = 1_000_000;

/// len(value) - length of a string (in characters), list or object
pub fn len(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 1)?;
    let n = match &args[0] {
        Val::Str(s) => s.chars().count(),
        Val::List(items) => items.len(),
        Val::Obj(map) => map.len(),
        other => {
            return Err(ErrorInfo::new(
                errors::WRONG_ARG_TYPE,
                format!("len() is not defined for {}", other.type_name()),
            ))
        }
    };
    Ok(Val::Num(n as f64))
}

/// join(list, separator?) - concatenate the string forms of list items
pub fn join(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_range(args, 1, 2)?;
    let Val::List(items) = &args[0] else {
        return Err(ErrorInfo::new(
            errors::WRONG_ARG_TYPE,
            "First argument (list) must be a list",
        ));
    };
    let sep = match args.get(1) {
        Some(v) => expect_str(v, "Second argument (separator)")?,
        None => ",",
    };

    let joined = items
        .iter()
        .map(Val::to_display_string)
        .collect::<Vec<_>>()
        .join(sep);
    Ok(Val::Str(joined))
}

/// contains(haystack, needle) - substring, list element or object key test
pub fn contains(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 2)?;
    let found = match (&args[0], &args[1]) {
        (Val::Str(s), Val::Str(needle)) => s.contains(needle.as_str()),
        (Val::List(items), needle) => items.contains(needle),
        (Val::Obj(map), Val::Str(key)) => map.contains_key(key),
        (haystack, needle) => {
            return Err(ErrorInfo::new(
                errors::WRONG_ARG_TYPE,
                format!(
                    "contains() is not defined for {} and {}",
                    haystack.type_name(),
                    needle.type_name()
                ),
            ))
        }
    };
    Ok(Val::Bool(found))
}

/// keys(object) - sorted list of keys
pub fn keys(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_count(args, 1)?;
    let Val::Obj(map) = &args[0] else {
        return Err(ErrorInfo::new(
            errors::WRONG_ARG_TYPE,
            "First argument (object) must be an object",
        ));
    };
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    Ok(Val::List(
        keys.into_iter().map(|k| Val::Str(k.clone())).collect(),
    ))
}

/// range(end) or range(start, end) - list of integers, end exclusive
pub fn range(args: &[Val]) -> Result<Val, ErrorInfo> {
    expect_arg_range(args, 1, 2)?;
    let (start, end) = if args.len() == 1 {
        (0.0, expect_num(&args[0], "Argument (end)")?)
    } else {
        (
            expect_num(&args[0], "First argument (start)")?,
            expect_num(&args[1], "Second argument (end)")?,
        )
    };

    let start = start.ceil() as i64;
    let end = end.ceil() as i64;
    if end.saturating_sub(start) > MAX_RANGE_LEN {
        return Err(ErrorInfo::new(
            errors::WRONG_ARG_TYPE,
            format!("range() is limited to {} items", MAX_RANGE_LEN),
        ));
    }
    Ok(Val::List((start..end).map(|i| Val::Num(i as f64)).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_characters() {
        assert_eq!(len(&[Val::Str("héllo".into())]).unwrap(), Val::Num(5.0));
    }

    #[test]
    fn test_join_default_separator() {
        let list = Val::List(vec![Val::Num(1.0), Val::Str("a".into())]);
        assert_eq!(join(&[list]).unwrap(), Val::Str("1,a".into()));
    }

    #[test]
    fn test_range_two_args() {
        assert_eq!(
            range(&[Val::Num(2.0), Val::Num(4.0)]).unwrap(),
            Val::List(vec![Val::Num(2.0), Val::Num(3.0)])
        );
    }

    #[test]
    fn test_contains_mismatched_types() {
        let err = contains(&[Val::Num(1.0), Val::Num(1.0)]).unwrap_err();
        assert_eq!(err.code, errors::WRONG_ARG_TYPE);
    }
}
