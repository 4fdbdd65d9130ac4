//! Operator tests: arithmetic, comparison, logical and string operators

use super::helpers::{num, returned, run, s, thrown};
use crate::executor::{errors, Val};

fn eval(expr: &str) -> Val {
    returned(&run(&format!("return {}", expr)))
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval("1 + 2 * 3"), num(7.0));
    assert_eq!(eval("(1 + 2) * 3"), num(9.0));
    assert_eq!(eval("10 - 4 - 3"), num(3.0));
    assert_eq!(eval("7 / 2"), num(3.5));
    assert_eq!(eval("7 % 3"), num(1.0));
    assert_eq!(eval("-2 * 3"), num(-6.0));
}

#[test]
fn test_string_concatenation() {
    assert_eq!(eval("'a' + 1"), s("a1"));
    assert_eq!(eval("1 + '2'"), s("12"));
    assert_eq!(eval("'x' + null"), s("xnull"));
    assert_eq!(eval("'n=' + 1.5"), s("n=1.5"));
}

#[test]
fn test_list_concatenation() {
    assert_eq!(eval("[1] + [2]"), Val::List(vec![num(1.0), num(2.0)]));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval("1 < 2"), Val::Bool(true));
    assert_eq!(eval("2 <= 2"), Val::Bool(true));
    assert_eq!(eval("3 > 4"), Val::Bool(false));
    assert_eq!(eval("'b' >= 'a'"), Val::Bool(true));
    assert_eq!(eval("1 == 1"), Val::Bool(true));
    assert_eq!(eval("1 === '1'"), Val::Bool(false));
    assert_eq!(eval("[1, 2] == [1, 2]"), Val::Bool(true));
    assert_eq!(eval("null != 0"), Val::Bool(true));
}

#[test]
fn test_logical_operators_short_circuit() {
    // The right side would throw if evaluated
    assert_eq!(eval("false && missing"), Val::Bool(false));
    assert_eq!(eval("'yes' || missing"), s("yes"));
    assert_eq!(eval("0 || 'fallback'"), s("fallback"));
    assert_eq!(eval("1 && 2"), num(2.0));
}

#[test]
fn test_nullish_coalescing() {
    assert_eq!(eval("null ?? 'default'"), s("default"));
    assert_eq!(eval("0 ?? 'default'"), num(0.0));
    assert_eq!(eval("'' ?? 'default'"), s(""));
}

#[test]
fn test_not_and_truthiness() {
    assert_eq!(eval("!0"), Val::Bool(true));
    assert_eq!(eval("!''"), Val::Bool(true));
    assert_eq!(eval("!null"), Val::Bool(true));
    assert_eq!(eval("![]"), Val::Bool(false));
    assert_eq!(eval("!{}"), Val::Bool(false));
    assert_eq!(eval("!'0'"), Val::Bool(false));
}

#[test]
fn test_ternary() {
    assert_eq!(eval("1 > 0 ? 'pos' : 'neg'"), s("pos"));
    assert_eq!(eval("null ? 1 : 2"), num(2.0));
}

#[test]
fn test_division_by_zero() {
    let err = thrown(&run("return 1 / 0"));
    assert_eq!(err.code, errors::DIVISION_BY_ZERO);
    assert_eq!(err.message, "Division by zero in '/' operation");

    let err = thrown(&run("return 5 % 0"));
    assert_eq!(err.code, errors::DIVISION_BY_ZERO);
    assert!(err.message.contains("'%'"));
}

#[test]
fn test_type_mismatch() {
    let err = thrown(&run("return {} - 1"));
    assert_eq!(err.code, errors::TYPE_ERROR);
    assert_eq!(err.message, "Cannot apply '-' to object and number");

    let err = thrown(&run("return 1 < 'a'"));
    assert_eq!(err.code, errors::TYPE_ERROR);

    let err = thrown(&run("return -'a'"));
    assert_eq!(err.code, errors::TYPE_ERROR);
}
