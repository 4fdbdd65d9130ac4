//! Tests for the semantic validation system

use super::*;
use crate::parser::parse_unit;

// ============================================================================
// Helper Functions
// ============================================================================

/// Wrap a body in a unit function, parse and validate it
fn validate(body: &str) -> Vec<ValidationError> {
    let source = format!("function render(request, __output__) {{\n{}\n}}", body);
    let unit = parse_unit(&source).expect("Parse should succeed");
    validate_unit(&unit, &source)
}

/// Get errors for a specific rule
fn for_rule<'a>(errors: &'a [ValidationError], rule_id: &str) -> Vec<&'a ValidationError> {
    errors.iter().filter(|e| e.rule_id == rule_id).collect()
}

// ============================================================================
// Loop Control Tests
// ============================================================================

#[test]
fn test_break_outside_loop() {
    let errors = validate("if (true) { break }");

    let loop_errors = for_rule(&errors, "loop-control");
    assert_eq!(loop_errors.len(), 1);
    assert!(loop_errors[0].is_error());
    assert!(loop_errors[0].message.contains("'break'"));
    // Body starts on line 2 of the unit
    assert_eq!(loop_errors[0].span.start_line, 1);
}

#[test]
fn test_continue_outside_loop() {
    let errors = validate("continue");
    assert_eq!(for_rule(&errors, "loop-control").len(), 1);
}

#[test]
fn test_break_inside_loops_ok() {
    let errors = validate(
        r#"
while (true) { if (x) { break } }
for (let i of [1, 2]) { try { continue } catch (e) { break } }
"#,
    );
    assert!(for_rule(&errors, "loop-control").is_empty());
}

// ============================================================================
// Unreachable Code Tests
// ============================================================================

#[test]
fn test_unreachable_after_return() {
    let errors = validate(
        r#"
return
x = 1
y = 2
"#,
    );

    let unreachable = for_rule(&errors, "unreachable-code");
    assert_eq!(unreachable.len(), 1, "Only the first unreachable statement is reported");
    assert!(!unreachable[0].is_error());
    assert!(unreachable[0].message.contains("'return'"));
}

#[test]
fn test_unreachable_after_throw_in_nested_block() {
    let errors = validate("if (a) { throw 'x'; b = 1 }");
    assert_eq!(for_rule(&errors, "unreachable-code").len(), 1);
}

#[test]
fn test_terminator_last_is_fine() {
    let errors = validate("while (x) { x = x - 1; continue }");
    assert!(for_rule(&errors, "unreachable-code").is_empty());
}

// ============================================================================
// Reserved Binding Tests
// ============================================================================

#[test]
fn test_declaring_reserved_name() {
    let errors = validate("let request = {}");

    let reserved = for_rule(&errors, "reserved-binding");
    assert_eq!(reserved.len(), 1);
    assert!(reserved[0].message.contains("'request'"));
}

#[test]
fn test_shadowing_string_conversion() {
    let errors = validate("let String = upper\nfor (let n of range(2)) { String = 1 }");
    let reserved = for_rule(&errors, "reserved-binding");
    assert_eq!(reserved.len(), 2);
    assert!(reserved[0].message.contains("'String'"));
}

#[test]
fn test_reassigning_output() {
    let errors = validate("__output__ = []");
    assert_eq!(for_rule(&errors, "reserved-binding").len(), 1);
}

#[test]
fn test_writing_output_slot_is_allowed() {
    let errors = validate("__output__[0] = String((1 + 1))\nx = request.name");
    assert!(for_rule(&errors, "reserved-binding").is_empty());
}

#[test]
fn test_reserved_loop_and_catch_bindings() {
    let errors = validate(
        r#"
for (let request of []) { }
try { } catch (__output__) { }
"#,
    );
    assert_eq!(for_rule(&errors, "reserved-binding").len(), 2);
}

// ============================================================================
// Validator Tests
// ============================================================================

#[test]
fn test_clean_unit_has_no_findings() {
    let errors = validate(
        r#"
let total = 0
for (let n of range(5)) { total += n }
__output__[0] = String((total))
"#,
    );
    assert!(errors.is_empty(), "Unexpected findings: {:?}", errors);
}

#[test]
fn test_findings_sorted_by_position() {
    let errors = validate("let request = 1\nbreak");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].rule_id, "reserved-binding");
    assert_eq!(errors[1].rule_id, "loop-control");
}

#[test]
fn test_every_rule_runs() {
    let errors = validate("let request = 1\nbreak\nreturn\nx = 1");
    let mut ids: Vec<_> = errors.iter().map(|e| e.rule_id).collect();
    ids.sort();
    assert_eq!(ids, vec!["loop-control", "reserved-binding", "unreachable-code"]);
}

#[test]
fn test_display_is_one_based() {
    let errors = validate("break");
    let rendered = errors[0].to_string();
    assert!(rendered.starts_with("error at line 2, col 1:"), "{}", rendered);
    assert!(rendered.ends_with("[loop-control]"));
}
