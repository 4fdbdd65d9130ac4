//! Parser tests - verify parsing and AST structure
//!
//! These tests do NOT execute the code - that's covered by the executor tests.

use crate::executor::types::ast::{
    AssignOp, BinaryOp, Expr, ForLoopKind, MemberAccess, Stmt, UnaryOp, VarKind,
};
use crate::parser::{self, UnitDef};

/* ===================== Helpers ===================== */

/// Parse source that holds exactly one statement
fn single(source: &str) -> Stmt {
    match parser::parse(source).expect("Should parse") {
        Stmt::Block { mut body, .. } if body.len() == 1 => body.remove(0),
        other => panic!("Expected a single statement, got {:?}", other),
    }
}

/// Parse `x = <expr>` and return the expression
fn expr(source: &str) -> Expr {
    match single(&format!("x = {}", source)) {
        Stmt::Assign { value, .. } => value,
        other => panic!("Expected Assign, got {:?}", other),
    }
}

/* ===================== Unit Tests ===================== */

#[test]
fn test_parse_unit_function() {
    let source = "function render(request, __output__) {\n  let x = 1\n}";
    let unit: UnitDef = parser::parse_unit(source).expect("Should parse");

    assert_eq!(unit.name, "render");
    assert_eq!(unit.params, vec!["request", "__output__"]);
    let Stmt::Block { body, .. } = &unit.body else {
        panic!("Expected Block body, got {:?}", unit.body);
    };
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].span().start_line, 1);
    assert_eq!(body[0].span().start_col, 2);
}

#[test]
fn test_parse_unit_without_params() {
    let unit = parser::parse_unit("function main() { }").expect("Should parse");
    assert!(unit.params.is_empty());
}

#[test]
fn test_parse_unit_rejects_trailing_code() {
    let err = parser::parse_unit("function render() { } x = 1").unwrap_err();
    assert_eq!(err.line_col(), (1, 23));
}

#[test]
fn test_unclosed_if_reports_position() {
    let source = "function render(request, __output__) {\n if (true\n}";
    let err = parser::parse_unit(source).unwrap_err();

    let (line, col) = err.line_col();
    assert_eq!((line, col), (3, 1));
    assert!(!err.message().is_empty());
    assert!(!err.message().contains("-->"), "Message should be a single line");
}

#[test]
fn test_syntax_error_lists_each_expectation_once() {
    let source = "function render(request, __output__) {\n if (true\n}";
    let err = parser::parse_unit(source).unwrap_err();
    let message = err.message();

    assert!(message.starts_with("expected "), "got: {}", message);
    assert!(!message.contains("kw_"), "got: {}", message);
    for label in ["equality operator", "comparison operator", "arithmetic operator"] {
        assert!(message.matches(label).count() <= 1, "{} repeated in: {}", label, message);
    }
}

/* ===================== Statement Tests ===================== */

#[test]
fn test_parse_declarations() {
    match single("let x = 5") {
        Stmt::Declare {
            var_kind: VarKind::Let,
            name,
            init: Some(Expr::LitNum { v, .. }),
            ..
        } => {
            assert_eq!(name, "x");
            assert_eq!(v, 5.0);
        }
        other => panic!("Expected Declare, got {:?}", other),
    }

    assert!(matches!(
        single("let y"),
        Stmt::Declare { init: None, .. }
    ));
}

#[test]
fn test_const_requires_initializer() {
    let err = parser::parse("const x").unwrap_err();
    assert!(err.message().contains("const"));
}

#[test]
fn test_keyword_prefixed_identifiers() {
    // `letter`, `iffy` and `returned` must not be split into keywords
    match single("letter = iffy + returned") {
        Stmt::Assign { var, value, .. } => {
            assert_eq!(var, "letter");
            assert!(matches!(value, Expr::BinaryOp { op: BinaryOp::Add, .. }));
        }
        other => panic!("Expected Assign, got {:?}", other),
    }
}

#[test]
fn test_parse_assign_paths_and_ops() {
    match single("obj.items[2] += 1") {
        Stmt::Assign { var, path, op, .. } => {
            assert_eq!(var, "obj");
            assert_eq!(op, AssignOp::Add);
            assert_eq!(path.len(), 2);
            assert!(matches!(&path[0], MemberAccess::Prop { property, .. } if property == "items"));
            assert!(matches!(&path[1], MemberAccess::Index { expr: Expr::LitNum { v, .. }, .. } if *v == 2.0));
        }
        other => panic!("Expected Assign, got {:?}", other),
    }
}

#[test]
fn test_equality_is_not_assignment() {
    assert!(matches!(single("a == b"), Stmt::Expr { .. }));
}

#[test]
fn test_parse_if_else() {
    match single("if (x) { y = 1 } else y = 2") {
        Stmt::If {
            then_s,
            else_s: Some(else_s),
            ..
        } => {
            assert!(matches!(*then_s, Stmt::Block { .. }));
            assert!(matches!(*else_s, Stmt::Assign { .. }));
        }
        other => panic!("Expected If with else, got {:?}", other),
    }
}

#[test]
fn test_parse_for_loops() {
    match single("for (const k in obj) { }") {
        Stmt::ForLoop {
            kind,
            var_kind,
            binding,
            ..
        } => {
            assert_eq!(kind, ForLoopKind::In);
            assert_eq!(var_kind, VarKind::Const);
            assert_eq!(binding, "k");
        }
        other => panic!("Expected ForLoop, got {:?}", other),
    }

    assert!(matches!(
        single("for (let v of [1, 2]) total += v"),
        Stmt::ForLoop {
            kind: ForLoopKind::Of,
            ..
        }
    ));
}

#[test]
fn test_parse_try_catch_and_throw() {
    match single("try { throw Error('boom') } catch (e) { msg = e.message }") {
        Stmt::Try {
            body, catch_var, ..
        } => {
            assert_eq!(catch_var, "e");
            let Stmt::Block { body, .. } = *body else {
                panic!("Expected Block");
            };
            assert!(matches!(body[0], Stmt::Throw { .. }));
        }
        other => panic!("Expected Try, got {:?}", other),
    }
}

#[test]
fn test_parse_return_break_continue() {
    assert!(matches!(single("return"), Stmt::Return { value: None, .. }));
    assert!(matches!(
        single("return 1;"),
        Stmt::Return { value: Some(_), .. }
    ));
    assert!(matches!(single("break"), Stmt::Break { .. }));
    assert!(matches!(single("continue;"), Stmt::Continue { .. }));
}

#[test]
fn test_return_value_must_share_its_line() {
    let ast = parser::parse("return\nx = 1").unwrap();
    let Stmt::Block { body, .. } = ast else {
        panic!("Expected Block");
    };
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Stmt::Return { value: None, .. }));
    assert!(matches!(body[1], Stmt::Assign { .. }));

    assert!(matches!(
        single("return /* note */ 1 + 2"),
        Stmt::Return {
            value: Some(Expr::BinaryOp { .. }),
            ..
        }
    ));
    assert!(matches!(
        single("return (\n  1\n)"),
        Stmt::Return { value: Some(_), .. }
    ));
}

#[test]
fn test_semicolons_and_comments() {
    let ast = parser::parse("a = 1; ; b = 2 // trailing\n/* block\ncomment */ c = 3").unwrap();
    let Stmt::Block { body, .. } = ast else {
        panic!("Expected Block");
    };
    assert_eq!(body.len(), 3);
}

/* ===================== Expression Tests ===================== */

#[test]
fn test_precedence() {
    // 1 + 2 * 3 parses as 1 + (2 * 3)
    match expr("1 + 2 * 3") {
        Expr::BinaryOp {
            op: BinaryOp::Add,
            right,
            ..
        } => assert!(matches!(*right, Expr::BinaryOp { op: BinaryOp::Mul, .. })),
        other => panic!("Expected Add at the root, got {:?}", other),
    }
}

#[test]
fn test_left_associativity() {
    match expr("10 - 4 - 3") {
        Expr::BinaryOp {
            op: BinaryOp::Sub,
            left,
            right,
            ..
        } => {
            assert!(matches!(*left, Expr::BinaryOp { op: BinaryOp::Sub, .. }));
            assert!(matches!(*right, Expr::LitNum { v, .. } if v == 3.0));
        }
        other => panic!("Expected Sub at the root, got {:?}", other),
    }
}

#[test]
fn test_logical_and_nullish() {
    assert!(matches!(
        expr("a ?? b || c"),
        Expr::BinaryOp {
            op: BinaryOp::Nullish,
            ..
        }
    ));
    assert!(matches!(
        expr("a || b && c"),
        Expr::BinaryOp { op: BinaryOp::Or, .. }
    ));
    assert!(matches!(
        expr("a === b"),
        Expr::BinaryOp { op: BinaryOp::Eq, .. }
    ));
}

#[test]
fn test_ternary_and_optional_member() {
    match expr("user?.name ? 'yes' : 'no'") {
        Expr::Ternary { condition, .. } => match *condition {
            Expr::Member {
                property, optional, ..
            } => {
                assert_eq!(property, "name");
                assert!(optional);
            }
            other => panic!("Expected Member, got {:?}", other),
        },
        other => panic!("Expected Ternary, got {:?}", other),
    }
}

#[test]
fn test_unary_operators() {
    match expr("!-x") {
        Expr::Unary {
            op: UnaryOp::Not,
            operand,
            ..
        } => assert!(matches!(*operand, Expr::Unary { op: UnaryOp::Neg, .. })),
        other => panic!("Expected Unary, got {:?}", other),
    }
}

#[test]
fn test_calls_members_and_indexes_chain() {
    match expr("Math.max(1, 2)[0]") {
        Expr::Index { object, .. } => match *object {
            Expr::Call { callee, args, .. } => {
                assert_eq!(args.len(), 2);
                assert!(matches!(*callee, Expr::Member { optional: false, .. }));
            }
            other => panic!("Expected Call, got {:?}", other),
        },
        other => panic!("Expected Index, got {:?}", other),
    }
}

#[test]
fn test_string_escapes() {
    match expr(r#""line\n\"quoted\"""#) {
        Expr::LitStr { v, .. } => assert_eq!(v, "line\n\"quoted\""),
        other => panic!("Expected LitStr, got {:?}", other),
    }
    match expr(r"'it\'s'") {
        Expr::LitStr { v, .. } => assert_eq!(v, "it's"),
        other => panic!("Expected LitStr, got {:?}", other),
    }
}

#[test]
fn test_unknown_escape_is_rejected() {
    match expr(r#""a\\b""#) {
        Expr::LitStr { v, .. } => assert_eq!(v, "a\\b"),
        other => panic!("Expected LitStr, got {:?}", other),
    }

    let err = parser::parse(r#"x = "\u{0}""#).unwrap_err();
    assert!(matches!(err, parser::ParseError::BuildError(..)));
    assert!(err.message().contains("'\\u'"), "got: {}", err.message());
    assert_eq!(err.line_col(), (1, 5));
}

#[test]
fn test_object_and_array_literals() {
    match expr(r#"{ a: 1, "b c": [1, 2,], d }"#) {
        Expr::LitObj { properties, .. } => {
            let keys: Vec<_> = properties.iter().map(|(k, _, _)| k.as_str()).collect();
            assert_eq!(keys, vec!["a", "b c", "d"]);
            assert!(matches!(&properties[1].2, Expr::LitList { elements, .. } if elements.len() == 2));
            assert!(matches!(&properties[2].2, Expr::Ident { name, .. } if name == "d"));
        }
        other => panic!("Expected LitObj, got {:?}", other),
    }
}

#[test]
fn test_literals() {
    assert!(matches!(expr("null"), Expr::LitNull { .. }));
    assert!(matches!(expr("true"), Expr::LitBool { v: true, .. }));
    assert!(matches!(expr("2.5e2"), Expr::LitNum { v, .. } if v == 250.0));
    assert!(matches!(expr("nullable"), Expr::Ident { .. }));
}

#[test]
fn test_spans_track_lines() {
    match single("x =\n  y") {
        Stmt::Assign { value, .. } => {
            let span = value.span();
            assert_eq!((span.start_line, span.start_col), (1, 2));
        }
        other => panic!("Expected Assign, got {:?}", other),
    }
}

#[test]
fn test_unit_round_trips_through_json() {
    let unit = parser::parse_unit("function render(r) { x = [1, {a: 'b'}] }").unwrap();
    let json = serde_json::to_string(&unit).expect("serialize");
    let back: UnitDef = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.name, "render");
    assert!(matches!(back.body, Stmt::Block { .. }));
}
