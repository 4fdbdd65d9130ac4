//! Control flow tests: if, while, for, break, continue, try/catch, throw

use super::helpers::{num, returned, run, s, thrown};
use crate::executor::{errors, Control, Env, Val, VM};
use crate::parser;
use std::collections::HashMap;

#[test]
fn test_if_else_branches() {
    let source = r#"
let out = ""
if (n > 1) { out = "big" } else if (n == 1) { out = "one" } else { out = "small" }
return out
"#;
    let run_n = |n: f64| {
        returned(&super::helpers::run_with(
            source,
            maplit::hashmap! {"n".to_string() => num(n)},
        ))
    };
    assert_eq!(run_n(5.0), s("big"));
    assert_eq!(run_n(1.0), s("one"));
    assert_eq!(run_n(0.0), s("small"));
}

#[test]
fn test_while_loop() {
    let vm = run(
        r#"
let i = 0
let total = 0
while (i < 5) {
    total += i
    i += 1
}
return total
"#,
    );
    assert_eq!(returned(&vm), num(10.0));
}

#[test]
fn test_for_of_list_and_string() {
    let vm = run(
        r#"
let out = ""
for (let x of [1, 2, 3]) { out = out + x }
for (const c of "ab") { out = out + c }
return out
"#,
    );
    assert_eq!(returned(&vm), s("123ab"));
}

#[test]
fn test_for_in_object_keys_are_sorted() {
    let vm = run(
        r#"
let out = []
for (let k in { b: 1, a: 2, c: 3 }) { out = out + [k] }
return out
"#,
    );
    assert_eq!(returned(&vm), Val::List(vec![s("a"), s("b"), s("c")]));
}

#[test]
fn test_for_in_list_yields_indices() {
    let vm = run(
        r#"
let out = 0
for (let i in ["x", "y", "z"]) { out += i }
return out
"#,
    );
    assert_eq!(returned(&vm), num(3.0));
}

#[test]
fn test_for_binding_is_fresh_per_iteration() {
    // `const` would fail on the second iteration if the scope were reused
    let vm = run(
        r#"
let n = 0
for (const x of [1, 2, 3]) { n += x }
return n
"#,
    );
    assert_eq!(returned(&vm), num(6.0));
}

#[test]
fn test_loop_binding_not_visible_after_loop() {
    let err = thrown(&run("for (let x of [1]) { }\nreturn x"));
    assert_eq!(err.code, errors::UNDEFINED_VARIABLE);
}

#[test]
fn test_break_and_continue() {
    let vm = run(
        r#"
let out = []
for (let i of range(10)) {
    if (i % 2 == 1) { continue }
    if (i > 6) { break }
    out = out + [i]
}
return out
"#,
    );
    assert_eq!(
        returned(&vm),
        Val::List(vec![num(0.0), num(2.0), num(4.0), num(6.0)])
    );
}

#[test]
fn test_break_in_while() {
    let vm = run(
        r#"
let i = 0
while (true) {
    i += 1
    if (i == 3) { break }
}
return i
"#,
    );
    assert_eq!(returned(&vm), num(3.0));
}

#[test]
fn test_return_exits_from_nested_loops() {
    let vm = run(
        r#"
for (let a of [1, 2]) {
    for (let b of [3, 4]) {
        if (b == 4) { return a * b }
    }
}
return 0
"#,
    );
    assert_eq!(returned(&vm), num(4.0));
}

#[test]
fn test_try_catch_runtime_error() {
    let vm = run(
        r#"
try {
    let x = 1 / 0
} catch (e) {
    return e.code
}
return "unreachable"
"#,
    );
    assert_eq!(returned(&vm), s(errors::DIVISION_BY_ZERO));
}

#[test]
fn test_catch_raw_thrown_value() {
    let vm = run(
        r#"
try { throw "oops" } catch (e) { return e + "!" }
"#,
    );
    assert_eq!(returned(&vm), s("oops!"));
}

#[test]
fn test_try_without_error_skips_catch() {
    let vm = run(
        r#"
let out = "try"
try { out = out + "-ok" } catch (e) { out = "caught" }
return out
"#,
    );
    assert_eq!(returned(&vm), s("try-ok"));
}

#[test]
fn test_error_in_catch_propagates() {
    let err = thrown(&run(
        r#"
try { throw Error("first") } catch (e) { throw Error("second", e) }
"#,
    ));
    assert_eq!(err.message, "second");
    assert_eq!(err.root_cause().message, "first");
}

#[test]
fn test_nested_try_rethrow() {
    let vm = run(
        r#"
try {
    try { missing_fn() } catch (inner) { throw Error("wrapped", inner) }
} catch (outer) {
    return [outer.message, outer.cause.code]
}
"#,
    );
    assert_eq!(
        returned(&vm),
        Val::List(vec![s("wrapped"), s(errors::UNDEFINED_VARIABLE)])
    );
}

#[test]
fn test_catch_scope_is_dropped() {
    let err = thrown(&run("try { throw 1 } catch (e) { }\nreturn e"));
    assert_eq!(err.code, errors::UNDEFINED_VARIABLE);
}

#[test]
fn test_uncaught_non_error_value() {
    let vm = run("throw 42");
    assert_eq!(vm.control, Control::Throw(num(42.0)));
}

#[test]
fn test_step_limit_aborts_infinite_loop() {
    let program = parser::parse("while (true) { }").unwrap();
    let mut vm = VM::new(program, Env::new(HashMap::new())).with_max_steps(Some(50));
    crate::executor::run_until_done(&mut vm);

    let err = thrown(&vm);
    assert_eq!(err.code, errors::STEP_LIMIT_EXCEEDED);
    assert!(vm.frames.is_empty());
    assert_eq!(vm.steps, 51);
}

#[test]
fn test_step_limit_is_not_catchable() {
    let program = parser::parse("try { while (true) { } } catch (e) { return 'caught' }").unwrap();
    let mut vm = VM::new(program, Env::new(HashMap::new())).with_max_steps(Some(100));
    crate::executor::run_until_done(&mut vm);

    assert_eq!(thrown(&vm).code, errors::STEP_LIMIT_EXCEEDED);
}
