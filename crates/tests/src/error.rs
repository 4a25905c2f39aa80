//! Tests for error reporting and aborting.

use crate::check::{Lowered, abort, check_errors, lower, lower_with};
use ruby_core_ast::ExprData;
use ruby_desugar::Cx;

/// Returns `n` nodes nested inside each other.
fn nested(n: usize) -> String {
  let mut s = "(array ".repeat(n - 1);
  s.push_str(r#"(int "1")"#);
  s.push_str(&")".repeat(n - 1));
  s
}

#[test]
fn too_deep() {
  let s = r#"(array (array (array (int "1"))))"#;
  let (_, desugar) = lower_with(s, Some("f.rb"), 3);
  let Err(aborted) = desugar else { panic!("did not abort") };
  assert_eq!(aborted.errors.len(), 1);
  let e = &aborted.errors[0];
  assert_eq!(e.to_string(), "Failed to process tree: nested more than 3 levels deep");
  assert_eq!(&s[e.range()], r#"(int "1")"#);
}

#[test]
fn not_too_deep() {
  let s = r#"(array (array (int "1")))"#;
  let (_, desugar) = lower_with(s, Some("f.rb"), 3);
  assert!(desugar.is_ok());
}

#[test]
fn too_deep_default() {
  let s = nested(Cx::DEFAULT_MAX_DEPTH + 1);
  let (_, desugar) = lower_with(&s, None, Cx::DEFAULT_MAX_DEPTH);
  let Err(aborted) = desugar else { panic!("did not abort") };
  assert_eq!(aborted.errors.len(), 1);
  let e = &aborted.errors[0];
  assert_eq!(e.to_string(), "Failed to process tree: nested more than 1000 levels deep");
  assert_eq!(&s[e.range()], r#"(int "1")"#);
}

#[test]
fn not_too_deep_default() {
  for n in [Cx::DEFAULT_MAX_DEPTH - 1, Cx::DEFAULT_MAX_DEPTH] {
    let (_, desugar) = lower_with(&nested(n), None, Cx::DEFAULT_MAX_DEPTH);
    let Ok(desugar) = desugar else { panic!("aborted at {n}") };
    assert!(desugar.errors.is_empty());
  }
}

#[test]
fn long_operator_chain() {
  let n = 500;
  let mut s = "(send ".repeat(n);
  s.push_str("(lvar :a)");
  s.push_str(&" :+ (lvar :b))".repeat(n));
  let (names, desugar) = lower_with(&s, None, Cx::DEFAULT_MAX_DEPTH);
  let Ok(desugar) = desugar else { panic!("aborted") };
  let lowered = Lowered { names, desugar };
  assert!(lowered.desugar.errors.is_empty());
  assert_eq!(lowered.count(|e| matches!(e, ExprData::Send(_))), n);
}

#[test]
fn recoverable_keeps_enclosing_tree() {
  check_errors(
    r#"(array (int "99999999999999999999") (send nil :f))"#,
    "[0, self.f()]",
    &["Unsupported large integer literal: `99999999999999999999`"],
  );
  let lowered = lower(r#"(array (int "99999999999999999999") (send nil :f))"#);
  let codes: Vec<_> = lowered.desugar.errors.iter().map(ruby_desugar::Error::code).collect();
  assert_eq!(codes, [3001]);
}

#[test]
fn recoverable_keeps_sequence() {
  check_errors(
    r#"(begin (send nil :f) (or_asgn (casgn nil :A) (int "1")) (send nil :g))"#,
    "self.f()\n<empty>\nself.g()",
    &["Constant reassignment is not supported"],
  );
}

#[test]
fn abort_keeps_earlier_errors() {
  let s = "(begin (redo) (masgn (lvasgn :a) (lvar :v)))";
  let errors = abort(s);
  assert_eq!(errors.len(), 2);
  assert_eq!(errors[0].code(), 3005);
  assert!(!errors[0].is_internal());
  assert_eq!(&s[errors[0].range()], "(redo)");
  assert_eq!(errors[1].code(), 1001);
  assert!(errors[1].is_internal());
  assert_eq!(&s[errors[1].range()], "(masgn (lvasgn :a) (lvar :v))");
}

#[test]
fn innermost_node() {
  let s = "(def :foo nil (send nil :bar (block_pass (lvar :a)) (block_pass (lvar :b))))";
  let errors = abort(s);
  assert_eq!(errors.len(), 1);
  let want = "(send nil :bar (block_pass (lvar :a)) (block_pass (lvar :b)))";
  assert_eq!(&s[errors[0].range()], want);
}

#[test]
fn codes() {
  let cases: [(&str, u16); 5] = [
    (r#"(int "99999999999999999999")"#, 3001),
    (r#"(float "x")"#, 3002),
    (r#"(or_asgn (casgn nil :A) (int "1"))"#, 3003),
    ("(defs (lvar :x) :foo nil nil)", 3004),
    ("(redo)", 3005),
  ];
  for (s, want) in cases {
    let lowered = lower(s);
    let codes: Vec<_> = lowered.desugar.errors.iter().map(ruby_desugar::Error::code).collect();
    assert_eq!(codes, [want], "for {s}");
  }
}

#[test]
fn singleton_range() {
  let s = "(defs (lvar :x) :foo nil nil)";
  let lowered = lower(s);
  let e = &lowered.desugar.errors[0];
  assert_eq!(&s[e.range()], "(lvar :x)");
}
