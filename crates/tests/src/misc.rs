//! Tests for variables, special literals, and unsupported nodes.

use crate::check::{Lowered, check, check_abort, check_errors, lower, lower_with};
use ruby_core_ast::ExprData;
use ruby_desugar::Cx;

#[test]
fn variables() {
  check("(lvar :x)", "x");
  check("(ivar :@x)", "@x");
  check("(gvar :$x)", "$x");
  check("(cvar :@@x)", "@@x");
  check("(nth_ref 1)", "$1");
}

#[test]
fn defined() {
  check("(defined? (lvar :x))", "::Magic.defined?(x)");
}

#[test]
fn file() {
  check("(__FILE__)", r#""f.rb""#);
}

#[test]
fn file_unknown() {
  let (names, desugar) = lower_with("(__FILE__)", None, Cx::DEFAULT_MAX_DEPTH);
  let Ok(desugar) = desugar else { panic!("aborted") };
  let lowered = Lowered { names, desugar };
  assert_eq!(lowered.display(), r#""__FILE__""#);
}

#[test]
fn line() {
  check("(begin (__LINE__)\n\n(__LINE__))", "1\n3");
}

#[test]
fn line_not_one_line() {
  check_abort("(__LINE__\n)", &["Failed to process tree: `__LINE__` location is not on one line"]);
}

#[test]
fn unsupported() {
  check_errors("(redo)", "<empty>", &["Unsupported node type `redo`"]);
  check_errors(
    "(begin (undef (sym :a)) (preexe nil))",
    "<empty>\n<empty>",
    &["Unsupported node type `undef`", "Unsupported node type `preexe`"],
  );
}

#[test]
fn args_out_of_context() {
  check_abort("(args)", &["Failed to process tree: `args` out of context"]);
}

#[test]
fn fresh_names_never_collide() {
  let lowered = lower(r#"(and (send nil :f) (lvar :"&&$2"))"#);
  assert_eq!(lowered.display(), "&&$2 = self.f()\nif &&$2 then &&$2 else &&$2 end");
  let names = &lowered.names;
  let is_named = |e: &ExprData, fresh: bool| match e {
    ExprData::Local(n) => n.is_fresh() == fresh && n.display(names).to_string() == "&&$2",
    _ => false,
  };
  assert_eq!(lowered.count(|e| is_named(e, true)), 3);
  assert_eq!(lowered.count(|e| is_named(e, false)), 1);
}
