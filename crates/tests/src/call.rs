//! Tests for calls: sends, safe navigation, block passes, and blocks.

use crate::check::{check, check_abort, lower};
use indoc::indoc;
use ruby_core_ast::ExprData;

#[test]
fn implicit_self() {
  check(r#"(send nil :puts (str "hi"))"#, r#"self.puts("hi")"#);
}

#[test]
fn explicit_recv() {
  check(r#"(send (lvar :x) :foo (int "1") (sym :a))"#, "x.foo(1, :a)");
}

#[test]
fn private_ok() {
  let lowered = lower(r#"(send (send nil :a) :b)"#);
  assert_eq!(lowered.display(), "self.a().b()");
  let private: Vec<_> = lowered
    .desugar
    .arenas
    .expr
    .iter()
    .filter_map(|(_, data)| match data {
      ExprData::Send(send) => Some(send.private_ok),
      _ => None,
    })
    .collect();
  // `a` is lowered first.
  assert_eq!(private, [true, false]);
}

#[test]
fn safe_navigation() {
  check(
    r#"(csend (send nil :a) :b (int "1"))"#,
    indoc! {"
      <assignTemp>$2 = self.a()
      if <assignTemp>$2.nil?() then nil else <assignTemp>$2.b(1) end
    "},
  );
}

#[test]
fn block_pass_symbol() {
  check(
    r#"(send (lvar :xs) :map (block_pass (sym :to_s)))"#,
    "xs.map() do |<block-pass>$2| <block-pass>$2.to_s() end",
  );
}

#[test]
fn block_pass_expr() {
  check(
    r#"(send (lvar :xs) :each (block_pass (lvar :blk)))"#,
    "xs.each() do |*<block-pass>$2| ::Magic.<call-with-splat>(blk.to_proc(), :call, <block-pass>$2) end",
  );
}

#[test]
fn splat_with_block_pass() {
  check(
    r#"(send nil :foo (send nil :a) (splat (send nil :b)) (block_pass (lvar :blk)))"#,
    "::Magic.<call-with-splat>(self, :foo, [self.a()].concat(self.b().to_a())) do |*<block-pass>$2| ::Magic.<call-with-splat>(blk.to_proc(), :call, <block-pass>$2) end",
  );
}

#[test]
fn splat_only() {
  check(
    r#"(send (lvar :o) :foo (splat (lvar :xs)))"#,
    "::Magic.<call-with-splat>(o, :foo, xs.to_a())",
  );
}

#[test]
fn two_block_passes() {
  check_abort(
    r#"(send nil :foo (block_pass (lvar :a)) (block_pass (lvar :b)))"#,
    &["Failed to process tree: more than one block pass argument"],
  );
}

#[test]
fn block() {
  check(r#"(block (send nil :foo) (args (arg :x)) (lvar :x))"#, "self.foo() do |x| x end");
}

#[test]
fn block_on_safe_navigation() {
  check(
    r#"(block (csend (lvar :a) :each) (args (arg :x)) nil)"#,
    indoc! {"
      <assignTemp>$2 = a
      if <assignTemp>$2.nil?() then nil else <assignTemp>$2.each() do |x| <empty> end end
    "},
  );
}

#[test]
fn block_on_splat_call() {
  check(
    r#"(block (send nil :foo (splat (lvar :xs))) nil (int "1"))"#,
    "::Magic.<call-with-splat>(self, :foo, xs.to_a()) do || 1 end",
  );
}

#[test]
fn block_not_on_call() {
  check_abort(
    r#"(block (lvar :x) nil nil)"#,
    &["Failed to process tree: block attached to something that is not a call"],
  );
}

#[test]
fn block_shares_fresh_names() {
  check(
    r#"(block (send nil :foo) nil (or (send nil :a) (send nil :b)))"#,
    "self.foo() do || begin ||$2 = self.a(); if ||$2 then ||$2 else self.b() end end end",
  );
}

#[test]
fn sig() {
  check(
    r#"(block (send nil :sig) nil (send (send nil :params (hash (pair (sym :x) (const nil :Integer)))) :returns (const nil :String)))"#,
    "self.sig() do || self.params({:x => Integer}).returns(String) end",
  );
}

#[test]
fn super_() {
  check(r#"(super (int "1"))"#, "self.super(1)");
  check("(zsuper)", "self.super(<zsuper>)");
}
