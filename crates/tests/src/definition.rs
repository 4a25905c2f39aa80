//! Tests for method, class, and module definitions.

use crate::check::{check, check_abort, check_errors};
use indoc::indoc;

#[test]
fn def_no_args() {
  check("(def :foo nil nil)", "def foo() <empty> end");
}

#[test]
fn def_all_args() {
  check(
    r#"(def :foo (args (arg :a) (optarg :b (int "1")) (restarg :c) (kwarg :d) (kwoptarg :e (int "2")) (kwrestarg :f) (blockarg :g)) (lvar :a))"#,
    "def foo(a, b = 1, *c, d:, e: 2, *f:, &g) a end",
  );
}

#[test]
fn def_destructure() {
  check(
    "(def :foo (args (mlhs (arg :a) (arg :b))) (lvar :a))",
    "def foo(<destructure>$2) begin begin <assignTemp>$3 = ::Magic.<expand-splat>(<destructure>$2, 2, 0); a = <assignTemp>$3.[](0); b = <assignTemp>$3.[](1); <assignTemp>$3 end; a end end",
  );
}

#[test]
fn block_destructure() {
  check(
    "(block (send (lvar :h) :each) (args (mlhs (arg :k) (arg :v))) (lvar :k))",
    "h.each() do |<destructure>$2| begin begin <assignTemp>$3 = ::Magic.<expand-splat>(<destructure>$2, 2, 0); k = <assignTemp>$3.[](0); v = <assignTemp>$3.[](1); <assignTemp>$3 end; k end end",
  );
}

#[test]
fn block_shadow_arg() {
  check(
    "(block (send nil :foo) (args (arg :x) (shadowarg :y)) nil)",
    "self.foo() do |x, ;y| <empty> end",
  );
}

#[test]
fn fresh_names_reset_per_method() {
  check(
    "(begin (and (send nil :f) (lvar :y)) (def :m nil (and (send nil :g) (lvar :z))) (or (send nil :h) (lvar :w)))",
    indoc! {"
      begin &&$2 = self.f(); if &&$2 then y else &&$2 end end
      def m() begin &&$2 = self.g(); if &&$2 then z else &&$2 end end end
      begin ||$3 = self.h(); if ||$3 then ||$3 else w end end
    "},
  );
}

#[test]
fn fresh_names_shared_with_block() {
  check(
    "(begin (and (send nil :f) (lvar :y)) (block (send nil :each) nil (and (send nil :g) (lvar :z))))",
    indoc! {"
      begin &&$2 = self.f(); if &&$2 then y else &&$2 end end
      self.each() do || begin &&$3 = self.g(); if &&$3 then z else &&$3 end end end
    "},
  );
}

#[test]
fn fresh_names_reset_per_class() {
  check(
    "(begin (or (send nil :a) (lvar :b)) (class (const nil :C) nil (or (send nil :c) (lvar :d))))",
    indoc! {"
      begin ||$2 = self.a(); if ||$2 then ||$2 else b end end
      class C < <todo sym> begin ||$2 = self.c(); if ||$2 then ||$2 else d end end end
    "},
  );
}

#[test]
fn args_not_args() {
  check_abort(
    r#"(def :foo (int "1") nil)"#,
    &["Failed to process tree: parameters are `int`, not `args`"],
  );
}

#[test]
fn defs_self() {
  check("(defs (self) :foo nil nil)", "def self.foo() <empty> end");
}

#[test]
fn defs_other() {
  check_errors(
    "(defs (lvar :x) :foo nil nil)",
    "<empty>",
    &["`def EXPRESSION.method` is only supported for `def self.method`"],
  );
}

#[test]
fn class() {
  check(
    "(class (const nil :Foo) nil (begin (send nil :a) (send nil :b)))",
    "class Foo < <todo sym> self.a(); self.b() end",
  );
}

#[test]
fn class_superclass() {
  check("(class (const nil :Foo) (const nil :Bar) nil)", "class Foo < Bar end");
}

#[test]
fn module() {
  check("(module (const nil :M) (send nil :a))", "module M self.a() end");
}

#[test]
fn sclass() {
  check(
    "(sclass (self) (def :foo nil nil))",
    "class <singleton class> def foo() <empty> end end",
  );
}

#[test]
fn sclass_other() {
  check_errors(
    "(sclass (lvar :x) nil)",
    "<empty>",
    &["`class << EXPRESSION` is only supported for `class << self`"],
  );
}

#[test]
fn top_level_many() {
  check(
    "(begin (class (const nil :A) nil nil) (def :b nil nil))",
    indoc! {"
      class A < <todo sym> end
      def b() <empty> end
    "},
  );
}

#[test]
fn alias() {
  check("(alias (sym :a) (sym :b))", "self.alias_method(:a, :b)");
}
