//! Tests for assignment: plain, compound, and multiple.

use crate::check::{check, check_abort, check_errors};
use indoc::indoc;

#[test]
fn plain() {
  check(r#"(asgn (lvasgn :x) (int "1"))"#, "x = 1");
  check(r#"(asgn (gvasgn :$g) (str "a"))"#, r#"$g = "a""#);
  check(r#"(asgn (casgn nil :Foo) (nil))"#, "Foo = nil");
}

#[test]
fn op_var() {
  check(r#"(op_asgn (lvasgn :x) :+ (int "1"))"#, "x = x.+(1)");
}

#[test]
fn or_var() {
  check(r#"(or_asgn (ivasgn :@a) (int "1"))"#, "if @a then @a else @a = 1 end");
}

#[test]
fn and_var() {
  check(r#"(and_asgn (lvasgn :x) (int "1"))"#, "if x then x = 1 else x end");
}

#[test]
fn op_index() {
  check(
    r#"(op_asgn (send (send nil :arr) :[] (send nil :idx)) :+ (int "1"))"#,
    indoc! {"
      []$2 = self.arr()
      []$3 = self.idx()
      []$2.[]=([]$3, []$2.[]([]$3).+(1))
    "},
  );
}

#[test]
fn or_attr() {
  check(
    r#"(or_asgn (send (lvar :o) :x) (int "1"))"#,
    indoc! {"
      x$2 = o
      x$3 = x$2.x()
      if x$3 then x$3 else x$2.x=(1) end
    "},
  );
}

#[test]
fn and_attr() {
  check(
    r#"(and_asgn (send (lvar :o) :x) (int "1"))"#,
    indoc! {"
      x$2 = o
      x$3 = x$2.x()
      if x$3 then x$2.x=(1) else x$3 end
    "},
  );
}

#[test]
fn compound_constant() {
  check_errors(
    r#"(or_asgn (casgn nil :Foo) (int "1"))"#,
    "<empty>",
    &["Constant reassignment is not supported"],
  );
}

#[test]
fn compound_bad_target() {
  check_abort(
    r#"(op_asgn (int "1") :+ (int "2"))"#,
    &["Failed to process tree: unexpected target of compound assignment"],
  );
}

#[test]
fn masgn_splat_middle() {
  check(
    r#"(masgn (mlhs (lvasgn :a) (splat_lhs (lvasgn :b)) (lvasgn :c)) (array (int "1") (int "2") (int "3") (int "4") (int "5")))"#,
    indoc! {"
      <assignTemp>$2 = ::Magic.<expand-splat>([1, 2, 3, 4, 5], 1, 1)
      a = <assignTemp>$2.[](0)
      b = <assignTemp>$2.slice(::Range.new(1, -1, true))
      c = <assignTemp>$2.[](-1)
      <assignTemp>$2
    "},
  );
}

#[test]
fn masgn_splat_last() {
  check(
    r#"(masgn (mlhs (lvasgn :a) (splat_lhs (lvasgn :b))) (array (int "1") (int "2") (int "3")))"#,
    indoc! {"
      <assignTemp>$2 = ::Magic.<expand-splat>([1, 2, 3], 1, 0)
      a = <assignTemp>$2.[](0)
      b = <assignTemp>$2.slice(::Range.new(1, -1, false))
      <assignTemp>$2
    "},
  );
}

#[test]
fn masgn_anonymous_splat() {
  check(
    r#"(masgn (mlhs (splat_lhs nil) (lvasgn :z)) (lvar :v))"#,
    indoc! {"
      <assignTemp>$2 = ::Magic.<expand-splat>(v, 0, 1)
      z = <assignTemp>$2.[](-1)
      <assignTemp>$2
    "},
  );
}

#[test]
fn masgn_nested() {
  check(
    r#"(masgn (mlhs (lvasgn :a) (mlhs (lvasgn :b) (lvasgn :c))) (lvar :v))"#,
    indoc! {"
      <assignTemp>$2 = ::Magic.<expand-splat>(v, 2, 0)
      a = <assignTemp>$2.[](0)
      begin <assignTemp>$3 = ::Magic.<expand-splat>(<assignTemp>$2.[](1), 2, 0); b = <assignTemp>$3.[](0); c = <assignTemp>$3.[](1); <assignTemp>$3 end
      <assignTemp>$2
    "},
  );
}

#[test]
fn masgn_two_splats() {
  check_abort(
    r#"(masgn (mlhs (splat_lhs (lvasgn :a)) (splat_lhs (lvasgn :b))) (lvar :v))"#,
    &["Failed to process tree: more than one splat in a destructuring pattern"],
  );
}

#[test]
fn masgn_not_mlhs() {
  check_abort(
    r#"(masgn (lvasgn :a) (lvar :v))"#,
    &["Failed to process tree: left side of multiple assignment is `lvasgn`, not `mlhs`"],
  );
}
