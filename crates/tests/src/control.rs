//! Tests for control flow.

use crate::check::{check, check_abort, lower};
use indoc::indoc;
use ruby_core_ast::ExprData;

#[test]
fn and_var() {
  check("(and (lvar :x) (lvar :y))", "if x then y else x end");
}

#[test]
fn or_var() {
  check("(or (ivar :@x) (lvar :y))", "if @x then @x else y end");
}

#[test]
fn and_call() {
  check(
    "(and (send nil :f (lvar :x)) (lvar :y))",
    indoc! {"
      &&$2 = self.f(x)
      if &&$2 then y else &&$2 end
    "},
  );
}

#[test]
fn or_call() {
  check(
    "(or (send nil :f) (lvar :y))",
    indoc! {"
      ||$2 = self.f()
      if ||$2 then ||$2 else y end
    "},
  );
}

#[test]
fn nested_short_circuit() {
  check(
    "(or (and (send nil :a) (send nil :b)) (send nil :c))",
    indoc! {"
      ||$3 = begin &&$2 = self.a(); if &&$2 then self.b() else &&$2 end end
      if ||$3 then ||$3 else self.c() end
    "},
  );
}

#[test]
fn seq() {
  check(r#"(begin (int "1") (int "2"))"#, "1\n2");
  check("(kwbegin)", "<empty>");
  check(r#"(kwbegin (int "1"))"#, "1");
}

#[test]
fn if_() {
  check(r#"(if (lvar :c) (int "1") nil)"#, "if c then 1 else <empty> end");
  check(r#"(if (lvar :c) nil (int "2"))"#, "if c then <empty> else 2 end");
}

#[test]
fn while_() {
  check("(while (lvar :c) (send nil :v))", "while c do self.v() end");
}

#[test]
fn until() {
  check("(until (lvar :c) nil)", "while c.!() do <empty> end");
}

#[test]
fn while_post_do() {
  check(
    "(while_post (send nil :cond) (kwbegin (send nil :v)))",
    "while true do begin <forTemp>$2 = self.v(); if self.cond().!() then break <forTemp>$2 else <empty> end end end",
  );
}

#[test]
fn until_post_do() {
  check(
    "(until_post (lvar :c) (kwbegin (send nil :v)))",
    "while true do begin <forTemp>$2 = self.v(); if c then break <forTemp>$2 else <empty> end end end",
  );
}

#[test]
fn while_post_modifier() {
  check("(while_post (lvar :c) (send nil :v))", "while c do self.v() end");
}

#[test]
fn until_post_modifier() {
  check("(until_post (lvar :c) (send nil :v))", "while c.!() do self.v() end");
}

#[test]
fn for_() {
  check(
    "(for (lvasgn :x) (lvar :xs) (send nil :p (lvar :x)))",
    "xs.each() do |*<forTemp>$2| begin begin <assignTemp>$3 = ::Magic.<expand-splat>(<forTemp>$2, 1, 0); x = <assignTemp>$3.[](0); <assignTemp>$3 end; self.p(x) end end",
  );
}

#[test]
fn for_many() {
  check(
    "(for (mlhs (lvasgn :k) (lvasgn :v)) (lvar :h) nil)",
    "h.each() do |*<forTemp>$2| begin begin <assignTemp>$3 = ::Magic.<expand-splat>(<forTemp>$2, 2, 0); k = <assignTemp>$3.[](0); v = <assignTemp>$3.[](1); <assignTemp>$3 end; <empty> end end",
  );
}

#[test]
fn jumps() {
  check("(return)", "return <empty>");
  check(r#"(return (int "1"))"#, "return 1");
  check(r#"(break (int "1") (int "2"))"#, "break [1, 2]");
  check(r#"(next (lvar :x))"#, "next x");
  check("(retry)", "retry");
}

#[test]
fn yield_() {
  check(r#"(yield (lvar :x) (int "1"))"#, "yield(x, 1)");
}

#[test]
fn case_subject() {
  check(
    r#"(case (lvar :x) (when (int "1") (int "2") (str "a")) (when (int "3") (str "b")) (str "c"))"#,
    indoc! {r#"
      <assignTemp>$2 = x
      if if 1.===(<assignTemp>$2) then true else 2.===(<assignTemp>$2) end then "a" else if 3.===(<assignTemp>$2) then "b" else "c" end end
    "#},
  );
}

#[test]
fn case_no_subject() {
  check(r#"(case nil (when (lvar :a) (int "1")) nil)"#, "if a then 1 else <empty> end");
}

#[test]
fn case_no_whens() {
  check(r#"(case nil (int "1"))"#, "1");
}

#[test]
fn when_out_of_context() {
  check_abort(
    r#"(when (int "1") nil)"#,
    &["Failed to process tree: `when` out of context"],
  );
}

#[test]
fn rescue_ensure() {
  let s = "(ensure (rescue (send nil :risky) (resbody (array (const nil :E)) (lvasgn :e) (send nil :handle)) nil) (send nil :cleanup))";
  let lowered = lower(s);
  assert_eq!(
    lowered.display(),
    "begin self.risky() rescue E => e then self.handle() else <empty> ensure self.cleanup() end"
  );
  assert_eq!(lowered.count(|e| matches!(e, ExprData::Rescue(_))), 1);
}

#[test]
fn rescue_no_var() {
  check(
    r#"(rescue (send nil :a) (resbody nil nil (int "1")) nil)"#,
    "begin self.a() rescue => <rescueTemp>$2 then 1 else <empty> ensure <empty> end",
  );
}

#[test]
fn rescue_ivar() {
  check(
    "(rescue (send nil :a) (resbody (array (const nil :E)) (ivasgn :@e) nil) nil)",
    "begin self.a() rescue E => <rescueTemp>$2 then begin @e = <rescueTemp>$2; <empty> end else <empty> ensure <empty> end",
  );
}

#[test]
fn rescue_many() {
  check(
    r#"(rescue (send nil :a) (resbody (array (const nil :A) (const nil :B)) nil nil) (resbody (splat (lvar :errs)) (lvasgn :e) nil) (int "1"))"#,
    "begin self.a() rescue A, B => <rescueTemp>$2 then <empty> rescue *errs => e then <empty> else 1 ensure <empty> end",
  );
}

#[test]
fn rescue_bad_list() {
  check_abort(
    r#"(rescue nil (resbody (int "1") nil nil) nil)"#,
    &["Failed to process tree: unexpected shape of rescued exception list"],
  );
}

#[test]
fn ensure_alone() {
  check(
    "(ensure (send nil :a) (send nil :b))",
    "begin self.a() else <empty> ensure self.b() end",
  );
}
