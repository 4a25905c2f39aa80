//! Tests for literals: numbers, strings, symbols, and regular expressions.

use crate::check::{check, check_errors};

#[test]
fn simple() {
  check("(nil)", "nil");
  check("(true)", "true");
  check("(false)", "false");
  check("(self)", "self");
  check("(sym :a)", ":a");
  check(r#"(str "a\"b")"#, r#""a\"b""#);
}

#[test]
fn int() {
  check(r#"(int "42")"#, "42");
  check(r#"(int "1_000")"#, "1000");
  check(r#"(int "0x1_F")"#, "31");
  check(r#"(int "-0b101")"#, "-5");
  check(r#"(int "0o17")"#, "15");
  check(r#"(int "-9223372036854775808")"#, "-9223372036854775808");
}

#[test]
fn int_large() {
  check_errors(
    r#"(int "99999999999999999999")"#,
    "0",
    &["Unsupported large integer literal: `99999999999999999999`"],
  );
}

#[test]
fn int_invalid() {
  check_errors(r#"(int "12abc")"#, "0", &["Unsupported integer literal: `12abc`"]);
}

#[test]
fn float() {
  check(r#"(float "1.5")"#, "1.5");
  check(r#"(float "1_000.0")"#, "1000.0");
}

#[test]
fn float_large() {
  check_errors(r#"(float "1e400")"#, "NaN", &["Unsupported large float literal: `1e400`"]);
}

#[test]
fn float_invalid() {
  check_errors(r#"(float "1.2.3")"#, "NaN", &["Unsupported float literal: `1.2.3`"]);
}

#[test]
fn complex_rational() {
  check(r#"(complex "2i")"#, r#"::Kernel.Complex("2i")"#);
  check(r#"(rational "3r")"#, r#"::Kernel.Rational("3r")"#);
}

#[test]
fn dstr() {
  check(
    r#"(dstr (str "a") (lvar :b) (str "c"))"#,
    r#""a".concat(b.to_s()).concat("c")"#,
  );
  check("(dstr)", r#""""#);
}

#[test]
fn dstr_coerces_every_piece() {
  check(r#"(dstr (int "1") (str "x"))"#, r#"1.to_s().concat("x")"#);
}

#[test]
fn dsym() {
  check(r#"(dsym (str "a") (lvar :b))"#, r#""a".concat(b.to_s()).intern()"#);
  check("(dsym)", ":");
}

#[test]
fn xstr() {
  check(r#"(xstr (str "ls"))"#, r#"self.`("ls")"#);
}

#[test]
fn regexp() {
  check(
    r#"(regexp (str "a") (lvar :b) (regopt "im"))"#,
    r#"::Regexp.new("a".concat(b.to_s()), 0.|(1).|(4))"#,
  );
  check(r#"(regexp (str "a") (regopt ""))"#, r#"::Regexp.new("a", 0)"#);
}

#[test]
fn regopt_ignores_encoding() {
  check(r#"(regexp (str "a") (regopt "xu"))"#, r#"::Regexp.new("a", 0.|(2))"#);
}
