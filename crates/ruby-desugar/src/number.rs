//! Numeric literals and `__LINE__`.

use crate::error::{Fatal, Kind, Result};
use crate::mk;
use crate::st::St;
use ruby_core_ast::{ExprMust, Lit, Sym};
use ruby_name::Name;
use std::num::IntErrorKind;
use text_size::TextRange;

/// Parses the integer. On failure, reports an error and uses `0`.
pub(crate) fn int(st: &mut St<'_>, loc: TextRange, text: &str) -> ExprMust {
  let n = match parse_int(text) {
    Ok(n) => n,
    Err(large) => {
      st.err(loc, Kind::IntegerOutOfRange { text: text.to_owned(), large });
      0
    }
  };
  mk::int(st, loc, n)
}

/// On failure, returns whether the problem was that it was too large.
fn parse_int(text: &str) -> std::result::Result<i64, bool> {
  let digits: String = text.chars().filter(|&c| c != '_').collect();
  let (negative, digits) = match digits.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, digits.strip_prefix('+').unwrap_or(&digits)),
  };
  let lower = digits.to_ascii_lowercase();
  let (radix, digits) = if let Some(rest) = lower.strip_prefix("0x") {
    (16, rest)
  } else if let Some(rest) = lower.strip_prefix("0b") {
    (2, rest)
  } else if let Some(rest) = lower.strip_prefix("0o") {
    (8, rest)
  } else if let Some(rest) = lower.strip_prefix("0d") {
    (10, rest)
  } else {
    (10, lower.as_str())
  };
  // the sign goes back on before parsing, so the most negative number is allowed.
  if digits.is_empty() || digits.starts_with(['-', '+']) {
    return Err(false);
  }
  let signed = if negative { format!("-{digits}") } else { digits.to_owned() };
  i64::from_str_radix(&signed, radix).map_err(|e| {
    matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow)
  })
}

/// Parses the float. On failure, reports an error and uses NaN.
pub(crate) fn float(st: &mut St<'_>, loc: TextRange, text: &str) -> ExprMust {
  let digits: String = text.chars().filter(|&c| c != '_').collect();
  let n = match digits.parse::<f64>() {
    Ok(n) if n.is_finite() => n,
    res => {
      let large = res.is_ok();
      st.err(loc, Kind::FloatOutOfRange { text: text.to_owned(), large });
      f64::NAN
    }
  };
  mk::lit(st, loc, Lit::Float(n))
}

/// `1i` becomes `::Kernel.Complex("1i")`, and likewise for `Rational`.
pub(crate) fn kernel(st: &mut St<'_>, loc: TextRange, method: Name, text: &str) -> ExprMust {
  let recv = mk::constant(st, loc, Sym::Kernel);
  let text = st.names().name(text);
  let arg = mk::lit(st, loc, Lit::String(text));
  mk::send(st, loc, recv, method, vec![arg])
}

/// The line of the start of the location, starting from 1.
pub(crate) fn line(st: &mut St<'_>, loc: TextRange) -> Result {
  let Some(range) = st.cx().pos_db.range_utf16(loc) else {
    return Err(Fatal::LineNotMapped);
  };
  if range.start.line != range.end.line {
    return Err(Fatal::LineNotMapped);
  }
  let line = i64::from(range.start.line) + 1;
  Ok(mk::int(st, loc, line))
}
