//! Interpolated strings and symbols, and regular expressions.

use crate::error::Result;
use crate::internal;
use crate::mk;
use crate::st::St;
use ruby_core_ast::{ExprData, ExprMust, Lit, Sym};
use ruby_name::Name;
use ruby_parse_tree::{Node, OptNode};
use text_size::TextRange;

/// `"a#{b}c"` becomes `"a".concat(b.to_s).concat("c")`.
pub(crate) fn dstring(st: &mut St<'_>, loc: TextRange, parts: Vec<Node>) -> Result {
  match concat_parts(st, loc, parts)? {
    None => Ok(mk::lit(st, loc, Lit::String(Name::empty))),
    Some(ret) => Ok(ret),
  }
}

/// Like a string, then interned.
pub(crate) fn dsymbol(st: &mut St<'_>, loc: TextRange, parts: Vec<Node>) -> Result {
  match concat_parts(st, loc, parts)? {
    None => Ok(mk::lit(st, loc, Lit::Symbol(Name::empty))),
    Some(ret) => Ok(mk::send(st, loc, ret, Name::intern, Vec::new())),
  }
}

fn concat_parts(st: &mut St<'_>, loc: TextRange, parts: Vec<Node>) -> Result<Option<ExprMust>> {
  let mut ret = None::<ExprMust>;
  for part in parts {
    let part = internal::get(st, part)?;
    let part = if matches!(st.data(part), ExprData::Lit(Lit::String(_))) {
      part
    } else {
      let part_loc = st.loc(part);
      mk::send(st, part_loc, part, Name::to_s, Vec::new())
    };
    ret = Some(match ret {
      None => part,
      Some(ret) => mk::send(st, loc, ret, Name::concat, vec![part]),
    });
  }
  Ok(ret)
}

/// `/a#{b}/i` becomes `::Regexp.new("a".concat(b.to_s), 1)`.
pub(crate) fn regexp(st: &mut St<'_>, loc: TextRange, parts: Vec<Node>, opts: OptNode) -> Result {
  let recv = mk::constant(st, loc, Sym::Regexp);
  let pattern = dstring(st, loc, parts)?;
  let opts = internal::get_opt(st, loc, opts)?;
  Ok(mk::send(st, loc, recv, Name::new, vec![pattern, opts]))
}

const IGNORE_CASE: i64 = 1;
const EXTENDED: i64 = 2;
const MULTILINE: i64 = 4;

/// The flags, or-ed together. Encoding flags are ignored.
pub(crate) fn regopt(st: &mut St<'_>, loc: TextRange, opts: &str) -> ExprMust {
  let mut ret = mk::int(st, loc, 0);
  for c in opts.chars() {
    let flag = match c {
      'i' => IGNORE_CASE,
      'x' => EXTENDED,
      'm' => MULTILINE,
      _ => continue,
    };
    let flag = mk::int(st, loc, flag);
    ret = mk::send(st, loc, ret, Name::or_op, vec![flag]);
  }
  ret
}
