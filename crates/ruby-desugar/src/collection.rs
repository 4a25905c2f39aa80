//! Array and hash literals, and ranges.

use crate::error::{Fatal, Result};
use crate::internal;
use crate::mk;
use crate::st::St;
use ruby_core_ast::{ExprData, ExprMust, Lit, Sym};
use ruby_name::Name;
use ruby_parse_tree::{Node, NodeKind, OptNode};
use text_size::TextRange;

/// Folds the pending part into the accumulated result with `method`.
fn fold(
  st: &mut St<'_>,
  loc: TextRange,
  acc: Option<ExprMust>,
  method: Name,
  part: ExprMust,
) -> ExprMust {
  match acc {
    None => part,
    Some(acc) => mk::send(st, loc, acc, method, vec![part]),
  }
}

/// `[a, *b, c]` becomes `[a].concat(b.to_a).concat([c])`. Without splats it is a plain array.
pub(crate) fn array(st: &mut St<'_>, loc: TextRange, elems: Vec<Node>) -> Result {
  let mut acc = None::<ExprMust>;
  let mut pending = Vec::with_capacity(elems.len());
  for elem in elems {
    let elem_loc = elem.loc;
    match elem.kind {
      NodeKind::Splat(var) => {
        let var = internal::get(st, *var)?;
        let var = mk::send(st, loc, var, Name::to_a, Vec::new());
        if !pending.is_empty() {
          let cur = st.expr(loc, ExprData::Array(std::mem::take(&mut pending)));
          acc = Some(fold(st, loc, acc, Name::concat, cur));
        }
        acc = Some(fold(st, loc, acc, Name::concat, var));
      }
      kind => pending.push(internal::get(st, Node::new(elem_loc, kind))?),
    }
  }
  let ret = match acc {
    None => st.expr(loc, ExprData::Array(pending)),
    Some(acc) if pending.is_empty() => acc,
    Some(acc) => {
      let cur = st.expr(loc, ExprData::Array(pending));
      mk::send(st, loc, acc, Name::concat, vec![cur])
    }
  };
  Ok(ret)
}

/// `{a => b, **c}` becomes `{a => b}.merge(c.to_hash)`. Without double splats it is a plain hash.
pub(crate) fn hash(st: &mut St<'_>, loc: TextRange, entries: Vec<Node>) -> Result {
  let mut acc = None::<ExprMust>;
  let mut keys = Vec::with_capacity(entries.len());
  let mut values = Vec::with_capacity(entries.len());
  for entry in entries {
    match entry.kind {
      NodeKind::Pair { key, value } => {
        keys.push(internal::get(st, *key)?);
        values.push(internal::get(st, *value)?);
      }
      NodeKind::KwSplat(var) => {
        let var = internal::get(st, *var)?;
        let var = mk::send(st, loc, var, Name::to_hash, Vec::new());
        if !keys.is_empty() {
          let keys = std::mem::take(&mut keys);
          let values = std::mem::take(&mut values);
          let cur = st.expr(loc, ExprData::Hash { keys, values });
          acc = Some(fold(st, loc, acc, Name::merge, cur));
        }
        acc = Some(fold(st, loc, acc, Name::merge, var));
      }
      kind => return Err(Fatal::OutOfContext(kind.name())),
    }
  }
  let ret = match acc {
    None => st.expr(loc, ExprData::Hash { keys, values }),
    Some(acc) if keys.is_empty() => acc,
    Some(acc) => {
      let cur = st.expr(loc, ExprData::Hash { keys, values });
      mk::send(st, loc, acc, Name::merge, vec![cur])
    }
  };
  Ok(ret)
}

/// `a..b` becomes `::Range.new(a, b)`, and `a...b` becomes `::Range.new(a, b, true)`.
pub(crate) fn range(
  st: &mut St<'_>,
  loc: TextRange,
  from: OptNode,
  to: OptNode,
  exclusive: bool,
) -> Result {
  let recv = mk::constant(st, loc, Sym::Range);
  let from = bound(st, loc, from)?;
  let to = bound(st, loc, to)?;
  let mut args = vec![from, to];
  if exclusive {
    args.push(mk::lit(st, loc, Lit::True));
  }
  Ok(mk::send(st, loc, recv, Name::new, args))
}

fn bound(st: &mut St<'_>, loc: TextRange, node: OptNode) -> Result {
  match node {
    None => Ok(mk::lit(st, loc, Lit::Nil)),
    Some(node) => internal::get(st, *node),
  }
}
