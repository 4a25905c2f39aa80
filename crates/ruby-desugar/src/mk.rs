//! Making common output shapes.

use crate::st::St;
use ruby_core_ast::{ExprData, ExprMust, Lit, Send, Sym};
use ruby_name::Name;
use text_size::TextRange;

pub(crate) fn empty(st: &mut St<'_>, loc: TextRange) -> ExprMust {
  st.expr(loc, ExprData::Empty)
}

pub(crate) fn lit(st: &mut St<'_>, loc: TextRange, lit: Lit) -> ExprMust {
  st.expr(loc, ExprData::Lit(lit))
}

pub(crate) fn int(st: &mut St<'_>, loc: TextRange, n: i64) -> ExprMust {
  lit(st, loc, Lit::Int(n))
}

pub(crate) fn local(st: &mut St<'_>, loc: TextRange, name: Name) -> ExprMust {
  st.expr(loc, ExprData::Local(name))
}

pub(crate) fn self_(st: &mut St<'_>, loc: TextRange) -> ExprMust {
  local(st, loc, Name::self_)
}

pub(crate) fn constant(st: &mut St<'_>, loc: TextRange, sym: Sym) -> ExprMust {
  st.expr(loc, ExprData::Constant(sym))
}

pub(crate) fn send(
  st: &mut St<'_>,
  loc: TextRange,
  recv: ExprMust,
  fun: Name,
  args: Vec<ExprMust>,
) -> ExprMust {
  st.expr(loc, ExprData::Send(Send { recv, fun, args, block: None, private_ok: false }))
}

pub(crate) fn assign(st: &mut St<'_>, loc: TextRange, lhs: ExprMust, rhs: ExprMust) -> ExprMust {
  st.expr(loc, ExprData::Assign { lhs, rhs })
}

pub(crate) fn assign_local(st: &mut St<'_>, loc: TextRange, name: Name, rhs: ExprMust) -> ExprMust {
  let lhs = local(st, loc, name);
  assign(st, loc, lhs, rhs)
}

pub(crate) fn if_(
  st: &mut St<'_>,
  loc: TextRange,
  cond: ExprMust,
  yes: ExprMust,
  no: ExprMust,
) -> ExprMust {
  st.expr(loc, ExprData::If { cond, yes, no })
}

/// Returns `expr` itself when there are no statements.
pub(crate) fn ins_seq(
  st: &mut St<'_>,
  loc: TextRange,
  stats: Vec<ExprMust>,
  expr: ExprMust,
) -> ExprMust {
  if stats.is_empty() {
    return expr;
  }
  st.expr(loc, ExprData::InsSeq { stats, expr })
}

/// Copies a variable reference, since the output must be a tree.
pub(crate) fn copy_ref(st: &mut St<'_>, e: ExprMust) -> ExprMust {
  let data = st.data(e).clone();
  always::always!(data.is_var_ref(), "can only copy a variable reference");
  let loc = st.loc(e);
  st.expr(loc, data)
}
