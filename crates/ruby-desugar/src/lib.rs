//! Desugaring and lowering a Ruby parse tree into the core AST.
//!
//! Many constructs lower to a smaller set of core constructs, e.g. `a &&= b` lowers to an `if`,
//! and `for` loops lower to a call to `each` with a block. Temporaries introduced along the way
//! get fresh names, which can never collide with names from the source.

#![allow(clippy::needless_pass_by_value)]

mod assign;
mod collection;
mod control;
mod cx;
mod error;
mod internal;
mod mk;
mod number;
mod send;
mod st;
mod string;

pub use cx::Cx;
pub use error::Error;

use ruby_core_ast::{Arenas, ClassDefKind, ExprData, ExprMust, Sym};
use ruby_name::NameArena;
use ruby_parse_tree::Node;

/// The result of desugaring.
#[derive(Debug)]
pub struct Desugar {
  /// The expressions.
  pub arenas: Arenas,
  /// The top expression, a class definition for the top level.
  pub top: ExprMust,
  /// Errors that did not stop the lowering.
  pub errors: Vec<Error>,
}

/// A unit that could not be lowered.
#[derive(Debug)]
pub struct Abort {
  /// Every error reported, the last of which is internal.
  pub errors: Vec<Error>,
}

/// Lowers the root of one unit, interning any new names into `names`.
///
/// The lowering runs on its own thread, with a stack large enough to reach `cx.max_depth`.
///
/// # Errors
///
/// If the tree could not be lowered at all.
pub fn get(cx: Cx<'_>, names: &mut NameArena, root: Node) -> Result<Desugar, Abort> {
  let root_loc = root.loc;
  match big_stack::run(cx.max_depth, || get_(cx, names, root)) {
    Ok(ret) => ret,
    Err(e) => {
      log::error!("couldn't start a thread to lower on: {e}");
      let kind = error::Kind::Internal(error::Fatal::NoThread);
      Err(Abort { errors: vec![Error { range: root_loc, kind }] })
    }
  }
}

fn get_(cx: Cx<'_>, names: &mut NameArena, root: Node) -> Result<Desugar, Abort> {
  let root_loc = root.loc;
  log::debug!("start lowering at {root_loc:?}");
  let mut st = st::St::new(cx, names);
  let top = internal::get(&mut st, root);
  let top = match top {
    Ok(top) => top,
    Err(e) => {
      // only a root with no location has no enclosing node to report at.
      st.report(root_loc, e);
      let (_, errors) = st.finish();
      log::warn!("lowering aborted with {} errors", errors.len());
      return Err(Abort { errors });
    }
  };
  let top = lift_top_level(&mut st, root_loc, top);
  let (arenas, errors) = st.finish();
  log::info!("lowered {} exprs with {} errors", arenas.expr.len(), errors.len());
  Ok(Desugar { arenas, top, errors })
}

/// Wraps the top level in a class definition, unless it already is one.
fn lift_top_level(st: &mut st::St<'_>, loc: text_size::TextRange, top: ExprMust) -> ExprMust {
  if matches!(st.data(top), ExprData::ClassDef { .. }) {
    return top;
  }
  let body = match st.data(top) {
    ExprData::InsSeq { stats, expr } => {
      let mut body = stats.clone();
      body.push(*expr);
      body
    }
    _ => vec![top],
  };
  let name = st.expr(loc, ExprData::Empty);
  let data = ExprData::ClassDef {
    kind: ClassDefKind::Class,
    symbol: Sym::Root,
    name,
    ancestors: Vec::new(),
    body,
  };
  st.expr(loc, data)
}
