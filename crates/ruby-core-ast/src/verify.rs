//! Checking the structural invariants of a lowered tree.

use crate::{Arenas, ExprData, ExprMust};
use rustc_hash::FxHashSet;
use std::fmt;
use text_size::TextRange;

/// A violated invariant.
#[derive(Debug)]
pub struct Error {
  expr: ExprMust,
  kind: Kind,
}

impl Error {
  /// Returns the offending expression.
  #[must_use]
  pub fn expr(&self) -> ExprMust {
    self.expr
  }
}

#[derive(Debug)]
enum Kind {
  Shared,
  NoLoc,
  LocOutsideRoot(TextRange),
  MisplacedBlock,
  MisplacedRescueCase,
  NotRescueCase,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      Kind::Shared => f.write_str("expression is referenced more than once"),
      Kind::NoLoc => f.write_str("expression has no location"),
      Kind::LocOutsideRoot(r) => write!(f, "expression location {r:?} is outside the root"),
      Kind::MisplacedBlock => f.write_str("block is not the block of a send"),
      Kind::MisplacedRescueCase => f.write_str("rescue case is not a case of a rescue"),
      Kind::NotRescueCase => f.write_str("case of a rescue is not a rescue case"),
    }
  }
}

/// Where an expression sits in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
  Other,
  SendBlock,
  RescueCase,
}

struct St {
  root: TextRange,
  seen: FxHashSet<ExprMust>,
  errors: Vec<Error>,
}

impl St {
  fn err(&mut self, expr: ExprMust, kind: Kind) {
    self.errors.push(Error { expr, kind });
  }
}

/// Returns every violated invariant of the tree rooted at `top`. Empty means all is well.
#[must_use]
pub fn get(ars: &Arenas, top: ExprMust) -> Vec<Error> {
  let root = ars.locs.get(top).copied().unwrap_or_default();
  let mut st = St { root, seen: FxHashSet::default(), errors: Vec::new() };
  // use an explicit stack, since the tree may be deep.
  let mut stack = vec![(top, Slot::Other)];
  while let Some((e, slot)) = stack.pop() {
    if !st.seen.insert(e) {
      st.err(e, Kind::Shared);
      continue;
    }
    match ars.locs.get(e) {
      None => st.err(e, Kind::NoLoc),
      Some(loc) if loc.is_empty() => st.err(e, Kind::NoLoc),
      Some(&loc) => {
        if !st.root.contains_range(loc) {
          st.err(e, Kind::LocOutsideRoot(loc));
        }
      }
    }
    let data = &ars.expr[e];
    match data {
      ExprData::Block { .. } if slot != Slot::SendBlock => st.err(e, Kind::MisplacedBlock),
      ExprData::RescueCase { .. } if slot != Slot::RescueCase => {
        st.err(e, Kind::MisplacedRescueCase);
      }
      _ => {}
    }
    match data {
      ExprData::Send(send) => {
        stack.extend(send.block.map(|b| (b, Slot::SendBlock)));
        stack.extend(send.args.iter().rev().map(|&a| (a, Slot::Other)));
        stack.push((send.recv, Slot::Other));
      }
      ExprData::Rescue(r) => {
        stack.push((r.ensure, Slot::Other));
        stack.push((r.else_, Slot::Other));
        for &case in r.cases.iter().rev() {
          if !matches!(ars.expr[case], ExprData::RescueCase { .. }) {
            st.err(case, Kind::NotRescueCase);
          }
          stack.push((case, Slot::RescueCase));
        }
        stack.push((r.body, Slot::Other));
      }
      _ => stack.extend(data.children().into_iter().rev().map(|c| (c, Slot::Other))),
    }
  }
  st.errors
}
