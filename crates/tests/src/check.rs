//! Helpers for lowering dumps and checking the result.

use ruby_core_ast::{ExprData, Sym};
use ruby_desugar::{Abort, Cx, Desugar};
use ruby_name::NameArena;

pub(crate) struct Lowered {
  pub(crate) names: NameArena,
  pub(crate) desugar: Desugar,
}

impl Lowered {
  /// The statements of the top level, one per line. A class definition at the top is one line.
  pub(crate) fn display(&self) -> String {
    let ars = &self.desugar.arenas;
    let show = |e| ruby_core_ast::display::expr(e, &ars.expr, &self.names).to_string();
    match &ars.expr[self.desugar.top] {
      ExprData::ClassDef { symbol: Sym::Root, body, .. } => {
        body.iter().map(|&e| show(e)).collect::<Vec<_>>().join("\n")
      }
      _ => show(self.desugar.top),
    }
  }

  pub(crate) fn errors(&self) -> Vec<String> {
    self.desugar.errors.iter().map(ToString::to_string).collect()
  }

  /// Returns how many reachable expressions satisfy `f`.
  pub(crate) fn count(&self, f: impl Fn(&ExprData) -> bool) -> usize {
    let ars = &self.desugar.arenas;
    let mut stack = vec![self.desugar.top];
    let mut ret = 0usize;
    while let Some(e) = stack.pop() {
      let data = &ars.expr[e];
      if f(data) {
        ret += 1;
      }
      stack.extend(data.children());
    }
    ret
  }
}

/// Lowers the dump with the given options.
pub(crate) fn lower_with(
  s: &str,
  file_name: Option<&str>,
  max_depth: usize,
) -> (NameArena, Result<Desugar, Abort>) {
  let mut names = NameArena::default();
  let root = match ruby_parse_tree::sexp::get(s, &mut names) {
    Ok(x) => x,
    Err(e) => panic!("parse error: {e}"),
  };
  let pos_db = text_pos::PositionDb::new(s);
  let cx = Cx { pos_db: &pos_db, file_name, max_depth };
  let ret = ruby_desugar::get(cx, &mut names, root);
  (names, ret)
}

/// Lowers the dump, which must not abort, and checks the output is well-formed.
pub(crate) fn lower(s: &str) -> Lowered {
  let (names, desugar) = lower_with(s, Some("f.rb"), Cx::DEFAULT_MAX_DEPTH);
  let desugar = match desugar {
    Ok(x) => x,
    Err(abort) => {
      let errors: Vec<_> = abort.errors.iter().map(ToString::to_string).collect();
      panic!("aborted: {errors:#?}")
    }
  };
  let bad: Vec<_> = ruby_core_ast::verify::get(&desugar.arenas, desugar.top)
    .iter()
    .map(ToString::to_string)
    .collect();
  assert!(bad.is_empty(), "invalid output: {bad:#?}");
  Lowered { names, desugar }
}

/// Tests that the dump lowers without errors to `want`, ignoring trailing whitespace.
#[track_caller]
pub(crate) fn check(s: &str, want: &str) {
  let lowered = lower(s);
  pretty_assertions::assert_eq!(Vec::<String>::new(), lowered.errors());
  pretty_assertions::assert_eq!(want.trim_end(), lowered.display());
}

/// Tests that the dump lowers to `want`, with exactly the errors `errors`.
#[track_caller]
pub(crate) fn check_errors(s: &str, want: &str, errors: &[&str]) {
  let lowered = lower(s);
  pretty_assertions::assert_eq!(errors, lowered.errors());
  pretty_assertions::assert_eq!(want.trim_end(), lowered.display());
}

/// Tests that the dump aborts, and returns the errors.
#[track_caller]
pub(crate) fn abort(s: &str) -> Vec<ruby_desugar::Error> {
  let (_, desugar) = lower_with(s, None, Cx::DEFAULT_MAX_DEPTH);
  match desugar {
    Ok(_) => panic!("did not abort"),
    Err(abort) => abort.errors,
  }
}

/// Tests that the dump aborts with exactly the messages `want`.
#[track_caller]
pub(crate) fn check_abort(s: &str, want: &[&str]) {
  let got: Vec<_> = abort(s).iter().map(ToString::to_string).collect();
  pretty_assertions::assert_eq!(want, got);
}
