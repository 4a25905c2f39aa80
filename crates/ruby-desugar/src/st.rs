use crate::cx::Cx;
use crate::error::{Error, Fatal, Kind};
use ruby_core_ast::{Arenas, ExprData, ExprMust};
use ruby_name::{Name, NameArena};
use text_size::TextRange;

pub(crate) struct St<'a> {
  cx: Cx<'a>,
  names: &'a mut NameArena,
  arenas: Arenas,
  errors: Vec<Error>,
  /// The fresh name counter for the current method or class body.
  counter: u32,
  depth: usize,
  fatal_reported: bool,
}

impl<'a> St<'a> {
  pub(crate) fn new(cx: Cx<'a>, names: &'a mut NameArena) -> Self {
    Self {
      cx,
      names,
      arenas: Arenas::default(),
      errors: Vec::new(),
      counter: 1,
      depth: 0,
      fatal_reported: false,
    }
  }

  pub(crate) fn cx(&self) -> Cx<'a> {
    self.cx
  }

  pub(crate) fn names(&mut self) -> &mut NameArena {
    self.names
  }

  pub(crate) fn fresh(&mut self, base: Name) -> Name {
    self.counter += 1;
    base.fresh(self.counter)
  }

  /// Runs `f` in a new fresh name scope.
  ///
  /// Method bodies and class, module and singleton class bodies each get a new scope. Block bodies
  /// do not: they share the counter of the enclosing body, so a name fresh in a block is also fresh
  /// in the method around it.
  pub(crate) fn in_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
    log::debug!("enter fresh name scope at depth {}", self.depth);
    let old = std::mem::replace(&mut self.counter, 1);
    let ret = f(self);
    self.counter = old;
    ret
  }

  pub(crate) fn expr(&mut self, loc: TextRange, data: ExprData) -> ExprMust {
    self.arenas.alloc(loc, data)
  }

  pub(crate) fn data(&self, e: ExprMust) -> &ExprData {
    &self.arenas.expr[e]
  }

  pub(crate) fn data_mut(&mut self, e: ExprMust) -> &mut ExprData {
    &mut self.arenas.expr[e]
  }

  pub(crate) fn loc(&self, e: ExprMust) -> TextRange {
    self.arenas.loc(e)
  }

  pub(crate) fn err(&mut self, range: TextRange, kind: Kind) {
    self.errors.push(Error { range, kind });
  }

  /// Goes one level deeper, or errors if that is too deep.
  pub(crate) fn enter(&mut self) -> Result<(), Fatal> {
    if self.depth >= self.cx.max_depth {
      return Err(Fatal::TooDeep(self.cx.max_depth));
    }
    self.depth += 1;
    Ok(())
  }

  pub(crate) fn exit(&mut self) {
    always::always!(self.depth != 0);
    self.depth = self.depth.saturating_sub(1);
  }

  /// Reports the fatal error at `range`, unless one was already reported.
  pub(crate) fn report(&mut self, range: TextRange, fatal: Fatal) {
    if self.fatal_reported {
      return;
    }
    self.fatal_reported = true;
    log::warn!("fatal at {range:?}: {fatal}");
    self.err(range, Kind::Internal(fatal));
  }

  pub(crate) fn finish(self) -> (Arenas, Vec<Error>) {
    (self.arenas, self.errors)
  }
}
