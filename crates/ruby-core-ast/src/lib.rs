//! The core AST, which is what the parse tree lowers to.
//!
//! Expressions live in an [`ExprArena`] and refer to each other by [`ExprMust`] index. Every
//! expression has a location, kept in a side table in [`Arenas`].

#![allow(missing_docs)]

pub mod display;
pub mod verify;

use ruby_name::Name;
use text_size::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprMust(la_arena::Idx<ExprData>);

#[derive(Debug, Default, Clone)]
pub struct ExprArena(la_arena::Arena<ExprData>);

impl std::ops::Index<ExprMust> for ExprArena {
  type Output = ExprData;

  fn index(&self, index: ExprMust) -> &Self::Output {
    &self.0[index.0]
  }
}

impl std::ops::IndexMut<ExprMust> for ExprArena {
  fn index_mut(&mut self, index: ExprMust) -> &mut Self::Output {
    &mut self.0[index.0]
  }
}

impl ExprArena {
  pub fn alloc(&mut self, data: ExprData) -> ExprMust {
    ExprMust(self.0.alloc(data))
  }

  pub fn iter(&self) -> impl Iterator<Item = (ExprMust, &ExprData)> {
    self.0.iter().map(|(a, b)| (ExprMust(a), b))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

#[derive(Debug, Clone)]
pub struct ExprMap<T>(la_arena::ArenaMap<la_arena::Idx<ExprData>, T>);

impl<T> Default for ExprMap<T> {
  fn default() -> Self {
    Self(la_arena::ArenaMap::default())
  }
}

impl<T> ExprMap<T> {
  pub fn insert(&mut self, key: ExprMust, val: T) {
    self.0.insert(key.0, val);
  }

  #[must_use]
  pub fn get(&self, key: ExprMust) -> Option<&T> {
    self.0.get(key.0)
  }
}

/// The expressions and their locations.
#[derive(Debug, Default)]
pub struct Arenas {
  pub expr: ExprArena,
  pub locs: ExprMap<TextRange>,
}

impl Arenas {
  /// Allocates the expression at the location.
  pub fn alloc(&mut self, loc: TextRange, data: ExprData) -> ExprMust {
    let ret = self.expr.alloc(data);
    self.locs.insert(ret, loc);
    ret
  }

  /// Returns the location of the expression.
  #[must_use]
  pub fn loc(&self, e: ExprMust) -> TextRange {
    let ret = self.locs.get(e).copied();
    always::always!(ret.is_some(), "every expr should have a loc");
    ret.unwrap_or_default()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprData {
  /// Nothing. Stands for an absent expression, which evaluates to `nil`.
  Empty,
  Lit(Lit),
  Local(Name),
  UnresolvedIdent {
    kind: IdentKind,
    name: Name,
  },
  /// The scope is `Empty` for a bare `Foo`.
  UnresolvedConstant {
    scope: ExprMust,
    name: Name,
  },
  Constant(Sym),
  Send(Send),
  /// Only valid as the block of a `Send`.
  Block {
    args: Vec<ExprMust>,
    body: ExprMust,
  },
  InsSeq {
    stats: Vec<ExprMust>,
    expr: ExprMust,
  },
  If {
    cond: ExprMust,
    yes: ExprMust,
    no: ExprMust,
  },
  While {
    cond: ExprMust,
    body: ExprMust,
  },
  Return(ExprMust),
  Break(ExprMust),
  Next(ExprMust),
  Retry,
  Yield(Vec<ExprMust>),
  Rescue(Rescue),
  /// Only valid as a case of a `Rescue`.
  RescueCase {
    exceptions: Vec<ExprMust>,
    var: ExprMust,
    body: ExprMust,
  },
  Array(Vec<ExprMust>),
  Hash {
    keys: Vec<ExprMust>,
    values: Vec<ExprMust>,
  },
  Splat(ExprMust),
  Assign {
    lhs: ExprMust,
    rhs: ExprMust,
  },
  RestArg(ExprMust),
  KeywordArg(ExprMust),
  OptionalArg {
    arg: ExprMust,
    default: ExprMust,
  },
  BlockArg(ExprMust),
  ShadowArg(ExprMust),
  /// The implicit arguments of a bare `super`.
  ZSuperArgs,
  MethodDef {
    name: Name,
    args: Vec<ExprMust>,
    body: ExprMust,
    /// Whether this is `def self.name`.
    is_self: bool,
  },
  ClassDef {
    kind: ClassDefKind,
    symbol: Sym,
    name: ExprMust,
    ancestors: Vec<ExprMust>,
    body: Vec<ExprMust>,
  },
}

impl ExprData {
  /// Returns the direct children, in evaluation order.
  #[must_use]
  pub fn children(&self) -> Vec<ExprMust> {
    match self {
      ExprData::Empty
      | ExprData::Lit(_)
      | ExprData::Local(_)
      | ExprData::UnresolvedIdent { .. }
      | ExprData::Constant(_)
      | ExprData::Retry
      | ExprData::ZSuperArgs => Vec::new(),
      ExprData::UnresolvedConstant { scope: e, .. }
      | ExprData::Return(e)
      | ExprData::Break(e)
      | ExprData::Next(e)
      | ExprData::Splat(e)
      | ExprData::RestArg(e)
      | ExprData::KeywordArg(e)
      | ExprData::BlockArg(e)
      | ExprData::ShadowArg(e) => vec![*e],
      ExprData::Send(send) => {
        let mut ret = Vec::with_capacity(send.args.len() + 2);
        ret.push(send.recv);
        ret.extend(send.args.iter().copied());
        ret.extend(send.block);
        ret
      }
      ExprData::Block { args, body } | ExprData::MethodDef { args, body, .. } => {
        args.iter().copied().chain(std::iter::once(*body)).collect()
      }
      ExprData::InsSeq { stats, expr } => {
        stats.iter().copied().chain(std::iter::once(*expr)).collect()
      }
      ExprData::If { cond, yes, no } => vec![*cond, *yes, *no],
      ExprData::While { cond, body } => vec![*cond, *body],
      ExprData::Yield(es) | ExprData::Array(es) => es.clone(),
      ExprData::Rescue(r) => {
        let mut ret = Vec::with_capacity(r.cases.len() + 3);
        ret.push(r.body);
        ret.extend(r.cases.iter().copied());
        ret.push(r.else_);
        ret.push(r.ensure);
        ret
      }
      ExprData::RescueCase { exceptions, var, body } => {
        exceptions.iter().copied().chain([*var, *body]).collect()
      }
      ExprData::Hash { keys, values } => {
        keys.iter().zip(values.iter()).flat_map(|(&k, &v)| [k, v]).collect()
      }
      ExprData::Assign { lhs, rhs } => vec![*lhs, *rhs],
      ExprData::OptionalArg { arg, default } => vec![*arg, *default],
      ExprData::ClassDef { name, ancestors, body, .. } => {
        let rest = ancestors.iter().chain(body.iter()).copied();
        std::iter::once(*name).chain(rest).collect()
      }
    }
  }

  /// Returns whether this is a reference to a variable, so evaluating it has no side effects.
  #[must_use]
  pub fn is_var_ref(&self) -> bool {
    matches!(self, ExprData::Local(_) | ExprData::UnresolvedIdent { .. })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Send {
  pub recv: ExprMust,
  pub fun: Name,
  pub args: Vec<ExprMust>,
  pub block: Option<ExprMust>,
  /// Whether this may call a private method, which is true when the receiver was implicit.
  pub private_ok: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rescue {
  pub body: ExprMust,
  /// Each is a `RescueCase`.
  pub cases: Vec<ExprMust>,
  pub else_: ExprMust,
  pub ensure: ExprMust,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
  Nil,
  True,
  False,
  Int(i64),
  Float(f64),
  String(Name),
  Symbol(Name),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentKind {
  Local,
  Instance,
  Global,
  Class,
}

/// A well-known constant, which needs no resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sym {
  /// The top-level namespace, `::`.
  Root,
  /// Not yet known. Resolution fills this in.
  Todo,
  Magic,
  Range,
  Regexp,
  Kernel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassDefKind {
  Class,
  Module,
}

#[test]
fn size() {
  assert!(std::mem::size_of::<ExprData>() <= 64);
}
