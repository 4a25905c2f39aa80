//! Errors.

use std::fmt;

/// An error when desugaring.
#[derive(Debug)]
pub struct Error {
  pub(crate) range: text_size::TextRange,
  pub(crate) kind: Kind,
}

impl Error {
  /// The range of the error.
  #[must_use]
  pub fn range(&self) -> text_size::TextRange {
    self.range
  }

  /// A stable number identifying the kind of error.
  #[must_use]
  pub fn code(&self) -> u16 {
    match self.kind {
      Kind::Internal(_) => 1001,
      Kind::IntegerOutOfRange { .. } => 3001,
      Kind::FloatOutOfRange { .. } => 3002,
      Kind::NoConstantReassignment => 3003,
      Kind::InvalidSingletonDef(_) => 3004,
      Kind::UnsupportedNode(_) => 3005,
    }
  }

  /// Whether this error aborted the whole unit.
  #[must_use]
  pub fn is_internal(&self) -> bool {
    matches!(self.kind, Kind::Internal(_))
  }
}

#[derive(Debug)]
pub(crate) enum Kind {
  IntegerOutOfRange { text: String, large: bool },
  FloatOutOfRange { text: String, large: bool },
  NoConstantReassignment,
  InvalidSingletonDef(Singleton),
  UnsupportedNode(&'static str),
  Internal(Fatal),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Singleton {
  Def,
  Class,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      Kind::IntegerOutOfRange { text, large } => {
        let large = if *large { "large " } else { "" };
        write!(f, "Unsupported {large}integer literal: `{text}`")
      }
      Kind::FloatOutOfRange { text, large } => {
        let large = if *large { "large " } else { "" };
        write!(f, "Unsupported {large}float literal: `{text}`")
      }
      Kind::NoConstantReassignment => f.write_str("Constant reassignment is not supported"),
      Kind::InvalidSingletonDef(Singleton::Def) => {
        f.write_str("`def EXPRESSION.method` is only supported for `def self.method`")
      }
      Kind::InvalidSingletonDef(Singleton::Class) => {
        f.write_str("`class << EXPRESSION` is only supported for `class << self`")
      }
      Kind::UnsupportedNode(name) => write!(f, "Unsupported node type `{name}`"),
      Kind::Internal(fatal) => write!(f, "Failed to process tree: {fatal}"),
    }
  }
}

/// A problem that makes the rest of the unit impossible to lower.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Fatal {
  MasgnNotMlhs(&'static str),
  SecondSplat,
  BadRescueList,
  OutOfContext(&'static str),
  NoLoc(&'static str),
  TwoBlockPass,
  BlockNotOnSend,
  BadCompoundTarget,
  ArgsNotArgs(&'static str),
  WhenNoPatterns,
  TooDeep(usize),
  LineNotMapped,
  NoThread,
}

impl fmt::Display for Fatal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Fatal::MasgnNotMlhs(name) => {
        write!(f, "left side of multiple assignment is `{name}`, not `mlhs`")
      }
      Fatal::SecondSplat => f.write_str("more than one splat in a destructuring pattern"),
      Fatal::BadRescueList => f.write_str("unexpected shape of rescued exception list"),
      Fatal::OutOfContext(name) => write!(f, "`{name}` out of context"),
      Fatal::NoLoc(name) => write!(f, "`{name}` has no location"),
      Fatal::TwoBlockPass => f.write_str("more than one block pass argument"),
      Fatal::BlockNotOnSend => f.write_str("block attached to something that is not a call"),
      Fatal::BadCompoundTarget => f.write_str("unexpected target of compound assignment"),
      Fatal::ArgsNotArgs(name) => write!(f, "parameters are `{name}`, not `args`"),
      Fatal::WhenNoPatterns => f.write_str("`when` with no patterns"),
      Fatal::TooDeep(n) => write!(f, "nested more than {n} levels deep"),
      Fatal::LineNotMapped => f.write_str("`__LINE__` location is not on one line"),
      Fatal::NoThread => f.write_str("couldn't start a thread with enough stack"),
    }
  }
}

pub(crate) type Result<T = ruby_core_ast::ExprMust> = std::result::Result<T, Fatal>;
