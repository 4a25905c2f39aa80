//! The parse tree handed to us by the parser.
//!
//! Every node owns its children and carries the range of source it came from. The tree is closed:
//! there is one variant per surface-syntax form, and consumers are expected to match on it
//! exhaustively.

#![allow(missing_docs)]

mod error;
mod read;
mod st;

pub mod sexp;

pub use error::Error;

use ruby_name::Name;
use text_size::TextRange;

/// A parse tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
  pub loc: TextRange,
  pub kind: NodeKind,
}

impl Node {
  /// Returns a new node.
  #[must_use]
  pub fn new(loc: TextRange, kind: NodeKind) -> Self {
    Self { loc, kind }
  }

  /// Returns a new boxed node.
  #[must_use]
  pub fn boxed(loc: TextRange, kind: NodeKind) -> Box<Self> {
    Box::new(Self::new(loc, kind))
  }
}

pub type BoxNode = Box<Node>;
pub type OptNode = Option<Box<Node>>;

/// A kind of parse tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
  /// `recv.method(args)`, or `method(args)` with no receiver.
  Send { recv: OptNode, method: Name, args: Vec<Node> },
  /// `recv&.method(args)`
  CSend { recv: BoxNode, method: Name, args: Vec<Node> },
  Const { scope: OptNode, name: Name },
  /// The constant target of an assignment.
  ConstLhs { scope: OptNode, name: Name },
  /// The leading `::` in `::Foo`.
  Cbase,
  String(Name),
  Symbol(Name),
  /// `"a#{b}c"`
  DString(Vec<Node>),
  /// `:"a#{b}c"`
  DSymbol(Vec<Node>),
  /// `` `ls #{dir}` ``
  XString(Vec<Node>),
  LVar(Name),
  LVarLhs(Name),
  IVar(Name),
  IVarLhs(Name),
  GVar(Name),
  GVarLhs(Name),
  CVar(Name),
  CVarLhs(Name),
  /// `$1`
  NthRef(u32),
  SelfRef,
  Nil,
  True,
  False,
  /// `__FILE__`
  FileLiteral,
  /// `__LINE__`
  LineLiteral,
  /// An implicit sequence of statements.
  Begin(Vec<Node>),
  /// `begin ... end`
  KwBegin(Vec<Node>),
  And { left: BoxNode, right: BoxNode },
  Or { left: BoxNode, right: BoxNode },
  /// `left &&= right`
  AndAsgn { left: BoxNode, right: BoxNode },
  /// `left ||= right`
  OrAsgn { left: BoxNode, right: BoxNode },
  /// `left op= right`
  OpAsgn { left: BoxNode, op: Name, right: BoxNode },
  Module { name: BoxNode, body: OptNode },
  Class { name: BoxNode, superclass: OptNode, body: OptNode },
  /// `class << expr; body; end`
  SClass { expr: BoxNode, body: OptNode },
  /// A parameter list. Only valid as the parameters of a method or block.
  Args(Vec<Node>),
  Arg(Name),
  RestArg(Name),
  KwRestArg(Name),
  KwArg(Name),
  KwOptArg { name: Name, default: BoxNode },
  OptArg { name: Name, default: BoxNode },
  BlockArg(Name),
  ShadowArg(Name),
  DefMethod { name: Name, args: OptNode, body: OptNode },
  /// `def singleton.name(args) body end`
  DefS { singleton: BoxNode, name: Name, args: OptNode, body: OptNode },
  /// A call with a `do ... end` or `{ ... }` block attached.
  Block { send: BoxNode, args: OptNode, body: OptNode },
  While { cond: BoxNode, body: OptNode },
  /// `body while cond`
  WhilePost { cond: BoxNode, body: OptNode },
  Until { cond: BoxNode, body: OptNode },
  /// `body until cond`
  UntilPost { cond: BoxNode, body: OptNode },
  Assign { lhs: BoxNode, rhs: BoxNode },
  /// `super(args)`
  Super(Vec<Node>),
  /// `super` with no parens, forwarding the arguments of the current method.
  ZSuper,
  For { vars: BoxNode, expr: BoxNode, body: OptNode },
  /// The literal text, as written.
  Integer(String),
  Float(String),
  Complex(String),
  Rational(String),
  Array(Vec<Node>),
  Hash(Vec<Node>),
  /// `key => value` in a hash literal.
  Pair { key: BoxNode, value: BoxNode },
  /// `**expr` in a hash literal.
  KwSplat(BoxNode),
  /// `from..to`
  IRange { from: OptNode, to: OptNode },
  /// `from...to`
  ERange { from: OptNode, to: OptNode },
  Regexp { parts: Vec<Node>, opts: OptNode },
  /// The option letters after a regexp, like `im`.
  Regopt(String),
  Return(Vec<Node>),
  Break(Vec<Node>),
  Next(Vec<Node>),
  Retry,
  Yield(Vec<Node>),
  Rescue { body: OptNode, resbodies: Vec<Node>, else_: OptNode },
  /// `rescue exception => var; body`. Only valid inside a `Rescue`.
  Resbody { exception: OptNode, var: OptNode, body: OptNode },
  Ensure { body: OptNode, ensure: OptNode },
  If { cond: BoxNode, yes: OptNode, no: OptNode },
  /// `a, b = rhs`
  Masgn { lhs: BoxNode, rhs: BoxNode },
  /// The pattern on the left of a multiple assignment.
  Mlhs(Vec<Node>),
  /// `*var` in a pattern. An anonymous `*` has no var.
  SplatLhs(OptNode),
  Case { cond: OptNode, whens: Vec<Node>, else_: OptNode },
  /// Only valid inside a `Case`.
  When { patterns: Vec<Node>, body: OptNode },
  Splat(BoxNode),
  /// `&expr` in an argument list.
  BlockPass(BoxNode),
  Alias { from: BoxNode, to: BoxNode },
  Defined(BoxNode),
  /// `BEGIN { ... }`
  Preexe(OptNode),
  /// `END { ... }`
  Postexe(OptNode),
  Undef(Vec<Node>),
  /// `$&` and friends.
  BackRef(Name),
  EFlipflop { left: OptNode, right: OptNode },
  IFlipflop { left: OptNode, right: OptNode },
  MatchCurLine(BoxNode),
  Redo,
}

impl NodeKind {
  /// Returns the name of this kind of node, as it appears in a dump.
  #[must_use]
  #[allow(clippy::too_many_lines)]
  pub fn name(&self) -> &'static str {
    match self {
      NodeKind::Send { .. } => "send",
      NodeKind::CSend { .. } => "csend",
      NodeKind::Const { .. } => "const",
      NodeKind::ConstLhs { .. } => "casgn",
      NodeKind::Cbase => "cbase",
      NodeKind::String(_) => "str",
      NodeKind::Symbol(_) => "sym",
      NodeKind::DString(_) => "dstr",
      NodeKind::DSymbol(_) => "dsym",
      NodeKind::XString(_) => "xstr",
      NodeKind::LVar(_) => "lvar",
      NodeKind::LVarLhs(_) => "lvasgn",
      NodeKind::IVar(_) => "ivar",
      NodeKind::IVarLhs(_) => "ivasgn",
      NodeKind::GVar(_) => "gvar",
      NodeKind::GVarLhs(_) => "gvasgn",
      NodeKind::CVar(_) => "cvar",
      NodeKind::CVarLhs(_) => "cvasgn",
      NodeKind::NthRef(_) => "nth_ref",
      NodeKind::SelfRef => "self",
      NodeKind::Nil => "nil",
      NodeKind::True => "true",
      NodeKind::False => "false",
      NodeKind::FileLiteral => "__FILE__",
      NodeKind::LineLiteral => "__LINE__",
      NodeKind::Begin(_) => "begin",
      NodeKind::KwBegin(_) => "kwbegin",
      NodeKind::And { .. } => "and",
      NodeKind::Or { .. } => "or",
      NodeKind::AndAsgn { .. } => "and_asgn",
      NodeKind::OrAsgn { .. } => "or_asgn",
      NodeKind::OpAsgn { .. } => "op_asgn",
      NodeKind::Module { .. } => "module",
      NodeKind::Class { .. } => "class",
      NodeKind::SClass { .. } => "sclass",
      NodeKind::Args(_) => "args",
      NodeKind::Arg(_) => "arg",
      NodeKind::RestArg(_) => "restarg",
      NodeKind::KwRestArg(_) => "kwrestarg",
      NodeKind::KwArg(_) => "kwarg",
      NodeKind::KwOptArg { .. } => "kwoptarg",
      NodeKind::OptArg { .. } => "optarg",
      NodeKind::BlockArg(_) => "blockarg",
      NodeKind::ShadowArg(_) => "shadowarg",
      NodeKind::DefMethod { .. } => "def",
      NodeKind::DefS { .. } => "defs",
      NodeKind::Block { .. } => "block",
      NodeKind::While { .. } => "while",
      NodeKind::WhilePost { .. } => "while_post",
      NodeKind::Until { .. } => "until",
      NodeKind::UntilPost { .. } => "until_post",
      NodeKind::Assign { .. } => "asgn",
      NodeKind::Super(_) => "super",
      NodeKind::ZSuper => "zsuper",
      NodeKind::For { .. } => "for",
      NodeKind::Integer(_) => "int",
      NodeKind::Float(_) => "float",
      NodeKind::Complex(_) => "complex",
      NodeKind::Rational(_) => "rational",
      NodeKind::Array(_) => "array",
      NodeKind::Hash(_) => "hash",
      NodeKind::Pair { .. } => "pair",
      NodeKind::KwSplat(_) => "kwsplat",
      NodeKind::IRange { .. } => "irange",
      NodeKind::ERange { .. } => "erange",
      NodeKind::Regexp { .. } => "regexp",
      NodeKind::Regopt(_) => "regopt",
      NodeKind::Return(_) => "return",
      NodeKind::Break(_) => "break",
      NodeKind::Next(_) => "next",
      NodeKind::Retry => "retry",
      NodeKind::Yield(_) => "yield",
      NodeKind::Rescue { .. } => "rescue",
      NodeKind::Resbody { .. } => "resbody",
      NodeKind::Ensure { .. } => "ensure",
      NodeKind::If { .. } => "if",
      NodeKind::Masgn { .. } => "masgn",
      NodeKind::Mlhs(_) => "mlhs",
      NodeKind::SplatLhs(_) => "splat_lhs",
      NodeKind::Case { .. } => "case",
      NodeKind::When { .. } => "when",
      NodeKind::Splat(_) => "splat",
      NodeKind::BlockPass(_) => "block_pass",
      NodeKind::Alias { .. } => "alias",
      NodeKind::Defined(_) => "defined?",
      NodeKind::Preexe(_) => "preexe",
      NodeKind::Postexe(_) => "postexe",
      NodeKind::Undef(_) => "undef",
      NodeKind::BackRef(_) => "back_ref",
      NodeKind::EFlipflop { .. } => "eflipflop",
      NodeKind::IFlipflop { .. } => "iflipflop",
      NodeKind::MatchCurLine(_) => "match_current_line",
      NodeKind::Redo => "redo",
    }
  }
}
