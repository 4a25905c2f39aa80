//! Reading the parser's s-expression dumps into parse trees.
//!
//! A dump is a single list like `(send nil :puts (str "hi"))`. Each list is a node: the head is the
//! node name (see [`NodeKind::name`]) and the items are its children in order. `nil` marks an
//! absent child, `:name` or `:"name"` is a name, `"text"` is a string, and a bare integer is only
//! used for `nth_ref`.
//!
//! The location of each node is the range of its list in the dump.

use crate::error::{Error, Kind};
use crate::read::{self, Sexp, SexpKind};
use crate::{Node, NodeKind, OptNode};
use ruby_name::{Name, NameArena};
use text_size::TextRange;

/// How many lists deep a dump may nest.
pub const MAX_DEPTH: usize = 1500;

/// Reads the dump into a parse tree, interning names into `names`.
///
/// # Errors
///
/// If the dump was malformed, or nested more than [`MAX_DEPTH`] lists deep.
pub fn get(s: &str, names: &mut NameArena) -> Result<Node, Error> {
  let ret = big_stack::run(MAX_DEPTH, || {
    let root = read::get(s)?;
    node(root, names)
  });
  ret.unwrap_or_else(|e| Err(Error::new(TextRange::default(), Kind::NoThread(e.to_string()))))
}

struct Items<'a> {
  head: String,
  loc: TextRange,
  items: std::vec::IntoIter<Sexp>,
  names: &'a mut NameArena,
}

impl Items<'_> {
  fn next(&mut self, what: &'static str) -> Result<Sexp, Error> {
    self.items.next().ok_or_else(|| Error::new(self.loc, Kind::Missing(what)))
  }

  fn node(&mut self) -> Result<Box<Node>, Error> {
    let s = self.next("a node")?;
    node(s, self.names).map(Box::new)
  }

  fn opt_node(&mut self) -> Result<OptNode, Error> {
    let s = self.next("a node or `nil`")?;
    opt_node(s, self.names)
  }

  fn nodes(&mut self) -> Result<Vec<Node>, Error> {
    let items = std::mem::take(&mut self.items);
    items.map(|s| node(s, self.names)).collect()
  }

  /// The last item may be absent, the rest must all be present.
  fn nodes_then_opt(&mut self, what: &'static str) -> Result<(Vec<Node>, OptNode), Error> {
    let mut items: Vec<_> = std::mem::take(&mut self.items).collect();
    let Some(last) = items.pop() else {
      return Err(Error::new(self.loc, Kind::Missing(what)));
    };
    let init = items.into_iter().map(|s| node(s, self.names)).collect::<Result<Vec<_>, _>>()?;
    let last = opt_node(last, self.names)?;
    Ok((init, last))
  }

  fn name(&mut self) -> Result<Name, Error> {
    let s = self.next("a name")?;
    match s.kind {
      SexpKind::Name(n) => Ok(self.names.name(&n)),
      _ => Err(Error::new(s.range, Kind::Expected("a name"))),
    }
  }

  fn str(&mut self) -> Result<String, Error> {
    let s = self.next("a string")?;
    match s.kind {
      SexpKind::Str(x) => Ok(x),
      _ => Err(Error::new(s.range, Kind::Expected("a string"))),
    }
  }

  fn str_name(&mut self) -> Result<Name, Error> {
    let s = self.str()?;
    Ok(self.names.name(&s))
  }

  fn int(&mut self) -> Result<i64, Error> {
    let s = self.next("an integer")?;
    match s.kind {
      SexpKind::Int(n) => Ok(n),
      _ => Err(Error::new(s.range, Kind::Expected("an integer"))),
    }
  }

  fn finish(mut self, kind: NodeKind) -> Result<Node, Error> {
    match self.items.next() {
      None => Ok(Node::new(self.loc, kind)),
      Some(s) => Err(Error::new(s.range, Kind::Extra(self.head))),
    }
  }
}

fn opt_node(s: Sexp, names: &mut NameArena) -> Result<OptNode, Error> {
  match s.kind {
    SexpKind::Nil => Ok(None),
    _ => node(s, names).map(|n| Some(Box::new(n))),
  }
}

#[allow(clippy::too_many_lines)]
fn node(s: Sexp, names: &mut NameArena) -> Result<Node, Error> {
  let SexpKind::List(head, items) = s.kind else {
    return Err(Error::new(s.range, Kind::Expected("a node")));
  };
  let mut it = Items { head, loc: s.range, items: items.into_iter(), names };
  let kind = match it.head.as_str() {
    "send" => {
      let recv = it.opt_node()?;
      let method = it.name()?;
      NodeKind::Send { recv, method, args: it.nodes()? }
    }
    "csend" => {
      let recv = it.node()?;
      let method = it.name()?;
      NodeKind::CSend { recv, method, args: it.nodes()? }
    }
    "const" => {
      let scope = it.opt_node()?;
      NodeKind::Const { scope, name: it.name()? }
    }
    "casgn" => {
      let scope = it.opt_node()?;
      NodeKind::ConstLhs { scope, name: it.name()? }
    }
    "cbase" => NodeKind::Cbase,
    "str" => NodeKind::String(it.str_name()?),
    "sym" => NodeKind::Symbol(it.name()?),
    "dstr" => NodeKind::DString(it.nodes()?),
    "dsym" => NodeKind::DSymbol(it.nodes()?),
    "xstr" => NodeKind::XString(it.nodes()?),
    "lvar" => NodeKind::LVar(it.name()?),
    "lvasgn" => NodeKind::LVarLhs(it.name()?),
    "ivar" => NodeKind::IVar(it.name()?),
    "ivasgn" => NodeKind::IVarLhs(it.name()?),
    "gvar" => NodeKind::GVar(it.name()?),
    "gvasgn" => NodeKind::GVarLhs(it.name()?),
    "cvar" => NodeKind::CVar(it.name()?),
    "cvasgn" => NodeKind::CVarLhs(it.name()?),
    "nth_ref" => {
      let n = it.int()?;
      let Ok(n) = u32::try_from(n) else {
        return Err(Error::new(it.loc, Kind::InvalidInt));
      };
      NodeKind::NthRef(n)
    }
    "self" => NodeKind::SelfRef,
    "nil" => NodeKind::Nil,
    "true" => NodeKind::True,
    "false" => NodeKind::False,
    "__FILE__" => NodeKind::FileLiteral,
    "__LINE__" => NodeKind::LineLiteral,
    "begin" => NodeKind::Begin(it.nodes()?),
    "kwbegin" => NodeKind::KwBegin(it.nodes()?),
    "and" => {
      let left = it.node()?;
      NodeKind::And { left, right: it.node()? }
    }
    "or" => {
      let left = it.node()?;
      NodeKind::Or { left, right: it.node()? }
    }
    "and_asgn" => {
      let left = it.node()?;
      NodeKind::AndAsgn { left, right: it.node()? }
    }
    "or_asgn" => {
      let left = it.node()?;
      NodeKind::OrAsgn { left, right: it.node()? }
    }
    "op_asgn" => {
      let left = it.node()?;
      let op = it.name()?;
      NodeKind::OpAsgn { left, op, right: it.node()? }
    }
    "module" => {
      let name = it.node()?;
      NodeKind::Module { name, body: it.opt_node()? }
    }
    "class" => {
      let name = it.node()?;
      let superclass = it.opt_node()?;
      NodeKind::Class { name, superclass, body: it.opt_node()? }
    }
    "sclass" => {
      let expr = it.node()?;
      NodeKind::SClass { expr, body: it.opt_node()? }
    }
    "args" => NodeKind::Args(it.nodes()?),
    "arg" => NodeKind::Arg(it.name()?),
    "restarg" => NodeKind::RestArg(it.name()?),
    "kwrestarg" => NodeKind::KwRestArg(it.name()?),
    "kwarg" => NodeKind::KwArg(it.name()?),
    "kwoptarg" => {
      let name = it.name()?;
      NodeKind::KwOptArg { name, default: it.node()? }
    }
    "optarg" => {
      let name = it.name()?;
      NodeKind::OptArg { name, default: it.node()? }
    }
    "blockarg" => NodeKind::BlockArg(it.name()?),
    "shadowarg" => NodeKind::ShadowArg(it.name()?),
    "def" => {
      let name = it.name()?;
      let args = it.opt_node()?;
      NodeKind::DefMethod { name, args, body: it.opt_node()? }
    }
    "defs" => {
      let singleton = it.node()?;
      let name = it.name()?;
      let args = it.opt_node()?;
      NodeKind::DefS { singleton, name, args, body: it.opt_node()? }
    }
    "block" => {
      let send = it.node()?;
      let args = it.opt_node()?;
      NodeKind::Block { send, args, body: it.opt_node()? }
    }
    "while" => {
      let cond = it.node()?;
      NodeKind::While { cond, body: it.opt_node()? }
    }
    "while_post" => {
      let cond = it.node()?;
      NodeKind::WhilePost { cond, body: it.opt_node()? }
    }
    "until" => {
      let cond = it.node()?;
      NodeKind::Until { cond, body: it.opt_node()? }
    }
    "until_post" => {
      let cond = it.node()?;
      NodeKind::UntilPost { cond, body: it.opt_node()? }
    }
    "asgn" => {
      let lhs = it.node()?;
      NodeKind::Assign { lhs, rhs: it.node()? }
    }
    "super" => NodeKind::Super(it.nodes()?),
    "zsuper" => NodeKind::ZSuper,
    "for" => {
      let vars = it.node()?;
      let expr = it.node()?;
      NodeKind::For { vars, expr, body: it.opt_node()? }
    }
    "int" => NodeKind::Integer(it.str()?),
    "float" => NodeKind::Float(it.str()?),
    "complex" => NodeKind::Complex(it.str()?),
    "rational" => NodeKind::Rational(it.str()?),
    "array" => NodeKind::Array(it.nodes()?),
    "hash" => NodeKind::Hash(it.nodes()?),
    "pair" => {
      let key = it.node()?;
      NodeKind::Pair { key, value: it.node()? }
    }
    "kwsplat" => NodeKind::KwSplat(it.node()?),
    "irange" => {
      let from = it.opt_node()?;
      NodeKind::IRange { from, to: it.opt_node()? }
    }
    "erange" => {
      let from = it.opt_node()?;
      NodeKind::ERange { from, to: it.opt_node()? }
    }
    "regexp" => {
      let (parts, opts) = it.nodes_then_opt("the regexp options")?;
      NodeKind::Regexp { parts, opts }
    }
    "regopt" => NodeKind::Regopt(it.str()?),
    "return" => NodeKind::Return(it.nodes()?),
    "break" => NodeKind::Break(it.nodes()?),
    "next" => NodeKind::Next(it.nodes()?),
    "retry" => NodeKind::Retry,
    "yield" => NodeKind::Yield(it.nodes()?),
    "rescue" => {
      let body = it.opt_node()?;
      let (resbodies, else_) = it.nodes_then_opt("the else branch")?;
      NodeKind::Rescue { body, resbodies, else_ }
    }
    "resbody" => {
      let exception = it.opt_node()?;
      let var = it.opt_node()?;
      NodeKind::Resbody { exception, var, body: it.opt_node()? }
    }
    "ensure" => {
      let body = it.opt_node()?;
      NodeKind::Ensure { body, ensure: it.opt_node()? }
    }
    "if" => {
      let cond = it.node()?;
      let yes = it.opt_node()?;
      NodeKind::If { cond, yes, no: it.opt_node()? }
    }
    "masgn" => {
      let lhs = it.node()?;
      NodeKind::Masgn { lhs, rhs: it.node()? }
    }
    "mlhs" => NodeKind::Mlhs(it.nodes()?),
    "splat_lhs" => NodeKind::SplatLhs(it.opt_node()?),
    "case" => {
      let cond = it.opt_node()?;
      let (whens, else_) = it.nodes_then_opt("the else branch")?;
      NodeKind::Case { cond, whens, else_ }
    }
    "when" => {
      let (patterns, body) = it.nodes_then_opt("the body")?;
      NodeKind::When { patterns, body }
    }
    "splat" => NodeKind::Splat(it.node()?),
    "block_pass" => NodeKind::BlockPass(it.node()?),
    "alias" => {
      let from = it.node()?;
      NodeKind::Alias { from, to: it.node()? }
    }
    "defined?" => NodeKind::Defined(it.node()?),
    "preexe" => NodeKind::Preexe(it.opt_node()?),
    "postexe" => NodeKind::Postexe(it.opt_node()?),
    "undef" => NodeKind::Undef(it.nodes()?),
    "back_ref" => NodeKind::BackRef(it.name()?),
    "eflipflop" => {
      let left = it.opt_node()?;
      NodeKind::EFlipflop { left, right: it.opt_node()? }
    }
    "iflipflop" => {
      let left = it.opt_node()?;
      NodeKind::IFlipflop { left, right: it.opt_node()? }
    }
    "match_current_line" => NodeKind::MatchCurLine(it.node()?),
    "redo" => NodeKind::Redo,
    _ => return Err(Error::new(it.loc, Kind::UnknownHead(it.head))),
  };
  it.finish(kind)
}
