//! The internal impl.
//!
//! Each parse node is consumed and lowered to exactly one core expression. Children are lowered
//! left to right, so fresh names are handed out in source order.

use crate::error::{Fatal, Kind, Result, Singleton};
use crate::st::St;
use crate::{assign, collection, control, mk, number, send, string};
use ruby_core_ast::{ClassDefKind, ExprData, ExprMust, IdentKind, Lit, Sym};
use ruby_name::Name;
use ruby_parse_tree::{Node, NodeKind, OptNode};
use text_size::TextRange;

/// Lowers the node.
pub(crate) fn get(st: &mut St<'_>, node: Node) -> Result {
  let loc = node.loc;
  let name = node.kind.name();
  with_node(st, loc, name, |st| get_(st, node))
}

/// Lowers the node, or makes an `Empty` at `loc` if there is no node.
pub(crate) fn get_opt(st: &mut St<'_>, loc: TextRange, node: OptNode) -> Result {
  match node {
    None => Ok(mk::empty(st, loc)),
    Some(node) => get(st, *node),
  }
}

/// Runs `f` for a node with the given location and name.
///
/// This checks the location and depth, and reports a fatal error from inside `f` at this node if
/// nothing deeper did.
pub(crate) fn with_node<T>(
  st: &mut St<'_>,
  loc: TextRange,
  name: &'static str,
  f: impl FnOnce(&mut St<'_>) -> Result<T>,
) -> Result<T> {
  if loc.is_empty() {
    return Err(Fatal::NoLoc(name));
  }
  if let Err(e) = st.enter() {
    st.report(loc, e);
    return Err(e);
  }
  let ret = f(st);
  st.exit();
  if let Err(e) = ret {
    st.report(loc, e);
  }
  ret
}

#[allow(clippy::too_many_lines)]
fn get_(st: &mut St<'_>, node: Node) -> Result {
  let loc = node.loc;
  let node_name = node.kind.name();
  let data = match node.kind {
    NodeKind::Send { recv, method, args } => return send::get(st, loc, recv, method, args),
    NodeKind::CSend { recv, method, args } => return send::csend(st, loc, *recv, method, args),
    NodeKind::Block { send, args, body } => return send::block(st, loc, *send, args, body),
    NodeKind::Super(args) => return send::get(st, loc, None, Name::super_, args),
    NodeKind::ZSuper => {
      let recv = mk::self_(st, loc);
      let args = st.expr(loc, ExprData::ZSuperArgs);
      return Ok(mk::send(st, loc, recv, Name::super_, vec![args]));
    }
    NodeKind::Const { scope, name } | NodeKind::ConstLhs { scope, name } => {
      let scope = get_opt(st, loc, scope)?;
      ExprData::UnresolvedConstant { scope, name }
    }
    NodeKind::Cbase => ExprData::Constant(Sym::Root),
    NodeKind::String(s) => ExprData::Lit(Lit::String(s)),
    NodeKind::Symbol(s) => ExprData::Lit(Lit::Symbol(s)),
    NodeKind::DString(parts) => return string::dstring(st, loc, parts),
    NodeKind::DSymbol(parts) => return string::dsymbol(st, loc, parts),
    NodeKind::XString(parts) => {
      let recv = mk::self_(st, loc);
      let s = string::dstring(st, loc, parts)?;
      return Ok(mk::send(st, loc, recv, Name::backtick, vec![s]));
    }
    NodeKind::LVar(name) | NodeKind::LVarLhs(name) | NodeKind::Arg(name) => ExprData::Local(name),
    NodeKind::IVar(name) | NodeKind::IVarLhs(name) => {
      ExprData::UnresolvedIdent { kind: IdentKind::Instance, name }
    }
    NodeKind::GVar(name) | NodeKind::GVarLhs(name) => {
      ExprData::UnresolvedIdent { kind: IdentKind::Global, name }
    }
    NodeKind::CVar(name) | NodeKind::CVarLhs(name) => {
      ExprData::UnresolvedIdent { kind: IdentKind::Class, name }
    }
    NodeKind::NthRef(n) => {
      let name = st.names().name(&format!("${n}"));
      ExprData::UnresolvedIdent { kind: IdentKind::Global, name }
    }
    NodeKind::SelfRef => ExprData::Local(Name::self_),
    NodeKind::Nil => ExprData::Lit(Lit::Nil),
    NodeKind::True => ExprData::Lit(Lit::True),
    NodeKind::False => ExprData::Lit(Lit::False),
    NodeKind::FileLiteral => {
      let name = match st.cx().file_name {
        None => Name::current_file,
        Some(file_name) => st.names().name(file_name),
      };
      ExprData::Lit(Lit::String(name))
    }
    NodeKind::LineLiteral => return number::line(st, loc),
    NodeKind::Begin(stmts) | NodeKind::KwBegin(stmts) => return seq(st, loc, stmts),
    NodeKind::And { left, right } => return control::and(st, loc, *left, *right),
    NodeKind::Or { left, right } => return control::or(st, loc, *left, *right),
    NodeKind::AndAsgn { left, right } => {
      return assign::compound(st, loc, assign::Op::And, *left, *right);
    }
    NodeKind::OrAsgn { left, right } => {
      return assign::compound(st, loc, assign::Op::Or, *left, *right);
    }
    NodeKind::OpAsgn { left, op, right } => {
      return assign::compound(st, loc, assign::Op::Op(op), *left, *right);
    }
    NodeKind::Assign { lhs, rhs } => {
      let lhs = get(st, *lhs)?;
      let rhs = get(st, *rhs)?;
      ExprData::Assign { lhs, rhs }
    }
    NodeKind::Masgn { lhs, rhs } => return assign::masgn(st, loc, *lhs, *rhs),
    NodeKind::Module { name, body } => {
      let name = get(st, *name)?;
      let body = scope_body(st, body)?;
      ExprData::ClassDef {
        kind: ClassDefKind::Module,
        symbol: Sym::Todo,
        name,
        ancestors: Vec::new(),
        body,
      }
    }
    NodeKind::Class { name, superclass, body } => {
      let name = get(st, *name)?;
      let ancestor = match superclass {
        None => mk::constant(st, loc, Sym::Todo),
        Some(superclass) => get(st, *superclass)?,
      };
      let body = scope_body(st, body)?;
      ExprData::ClassDef {
        kind: ClassDefKind::Class,
        symbol: Sym::Todo,
        name,
        ancestors: vec![ancestor],
        body,
      }
    }
    NodeKind::SClass { expr, body } => {
      if !matches!(expr.kind, NodeKind::SelfRef) {
        st.err(expr.loc, Kind::InvalidSingletonDef(Singleton::Class));
        return Ok(mk::empty(st, loc));
      }
      let data = ExprData::UnresolvedIdent { kind: IdentKind::Class, name: Name::singleton };
      let name = st.expr(expr.loc, data);
      let body = scope_body(st, body)?;
      ExprData::ClassDef {
        kind: ClassDefKind::Class,
        symbol: Sym::Todo,
        name,
        ancestors: Vec::new(),
        body,
      }
    }
    NodeKind::DefMethod { name, args, body } => {
      return method_def(st, loc, name, args, body, false);
    }
    NodeKind::DefS { singleton, name, args, body } => {
      if !matches!(singleton.kind, NodeKind::SelfRef) {
        st.err(singleton.loc, Kind::InvalidSingletonDef(Singleton::Def));
        return Ok(mk::empty(st, loc));
      }
      return method_def(st, loc, name, args, body, true);
    }
    NodeKind::RestArg(name) => {
      let local = mk::local(st, loc, name);
      ExprData::RestArg(local)
    }
    NodeKind::KwRestArg(name) => {
      let local = mk::local(st, loc, name);
      let kw = st.expr(loc, ExprData::KeywordArg(local));
      ExprData::RestArg(kw)
    }
    NodeKind::KwArg(name) => {
      let local = mk::local(st, loc, name);
      ExprData::KeywordArg(local)
    }
    NodeKind::KwOptArg { name, default } => {
      let local = mk::local(st, loc, name);
      let arg = st.expr(loc, ExprData::KeywordArg(local));
      let default = get(st, *default)?;
      ExprData::OptionalArg { arg, default }
    }
    NodeKind::OptArg { name, default } => {
      let arg = mk::local(st, loc, name);
      let default = get(st, *default)?;
      ExprData::OptionalArg { arg, default }
    }
    NodeKind::BlockArg(name) => {
      let local = mk::local(st, loc, name);
      ExprData::BlockArg(local)
    }
    NodeKind::ShadowArg(name) => {
      let local = mk::local(st, loc, name);
      ExprData::ShadowArg(local)
    }
    NodeKind::While { cond, body } => {
      let cond = get(st, *cond)?;
      let body = get_opt(st, loc, body)?;
      ExprData::While { cond, body }
    }
    NodeKind::Until { cond, body } => {
      let cond = get(st, *cond)?;
      let cond = mk::send(st, loc, cond, Name::bang, Vec::new());
      let body = get_opt(st, loc, body)?;
      ExprData::While { cond, body }
    }
    NodeKind::WhilePost { cond, body } => {
      return control::post_loop(st, loc, *cond, body, control::Post::While);
    }
    NodeKind::UntilPost { cond, body } => {
      return control::post_loop(st, loc, *cond, body, control::Post::Until);
    }
    NodeKind::For { vars, expr, body } => return control::for_(st, loc, *vars, *expr, body),
    NodeKind::Integer(text) => return Ok(number::int(st, loc, &text)),
    NodeKind::Float(text) => return Ok(number::float(st, loc, &text)),
    NodeKind::Complex(text) => return Ok(number::kernel(st, loc, Name::Complex, &text)),
    NodeKind::Rational(text) => return Ok(number::kernel(st, loc, Name::Rational, &text)),
    NodeKind::Array(elems) => return collection::array(st, loc, elems),
    NodeKind::Hash(entries) => return collection::hash(st, loc, entries),
    NodeKind::IRange { from, to } => return collection::range(st, loc, from, to, false),
    NodeKind::ERange { from, to } => return collection::range(st, loc, from, to, true),
    NodeKind::Regexp { parts, opts } => return string::regexp(st, loc, parts, opts),
    NodeKind::Regopt(opts) => return Ok(string::regopt(st, loc, &opts)),
    NodeKind::Return(exprs) => ExprData::Return(control::jump_value(st, loc, exprs)?),
    NodeKind::Break(exprs) => ExprData::Break(control::jump_value(st, loc, exprs)?),
    NodeKind::Next(exprs) => ExprData::Next(control::jump_value(st, loc, exprs)?),
    NodeKind::Retry => ExprData::Retry,
    NodeKind::Yield(args) => {
      let args = args.into_iter().map(|arg| get(st, arg)).collect::<Result<Vec<_>>>()?;
      ExprData::Yield(args)
    }
    NodeKind::Rescue { body, resbodies, else_ } => {
      return control::rescue(st, loc, body, resbodies, else_);
    }
    NodeKind::Ensure { body, ensure } => return control::ensure(st, loc, body, ensure),
    NodeKind::If { cond, yes, no } => {
      let cond = get(st, *cond)?;
      let yes = get_opt(st, loc, yes)?;
      let no = get_opt(st, loc, no)?;
      ExprData::If { cond, yes, no }
    }
    NodeKind::Case { cond, whens, else_ } => return control::case(st, loc, cond, whens, else_),
    NodeKind::Splat(e) => ExprData::Splat(get(st, *e)?),
    NodeKind::Alias { from, to } => {
      let recv = mk::self_(st, loc);
      let from = get(st, *from)?;
      let to = get(st, *to)?;
      return Ok(mk::send(st, loc, recv, Name::alias_method, vec![from, to]));
    }
    NodeKind::Defined(e) => {
      let recv = mk::constant(st, loc, Sym::Magic);
      let e = get(st, *e)?;
      return Ok(mk::send(st, loc, recv, Name::defined_p, vec![e]));
    }
    NodeKind::Args(_)
    | NodeKind::Pair { .. }
    | NodeKind::KwSplat(_)
    | NodeKind::Resbody { .. }
    | NodeKind::When { .. }
    | NodeKind::Mlhs(_)
    | NodeKind::SplatLhs(_)
    | NodeKind::BlockPass(_) => return Err(Fatal::OutOfContext(node_name)),
    NodeKind::Preexe(_)
    | NodeKind::Postexe(_)
    | NodeKind::Undef(_)
    | NodeKind::BackRef(_)
    | NodeKind::EFlipflop { .. }
    | NodeKind::IFlipflop { .. }
    | NodeKind::MatchCurLine(_)
    | NodeKind::Redo => {
      log::warn!("unsupported node `{node_name}` at {loc:?}");
      st.err(loc, Kind::UnsupportedNode(node_name));
      ExprData::Empty
    }
  };
  Ok(st.expr(loc, data))
}

/// Lowers a sequence of statements. Only the last one is the value.
fn seq(st: &mut St<'_>, loc: TextRange, stmts: Vec<Node>) -> Result {
  let mut stmts = stmts.into_iter().map(|stmt| get(st, stmt)).collect::<Result<Vec<_>>>()?;
  match stmts.pop() {
    None => Ok(mk::empty(st, loc)),
    Some(last) => Ok(mk::ins_seq(st, loc, stmts, last)),
  }
}

/// Lowers the body of a class or module, in its own fresh name scope.
fn scope_body(st: &mut St<'_>, body: OptNode) -> Result<Vec<ExprMust>> {
  st.in_scope(|st| {
    let Some(body) = body else { return Ok(Vec::new()) };
    let body = *body;
    match body.kind {
      NodeKind::Begin(stmts) => stmts.into_iter().map(|stmt| get(st, stmt)).collect(),
      kind => Ok(vec![get(st, Node::new(body.loc, kind))?]),
    }
  })
}

fn method_def(
  st: &mut St<'_>,
  loc: TextRange,
  name: Name,
  args: OptNode,
  body: OptNode,
  is_self: bool,
) -> Result {
  let (args, body) = st.in_scope(|st| args_and_body(st, loc, args, body))?;
  Ok(st.expr(loc, ExprData::MethodDef { name, args, body, is_self }))
}

/// Lowers the parameters and body of a method or block.
///
/// A destructuring parameter becomes a fresh local parameter, and the body first destructures it.
pub(crate) fn args_and_body(
  st: &mut St<'_>,
  loc: TextRange,
  args: OptNode,
  body: OptNode,
) -> Result<(Vec<ExprMust>, ExprMust)> {
  let args = match args {
    None => Vec::new(),
    Some(args) => match args.kind {
      NodeKind::Args(args) => args,
      kind => return Err(Fatal::ArgsNotArgs(kind.name())),
    },
  };
  let mut params = Vec::with_capacity(args.len());
  let mut destructures = Vec::new();
  for arg in args {
    if !matches!(arg.kind, NodeKind::Mlhs(_)) {
      params.push(get(st, arg)?);
      continue;
    }
    let arg_loc = arg.loc;
    let temp = st.fresh(Name::destructure_arg);
    params.push(mk::local(st, arg_loc, temp));
    let rhs = Node::boxed(arg_loc, NodeKind::LVar(temp));
    destructures.push(Node::new(arg_loc, NodeKind::Masgn { lhs: Box::new(arg), rhs }));
  }
  let destructures =
    destructures.into_iter().map(|d| get(st, d)).collect::<Result<Vec<_>>>()?;
  let body = get_opt(st, loc, body)?;
  Ok((params, mk::ins_seq(st, loc, destructures, body)))
}
