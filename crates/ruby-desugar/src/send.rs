//! Calls: plain sends, safe navigation, block passes, splat calls, and attaching blocks.

use crate::error::{Fatal, Result};
use crate::internal;
use crate::st::St;
use crate::{collection, mk};
use ruby_core_ast::{ExprData, ExprMust, Lit, Send, Sym};
use ruby_name::Name;
use ruby_parse_tree::{Node, NodeKind, OptNode};
use text_size::TextRange;

pub(crate) fn get(
  st: &mut St<'_>,
  loc: TextRange,
  recv: OptNode,
  method: Name,
  args: Vec<Node>,
) -> Result {
  let (recv, private_ok) = match recv {
    None => (mk::self_(st, loc), true),
    Some(recv) => {
      let recv = internal::get(st, *recv)?;
      if matches!(st.data(recv), ExprData::Empty) {
        *st.data_mut(recv) = ExprData::Local(Name::self_);
        (recv, true)
      } else {
        (recv, false)
      }
    }
  };
  let send = if args.iter().any(|arg| matches!(arg.kind, NodeKind::Splat(_))) {
    splat_call(st, loc, recv, method, args)?
  } else {
    let mut lowered = Vec::with_capacity(args.len());
    let mut block_pass = None::<Node>;
    for arg in args {
      let arg_loc = arg.loc;
      match arg.kind {
        NodeKind::BlockPass(inner) => {
          if block_pass.is_some() {
            return Err(Fatal::TwoBlockPass);
          }
          block_pass = Some(*inner);
        }
        kind => lowered.push(internal::get(st, Node::new(arg_loc, kind))?),
      }
    }
    let block = block_pass.map(|bp| block_pass_to_block(st, bp)).transpose()?;
    Send { recv, fun: method, args: lowered, block, private_ok }
  };
  Ok(st.expr(loc, ExprData::Send(send)))
}

/// `recv.m(a, *b, &c)` becomes `::Magic.<call-with-splat>(recv, :m, [a].concat(b.to_a), &c)`.
fn splat_call(
  st: &mut St<'_>,
  loc: TextRange,
  recv: ExprMust,
  method: Name,
  mut args: Vec<Node>,
) -> Result<Send> {
  let idx = args.iter().position(|arg| matches!(arg.kind, NodeKind::BlockPass(_)));
  let block_pass = match idx.map(|idx| args.remove(idx).kind) {
    Some(NodeKind::BlockPass(inner)) => Some(*inner),
    _ => None,
  };
  let args = collection::array(st, loc, args)?;
  let block = block_pass.map(|bp| block_pass_to_block(st, bp)).transpose()?;
  let magic = mk::constant(st, loc, Sym::Magic);
  let method = mk::lit(st, loc, Lit::Symbol(method));
  Ok(Send {
    recv: magic,
    fun: Name::call_with_splat,
    args: vec![recv, method, args],
    block,
    private_ok: false,
  })
}

/// Converts the `expr` of `&expr` into a block.
fn block_pass_to_block(st: &mut St<'_>, expr: Node) -> Result {
  if let NodeKind::Symbol(method) = expr.kind {
    let loc = expr.loc;
    if loc.is_empty() {
      return Err(Fatal::NoLoc(expr.kind.name()));
    }
    let temp = st.fresh(Name::block_pass_temp);
    let param = mk::local(st, loc, temp);
    let recv = mk::local(st, loc, temp);
    let body = mk::send(st, loc, recv, method, Vec::new());
    return Ok(st.expr(loc, ExprData::Block { args: vec![param], body }));
  }
  let expr = internal::get(st, expr)?;
  let loc = st.loc(expr);
  let temp = st.fresh(Name::block_pass_temp);
  let rest = mk::local(st, loc, temp);
  let param = st.expr(loc, ExprData::RestArg(rest));
  let proc = mk::send(st, loc, expr, Name::to_proc, Vec::new());
  let magic = mk::constant(st, loc, Sym::Magic);
  let call = mk::lit(st, loc, Lit::Symbol(Name::call));
  let args = mk::local(st, loc, temp);
  let body = mk::send(st, loc, magic, Name::call_with_splat, vec![proc, call, args]);
  Ok(st.expr(loc, ExprData::Block { args: vec![param], body }))
}

/// `recv&.m(args)` becomes `t = recv; if t.nil? then nil else t.m(args) end`.
pub(crate) fn csend(
  st: &mut St<'_>,
  loc: TextRange,
  recv: Node,
  method: Name,
  args: Vec<Node>,
) -> Result {
  let temp = st.fresh(Name::assign_temp);
  let recv_loc = recv.loc;
  let recv = internal::get(st, recv)?;
  let assign = mk::assign_local(st, recv_loc, temp, recv);
  let cond_recv = mk::local(st, recv_loc, temp);
  let cond = mk::send(st, loc, cond_recv, Name::nil_p, Vec::new());
  let recv = Node::boxed(recv_loc, NodeKind::LVar(temp));
  let send = internal::get(st, Node::new(loc, NodeKind::Send { recv: Some(recv), method, args }))?;
  let nil = mk::lit(st, loc, Lit::Nil);
  let if_ = mk::if_(st, loc, cond, nil, send);
  Ok(mk::ins_seq(st, loc, vec![assign], if_))
}

/// Lowers the call and attaches the block to it.
pub(crate) fn block(
  st: &mut St<'_>,
  loc: TextRange,
  send: Node,
  args: OptNode,
  body: OptNode,
) -> Result {
  let ret = internal::get(st, send)?;
  let target = match st.data(ret) {
    ExprData::Send(_) => ret,
    // safe navigation
    ExprData::InsSeq { expr, .. } => match st.data(*expr) {
      ExprData::If { no, .. } if matches!(st.data(*no), ExprData::Send(_)) => *no,
      _ => return Err(Fatal::BlockNotOnSend),
    },
    _ => return Err(Fatal::BlockNotOnSend),
  };
  let (args, body) = internal::args_and_body(st, loc, args, body)?;
  let block = st.expr(loc, ExprData::Block { args, body });
  if let ExprData::Send(send) = st.data_mut(target) {
    always::always!(send.block.is_none(), "call already has a block");
    send.block = Some(block);
  }
  Ok(ret)
}
