//! Compound assignment and destructuring.

use crate::error::{Fatal, Kind, Result};
use crate::internal;
use crate::mk;
use crate::st::St;
use ruby_core_ast::{ExprData, ExprMust, Lit, Send, Sym};
use ruby_name::Name;
use ruby_parse_tree::{Node, NodeKind};
use text_size::TextRange;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Op {
  /// `&&=`
  And,
  /// `||=`
  Or,
  /// `+=`, `-=`, etc.
  Op(Name),
}

pub(crate) fn compound(st: &mut St<'_>, loc: TextRange, op: Op, left: Node, right: Node) -> Result {
  let target = internal::get(st, left)?;
  let value = internal::get(st, right)?;
  let data = st.data(target);
  if let ExprData::Send(send) = data {
    let send = send.clone();
    return Ok(compound_send(st, loc, op, target, send, value));
  }
  if data.is_var_ref() {
    return Ok(compound_var(st, loc, op, target, value));
  }
  if matches!(data, ExprData::UnresolvedConstant { .. }) {
    st.err(loc, Kind::NoConstantReassignment);
    return Ok(mk::empty(st, loc));
  }
  Err(Fatal::BadCompoundTarget)
}

fn compound_var(
  st: &mut St<'_>,
  loc: TextRange,
  op: Op,
  var: ExprMust,
  value: ExprMust,
) -> ExprMust {
  match op {
    Op::And => {
      let cond = mk::copy_ref(st, var);
      let no = mk::copy_ref(st, var);
      let yes = mk::assign(st, loc, var, value);
      mk::if_(st, loc, cond, yes, no)
    }
    Op::Or => {
      let cond = mk::copy_ref(st, var);
      let yes = mk::copy_ref(st, var);
      let no = mk::assign(st, loc, var, value);
      mk::if_(st, loc, cond, yes, no)
    }
    Op::Op(op) => {
      let lhs = mk::copy_ref(st, var);
      let new = mk::send(st, loc, var, op, vec![value]);
      mk::assign(st, loc, lhs, new)
    }
  }
}

/// The receiver and each argument of the call are evaluated once, into temporaries named after
/// the method. The node of the target call is reused for the read.
fn compound_send(
  st: &mut St<'_>,
  loc: TextRange,
  op: Op,
  read: ExprMust,
  send: Send,
  value: ExprMust,
) -> ExprMust {
  always::always!(send.block.is_none(), "compound assignment target has a block");
  let send_loc = st.loc(read);
  let recv_temp = st.fresh(send.fun);
  let mut stats = vec![mk::assign_local(st, send_loc, recv_temp, send.recv)];
  let mut read_args = Vec::with_capacity(send.args.len());
  let mut write_args = Vec::with_capacity(send.args.len() + 1);
  for arg in send.args {
    let arg_loc = st.loc(arg);
    let temp = st.fresh(send.fun);
    stats.push(mk::assign_local(st, arg_loc, temp, arg));
    read_args.push(mk::local(st, arg_loc, temp));
    write_args.push(mk::local(st, arg_loc, temp));
  }
  let writer = st.names().add_eq(send.fun);
  let read_recv = mk::local(st, send_loc, recv_temp);
  *st.data_mut(read) = ExprData::Send(Send {
    recv: read_recv,
    fun: send.fun,
    args: read_args,
    block: None,
    private_ok: send.private_ok,
  });
  let mk_write = |st: &mut St<'_>, args: Vec<ExprMust>| {
    let recv = mk::local(st, send_loc, recv_temp);
    let send = Send { recv, fun: writer, args, block: None, private_ok: send.private_ok };
    st.expr(send_loc, ExprData::Send(send))
  };
  let res = match op {
    Op::And | Op::Or => {
      let result_temp = st.fresh(send.fun);
      stats.push(mk::assign_local(st, send_loc, result_temp, read));
      write_args.push(value);
      let write = mk_write(st, write_args);
      let cond = mk::local(st, send_loc, result_temp);
      let result = mk::local(st, send_loc, result_temp);
      match op {
        Op::And => mk::if_(st, send_loc, cond, write, result),
        _ => mk::if_(st, send_loc, cond, result, write),
      }
    }
    Op::Op(op) => {
      let new = mk::send(st, send_loc, read, op, vec![value]);
      write_args.push(new);
      mk_write(st, write_args)
    }
  };
  mk::ins_seq(st, loc, stats, res)
}

/// `a, (b, c), *d = rhs`.
pub(crate) fn masgn(st: &mut St<'_>, loc: TextRange, lhs: Node, rhs: Node) -> Result {
  let name = lhs.kind.name();
  let NodeKind::Mlhs(targets) = lhs.kind else {
    return Err(Fatal::MasgnNotMlhs(name));
  };
  let rhs = internal::get(st, rhs)?;
  mlhs(st, loc, targets, rhs)
}

/// Destructures `rhs` into the targets.
///
/// The value is expanded once into a temporary `t`. Targets before the splat read `t[0]`, `t[1]`,
/// ..., targets after it read `t[-1]` and so on from the end, and the splat slices what is left.
fn mlhs(st: &mut St<'_>, loc: TextRange, targets: Vec<Node>, rhs: ExprMust) -> Result {
  let temp = st.fresh(Name::assign_temp);
  let total = to_i64(targets.len());
  let mut stats = Vec::with_capacity(targets.len() + 1);
  let mut idx = 0i64;
  let mut before = 0i64;
  let mut after = 0i64;
  let mut did_splat = false;
  for (n, target) in targets.into_iter().enumerate() {
    let target_loc = target.loc;
    match target.kind {
      NodeKind::SplatLhs(var) => {
        if did_splat {
          return Err(Fatal::SecondSplat);
        }
        did_splat = true;
        let left = idx;
        let mut right = total - to_i64(n) - 1;
        if let Some(var) = var {
          let lhs = internal::get(st, *var)?;
          let lhs_loc = st.loc(lhs);
          let exclusive = if right == 0 {
            right = 1;
            false
          } else {
            true
          };
          let range = mk::constant(st, lhs_loc, Sym::Range);
          let from = mk::int(st, lhs_loc, left);
          let to = mk::int(st, lhs_loc, -right);
          let exclusive = mk::lit(st, lhs_loc, if exclusive { Lit::True } else { Lit::False });
          let index = mk::send(st, lhs_loc, range, Name::new, vec![from, to, exclusive]);
          let recv = mk::local(st, loc, temp);
          let slice = mk::send(st, loc, recv, Name::slice, vec![index]);
          stats.push(mk::assign(st, lhs_loc, lhs, slice));
        }
        idx = -right;
      }
      kind => {
        if did_splat {
          after += 1;
        } else {
          before += 1;
        }
        let recv = mk::local(st, loc, temp);
        let index = mk::int(st, loc, idx);
        let val = mk::send(st, loc, recv, Name::square_brackets, vec![index]);
        let stat = match kind {
          NodeKind::Mlhs(inner) => internal::with_node(st, target_loc, "mlhs", |st| {
            mlhs(st, target_loc, inner, val)
          })?,
          kind => {
            let lhs = internal::get(st, Node::new(target_loc, kind))?;
            let lhs_loc = st.loc(lhs);
            mk::assign(st, lhs_loc, lhs, val)
          }
        };
        stats.push(stat);
        idx += 1;
      }
    }
  }
  let magic = mk::constant(st, loc, Sym::Magic);
  let before = mk::int(st, loc, before);
  let after = mk::int(st, loc, after);
  let expanded = mk::send(st, loc, magic, Name::expand_splat, vec![rhs, before, after]);
  stats.insert(0, mk::assign_local(st, loc, temp, expanded));
  let ret = mk::local(st, loc, temp);
  Ok(mk::ins_seq(st, loc, stats, ret))
}

fn to_i64(n: usize) -> i64 {
  i64::try_from(n).unwrap_or(i64::MAX)
}
