//! Control flow: short-circuiting, loops, `case`, `rescue`, and `ensure`.

use crate::error::{Fatal, Result};
use crate::internal;
use crate::mk;
use crate::st::St;
use ruby_core_ast::{ExprData, ExprMust, Lit, Rescue, Send};
use ruby_name::Name;
use ruby_parse_tree::{Node, NodeKind, OptNode};
use text_size::TextRange;

pub(crate) fn and(st: &mut St<'_>, loc: TextRange, left: Node, right: Node) -> Result {
  short_circuit(st, loc, left, right, Name::and_and, true)
}

pub(crate) fn or(st: &mut St<'_>, loc: TextRange, left: Node, right: Node) -> Result {
  short_circuit(st, loc, left, right, Name::or_or, false)
}

/// A variable on the left is tested directly. Anything else is evaluated once into a temporary.
fn short_circuit(
  st: &mut St<'_>,
  loc: TextRange,
  left: Node,
  right: Node,
  base: Name,
  is_and: bool,
) -> Result {
  let lhs = internal::get(st, left)?;
  let (stats, cond, lhs) = if st.data(lhs).is_var_ref() {
    let cond = mk::copy_ref(st, lhs);
    (Vec::new(), cond, lhs)
  } else {
    let temp = st.fresh(base);
    let assign = mk::assign_local(st, loc, temp, lhs);
    let cond = mk::local(st, loc, temp);
    let lhs = mk::local(st, loc, temp);
    (vec![assign], cond, lhs)
  };
  let rhs = internal::get(st, right)?;
  let (yes, no) = if is_and { (rhs, lhs) } else { (lhs, rhs) };
  let if_ = mk::if_(st, loc, cond, yes, no);
  Ok(mk::ins_seq(st, loc, stats, if_))
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Post {
  While,
  Until,
}

/// `begin body end while cond` runs the body at least once. Any other body is an ordinary loop.
pub(crate) fn post_loop(
  st: &mut St<'_>,
  loc: TextRange,
  cond: Node,
  body: OptNode,
  post: Post,
) -> Result {
  let is_do = matches!(body.as_deref(), Some(Node { kind: NodeKind::KwBegin(_), .. }));
  let body = internal::get_opt(st, loc, body)?;
  let cond = internal::get(st, cond)?;
  let negate = match post {
    Post::While => is_do,
    Post::Until => !is_do,
  };
  let cond = if negate { mk::send(st, loc, cond, Name::bang, Vec::new()) } else { cond };
  if !is_do {
    return Ok(st.expr(loc, ExprData::While { cond, body }));
  }
  let temp = st.fresh(Name::for_temp);
  let with_result = mk::assign_local(st, loc, temp, body);
  let result = mk::local(st, loc, temp);
  let break_ = st.expr(loc, ExprData::Break(result));
  let empty = mk::empty(st, loc);
  let breaker = mk::if_(st, loc, cond, break_, empty);
  let body = mk::ins_seq(st, loc, vec![with_result], breaker);
  let true_ = mk::lit(st, loc, Lit::True);
  Ok(st.expr(loc, ExprData::While { cond: true_, body }))
}

/// `for vars in expr; body; end` becomes `expr.each { |*t| vars = t; body }`.
pub(crate) fn for_(
  st: &mut St<'_>,
  loc: TextRange,
  vars: Node,
  expr: Node,
  body: OptNode,
) -> Result {
  let expr = internal::get(st, expr)?;
  let temp = st.fresh(Name::for_temp);
  let lhs = if matches!(vars.kind, NodeKind::Mlhs(_)) {
    Box::new(vars)
  } else {
    Node::boxed(loc, NodeKind::Mlhs(vec![vars]))
  };
  let rhs = Node::boxed(loc, NodeKind::LVar(temp));
  let destructure = internal::get(st, Node::new(loc, NodeKind::Masgn { lhs, rhs }))?;
  let body = internal::get_opt(st, loc, body)?;
  let body = mk::ins_seq(st, loc, vec![destructure], body);
  let param = mk::local(st, loc, temp);
  let param = st.expr(loc, ExprData::RestArg(param));
  let block = st.expr(loc, ExprData::Block { args: vec![param], body });
  let send =
    Send { recv: expr, fun: Name::each, args: Vec::new(), block: Some(block), private_ok: false };
  Ok(st.expr(loc, ExprData::Send(send)))
}

/// The value of a `return`, `break`, or `next`. Many values make an array.
pub(crate) fn jump_value(st: &mut St<'_>, loc: TextRange, mut exprs: Vec<Node>) -> Result {
  if exprs.len() <= 1 {
    return match exprs.pop() {
      None => Ok(mk::empty(st, loc)),
      Some(e) => internal::get(st, e),
    };
  }
  let elems = exprs.into_iter().map(|e| internal::get(st, e)).collect::<Result<Vec<_>>>()?;
  Ok(st.expr(loc, ExprData::Array(elems)))
}

pub(crate) fn rescue(
  st: &mut St<'_>,
  loc: TextRange,
  body: OptNode,
  resbodies: Vec<Node>,
  else_: OptNode,
) -> Result {
  let body = internal::get_opt(st, loc, body)?;
  let cases = resbodies.into_iter().map(|rb| resbody(st, rb)).collect::<Result<Vec<_>>>()?;
  let else_ = internal::get_opt(st, loc, else_)?;
  let ensure = mk::empty(st, loc);
  Ok(st.expr(loc, ExprData::Rescue(Rescue { body, cases, else_, ensure })))
}

fn resbody(st: &mut St<'_>, node: Node) -> Result {
  let loc = node.loc;
  let name = node.kind.name();
  internal::with_node(st, loc, name, |st| {
    let NodeKind::Resbody { exception, var, body } = node.kind else {
      return Err(Fatal::OutOfContext(name));
    };
    let exceptions = match exception {
      None => Vec::new(),
      Some(exception) => exception_list(st, *exception)?,
    };
    let var = var.map(|var| internal::get(st, *var)).transpose()?;
    let body = internal::get_opt(st, loc, body)?;
    let (var, body) = match var {
      Some(var) if matches!(st.data(var), ExprData::Local(_)) => (var, body),
      None => {
        let temp = st.fresh(Name::rescue_temp);
        (mk::local(st, loc, temp), body)
      }
      Some(var) => {
        let var_loc = st.loc(var);
        let temp = st.fresh(Name::rescue_temp);
        let rhs = mk::local(st, var_loc, temp);
        let assign = mk::assign(st, var_loc, var, rhs);
        let body = mk::ins_seq(st, var_loc, vec![assign], body);
        (mk::local(st, var_loc, temp), body)
      }
    };
    Ok(st.expr(loc, ExprData::RescueCase { exceptions, var, body }))
  })
}

/// The exceptions a rescue clause catches.
fn exception_list(st: &mut St<'_>, exception: Node) -> Result<Vec<ExprMust>> {
  let e = internal::get(st, exception)?;
  let single = match st.data(e) {
    ExprData::Array(elems) => return Ok(elems.clone()),
    ExprData::Send(send) => send.fun == Name::to_a || send.fun == Name::concat,
    ExprData::Splat(_) => true,
    _ => false,
  };
  if single { Ok(vec![e]) } else { Err(Fatal::BadRescueList) }
}

/// Fills in the ensure of the rescue that is the body, if there is one.
pub(crate) fn ensure(st: &mut St<'_>, loc: TextRange, body: OptNode, ensure: OptNode) -> Result {
  let body = internal::get_opt(st, loc, body)?;
  let ensure = internal::get_opt(st, loc, ensure)?;
  if let ExprData::Rescue(rescue) = st.data_mut(body) {
    rescue.ensure = ensure;
    return Ok(body);
  }
  let else_ = mk::empty(st, loc);
  Ok(st.expr(loc, ExprData::Rescue(Rescue { body, cases: Vec::new(), else_, ensure })))
}

/// Nested ifs testing each `when` in order.
pub(crate) fn case(
  st: &mut St<'_>,
  loc: TextRange,
  cond: OptNode,
  whens: Vec<Node>,
  else_: OptNode,
) -> Result {
  let subject = match cond {
    None => None,
    Some(cond) => {
      let temp = st.fresh(Name::assign_temp);
      let cond_loc = cond.loc;
      let cond = internal::get(st, *cond)?;
      Some((cond_loc, temp, mk::assign_local(st, cond_loc, temp, cond)))
    }
  };
  let subject_ref = subject.map(|(cond_loc, temp, _)| (cond_loc, temp));
  let clauses = whens.into_iter().map(|w| when(st, w, subject_ref)).collect::<Result<Vec<_>>>()?;
  let mut ret = internal::get_opt(st, loc, else_)?;
  for clause in clauses.into_iter().rev() {
    let mut tests = clause.tests.into_iter().rev();
    let Some(mut cond) = tests.next() else {
      return Err(Fatal::WhenNoPatterns);
    };
    for test in tests {
      let test_loc = st.loc(test);
      let true_ = mk::lit(st, test_loc, Lit::True);
      cond = mk::if_(st, test_loc, test, true_, cond);
    }
    ret = mk::if_(st, clause.loc, cond, clause.body, ret);
  }
  let stats = subject.map(|(_, _, assign)| assign).into_iter().collect();
  Ok(mk::ins_seq(st, loc, stats, ret))
}

struct When {
  loc: TextRange,
  tests: Vec<ExprMust>,
  body: ExprMust,
}

fn when(st: &mut St<'_>, node: Node, subject: Option<(TextRange, Name)>) -> Result<When> {
  let loc = node.loc;
  let name = node.kind.name();
  internal::with_node(st, loc, name, |st| {
    let NodeKind::When { patterns, body } = node.kind else {
      return Err(Fatal::OutOfContext(name));
    };
    if patterns.is_empty() {
      return Err(Fatal::WhenNoPatterns);
    }
    let mut tests = Vec::with_capacity(patterns.len());
    for pattern in patterns {
      let pattern = internal::get(st, pattern)?;
      let test = match subject {
        None => pattern,
        Some((subject_loc, temp)) => {
          let pattern_loc = st.loc(pattern);
          let subject = mk::local(st, subject_loc, temp);
          mk::send(st, pattern_loc, pattern, Name::triple_eq, vec![subject])
        }
      };
      tests.push(test);
    }
    let body = internal::get_opt(st, loc, body)?;
    Ok(When { loc, tests, body })
  })
}
