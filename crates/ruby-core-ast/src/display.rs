//! Displaying expressions.
//!
//! The output is on one line and looks roughly like Ruby, but with the desugaring visible.

use crate::{ClassDefKind, ExprArena, ExprData, ExprMust, Lit, Sym};
use ruby_name::{Name, NameArena};
use std::fmt::{self, Display as _};

/// Displays an expression. Mostly for tests and debugging.
#[must_use]
pub fn expr<'a>(e: ExprMust, expr_ar: &'a ExprArena, names: &'a NameArena) -> impl fmt::Display {
  ExprDisplay { e, expr_ar, names }
}

#[derive(Clone, Copy)]
struct ExprDisplay<'a> {
  e: ExprMust,
  expr_ar: &'a ExprArena,
  names: &'a NameArena,
}

impl<'a> ExprDisplay<'a> {
  fn with(self, e: ExprMust) -> ExprDisplay<'a> {
    ExprDisplay { e, ..self }
  }

  fn name(self, name: Name) -> impl fmt::Display + 'a {
    name.display(self.names)
  }

  fn sep(self, f: &mut fmt::Formatter<'_>, es: &[ExprMust], sep: &str) -> fmt::Result {
    let mut iter = es.iter();
    if let Some(&e) = iter.next() {
      self.with(e).fmt(f)?;
    }
    for &e in iter {
      f.write_str(sep)?;
      self.with(e).fmt(f)?;
    }
    Ok(())
  }
}

impl fmt::Display for ExprDisplay<'_> {
  #[allow(clippy::too_many_lines)]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.expr_ar[self.e] {
      ExprData::Empty => f.write_str("<empty>"),
      ExprData::Lit(lit) => match lit {
        Lit::Nil => f.write_str("nil"),
        Lit::True => f.write_str("true"),
        Lit::False => f.write_str("false"),
        Lit::Int(n) => write!(f, "{n}"),
        Lit::Float(n) => write!(f, "{n:?}"),
        Lit::String(s) => write!(f, "{:?}", self.name(*s).to_string()),
        Lit::Symbol(s) => write!(f, ":{}", self.name(*s)),
      },
      ExprData::Local(name) | ExprData::UnresolvedIdent { name, .. } => self.name(*name).fmt(f),
      ExprData::UnresolvedConstant { scope, name } => {
        if !matches!(self.expr_ar[*scope], ExprData::Empty) {
          write!(f, "{}::", self.with(*scope))?;
        }
        self.name(*name).fmt(f)
      }
      ExprData::Constant(sym) => sym.fmt(f),
      ExprData::Send(send) => {
        write!(f, "{}.{}(", self.with(send.recv), self.name(send.fun))?;
        self.sep(f, &send.args, ", ")?;
        f.write_str(")")?;
        if let Some(block) = send.block {
          write!(f, " {}", self.with(block))?;
        }
        Ok(())
      }
      ExprData::Block { args, body } => {
        f.write_str("do |")?;
        self.sep(f, args, ", ")?;
        write!(f, "| {} end", self.with(*body))
      }
      ExprData::InsSeq { stats, expr } => {
        f.write_str("begin ")?;
        for &stat in stats {
          write!(f, "{}; ", self.with(stat))?;
        }
        write!(f, "{} end", self.with(*expr))
      }
      ExprData::If { cond, yes, no } => {
        write!(f, "if {} then {} else {} end", self.with(*cond), self.with(*yes), self.with(*no))
      }
      ExprData::While { cond, body } => {
        write!(f, "while {} do {} end", self.with(*cond), self.with(*body))
      }
      ExprData::Return(e) => write!(f, "return {}", self.with(*e)),
      ExprData::Break(e) => write!(f, "break {}", self.with(*e)),
      ExprData::Next(e) => write!(f, "next {}", self.with(*e)),
      ExprData::Retry => f.write_str("retry"),
      ExprData::Yield(args) => {
        f.write_str("yield(")?;
        self.sep(f, args, ", ")?;
        f.write_str(")")
      }
      ExprData::Rescue(r) => {
        write!(f, "begin {}", self.with(r.body))?;
        for &case in &r.cases {
          write!(f, " {}", self.with(case))?;
        }
        write!(f, " else {} ensure {} end", self.with(r.else_), self.with(r.ensure))
      }
      ExprData::RescueCase { exceptions, var, body } => {
        f.write_str("rescue ")?;
        self.sep(f, exceptions, ", ")?;
        if !exceptions.is_empty() {
          f.write_str(" ")?;
        }
        write!(f, "=> {} then {}", self.with(*var), self.with(*body))
      }
      ExprData::Array(elems) => {
        f.write_str("[")?;
        self.sep(f, elems, ", ")?;
        f.write_str("]")
      }
      ExprData::Hash { keys, values } => {
        f.write_str("{")?;
        let mut first = true;
        for (&k, &v) in keys.iter().zip(values.iter()) {
          if !first {
            f.write_str(", ")?;
          }
          first = false;
          write!(f, "{} => {}", self.with(k), self.with(v))?;
        }
        f.write_str("}")
      }
      ExprData::Splat(e) => write!(f, "*{}", self.with(*e)),
      ExprData::Assign { lhs, rhs } => write!(f, "{} = {}", self.with(*lhs), self.with(*rhs)),
      ExprData::RestArg(e) => write!(f, "*{}", self.with(*e)),
      ExprData::KeywordArg(e) => write!(f, "{}:", self.with(*e)),
      ExprData::OptionalArg { arg, default } => {
        if matches!(self.expr_ar[*arg], ExprData::KeywordArg(_)) {
          write!(f, "{} {}", self.with(*arg), self.with(*default))
        } else {
          write!(f, "{} = {}", self.with(*arg), self.with(*default))
        }
      }
      ExprData::BlockArg(e) => write!(f, "&{}", self.with(*e)),
      ExprData::ShadowArg(e) => write!(f, ";{}", self.with(*e)),
      ExprData::ZSuperArgs => f.write_str("<zsuper>"),
      ExprData::MethodDef { name, args, body, is_self } => {
        f.write_str("def ")?;
        if *is_self {
          f.write_str("self.")?;
        }
        write!(f, "{}(", self.name(*name))?;
        self.sep(f, args, ", ")?;
        write!(f, ") {} end", self.with(*body))
      }
      ExprData::ClassDef { kind, symbol, name, ancestors, body } => {
        write!(f, "{kind} ")?;
        if *symbol == Sym::Root {
          f.write_str("<root>")?;
        } else {
          self.with(*name).fmt(f)?;
        }
        if !ancestors.is_empty() {
          f.write_str(" < ")?;
          self.sep(f, ancestors, ", ")?;
        }
        f.write_str(" ")?;
        if !body.is_empty() {
          self.sep(f, body, "; ")?;
          f.write_str(" ")?;
        }
        f.write_str("end")
      }
    }
  }
}

impl fmt::Display for Sym {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Sym::Root => "<root>",
      Sym::Todo => "<todo sym>",
      Sym::Magic => "::Magic",
      Sym::Range => "::Range",
      Sym::Regexp => "::Regexp",
      Sym::Kernel => "::Kernel",
    };
    f.write_str(s)
  }
}

impl fmt::Display for ClassDefKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ClassDefKind::Class => f.write_str("class"),
      ClassDefKind::Module => f.write_str("module"),
    }
  }
}
