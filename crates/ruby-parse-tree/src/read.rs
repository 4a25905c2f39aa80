//! Reading the text of a dump into untyped lists and atoms.

use crate::error::{Error, Kind};
use crate::sexp::MAX_DEPTH;
use crate::st::St;
use text_size::TextRange;

#[derive(Debug)]
pub(crate) struct Sexp {
  pub(crate) range: TextRange,
  pub(crate) kind: SexpKind,
}

#[derive(Debug)]
pub(crate) enum SexpKind {
  List(String, Vec<Sexp>),
  Nil,
  Name(String),
  Str(String),
  Int(i64),
}

pub(crate) fn get(s: &str) -> Result<Sexp, Error> {
  let mut st = St::new(s);
  skip_ws(&mut st);
  let ret = sexp(&mut st)?;
  skip_ws(&mut st);
  if st.cur().is_some() {
    return Err(Error::new(st.here(), Kind::TrailingInput));
  }
  Ok(ret)
}

fn skip_ws(st: &mut St<'_>) {
  st.bump_while(|b| b.is_ascii_whitespace());
}

fn is_word(b: u8) -> bool {
  b.is_ascii_alphanumeric() || matches!(b, b'_' | b'?')
}

fn is_sym(b: u8) -> bool {
  !b.is_ascii_whitespace() && !matches!(b, b'(' | b')' | b'"')
}

fn sexp(st: &mut St<'_>) -> Result<Sexp, Error> {
  let Some(b) = st.cur() else {
    return Err(Error::new(st.here(), Kind::UnexpectedEof));
  };
  if b == b'(' && !st.enter(MAX_DEPTH) {
    return Err(Error::new(st.here(), Kind::TooDeep(MAX_DEPTH)));
  }
  let m = st.mark();
  let kind = match b {
    b'(' => {
      st.bump();
      let ret = list(st);
      st.exit();
      ret
    }
    b'"' => {
      st.bump();
      string(st).map(SexpKind::Str)
    }
    b':' => {
      st.bump();
      name(st).map(SexpKind::Name)
    }
    b'-' | b'0'..=b'9' => int(st),
    _ if is_word(b) => {
      let w = st.mark();
      st.bump_while(is_word);
      let r = st.range_since(w);
      match &st.text()[r] {
        "nil" => Ok(SexpKind::Nil),
        w => Err(Error::new(r, Kind::UnknownWord(w.to_owned()))),
      }
    }
    _ => {
      let here = st.here();
      let c = st.bump_char().unwrap_or(char::REPLACEMENT_CHARACTER);
      Err(Error::new(here, Kind::UnexpectedChar(c)))
    }
  };
  let range = st.range_since(m);
  Ok(Sexp { range, kind: kind? })
}

/// After the opening paren.
fn list(st: &mut St<'_>) -> Result<SexpKind, Error> {
  let m = st.mark();
  st.bump_while(is_word);
  let head = st.since(m);
  if head.is_empty() {
    return Err(Error::new(st.here(), Kind::EmptyHead));
  }
  let head = head.to_owned();
  let mut items = Vec::<Sexp>::new();
  loop {
    skip_ws(st);
    match st.cur() {
      None => return Err(Error::new(st.here(), Kind::UnclosedList)),
      Some(b')') => {
        st.bump();
        break;
      }
      Some(_) => items.push(sexp(st)?),
    }
  }
  Ok(SexpKind::List(head, items))
}

/// After the opening quote.
fn string(st: &mut St<'_>) -> Result<String, Error> {
  let mut ret = String::new();
  loop {
    let Some(c) = st.bump_char() else { return Err(Error::new(st.here(), Kind::UnclosedString)) };
    match c {
      '"' => break,
      '\\' => {
        let Some(c) = st.bump_char() else {
          return Err(Error::new(st.here(), Kind::UnclosedString));
        };
        let c = match c {
          '"' => '"',
          '\\' => '\\',
          'n' => '\n',
          't' => '\t',
          c => return Err(Error::new(st.here(), Kind::InvalidEscape(c))),
        };
        ret.push(c);
      }
      c => ret.push(c),
    }
  }
  Ok(ret)
}

/// After the colon.
fn name(st: &mut St<'_>) -> Result<String, Error> {
  if st.cur() == Some(b'"') {
    st.bump();
    return string(st);
  }
  let m = st.mark();
  st.bump_while(is_sym);
  let ret = st.since(m);
  if ret.is_empty() { Err(Error::new(st.here(), Kind::EmptyName)) } else { Ok(ret.to_owned()) }
}

fn int(st: &mut St<'_>) -> Result<SexpKind, Error> {
  let m = st.mark();
  st.bump();
  st.bump_while(|b| b.is_ascii_digit());
  let r = st.range_since(m);
  match st.text()[r].parse::<i64>() {
    Ok(n) => Ok(SexpKind::Int(n)),
    Err(_) => Err(Error::new(r, Kind::InvalidInt)),
  }
}
