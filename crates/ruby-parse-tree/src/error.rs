use std::fmt;
use text_size::TextRange;

/// An error when reading a dump.
#[derive(Debug)]
pub struct Error {
  pub(crate) range: TextRange,
  pub(crate) kind: Kind,
}

impl Error {
  pub(crate) fn new(range: TextRange, kind: Kind) -> Self {
    Self { range, kind }
  }

  /// Returns the range of the dump this error is at.
  #[must_use]
  pub fn range(&self) -> TextRange {
    self.range
  }
}

#[derive(Debug)]
pub(crate) enum Kind {
  UnexpectedEof,
  UnexpectedChar(char),
  UnknownWord(String),
  EmptyHead,
  EmptyName,
  UnclosedList,
  UnclosedString,
  InvalidEscape(char),
  InvalidInt,
  TrailingInput,
  UnknownHead(String),
  Expected(&'static str),
  Missing(&'static str),
  Extra(String),
  TooDeep(usize),
  NoThread(String),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      Kind::UnexpectedEof => f.write_str("unexpected end of input"),
      Kind::UnexpectedChar(c) => write!(f, "unexpected character: `{c}`"),
      Kind::UnknownWord(w) => write!(f, "unknown word: `{w}`"),
      Kind::EmptyHead => f.write_str("list must start with a node name"),
      Kind::EmptyName => f.write_str("empty name after `:`"),
      Kind::UnclosedList => f.write_str("unclosed list"),
      Kind::UnclosedString => f.write_str("unclosed string"),
      Kind::InvalidEscape(c) => write!(f, "invalid escape: `\\{c}`"),
      Kind::InvalidInt => f.write_str("invalid integer"),
      Kind::TrailingInput => f.write_str("trailing input after the root node"),
      Kind::UnknownHead(h) => write!(f, "unknown node: `{h}`"),
      Kind::Expected(what) => write!(f, "expected {what}"),
      Kind::Missing(what) => write!(f, "missing {what}"),
      Kind::Extra(head) => write!(f, "too many items for `{head}`"),
      Kind::TooDeep(n) => write!(f, "nested more than {n} levels deep"),
      Kind::NoThread(e) => write!(f, "couldn't start a thread to read on: {e}"),
    }
  }
}
