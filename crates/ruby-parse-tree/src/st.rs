//! The state of the dump reader.

use drop_bomb::DebugDropBomb;
use text_size::{TextRange, TextSize};

#[derive(Debug)]
pub(crate) struct St<'a> {
  s: &'a str,
  idx: usize,
  /// How many lists we are inside of.
  depth: usize,
}

impl<'a> St<'a> {
  pub(crate) fn new(s: &'a str) -> St<'a> {
    St { s, idx: 0, depth: 0 }
  }

  pub(crate) fn cur(&self) -> Option<u8> {
    self.s.as_bytes().get(self.idx).copied()
  }

  pub(crate) fn bump(&mut self) {
    self.idx += 1;
  }

  /// Bumps past the current char, which may be more than one byte.
  pub(crate) fn bump_char(&mut self) -> Option<char> {
    let c = self.s.get(self.idx..)?.chars().next()?;
    self.idx += c.len_utf8();
    Some(c)
  }

  pub(crate) fn bump_while<F>(&mut self, f: F)
  where
    F: Fn(u8) -> bool,
  {
    while let Some(b) = self.cur() {
      if f(b) {
        self.bump();
      } else {
        break;
      }
    }
  }

  /// Goes one list deeper, or returns `false` if that would be more than `max` lists deep.
  pub(crate) fn enter(&mut self, max: usize) -> bool {
    if self.depth >= max {
      return false;
    }
    self.depth += 1;
    true
  }

  pub(crate) fn exit(&mut self) {
    always::always!(self.depth != 0);
    self.depth = self.depth.saturating_sub(1);
  }

  pub(crate) fn text(&self) -> &'a str {
    self.s
  }

  pub(crate) fn mark(&self) -> Marker {
    Marker { bomb: DebugDropBomb::new("must be passed to a `St` method"), idx: self.idx }
  }

  /// Returns the text between the marker and the current position.
  pub(crate) fn since(&self, mut m: Marker) -> &'a str {
    m.bomb.defuse();
    self.s.get(m.idx..self.idx).unwrap_or_default()
  }

  /// Returns the range between the marker and the current position.
  pub(crate) fn range_since(&self, mut m: Marker) -> TextRange {
    m.bomb.defuse();
    range(m.idx, self.idx)
  }

  /// Returns the empty range at the current position.
  pub(crate) fn here(&self) -> TextRange {
    range(self.idx, self.idx)
  }
}

fn range(start: usize, end: usize) -> TextRange {
  let start = TextSize::try_from(start).unwrap_or_default();
  let end = TextSize::try_from(end).unwrap_or(start);
  if start <= end { TextRange::new(start, end) } else { TextRange::empty(start) }
}

pub(crate) struct Marker {
  bomb: DebugDropBomb,
  idx: usize,
}
