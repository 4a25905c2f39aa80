//! Names: interned identifiers and string contents, the well-known names, and fresh names.
//!
//! Every name the parser or the desugarer hands around is a [`Name`], which is `Copy` and cheap to
//! compare. The text behind a name lives in a [`NameArena`].

mod generated {
  include!(concat!(env!("OUT_DIR"), "/generated.rs"));
}

use generated::{BuiltinName, NotBuiltinName};
use rustc_hash::FxHashMap;
use std::fmt;

/// A name, which may be interned or fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(NameRepr);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum NameRepr {
  Text(TextRepr),
  /// A name synthesized by the desugarer. It has a base and a counter, and is never equal to any
  /// `Text` name, so it can never collide with a name from user code.
  Fresh(TextRepr, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum TextRepr {
  Builtin(BuiltinName),
  Idx(NameIdx),
}

/// An interned name, which is an index into a name arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct NameIdx(u32);

impl NameIdx {
  fn from_usize(n: usize) -> Self {
    Self(always::convert::usize_to_u32(n))
  }

  fn to_usize(self) -> usize {
    always::convert::u32_to_usize(self.0)
  }
}

impl Name {
  pub(crate) const fn builtin(bn: BuiltinName) -> Self {
    Self(NameRepr::Text(TextRepr::Builtin(bn)))
  }

  /// Returns the fresh name with this name as the base and `n` as the counter.
  ///
  /// If this is already fresh, its base is used.
  #[must_use]
  pub fn fresh(self, n: u32) -> Self {
    match self.0 {
      NameRepr::Text(t) | NameRepr::Fresh(t, _) => Self(NameRepr::Fresh(t, n)),
    }
  }

  /// Returns whether this was made with [`Name::fresh`].
  #[must_use]
  pub fn is_fresh(self) -> bool {
    matches!(self.0, NameRepr::Fresh(..))
  }

  /// Returns a value that displays this.
  #[must_use]
  pub fn display(self, ar: &NameArena) -> impl fmt::Display + use<'_> {
    NameDisplay { name: self, ar }
  }
}

struct NameDisplay<'a> {
  name: Name,
  ar: &'a NameArena,
}

impl fmt::Display for NameDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.name.0 {
      NameRepr::Text(t) => f.write_str(self.ar.get_text(t)),
      NameRepr::Fresh(t, n) => write!(f, "{}${n}", self.ar.get_text(t)),
    }
  }
}

/// The table of interned names.
///
/// The well-known names are always present and never take up space in the table.
#[derive(Debug, Default)]
pub struct NameArena {
  idx_to_data: Vec<Box<str>>,
  data_to_idx: FxHashMap<Box<str>, NameIdx>,
}

impl NameArena {
  /// Should only call this when we know the contents are NOT one of the builtin names. The
  /// `NotBuiltinName` argument serves as a witness to this fact.
  fn dangerous_mk_idx(&mut self, contents: &str, _: NotBuiltinName) -> NameIdx {
    if let Some(&idx) = self.data_to_idx.get(contents) {
      return idx;
    }
    let ret = NameIdx::from_usize(self.idx_to_data.len());
    let contents: Box<str> = contents.into();
    self.idx_to_data.push(contents.clone());
    self.data_to_idx.insert(contents, ret);
    ret
  }

  fn mk_text_repr(&mut self, contents: &str) -> TextRepr {
    match contents.parse::<BuiltinName>() {
      Ok(bn) => TextRepr::Builtin(bn),
      Err(nbn) => TextRepr::Idx(self.dangerous_mk_idx(contents, nbn)),
    }
  }

  /// Interns the contents if they were not in the table already, and returns the name for them.
  pub fn name(&mut self, contents: &str) -> Name {
    Name(NameRepr::Text(self.mk_text_repr(contents)))
  }

  /// Returns the name of the writer method for the given reader method, e.g. `foo=` for `foo`.
  pub fn add_eq(&mut self, name: Name) -> Name {
    match name.0 {
      NameRepr::Text(t) => {
        let contents = format!("{}=", self.get_text(t));
        self.name(&contents)
      }
      NameRepr::Fresh(..) => {
        always::always!(false, "should not make a writer for a fresh name");
        name
      }
    }
  }

  /// Returns the text for the name, or `None` if the name is fresh.
  #[must_use]
  pub fn get(&self, name: Name) -> Option<&str> {
    match name.0 {
      NameRepr::Text(t) => Some(self.get_text(t)),
      NameRepr::Fresh(..) => None,
    }
  }

  fn get_text(&self, t: TextRepr) -> &str {
    match t {
      TextRepr::Builtin(bn) => bn.as_static_str(),
      TextRepr::Idx(idx) => &self.idx_to_data[idx.to_usize()],
    }
  }
}
