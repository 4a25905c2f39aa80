//! Configuration for lowering one unit.

/// The context for lowering one unit.
#[derive(Debug, Clone, Copy)]
pub struct Cx<'a> {
  /// The positions of the text the locations point into. Used for `__LINE__`.
  pub pos_db: &'a text_pos::PositionDb,
  /// The name of the file, for `__FILE__`.
  pub file_name: Option<&'a str>,
  /// How deeply the parse tree may nest before we give up.
  pub max_depth: usize,
}

impl<'a> Cx<'a> {
  /// The default for `max_depth`. Less than [`ruby_parse_tree::sexp::MAX_DEPTH`], so a dump that
  /// nests too deeply for lowering can still be read.
  pub const DEFAULT_MAX_DEPTH: usize = 1000;

  /// Returns a new context with no file name and the default max depth.
  #[must_use]
  pub fn new(pos_db: &'a text_pos::PositionDb) -> Self {
    Self { pos_db, file_name: None, max_depth: Self::DEFAULT_MAX_DEPTH }
  }
}
