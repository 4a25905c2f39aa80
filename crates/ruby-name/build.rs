//! Generate the well-known names.

use quote::quote as q;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
struct S {
  ident: &'static str,
  content: &'static str,
}

impl S {
  const fn new(s: &'static str) -> Self {
    Self { ident: s, content: s }
  }

  const fn named(content: &'static str, ident: &'static str) -> Self {
    Self { ident, content }
  }
}

const METHODS: [S; 22] = [
  S::new("to_s"),
  S::new("to_a"),
  S::new("to_hash"),
  S::new("to_proc"),
  S::new("concat"),
  S::new("intern"),
  S::new("call"),
  S::new("merge"),
  S::new("each"),
  S::new("slice"),
  S::new("new"),
  S::new("alias_method"),
  S::new("Complex"),
  S::new("Rational"),
  S::named("nil?", "nil_p"),
  S::named("!", "bang"),
  S::named("[]", "square_brackets"),
  S::named("===", "triple_eq"),
  S::named("|", "or_op"),
  S::named("`", "backtick"),
  S::named("defined?", "defined_p"),
  S::named("super", "super_"),
];

const SPECIAL: [S; 3] = [
  S::named("self", "self_"),
  S::named("__FILE__", "current_file"),
  S::named("", "empty"),
];

// these can never be written in user code as identifiers. they are used as the base of fresh
// names and as the names of magic methods.
const UNUTTERABLE: [S; 10] = [
  S::named("<singleton class>", "singleton"),
  S::named("<call-with-splat>", "call_with_splat"),
  S::named("<expand-splat>", "expand_splat"),
  S::named("<assignTemp>", "assign_temp"),
  S::named("&&", "and_and"),
  S::named("||", "or_or"),
  S::named("<block-pass>", "block_pass_temp"),
  S::named("<forTemp>", "for_temp"),
  S::named("<rescueTemp>", "rescue_temp"),
  S::named("<destructure>", "destructure_arg"),
];

fn main() {
  let all = || METHODS.iter().chain(SPECIAL.iter()).chain(UNUTTERABLE.iter()).copied();

  let mut idents = HashSet::<&'static str>::new();
  let mut contents = HashSet::<&'static str>::new();
  for s in all() {
    assert!(idents.insert(s.ident), "duplicate ident: {}", s.ident);
    assert!(contents.insert(s.content), "duplicate content: {}", s.content);
  }
  drop(idents);
  drop(contents);

  let variants = all().map(|s| {
    let name = ident(s.ident);
    q! { #name, }
  });
  let as_static_str_arms = all().map(|s| {
    let name = ident(s.ident);
    let content = s.content;
    q! { Self::#name => #content, }
  });
  let from_str_arms = all().map(|s| {
    let name = ident(s.ident);
    let content = s.content;
    q! { #content => Self::#name, }
  });
  let constants = all().map(|s| {
    let name = ident(s.ident);
    let doc = if s.content.is_empty() {
      "The empty name.".to_owned()
    } else {
      format!("The name `{}`.", s.content)
    };
    q! {
      #[doc = #doc]
      pub const #name: Self = Self::builtin(BuiltinName::#name);
    }
  });

  let file = file!();

  let contents = q! {
    pub(crate) const _GENERATED_BY: &str = #file;

    use crate::Name;

    #[expect(non_camel_case_types)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub(crate) enum BuiltinName {
      #(#variants)*
    }

    impl BuiltinName {
      pub(crate) const fn as_static_str(self) -> &'static str {
        match self {
          #(#as_static_str_arms)*
        }
      }
    }

    impl std::str::FromStr for BuiltinName {
      type Err = NotBuiltinName;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ret = match s {
          #(#from_str_arms)*
          _ => return Err(NotBuiltinName(())),
        };
        Ok(ret)
      }
    }

    #[doc = "A witness that some contents were not a `BuiltinName`."]
    pub(crate) struct NotBuiltinName(());

    #[expect(non_upper_case_globals)]
    impl Name {
      #(#constants)*
    }
  };
  write_rs_tokens::go(contents, "generated.rs");
}

fn ident(s: &str) -> proc_macro2::Ident {
  quote::format_ident!("{s}")
}
