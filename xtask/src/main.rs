//! A task runner for the repo based on the [xtask spec](https://github.com/matklad/cargo-xtask).

#![expect(clippy::disallowed_methods)]

use pico_args::Arguments;
use std::collections::BTreeSet;
use std::path::Path;
use std::{env, fs, process::Command};

#[derive(Debug, Clone, Copy)]
enum Cmd {
  Help,
  Check,
  Ci,
  Release,
}

impl Cmd {
  const VALUES: [Cmd; 4] = [Cmd::Help, Cmd::Check, Cmd::Ci, Cmd::Release];

  fn name(self) -> &'static str {
    match self {
      Cmd::Help => "help",
      Cmd::Check => "check",
      Cmd::Ci => "ci",
      Cmd::Release => "release",
    }
  }

  fn desc(self) -> &'static str {
    match self {
      Cmd::Help => "show this help",
      Cmd::Check => "check the layout of the crates, without building",
      Cmd::Ci => "run `check`, then build, lint, and test",
      Cmd::Release => "bump the version and tag a new release (takes `--tag vX.Y.Z`)",
    }
  }
}

fn show_help() {
  println!("usage:");
  println!("  cargo xtask <command> [<options>]");
  println!();
  println!("commands:");
  for c in Cmd::VALUES {
    println!("  {}", c.name());
    println!("    {}", c.desc());
  }
}

fn cargo(args: &[&str]) {
  let status = Command::new("cargo").args(args).status().expect("spawn cargo");
  assert!(status.success(), "cargo {} failed", args.join(" "));
}

fn git(args: &[&str]) {
  let status = Command::new("git").args(args).status().expect("spawn git");
  assert!(status.success(), "git {} failed", args.join(" "));
}

/// Returns the stems of the `.rs` files directly in `dir`.
fn rs_stems(dir: &Path) -> BTreeSet<String> {
  fs::read_dir(dir)
    .expect("read dir")
    .map(|entry| entry.expect("dir entry").path())
    .filter(|p| p.extension().is_some_and(|e| e == "rs"))
    .map(|p| p.file_stem().expect("file stem").to_string_lossy().into_owned())
    .collect()
}

/// Every file in the tests crate is a declared module, and every declared module has a file.
fn check_test_modules(problems: &mut Vec<String>) {
  let src = Path::new("crates/tests/src");
  let lib = fs::read_to_string(src.join("lib.rs")).expect("read tests lib");
  let declared: BTreeSet<String> = lib
    .lines()
    .filter_map(|line| line.strip_prefix("mod ")?.strip_suffix(';'))
    .map(ToOwned::to_owned)
    .collect();
  let mut files = rs_stems(src);
  files.remove("lib");
  for m in declared.difference(&files) {
    problems.push(format!("crates/tests: `mod {m};` has no file"));
  }
  for m in files.difference(&declared) {
    problems.push(format!("crates/tests: {m}.rs is not declared in lib.rs"));
  }
}

/// Every crate uses the workspace lints and has crate-level docs.
fn check_crates(problems: &mut Vec<String>) {
  for entry in fs::read_dir("crates").expect("read crates") {
    let dir = entry.expect("dir entry").path();
    let name = dir.display();
    let manifest = fs::read_to_string(dir.join("Cargo.toml")).expect("read manifest");
    if !manifest.contains("[lints]\nworkspace = true") {
      problems.push(format!("{name}: does not use the workspace lints"));
    }
    let root = ["src/lib.rs", "src/main.rs"].into_iter().map(|r| dir.join(r)).find(|p| p.is_file());
    let Some(root) = root else {
      problems.push(format!("{name}: no crate root"));
      continue;
    };
    let contents = fs::read_to_string(&root).expect("read crate root");
    let first = contents.lines().find(|line| !line.starts_with("#!"));
    if !first.is_some_and(|line| line.starts_with("//!")) {
      problems.push(format!("{}: no crate docs", root.display()));
    }
  }
}

fn run_check() {
  let mut problems = Vec::<String>::new();
  check_test_modules(&mut problems);
  check_crates(&mut problems);
  for p in &problems {
    eprintln!("{p}");
  }
  assert!(problems.is_empty(), "{} problems", problems.len());
}

fn run_ci() {
  run_check();
  cargo(&["build", "--locked"]);
  cargo(&["fmt", "--", "--check"]);
  cargo(&["clippy", "--locked"]);
  cargo(&["clippy", "--locked", "--tests"]);
  cargo(&["test", "--locked"]);
}

/// Sets the version in the `[workspace.package]` table of the root manifest.
fn bump_version(version: &str) {
  let contents = fs::read_to_string("Cargo.toml").expect("read manifest");
  let mut in_package = false;
  let mut bumped = false;
  let lines: Vec<String> = contents
    .lines()
    .map(|line| {
      if line.starts_with('[') {
        in_package = line == "[workspace.package]";
      } else if in_package && line.starts_with("version = ") {
        bumped = true;
        return format!("version = \"{version}\"");
      }
      line.to_owned()
    })
    .collect();
  assert!(bumped, "no version in [workspace.package]");
  fs::write("Cargo.toml", lines.join("\n") + "\n").expect("write manifest");
}

fn release(tag: &str) {
  let version = tag.strip_prefix('v').expect("tag must start with v");
  let parts: Vec<_> = version.split('.').collect();
  assert_eq!(parts.len(), 3, "version must have 3 dot-separated parts");
  for part in parts {
    part.parse::<u16>().expect("parse as u16");
  }
  bump_version(version);
  // to update Cargo.lock
  cargo(&["build"]);
  git(&["add", "Cargo.lock", "Cargo.toml"]);
  git(&["commit", "-m", &format!("Release {tag}"), "--no-verify"]);
  git(&["tag", tag]);
}

fn main() {
  let mut args = Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    show_help();
    return;
  }
  let Some(cmd) = args.subcommand().expect("subcommand") else {
    show_help();
    return;
  };
  let cmd = Cmd::VALUES.into_iter().find(|c| c.name() == cmd).expect("unknown command");
  let tag: Option<String> = args.opt_value_from_str("--tag").expect("parse --tag");
  let rest = args.finish();
  assert!(rest.is_empty(), "unused args: {rest:?}");
  let dir = Path::new(env!("CARGO_MANIFEST_DIR")).parent().expect("parent");
  env::set_current_dir(dir).expect("set dir");
  match cmd {
    Cmd::Help => show_help(),
    Cmd::Check => run_check(),
    Cmd::Ci => run_ci(),
    Cmd::Release => {
      release(&tag.expect("no --tag"));
      run_ci();
    }
  }
}
