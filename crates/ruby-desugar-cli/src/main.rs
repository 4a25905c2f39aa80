//! A CLI for lowering parse tree dumps.

use rayon::prelude::*;
use std::fmt::Write as _;
use std::process::ExitCode;

fn main() -> ExitCode {
  let args = match get_args() {
    Err(e) => {
      println!("error parsing args: {e}");
      return ExitCode::FAILURE;
    }
    Ok(None) => return ExitCode::SUCCESS,
    Ok(Some(x)) => x,
  };
  let quiet = args.quiet;
  let n = run(&args);
  if n == 0 {
    if !quiet {
      println!("no errors!");
    }
    ExitCode::SUCCESS
  } else {
    if !quiet {
      let s = if n == 1 { "" } else { "s" };
      println!("{n} error{s}");
    }
    ExitCode::FAILURE
  }
}

struct Args {
  quiet: bool,
  verify: bool,
  max_depth: usize,
  files: Vec<std::ffi::OsString>,
}

fn get_args() -> Result<Option<Args>, pico_args::Error> {
  env_logger::init();
  let mut args = pico_args::Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    println!("usage:");
    println!("  ruby-desugar [<option>...] <file>...");
    println!();
    println!("each <file> is a parse tree dumped as an s-expression.");
    println!();
    println!("options:");
    println!("  -h, --help");
    println!("    show this help");
    println!("  -q, --quiet");
    println!("    emit no output");
    println!("  --no-verify");
    println!("    do not check the structure of the output");
    println!("  --max-depth <n>");
    println!("    how deeply the tree may nest");
    println!("    defaults to {}", ruby_desugar::Cx::DEFAULT_MAX_DEPTH);
    println!();
    return Ok(None);
  }
  let quiet = args.contains(["-q", "--quiet"]);
  let verify = !args.contains("--no-verify");
  let max_depth: Option<usize> = args.opt_value_from_str("--max-depth")?;
  let max_depth = max_depth.unwrap_or(ruby_desugar::Cx::DEFAULT_MAX_DEPTH);
  let files = args.finish();
  Ok(Some(Args { quiet, verify, max_depth, files }))
}

/// The printed output for one file, and how many errors there were.
struct Report {
  out: String,
  errors: usize,
}

fn run(args: &Args) -> usize {
  // printing and verifying the output recurse as deeply as lowering does.
  let pool = rayon::ThreadPoolBuilder::new().stack_size(big_stack::size(args.max_depth)).build();
  let pool = match pool {
    Ok(x) => x,
    Err(e) => {
      println!("couldn't start threads: {e}");
      return 1;
    }
  };
  let reports: Vec<Report> =
    pool.install(|| args.files.par_iter().map(|file| one(args, file)).collect());
  let mut ret = 0usize;
  for report in reports {
    if !args.quiet {
      print!("{}", report.out);
    }
    ret += report.errors;
  }
  ret
}

fn one(args: &Args, file: &std::ffi::OsStr) -> Report {
  let mut out = String::new();
  let Some(path) = file.to_str() else {
    _ = writeln!(out, "{}: not valid UTF-8", file.to_string_lossy());
    return Report { out, errors: 1 };
  };
  let contents = match std::fs::read_to_string(path) {
    Ok(x) => x,
    Err(e) => {
      _ = writeln!(out, "{path}: couldn't read path: {e}");
      return Report { out, errors: 1 };
    }
  };
  let pos_db = text_pos::PositionDb::new(&contents);
  let at = |range: text_size::TextRange| match pos_db.range_utf16(range) {
    Some(r) => format!("{path}:{}:{}", r.start.line + 1, r.start.col + 1),
    None => path.to_owned(),
  };
  let mut names = ruby_name::NameArena::default();
  let root = match ruby_parse_tree::sexp::get(&contents, &mut names) {
    Ok(x) => x,
    Err(e) => {
      _ = writeln!(out, "{}: {e}", at(e.range()));
      return Report { out, errors: 1 };
    }
  };
  let cx = ruby_desugar::Cx { pos_db: &pos_db, file_name: Some(path), max_depth: args.max_depth };
  let desugar = match ruby_desugar::get(cx, &mut names, root) {
    Ok(x) => x,
    Err(abort) => {
      for e in &abort.errors {
        _ = writeln!(out, "{}: error[{}]: {e}", at(e.range()), e.code());
      }
      return Report { out, errors: abort.errors.len() };
    }
  };
  log::debug!("{path}: lowered");
  let mut errors = desugar.errors.len();
  let tree = ruby_core_ast::display::expr(desugar.top, &desugar.arenas.expr, &names);
  _ = writeln!(out, "{tree}");
  for e in &desugar.errors {
    _ = writeln!(out, "{}: error[{}]: {e}", at(e.range()), e.code());
  }
  if args.verify {
    for e in ruby_core_ast::verify::get(&desugar.arenas, desugar.top) {
      let range = desugar.arenas.loc(e.expr());
      _ = writeln!(out, "{}: invalid output: {e}", at(range));
      errors += 1;
    }
  }
  Report { out, errors }
}
