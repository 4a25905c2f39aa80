//! Running deeply recursive work on a thread with a stack sized for it.
//!
//! A spawned thread gets a 2 MiB stack by default, and recursive descent over a deeply nested tree
//! can run out of that long before any sensible depth limit is reached. [`run`] instead sizes the
//! stack from how many levels deep the work may recurse.

use std::{io, panic, thread};

/// The stack reserved for each level of recursion.
pub const BYTES_PER_LEVEL: usize = 128 * 1024;

/// The stack reserved no matter the depth.
const BASE_BYTES: usize = 4 * 1024 * 1024;

/// Returns the stack size for recursing at most `levels` deep.
#[must_use]
pub fn size(levels: usize) -> usize {
  levels.saturating_mul(BYTES_PER_LEVEL).saturating_add(BASE_BYTES)
}

/// Runs `f` on a new thread with enough stack to recurse `levels` deep, and waits for it.
///
/// If `f` panics, the panic is resumed on the calling thread.
///
/// # Errors
///
/// If the thread could not be spawned, e.g. because its stack could not be allocated.
pub fn run<F, T>(levels: usize, f: F) -> io::Result<T>
where
  F: FnOnce() -> T + Send,
  T: Send,
{
  thread::scope(|s| {
    let handle = thread::Builder::new().stack_size(size(levels)).spawn_scoped(s, f)?;
    match handle.join() {
      Ok(x) => Ok(x),
      Err(e) => panic::resume_unwind(e),
    }
  })
}
