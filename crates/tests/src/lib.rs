//! End-to-end tests.

#![cfg(test)]
#![allow(clippy::disallowed_methods, clippy::needless_raw_string_hashes)]

mod assign;
mod call;
mod check;
mod control;
mod definition;
mod error;
mod literal;
mod misc;
