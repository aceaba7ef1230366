#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions
)]

//! # linecursor
//!
//! A stateful cursor over immutable text.
//!
//! linecursor is meant for formatters, linters and small parsers that walk
//! source text character by character and line by line, then cut out
//! well-defined substrings:
//! - Single-step and whole-line motion
//! - Semantic (indent-skipping) and hard line starts
//! - Character search bounded to the current line
//! - Regular and whole-line selections that follow the cursor
//!
//! ## Failure policy
//!
//! Every fallible motion is computed by a pure function first and only
//! committed on success. A [`cursor::Mode::Lax`] cursor reports failure as
//! `Ok(false)`; a [`cursor::Mode::Strict`] cursor returns a labeled
//! [`cursor::NavError`]. Either way the cursor is left exactly where it was.
//!
//! ## Modules
//!
//! - [`cursor`]: Buffer, cursor, selection and the pure scan functions
//! - [`config`]: Flag-file defaults for the command-line driver
//! - [`demo`]: The walkthrough the driver runs

pub mod config;
pub mod cursor;
pub mod demo;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cursor::{Buffer, Cursor, Mode, NavError, SelectionMode};
}
