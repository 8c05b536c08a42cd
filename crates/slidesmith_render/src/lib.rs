//! Marp CLI rendering backend for Slidesmith.
//!
//! A thin wrapper around the external `marp` command-line tool: it writes the
//! Markdown document (and optional stylesheet) to a working directory, runs
//! the converter, and reads the output bytes back. Malformed input and
//! process failures surface as [`RenderError`]s with the tool's stderr.
//!
//! [`RenderError`]: slidesmith_error::RenderError

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod marp;

pub use marp::{MarpRenderer, PreviewHandle};
