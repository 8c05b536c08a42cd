//! Error types for the Slidesmith library.
//!
//! This crate provides the foundation error types used throughout the Slidesmith workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use slidesmith_error::{SlidesmithResult, ClientError, ClientErrorKind};
//!
//! fn fetch_response() -> SlidesmithResult<String> {
//!     Err(ClientError::new(ClientErrorKind::Connection("refused".to_string())))?
//! }
//!
//! match fetch_response() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod extraction;
mod json;
mod pipeline;
mod prompt;
mod render;
mod template;

pub use client::{ClientError, ClientErrorKind};
pub use config::ConfigError;
pub use error::{SlidesmithError, SlidesmithErrorKind, SlidesmithResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use prompt::{PromptError, PromptErrorKind};
pub use render::{RenderError, RenderErrorKind};
pub use template::{TemplateError, TemplateErrorKind};
