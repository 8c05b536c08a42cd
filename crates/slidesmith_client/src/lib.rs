//! Ollama-compatible generation client for Slidesmith.
//!
//! This crate provides the HTTP transport behind the [`SlideClient`] seam:
//! a thin wrapper over an Ollama-style `/api/generate` endpoint supporting
//! batch and NDJSON streaming responses.
//!
//! [`SlideClient`]: slidesmith_interface::SlideClient

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod olm;

pub use olm::OlmClient;
