//! Core data types for the Slidesmith presentation pipeline.
//!
//! This crate provides the foundation data types shared across the Slidesmith
//! workspace: the pipeline context accumulator, stage identifiers and results,
//! progress events, template requirements, and render formats.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod format;
mod options;
mod progress;
mod requirements;
mod stage;

pub use context::PipelineContext;
pub use format::RenderFormat;
pub use options::{GenerationOptions, GenerationOptionsBuilder};
pub use progress::ProgressEvent;
pub use requirements::{ParamSpec, TemplateRequirements, UnitSpec};
pub use stage::{Stage, StageResult};
