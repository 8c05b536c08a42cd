//! Multi-stage prompt-chain orchestrator for Slidesmith.
//!
//! This crate turns unstructured natural-language input into structured slide
//! content through a sequence of dependent LLM invocations:
//!
//! ```text
//! START → ANALYZE → COMPOSE → (per-unit GENERATE)* → ASSEMBLE → DONE
//! ```
//!
//! Each stage's raw response is recovered into a structured payload by the
//! extraction module, folded into the [`PipelineContext`], and used to build
//! the next stage's prompt. Unit-level failures are tolerated (the run
//! completes with the remaining units); analyze/compose failures are fatal.
//!
//! # Example
//!
//! ```rust,ignore
//! use slidesmith_pipeline::{PipelineExecutor, PromptBuilder};
//! use slidesmith_template::{TemplateRepository, UnitRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = TemplateRepository::new("templates");
//! let template = repo.get("basic_deck")?;
//!
//! let executor = PipelineExecutor::new(
//!     client,
//!     PromptBuilder::new("prompts", 8_000),
//!     UnitRegistry::with_builtins(),
//! );
//!
//! let run = executor.execute("Intro to X. Point A. Point B.", &template).await?;
//! println!("{}", run.document);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod executor;
mod extraction;
mod prompt;
mod substitute;

pub use assembler::{combine_units, fill_document};
pub use executor::PipelineExecutor;
pub use extraction::{extract, extract_json, parse_keyed_sections, strip_reasoning};
pub use prompt::PromptBuilder;
pub use substitute::{safe_substitute, substitute};

pub use slidesmith_core::PipelineContext;
