//! Slidesmith - presentation generation through a multi-stage LLM prompt chain.
//!
//! Slidesmith turns a speaker script and a slide template into a finished
//! Markdown deck via a staged pipeline of LLM invocations, then hands the
//! result to an external renderer for PDF/HTML/PNG/PPTX conversion.
//!
//! # Pipeline
//!
//! ```text
//! START → ANALYZE → COMPOSE → (per-unit GENERATE)* → ASSEMBLE → DONE
//! ```
//!
//! - **ANALYZE** extracts theme and argument flow from the script
//! - **COMPOSE** plans the deck: an ordered unit selection for unit-based
//!   templates, or the full placeholder mapping for whole-document templates
//! - **GENERATE** produces parameters for each planned unit and invokes it;
//!   a failing unit is skipped, not fatal
//! - **ASSEMBLE** joins rendered units (or safe-substitutes the document)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use slidesmith::{
//!     OlmClient, PipelineExecutor, PromptBuilder, SlidesmithConfig,
//!     TemplateRepository, UnitRegistry,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     slidesmith::init_telemetry()?;
//!     let config = SlidesmithConfig::load()?;
//!
//!     let repo = TemplateRepository::new(config.templates_dir.clone());
//!     let template = repo.get("basic_deck")?;
//!
//!     let executor = PipelineExecutor::new(
//!         OlmClient::from_env(),
//!         PromptBuilder::new(config.prompt_dir.clone(), config.max_prompt_chars),
//!         UnitRegistry::with_builtins(),
//!     )
//!     .with_options(config.generation_options());
//!
//!     let run = executor.execute("Intro to X. Point A. Point B.", &template).await?;
//!     println!("{}", run.document);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Slidesmith is organized as a workspace with focused crates:
//!
//! - `slidesmith_error` - Error types
//! - `slidesmith_core` - Core data types (context, stages, progress, requirements)
//! - `slidesmith_interface` - Trait seams (client, units, renderer, progress)
//! - `slidesmith_template` - Template model, repository, introspection, registry
//! - `slidesmith_pipeline` - Extraction, prompt building, the stage executor
//! - `slidesmith_client` - Ollama-compatible HTTP generation client
//! - `slidesmith_render` - Marp CLI rendering backend
//!
//! This crate (`slidesmith`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod telemetry;

pub use config::SlidesmithConfig;
pub use telemetry::init_telemetry;

pub use slidesmith_core::{
    GenerationOptions, GenerationOptionsBuilder, ParamSpec, PipelineContext, ProgressEvent,
    RenderFormat, Stage, StageResult, TemplateRequirements, UnitSpec,
};
pub use slidesmith_error::{
    ClientError, ClientErrorKind, ConfigError, ExtractionError, ExtractionErrorKind, JsonError,
    PipelineError, PipelineErrorKind, PromptError, PromptErrorKind, RenderError, RenderErrorKind,
    SlidesmithError, SlidesmithErrorKind, SlidesmithResult, TemplateError, TemplateErrorKind,
};
pub use slidesmith_interface::{
    PipelineRun, ProgressSink, Renderer, SlideClient, SlideUnit, StageExecution,
    StreamingSlideClient, TemplateSource, TextStream,
};
pub use slidesmith_pipeline::{
    PipelineExecutor, PromptBuilder, combine_units, extract, extract_json, fill_document,
    parse_keyed_sections, safe_substitute, strip_reasoning, substitute,
};
pub use slidesmith_template::{
    SlideTemplate, StaticUnit, TemplateConfig, TemplateRepository, UnitRegistry,
    basic_deck_units, extract_placeholders, inspect, parse_unit_doc,
};

pub use slidesmith_client::OlmClient;
pub use slidesmith_render::{MarpRenderer, PreviewHandle};
