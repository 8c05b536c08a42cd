//! Trait definitions for generation backends and their collaborators.

use async_trait::async_trait;
use futures_util::stream::Stream;
use serde_json::{Map, Value as JsonValue};
use slidesmith_core::{RenderFormat, UnitSpec};
use slidesmith_error::SlidesmithResult;
use std::pin::Pin;

/// A lazy sequence of response text chunks from a streaming backend.
pub type TextStream = Pin<Box<dyn Stream<Item = SlidesmithResult<String>> + Send>>;

/// Core trait that all generation clients must implement.
///
/// This provides the minimal interface for synchronous text generation.
/// Streaming is exposed through an optional trait.
#[async_trait]
pub trait SlideClient: Send + Sync {
    /// Generate a single batch response for the given prompt.
    ///
    /// Connection failures and invalid-model errors propagate as fatal errors
    /// for the stage that issued the call.
    async fn generate_batch(&self, prompt: &str, model: &str) -> SlidesmithResult<String>;

    /// Provider name (e.g., "ollama", "mock").
    fn provider_name(&self) -> &'static str;
}

/// Trait for clients that support streaming responses.
///
/// Streams are incremental and not restartable; the orchestrator itself only
/// uses batch mode, streaming exists for callers that want incremental
/// display.
#[async_trait]
pub trait StreamingSlideClient: SlideClient {
    /// Generate a streaming response, yielding text chunks as they arrive.
    async fn generate_stream(&self, prompt: &str, model: &str) -> SlidesmithResult<TextStream>;
}

/// Read-only access to a template's backing source.
pub trait TemplateSource {
    /// Identifier of the template (directory name).
    fn template_id(&self) -> &str;

    /// Read the template document text.
    ///
    /// Fails if the backing file is missing.
    fn read_document_text(&self) -> SlidesmithResult<String>;

    /// Read the optional stylesheet text.
    fn read_stylesheet_text(&self) -> Option<String>;

    /// Intended presentation length in minutes.
    fn duration_minutes(&self) -> u32 {
        10
    }
}

/// Capability to produce slide unit text given named parameters.
///
/// Units are registered statically per template identifier; the registry
/// replaces the dynamic module import the workflow would otherwise need.
pub trait SlideUnit: Send + Sync {
    /// Introspected description of this unit.
    fn spec(&self) -> &UnitSpec;

    /// Render the unit with the given keyword parameters.
    ///
    /// Parameters are pre-filtered to declared names by the orchestrator;
    /// the unit applies its own defaults for absent optional parameters.
    fn render(&self, params: &Map<String, JsonValue>) -> SlidesmithResult<String>;
}

/// Boundary trait for the external document renderer.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Convert a Markdown document (plus optional stylesheet) into the target
    /// format, returning the output bytes.
    async fn render(
        &self,
        markdown: &str,
        stylesheet: Option<&str>,
        format: RenderFormat,
    ) -> SlidesmithResult<Vec<u8>>;
}
