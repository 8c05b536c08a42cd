//! Top-level error wrapper types.

use crate::{
    ClientError, ConfigError, ExtractionError, JsonError, PipelineError, PromptError, RenderError,
    TemplateError,
};

/// This is the foundation error enum. Each Slidesmith crate contributes the
/// variant covering its own failure domain.
///
/// # Examples
///
/// ```
/// use slidesmith_error::{SlidesmithError, ClientError, ClientErrorKind};
///
/// let client_err = ClientError::new(ClientErrorKind::Connection("refused".to_string()));
/// let err: SlidesmithError = client_err.into();
/// assert!(format!("{}", err).contains("Client Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SlidesmithErrorKind {
    /// Structured-payload extraction error
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Template error
    #[from(TemplateError)]
    Template(TemplateError),
    /// Prompt construction error
    #[from(PromptError)]
    Prompt(PromptError),
    /// Pipeline orchestration error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Generation client error
    #[from(ClientError)]
    Client(ClientError),
    /// Renderer error
    #[from(RenderError)]
    Render(RenderError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Slidesmith error with kind discrimination.
///
/// # Examples
///
/// ```
/// use slidesmith_error::{SlidesmithResult, ConfigError};
///
/// fn might_fail() -> SlidesmithResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Slidesmith Error: {}", _0)]
pub struct SlidesmithError(Box<SlidesmithErrorKind>);

impl SlidesmithError {
    /// Create a new error from a kind.
    pub fn new(kind: SlidesmithErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SlidesmithErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to SlidesmithErrorKind
impl<T> From<T> for SlidesmithError
where
    T: Into<SlidesmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Slidesmith operations.
///
/// # Examples
///
/// ```
/// use slidesmith_error::{SlidesmithResult, JsonError};
///
/// fn parse_payload() -> SlidesmithResult<String> {
///     Err(JsonError::new("trailing characters"))?
/// }
/// ```
pub type SlidesmithResult<T> = std::result::Result<T, SlidesmithError>;
