//! Response extraction error types.

/// Specific error conditions for structured-payload extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// No parseable payload found in the response text
    #[display("No structured payload found in response (prefix: {})", _0)]
    NoPayload(String),
    /// A candidate span was found but failed to parse
    #[display("Candidate payload failed to parse: {}", _0)]
    Parse(String),
}

/// Error type for extraction operations.
///
/// Carries a truncated prefix of the offending response text so failures
/// can be logged meaningfully without dumping entire LLM responses.
///
/// # Examples
///
/// ```
/// use slidesmith_error::{ExtractionError, ExtractionErrorKind};
///
/// let err = ExtractionError::new(ExtractionErrorKind::NoPayload("just prose".to_string()));
/// assert!(format!("{}", err).contains("just prose"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The specific error condition
    pub kind: ExtractionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new ExtractionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
