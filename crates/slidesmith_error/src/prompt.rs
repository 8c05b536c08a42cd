//! Prompt construction error types.

/// Specific error conditions for prompt building.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PromptErrorKind {
    /// The stage's prompt skeleton file is absent
    #[display("Prompt template missing: {}", _0)]
    TemplateMissing(String),
    /// Failed to read the prompt skeleton file
    #[display("Failed to read prompt file: {}", _0)]
    FileRead(String),
    /// The skeleton references a key absent from the substitution context
    #[display("Prompt skeleton references '{}' which is absent from context", _0)]
    MissingSubstitution(String),
}

/// Error type for prompt building operations.
///
/// # Examples
///
/// ```
/// use slidesmith_error::{PromptError, PromptErrorKind};
///
/// let err = PromptError::new(PromptErrorKind::MissingSubstitution("analysis".to_string()));
/// assert!(format!("{}", err).contains("analysis"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Prompt Error: {} at line {} in {}", kind, line, file)]
pub struct PromptError {
    /// The specific error condition
    pub kind: PromptErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PromptError {
    /// Create a new PromptError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PromptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
