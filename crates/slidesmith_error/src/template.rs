//! Template error types.

/// Specific error conditions for template operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TemplateErrorKind {
    /// Template backing source could not be located
    #[display("Template not found: {}", _0)]
    NotFound(String),
    /// Failed to read a template file
    #[display("Failed to read template file: {}", _0)]
    FileRead(String),
    /// Failed to parse template configuration
    #[display("Failed to parse template config: {}", _0)]
    ConfigParse(String),
    /// Unit named in a composition plan is not registered for the template
    #[display("Unit '{}' is not registered for this template", _0)]
    UnknownUnit(String),
    /// Unit invocation failed
    #[display("Unit '{}' failed: {}", unit, message)]
    UnitInvocation {
        /// Unit name
        unit: String,
        /// Error message
        message: String,
    },
    /// A required unit parameter is missing
    #[display("Unit '{}' is missing required parameter '{}'", unit, parameter)]
    MissingParameter {
        /// Unit name
        unit: String,
        /// Parameter name
        parameter: String,
    },
    /// A unit parameter has the wrong shape (e.g., list expected)
    #[display("Unit '{}' parameter '{}' has invalid type", unit, parameter)]
    InvalidParameter {
        /// Unit name
        unit: String,
        /// Parameter name
        parameter: String,
    },
}

/// Error type for template operations.
///
/// # Examples
///
/// ```
/// use slidesmith_error::{TemplateError, TemplateErrorKind};
///
/// let err = TemplateError::new(TemplateErrorKind::NotFound("basic_deck".to_string()));
/// assert!(format!("{}", err).contains("basic_deck"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Template Error: {} at line {} in {}", kind, line, file)]
pub struct TemplateError {
    /// The specific error condition
    pub kind: TemplateErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl TemplateError {
    /// Create a new TemplateError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TemplateErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
