//! Renderer error types.

/// Specific error conditions for document rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RenderErrorKind {
    /// Failed to write or read a working file
    #[display("Render I/O failed: {}", _0)]
    Io(String),
    /// The renderer process exited abnormally
    #[display("Renderer process failed: {}", _0)]
    ProcessFailed(String),
    /// The renderer reported success but produced no output file
    #[display("Renderer produced no output: {}", _0)]
    MissingOutput(String),
}

/// Error type for rendering operations.
///
/// # Examples
///
/// ```
/// use slidesmith_error::{RenderError, RenderErrorKind};
///
/// let err = RenderError::new(RenderErrorKind::ProcessFailed("exit code 1".to_string()));
/// assert!(format!("{}", err).contains("exit code 1"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The specific error condition
    pub kind: RenderErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RenderError {
    /// Create a new RenderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
