//! Pipeline orchestration error types.

/// Specific error conditions for pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// A fatal stage failure (analyze/compose, or extraction with no fallback)
    #[display("Stage '{}' failed: {}", stage, message)]
    StageFailed {
        /// Name of the failing stage
        stage: String,
        /// Underlying cause
        message: String,
    },
    /// The composition plan named no usable units
    #[display("Composition plan contains no usable units")]
    EmptyPlan,
    /// The wall-clock budget for the run expired
    #[display("Pipeline run exceeded its deadline of {}ms", _0)]
    Timeout(u64),
}

/// Error type for pipeline operations.
///
/// Fatal-to-run failures carry the originating stage name so the caller can
/// log them meaningfully and present a fallback document.
///
/// # Examples
///
/// ```
/// use slidesmith_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::StageFailed {
///     stage: "analyze".to_string(),
///     message: "connection refused".to_string(),
/// });
/// assert!(format!("{}", err).contains("analyze"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a fatal stage failure for the named stage.
    #[track_caller]
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(PipelineErrorKind::StageFailed {
            stage: stage.into(),
            message: message.into(),
        })
    }
}
