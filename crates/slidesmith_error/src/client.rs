//! LLM transport client error types.

/// Specific error conditions for the generation client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ClientErrorKind {
    /// Could not reach the generation endpoint
    #[display("Connection failed: {}", _0)]
    Connection(String),
    /// The requested model is unknown to the backend
    #[display("Invalid model: {}", _0)]
    InvalidModel(String),
    /// The backend returned an error response
    #[display("API error: {}", _0)]
    Api(String),
    /// A streaming response terminated abnormally
    #[display("Stream error: {}", _0)]
    Stream(String),
}

/// Error type for generation client operations.
///
/// # Examples
///
/// ```
/// use slidesmith_error::{ClientError, ClientErrorKind};
///
/// let err = ClientError::new(ClientErrorKind::InvalidModel("qwen3:0.6b".to_string()));
/// assert!(format!("{}", err).contains("qwen3"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Client Error: {} at line {} in {}", kind, line, file)]
pub struct ClientError {
    /// The specific error condition
    pub kind: ClientErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ClientError {
    /// Create a new ClientError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ClientErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
