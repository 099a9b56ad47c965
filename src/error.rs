use thiserror::Error;

/// Central error type for the docsend crate
#[derive(Error, Debug)]
pub enum DocSendError {
    // ============================================================================
    // Outcome Errors
    // ============================================================================
    #[error("No value. Only error: {0}")]
    InvalidState(String),

    // ============================================================================
    // Collaborator Errors
    // ============================================================================
    #[error("Unrecognized document: {0}")]
    UnrecognizedDocument(String),

    #[error("Failed to sign content: {0}")]
    SigningFailed(String),

    #[error("Signature verification failed: {0}")]
    VerificationFailed(String),

    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Builder pattern validation error
    #[error("Builder error: {0}")]
    BuilderError(String),

    // ============================================================================
    // Generic/System Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    GenericError(String),
}

impl From<DocSendError> for String {
    fn from(error: DocSendError) -> Self {
        error.to_string()
    }
}

impl From<base64::DecodeError> for DocSendError {
    fn from(err: base64::DecodeError) -> Self {
        DocSendError::UnrecognizedDocument(format!("Base64 decode error: {}", err))
    }
}

impl From<String> for DocSendError {
    fn from(err: String) -> Self {
        DocSendError::GenericError(err)
    }
}

impl From<&str> for DocSendError {
    fn from(err: &str) -> Self {
        DocSendError::GenericError(err.to_string())
    }
}

pub type DocSendResult<T> = Result<T, DocSendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_error_displays_bare_message() {
        let err: DocSendError = "network down".into();
        assert_eq!(err.to_string(), "network down");
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = DocSendError::SigningFailed("bad key".to_string());
        let s: String = err.into();
        assert_eq!(s, "Failed to sign content: bad key");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DocSendError = io_err.into();
        assert!(matches!(err, DocSendError::Io(_)));
    }

    #[test]
    fn test_invalid_state_carries_reason() {
        let err = DocSendError::InvalidState("Too old document".to_string());
        assert!(err.to_string().contains("Too old document"));
    }
}
