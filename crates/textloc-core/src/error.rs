//! Error types for textloc.

use thiserror::Error;

/// Main error type for textloc operations.
///
/// Pattern compilation and strategy evaluation never fail; these errors
/// belong to the input, configuration and document loading layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Locator expression rejected by validation
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Element not found by id
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Document structure cannot be indexed
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input or parameters (generic)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_error() {
        let err = Error::InvalidPath("[a] > b > [c]".to_string());
        assert_eq!(err.to_string(), "Invalid path: [a] > b > [c]");
    }

    #[test]
    fn test_element_not_found_error() {
        let err = Error::ElementNotFound("myId".to_string());
        assert_eq!(err.to_string(), "Element not found: myId");
    }

    #[test]
    fn test_invalid_document_error() {
        let err = Error::InvalidDocument("empty body".to_string());
        assert_eq!(err.to_string(), "Invalid document: empty body");
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config("unknown log level".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown log level");
    }

    #[test]
    fn test_invalid_input_error() {
        let err = Error::InvalidInput("missing expression".to_string());
        assert_eq!(err.to_string(), "Invalid input: missing expression");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_error_debug() {
        let err = Error::InvalidInput("test".to_string());
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("InvalidInput"));
    }
}
