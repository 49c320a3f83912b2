//! Error handling for LoField
//!
//! The composition engine itself never fails on documented input; these
//! errors come from the editor-side helpers, configuration and the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for LoField operations
pub type Result<T> = std::result::Result<T, LoFieldError>;

/// Main error type for LoField operations
#[derive(Error, Debug)]
pub enum LoFieldError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Layer Errors
    #[error("Layer not found: {id}")]
    LayerNotFound { id: String },

    #[error("Layer operation failed: {reason}")]
    LayerError { reason: String },

    // Tweak Errors
    #[error("Corrupt TWEAKS metadata: {reason}")]
    CorruptTweaks { reason: String },

    // Share Errors
    #[error("Invalid share token: {token:?}")]
    InvalidShareToken { token: String },

    // Configuration Errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LoFieldError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            LoFieldError::FileNotFound { .. } => "FILE_NOT_FOUND",
            LoFieldError::FileReadError { .. } => "FILE_READ_ERROR",
            LoFieldError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            LoFieldError::LayerNotFound { .. } => "LAYER_NOT_FOUND",
            LoFieldError::LayerError { .. } => "LAYER_ERROR",
            LoFieldError::CorruptTweaks { .. } => "CORRUPT_TWEAKS",
            LoFieldError::InvalidShareToken { .. } => "INVALID_SHARE_TOKEN",
            LoFieldError::InvalidConfig { .. } => "INVALID_CONFIG",
            LoFieldError::Io(_) => "IO_ERROR",
            LoFieldError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LoFieldError::FileNotFound { .. }
                | LoFieldError::LayerNotFound { .. }
                | LoFieldError::CorruptTweaks { .. }
                | LoFieldError::InvalidShareToken { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            LoFieldError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            LoFieldError::LayerNotFound { .. } => vec![
                "The layer may have been removed in another edit",
                "Reload the layer list and try again",
            ],
            LoFieldError::LayerError { .. } => vec![
                "A composition must keep at least one layer",
                "Add a new layer before removing this one",
            ],
            LoFieldError::CorruptTweaks { .. } => vec![
                "The TWEAKS comment at the top of the code was edited by hand",
                "Re-apply the tweaks to regenerate the comment",
                "Delete the TWEAKS line to fall back to defaults",
            ],
            LoFieldError::InvalidShareToken { .. } => vec![
                "Share tokens are 8-64 letters and digits",
                "Copy the full share link and try again",
            ],
            LoFieldError::InvalidConfig { .. } => vec![
                "Check the configuration file against the documented fields",
                "Remove the file to use built-in defaults",
            ],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = LoFieldError::LayerNotFound {
            id: "abc".to_string(),
        };
        assert_eq!(err.error_code(), "LAYER_NOT_FOUND");
        assert_eq!(err.to_string(), "Layer not found: abc");
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = LoFieldError::CorruptTweaks {
            reason: "not json".to_string(),
        };
        assert!(!err.recovery_suggestions().is_empty());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_errors_not_recoverable() {
        let err = LoFieldError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(!err.is_recoverable());
        assert!(err.recovery_suggestions().is_empty());
    }
}
