//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// A collaborator (view, window, engine) has not been resolved yet
    #[error("Collaborator not resolved: {0}")]
    Unresolved(String),

    /// A native call through JNI failed
    #[error("JNI call failed: {0}")]
    Jni(String),

    /// Script evaluation in the content engine failed
    #[error("Script evaluation failed: {0}")]
    ScriptEval(String),

    /// Platform not supported on this OS
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

impl PlatformError {
    /// A collaborator that has not been provided yet
    pub fn unresolved(what: impl Into<String>) -> Self {
        Self::Unresolved(what.into())
    }
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_message() {
        let err = PlatformError::unresolved("content container");
        assert!(matches!(err, PlatformError::Unresolved(ref what) if what == "content container"));
        assert_eq!(err.to_string(), "Collaborator not resolved: content container");
    }
}
