use std::fmt;
use thiserror::Error;

/// How the backend should treat a delivery whose processing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Infrastructure hiccup; the message is handed back for redelivery
    Transient,
    /// Retrying cannot help; the message is dropped
    Permanent,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Transient => write!(f, "transient"),
            ErrorCategory::Permanent => write!(f, "permanent"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("transient error: {message}")]
    Transient {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("permanent error: {message}")]
    Permanent {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProcessingError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
            source: None,
        }
    }

    pub fn transient_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transient {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self::Permanent {
            message: message.into(),
            source: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ProcessingError::Transient { .. } => ErrorCategory::Transient,
            ProcessingError::Permanent { .. } | ProcessingError::Serialization(_) => {
                ErrorCategory::Permanent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_categories() {
        assert_eq!(
            ProcessingError::transient("db down").category(),
            ErrorCategory::Transient
        );
        assert_eq!(
            ProcessingError::permanent("bad payload").category(),
            ErrorCategory::Permanent
        );

        let bad_json = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(
            ProcessingError::from(bad_json).category(),
            ErrorCategory::Permanent
        );
    }

    #[test]
    fn test_transient_with_source_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = ProcessingError::transient_with_source("insert failed", io);

        assert_eq!(err.to_string(), "transient error: insert failed");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Transient.to_string(), "transient");
        assert_eq!(ErrorCategory::Permanent.to_string(), "permanent");
    }
}
