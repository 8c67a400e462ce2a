use thiserror::Error;

/// Failures the email service reports to its caller.
///
/// Transport failures never appear here: they are stored as FAILED records.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Database error: {0}")]
    Database(String),
}

pub type EmailResult<T> = Result<T, EmailError>;
