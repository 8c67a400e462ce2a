use crate::error::ProcessingError;
use crate::job::Job;
use async_trait::async_trait;

/// Handles one job at a time.
///
/// Return `Ok(())` once the job is done (including when a downstream failure
/// was recorded rather than propagated). A [`ProcessingError::Transient`]
/// asks the backend to redeliver, a permanent one drops the message.
#[async_trait]
pub trait Processor<J: Job>: Send + Sync {
    async fn process(&self, job: &J) -> Result<(), ProcessingError>;

    /// Used for logging and metrics labels.
    fn name(&self) -> &'static str;

    /// Backs the worker's readiness probe.
    async fn health_check(&self) -> Result<bool, ProcessingError> {
        Ok(true)
    }
}

/// Accepts every job.
#[derive(Debug, Clone, Default)]
pub struct NoOpProcessor;

#[async_trait]
impl<J: Job> Processor<J> for NoOpProcessor {
    async fn process(&self, _job: &J) -> Result<(), ProcessingError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop_processor"
    }
}

/// Fails every job with a fixed category.
#[derive(Debug, Clone)]
pub struct FailingProcessor {
    error_message: String,
    transient: bool,
}

impl FailingProcessor {
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
            transient: true,
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
            transient: false,
        }
    }
}

#[async_trait]
impl<J: Job> Processor<J> for FailingProcessor {
    async fn process(&self, _job: &J) -> Result<(), ProcessingError> {
        if self.transient {
            Err(ProcessingError::transient(&self.error_message))
        } else {
            Err(ProcessingError::permanent(&self.error_message))
        }
    }

    fn name(&self) -> &'static str {
        "failing_processor"
    }
}
