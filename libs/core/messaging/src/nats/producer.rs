use crate::nats::config::StreamConfig;
use crate::nats::error::NatsError;
use crate::nats::stream::ensure_stream;
use crate::Job;
use async_nats::jetstream::Context;
use tracing::debug;

/// Publishes jobs to one subject and waits for the broker's ack.
#[derive(Clone)]
pub struct NatsProducer {
    jetstream: Context,
    stream_name: String,
    subject: String,
}

impl NatsProducer {
    pub fn new(jetstream: Context, stream_name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            jetstream,
            stream_name: stream_name.into(),
            subject: subject.into(),
        }
    }

    pub fn from_stream_config<S: StreamConfig>(jetstream: Context) -> Self {
        Self::new(jetstream, S::STREAM_NAME, S::SUBJECT)
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Create the target stream if it is missing.
    ///
    /// Publishing to a subject no stream captures fails with "no responders".
    pub async fn ensure_stream(&self) -> Result<(), NatsError> {
        ensure_stream(&self.jetstream, &self.stream_name, &self.subject).await
    }

    /// Serialize `job` as JSON, publish it and return the stream sequence.
    pub async fn send<J: Job>(&self, job: &J) -> Result<u64, NatsError> {
        let payload = serde_json::to_vec(job)?;

        let ack = self
            .jetstream
            .publish(self.subject.clone(), payload.into())
            .await
            .map_err(NatsError::publish_error)?
            .await
            .map_err(NatsError::publish_error)?;

        debug!(
            stream = %self.stream_name,
            subject = %self.subject,
            sequence = ack.sequence,
            job_id = %job.job_id(),
            "Published job"
        );

        Ok(ack.sequence)
    }
}
