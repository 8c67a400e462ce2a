use crate::nats::config::WorkerConfig;
use crate::nats::error::NatsError;
use crate::nats::stream::ensure_stream;
use crate::Job;
use async_nats::jetstream::consumer::pull::Config as PullConfig;
use async_nats::jetstream::consumer::{AckPolicy, Consumer};
use async_nats::jetstream::{AckKind, Context};
use futures::StreamExt;
use tracing::{debug, info, warn};

/// Pull consumer bound to one durable name.
pub struct NatsConsumer {
    consumer: Consumer<PullConfig>,
    config: WorkerConfig,
}

impl NatsConsumer {
    /// Ensure the stream and the durable consumer exist, then bind to it.
    pub async fn bind(jetstream: &Context, config: WorkerConfig) -> Result<Self, NatsError> {
        ensure_stream(jetstream, &config.stream_name, &config.subject).await?;

        let stream = jetstream
            .get_stream(&config.stream_name)
            .await
            .map_err(NatsError::from_jetstream_error)?;

        let consumer = stream
            .get_or_create_consumer(
                &config.durable_name,
                PullConfig {
                    durable_name: Some(config.durable_name.clone()),
                    ack_policy: AckPolicy::Explicit,
                    ack_wait: config.ack_wait,
                    max_deliver: config.max_deliver,
                    filter_subject: config.subject.clone(),
                    ..Default::default()
                },
            )
            .await
            .map_err(NatsError::from_jetstream_error)?;

        info!(
            stream = %config.stream_name,
            consumer = %config.durable_name,
            subject = %config.subject,
            "Bound to durable consumer"
        );

        Ok(Self { consumer, config })
    }

    /// Pull up to `batch_size` messages, waiting at most `fetch_timeout`.
    ///
    /// Payloads that do not decode as `J` are acked and dropped; redelivering
    /// them could never succeed.
    pub async fn fetch<J: Job>(&self) -> Result<Vec<NatsMessage<J>>, NatsError> {
        let mut batch = self
            .consumer
            .fetch()
            .max_messages(self.config.batch_size)
            .expires(self.config.fetch_timeout)
            .messages()
            .await
            .map_err(NatsError::from_jetstream_error)?;

        let mut messages = Vec::new();

        while let Some(next) = batch.next().await {
            let message = match next {
                Ok(message) => message,
                Err(e) => {
                    warn!(error = %e, "Error receiving message");
                    continue;
                }
            };

            let (sequence, delivery_count) = match message.info() {
                Ok(info) => (info.stream_sequence, info.delivered.max(1) as u64),
                Err(e) => {
                    warn!(error = %e, "Message has no JetStream metadata");
                    (0, 1)
                }
            };

            match serde_json::from_slice::<J>(&message.payload) {
                Ok(job) => messages.push(NatsMessage {
                    job,
                    message,
                    sequence,
                    delivery_count,
                }),
                Err(e) => {
                    warn!(
                        error = %e,
                        sequence,
                        subject = %message.subject,
                        "Dropping undecodable message"
                    );
                    if let Err(ack_err) = message.ack().await {
                        warn!(error = %ack_err, sequence, "Failed to ack undecodable message");
                    }
                }
            }
        }

        debug!(count = messages.len(), "Fetched batch");
        Ok(messages)
    }
}

/// A decoded delivery together with the handle needed to settle it.
pub struct NatsMessage<J: Job> {
    pub job: J,
    message: async_nats::jetstream::Message,
    pub sequence: u64,
    /// 1 on first delivery
    pub delivery_count: u64,
}

impl<J: Job> NatsMessage<J> {
    pub fn job_id(&self) -> String {
        self.job.job_id()
    }

    pub fn is_redelivery(&self) -> bool {
        self.delivery_count > 1
    }

    pub async fn ack(self) -> Result<(), NatsError> {
        self.message.ack().await.map_err(NatsError::consumer_error)
    }

    /// Restart the broker's ack-wait timer without settling the message.
    pub async fn in_progress(&self) -> Result<(), NatsError> {
        self.message
            .ack_with(AckKind::Progress)
            .await
            .map_err(NatsError::consumer_error)
    }

    /// Hand the message back for immediate redelivery.
    pub async fn nak(self) -> Result<(), NatsError> {
        self.settle(AckKind::Nak(None)).await
    }

    /// Stop redelivery of this message.
    pub async fn term(self) -> Result<(), NatsError> {
        self.settle(AckKind::Term).await
    }

    async fn settle(self, kind: AckKind) -> Result<(), NatsError> {
        self.message
            .ack_with(kind)
            .await
            .map_err(NatsError::consumer_error)
    }
}
