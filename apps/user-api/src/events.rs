//! JetStream-backed publisher for user events.

use async_trait::async_trait;
use domain_users::{UserError, UserEventPublisher, UserResult};
use email::{NotificationMessage, UserCreatedStream};
use messaging::nats::NatsProducer;
use tracing::debug;

/// Publishes welcome notifications to the `user_created` stream.
#[derive(Clone)]
pub struct NatsEventPublisher {
    producer: NatsProducer,
}

impl NatsEventPublisher {
    pub fn new(jetstream: async_nats::jetstream::Context) -> Self {
        Self {
            producer: NatsProducer::from_stream_config::<UserCreatedStream>(jetstream),
        }
    }

    /// Create the stream if the worker has not done so yet.
    pub async fn ensure_stream(&self) -> UserResult<()> {
        self.producer
            .ensure_stream()
            .await
            .map_err(|e| UserError::Publish(e.to_string()))
    }
}

#[async_trait]
impl UserEventPublisher for NatsEventPublisher {
    async fn publish(&self, message: &NotificationMessage) -> UserResult<()> {
        let sequence = self
            .producer
            .send(message)
            .await
            .map_err(|e| UserError::Publish(e.to_string()))?;

        debug!(
            subject = self.producer.subject(),
            sequence,
            user_id = %message.user_id,
            "Notification published"
        );
        Ok(())
    }
}
