use thiserror::Error;

#[derive(Debug, Error)]
pub enum NatsError {
    #[error("NATS connection error: {0}")]
    Connection(#[from] async_nats::ConnectError),

    #[error("JetStream error: {0}")]
    JetStream(String),

    #[error("Consumer error: {0}")]
    Consumer(String),

    #[error("Publish error: {0}")]
    Publish(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NatsError {
    pub fn from_jetstream_error(error: impl std::fmt::Display) -> Self {
        Self::JetStream(error.to_string())
    }

    pub fn publish_error(error: impl std::fmt::Display) -> Self {
        Self::Publish(error.to_string())
    }

    pub fn consumer_error(error: impl std::fmt::Display) -> Self {
        Self::Consumer(error.to_string())
    }
}
