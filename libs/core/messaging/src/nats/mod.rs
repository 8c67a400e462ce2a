//! NATS JetStream backend.
//!
//! Broker topology maps onto JetStream as follows:
//!
//! ```text
//! exchange     -> stream            (StreamConfig::STREAM_NAME)
//! routing key  -> subject           (StreamConfig::SUBJECT)
//! queue        -> durable consumer  (StreamConfig::CONSUMER_NAME, shared by all workers)
//! ```
//!
//! Delivery is at-least-once: a message that is not acked within
//! `ACK_WAIT_SECS`, or that is nak'd, comes back.

mod config;
mod consumer;
mod error;
mod health;
pub mod metrics;
mod producer;
mod stream;
mod worker;

pub use config::{StreamConfig, WorkerConfig};
pub use consumer::{NatsConsumer, NatsMessage};
pub use error::NatsError;
pub use health::{HealthServer, HealthState, HealthStatus};
pub use metrics::{init_metrics, NatsMetrics};
pub use producer::NatsProducer;
pub use stream::ensure_stream;
pub use worker::{Disposition, NatsWorker};
