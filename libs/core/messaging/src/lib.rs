//! Queue-agnostic job processing.
//!
//! A [`Job`] is a JSON payload carried by the bus; a [`Processor`] handles one
//! job and reports failures as a [`ProcessingError`] whose category decides
//! what the backend does with the delivery. The `nats` feature provides the
//! JetStream producer, consumer and worker loop.
//!
//! ```ignore
//! use messaging::nats::{NatsWorker, WorkerConfig};
//!
//! let worker = NatsWorker::new(jetstream, processor, WorkerConfig::from_stream::<MyStream>()).await?;
//! worker.run(shutdown_rx).await?;
//! ```

mod error;
mod job;
mod processor;

#[cfg(feature = "nats")]
pub mod nats;

pub use error::{ErrorCategory, ProcessingError};
pub use job::Job;
pub use processor::{FailingProcessor, NoOpProcessor, Processor};
