use crate::nats::config::WorkerConfig;
use crate::nats::consumer::{NatsConsumer, NatsMessage};
use crate::nats::error::NatsError;
use crate::nats::health::HealthState;
use crate::nats::metrics::NatsMetrics;
use crate::{ErrorCategory, Job, ProcessingError, Processor};
use async_nats::jetstream::Context;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// What happens to a delivery once the processor has returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Ack,
    /// Immediate redelivery
    Nak,
    Term,
}

impl Disposition {
    pub fn for_result(result: &Result<(), ProcessingError>) -> Self {
        match result {
            Ok(()) => Disposition::Ack,
            Err(e) => match e.category() {
                ErrorCategory::Transient => Disposition::Nak,
                ErrorCategory::Permanent => Disposition::Term,
            },
        }
    }
}

/// Fetch loop that feeds a [`Processor`] from a durable consumer.
pub struct NatsWorker<J: Job, P: Processor<J>> {
    consumer: NatsConsumer,
    processor: Arc<P>,
    config: WorkerConfig,
    metrics: NatsMetrics,
    health: HealthState,
    _job: PhantomData<J>,
}

impl<J: Job, P: Processor<J> + 'static> NatsWorker<J, P> {
    /// Bind to the durable consumer described by `config`.
    pub async fn new(jetstream: Context, processor: P, config: WorkerConfig) -> Result<Self, NatsError> {
        let consumer = NatsConsumer::bind(&jetstream, config.clone()).await?;
        let metrics = NatsMetrics::new(&config.stream_name, processor.name());

        Ok(Self {
            consumer,
            processor: Arc::new(processor),
            config,
            metrics,
            health: HealthState::new(),
            _job: PhantomData,
        })
    }

    /// Report connectivity and processor health into `health`.
    pub fn with_health(mut self, health: HealthState) -> Self {
        self.health = health;
        self
    }

    /// Run until `shutdown_rx` flips to `true`.
    ///
    /// Messages still in flight when the signal arrives are not acked and
    /// will be redelivered to another worker.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), NatsError> {
        info!(
            stream = %self.config.stream_name,
            consumer = %self.config.durable_name,
            processor = self.processor.name(),
            max_concurrent = self.config.max_concurrent_jobs,
            "Starting NATS worker"
        );

        let processor_healthy = match self.processor.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Processor health check failed");
                false
            }
        };
        self.health.set_processor_healthy(processor_healthy).await;
        self.health.set_stream_connected(true).await;

        loop {
            tokio::select! {
                biased;

                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Shutdown signal received, stopping worker");
                        break;
                    }
                }

                result = self.process_batch() => {
                    match result {
                        Ok(()) => {
                            self.health.set_stream_connected(true).await;
                        }
                        Err(e) => {
                            error!(error = %e, "Error fetching batch");
                            self.health.set_stream_connected(false).await;
                            self.health.set_error(Some(e.to_string())).await;
                            tokio::time::sleep(Duration::from_secs(1)).await;
                        }
                    }
                }
            }
        }

        info!("NATS worker stopped");
        Ok(())
    }

    async fn process_batch(&self) -> Result<(), NatsError> {
        let messages: Vec<NatsMessage<J>> = self.consumer.fetch().await?;

        if messages.is_empty() {
            return Ok(());
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_jobs));
        let progress_every = self.config.progress_interval();
        let mut tasks = JoinSet::new();

        // Spawned up front: messages waiting for a permit still send progress acks.
        for message in messages {
            self.metrics.job_received(message.is_redelivery());

            let semaphore = semaphore.clone();
            let processor = self.processor.clone();
            let metrics = self.metrics.clone();

            tasks.spawn(async move {
                handle_message(message, semaphore, progress_every, processor.as_ref(), &metrics)
                    .await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "Failed to settle message"),
                Err(e) => error!(error = %e, "Message task panicked"),
            }
        }

        Ok(())
    }
}

/// Drive `work` to completion, calling `heartbeat` every `every` until it does.
async fn with_heartbeat<T, F, H, HF>(work: F, every: Duration, mut heartbeat: H) -> T
where
    F: Future<Output = T>,
    H: FnMut() -> HF,
    HF: Future<Output = ()>,
{
    tokio::pin!(work);
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);

    loop {
        tokio::select! {
            output = &mut work => return output,
            _ = ticker.tick() => heartbeat().await,
        }
    }
}

async fn handle_message<J: Job, P: Processor<J>>(
    message: NatsMessage<J>,
    semaphore: Arc<Semaphore>,
    progress_every: Duration,
    processor: &P,
    metrics: &NatsMetrics,
) -> Result<(), NatsError> {
    let job_id = message.job_id();
    let sequence = message.sequence;
    let delivery_count = message.delivery_count;

    debug!(
        job_id = %job_id,
        job_type = message.job.job_type(),
        sequence,
        delivery_count,
        "Processing job"
    );

    let work = async {
        let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|_| ProcessingError::transient("worker is shutting down"))?;
        let start = Instant::now();
        let result = processor.process(&message.job).await;
        Ok::<_, ProcessingError>((result, start.elapsed()))
    };

    let (pending, id) = (&message, &job_id);
    let (result, elapsed) = match with_heartbeat(work, progress_every, move || async move {
        if let Err(e) = pending.in_progress().await {
            warn!(job_id = %id, sequence, error = %e, "Failed to extend ack deadline");
        }
    })
    .await
    {
        Ok(done) => done,
        Err(e) => (Err(e), Duration::ZERO),
    };

    match Disposition::for_result(&result) {
        Disposition::Ack => {
            message.ack().await?;
            metrics.job_processed(elapsed);
            debug!(
                job_id = %job_id,
                sequence,
                duration_ms = elapsed.as_millis() as u64,
                "Job processed"
            );
        }
        Disposition::Nak => {
            metrics.job_failed("transient");
            if let Err(e) = &result {
                warn!(job_id = %job_id, sequence, delivery_count, error = %e, "Transient failure, requesting redelivery");
            }
            message.nak().await?;
        }
        Disposition::Term => {
            metrics.job_failed("permanent");
            if let Err(e) = &result {
                error!(job_id = %job_id, sequence, error = %e, "Permanent failure, dropping message");
            }
            message.term().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_heartbeat_runs_while_work_is_pending() {
        let beats = Arc::new(AtomicUsize::new(0));
        let counter = beats.clone();

        let output = with_heartbeat(
            async {
                tokio::time::sleep(Duration::from_millis(250)).await;
                "sent"
            },
            Duration::from_millis(40),
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            },
        )
        .await;

        assert_eq!(output, "sent");
        assert!(beats.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_fast_work_sends_no_heartbeat() {
        let beats = Arc::new(AtomicUsize::new(0));
        let counter = beats.clone();

        with_heartbeat(async {}, Duration::from_secs(15), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;

        assert_eq!(beats.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_success_is_acked() {
        assert_eq!(Disposition::for_result(&Ok(())), Disposition::Ack);
    }

    #[test]
    fn test_transient_failure_is_redelivered() {
        let result = Err(ProcessingError::transient("store unavailable"));
        assert_eq!(Disposition::for_result(&result), Disposition::Nak);
    }

    #[test]
    fn test_permanent_failure_is_terminated() {
        let result = Err(ProcessingError::permanent("unprocessable"));
        assert_eq!(Disposition::for_result(&result), Disposition::Term);
    }
}
