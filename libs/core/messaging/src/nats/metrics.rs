//! Prometheus counters for the worker loop.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

#[derive(Clone)]
pub struct NatsMetrics {
    stream_name: String,
    processor_name: String,
}

impl NatsMetrics {
    pub fn new(stream_name: &str, processor_name: &str) -> Self {
        Self {
            stream_name: stream_name.to_string(),
            processor_name: processor_name.to_string(),
        }
    }

    pub fn job_received(&self, redelivery: bool) {
        counter!(
            "nats_worker_jobs_received_total",
            "stream" => self.stream_name.clone(),
            "processor" => self.processor_name.clone(),
            "redelivery" => redelivery.to_string()
        )
        .increment(1);
    }

    pub fn job_processed(&self, duration: Duration) {
        counter!(
            "nats_worker_jobs_processed_total",
            "stream" => self.stream_name.clone(),
            "processor" => self.processor_name.clone()
        )
        .increment(1);

        histogram!(
            "nats_worker_job_duration_seconds",
            "stream" => self.stream_name.clone(),
            "processor" => self.processor_name.clone()
        )
        .record(duration.as_secs_f64());
    }

    pub fn job_failed(&self, category: &str) {
        counter!(
            "nats_worker_jobs_failed_total",
            "stream" => self.stream_name.clone(),
            "processor" => self.processor_name.clone(),
            "category" => category.to_string()
        )
        .increment(1);
    }
}

/// Install the global Prometheus recorder.
///
/// Fails if a recorder is already installed in this process.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}
