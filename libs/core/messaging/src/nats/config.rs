use std::time::Duration;

/// Compile-time description of one stream and its shared consumer.
///
/// ```rust,ignore
/// struct OrdersStream;
///
/// impl StreamConfig for OrdersStream {
///     const STREAM_NAME: &'static str = "orders";
///     const CONSUMER_NAME: &'static str = "orders_queue";
///     const SUBJECT: &'static str = "orders.created";
/// }
/// ```
pub trait StreamConfig {
    const STREAM_NAME: &'static str;

    /// Durable consumer name. Every worker instance binds to the same one,
    /// so messages are load-balanced rather than fanned out.
    const CONSUMER_NAME: &'static str;

    const SUBJECT: &'static str;

    /// `-1` lets the broker redeliver without limit.
    const MAX_DELIVER: i64 = -1;

    const ACK_WAIT_SECS: u64 = 30;
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub stream_name: String,
    pub durable_name: String,
    pub subject: String,
    pub batch_size: usize,
    /// How long a pull request waits for messages
    pub fetch_timeout: Duration,
    pub max_deliver: i64,
    pub ack_wait: Duration,
    pub max_concurrent_jobs: usize,
}

impl WorkerConfig {
    pub fn from_stream<S: StreamConfig>() -> Self {
        Self {
            stream_name: S::STREAM_NAME.to_string(),
            durable_name: S::CONSUMER_NAME.to_string(),
            subject: S::SUBJECT.to_string(),
            batch_size: 10,
            fetch_timeout: Duration::from_secs(5),
            max_deliver: S::MAX_DELIVER,
            ack_wait: Duration::from_secs(S::ACK_WAIT_SECS),
            max_concurrent_jobs: 4,
        }
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// How often an unsettled message is reported as still in progress
    /// (half of `ack_wait`).
    pub fn progress_interval(&self) -> Duration {
        (self.ack_wait / 2).max(Duration::from_millis(100))
    }

    /// Clamped to at least one.
    pub fn with_max_concurrent_jobs(mut self, max: usize) -> Self {
        self.max_concurrent_jobs = max.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Signups;

    impl StreamConfig for Signups {
        const STREAM_NAME: &'static str = "signups";
        const CONSUMER_NAME: &'static str = "signups_queue";
        const SUBJECT: &'static str = "signups.key";
    }

    #[test]
    fn test_from_stream_uses_shared_durable_name() {
        let a = WorkerConfig::from_stream::<Signups>();
        let b = WorkerConfig::from_stream::<Signups>();

        assert_eq!(a.stream_name, "signups");
        assert_eq!(a.subject, "signups.key");
        assert_eq!(a.durable_name, "signups_queue");
        assert_eq!(a.durable_name, b.durable_name);
        assert_eq!(a.max_deliver, -1);
        assert_eq!(a.ack_wait, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let config = WorkerConfig::from_stream::<Signups>()
            .with_batch_size(1)
            .with_fetch_timeout(Duration::from_millis(250))
            .with_max_concurrent_jobs(0);

        assert_eq!(config.batch_size, 1);
        assert_eq!(config.fetch_timeout, Duration::from_millis(250));
        assert_eq!(config.max_concurrent_jobs, 1);
    }

    #[test]
    fn test_progress_interval_is_half_of_ack_wait() {
        let config = WorkerConfig::from_stream::<Signups>();
        assert_eq!(config.progress_interval(), Duration::from_secs(15));
        assert!(config.progress_interval() < config.ack_wait);
    }
}
