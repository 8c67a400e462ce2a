use messaging::nats::StreamConfig;

/// Bus topology for welcome notifications.
///
/// The user service publishes to `email.key` on the `user_created` stream;
/// every email worker shares the durable `email_queue` consumer.
pub struct UserCreatedStream;

impl StreamConfig for UserCreatedStream {
    const STREAM_NAME: &'static str = "user_created";
    const CONSUMER_NAME: &'static str = "email_queue";
    const SUBJECT: &'static str = "email.key";
}

#[cfg(test)]
mod tests {
    use super::*;
    use messaging::nats::WorkerConfig;

    #[test]
    fn test_topology_names() {
        assert_eq!(UserCreatedStream::STREAM_NAME, "user_created");
        assert_eq!(UserCreatedStream::CONSUMER_NAME, "email_queue");
        assert_eq!(UserCreatedStream::SUBJECT, "email.key");
        assert_eq!(UserCreatedStream::MAX_DELIVER, -1);
    }

    #[test]
    fn test_worker_binds_shared_consumer() {
        let config = WorkerConfig::from_stream::<UserCreatedStream>();
        assert_eq!(config.durable_name, "email_queue");
        assert_eq!(config.subject, "email.key");
    }

    #[cfg(feature = "worker")]
    #[test]
    fn test_smtp_attempt_settles_before_ack_wait() {
        use crate::provider::smtp::DEFAULT_SMTP_TIMEOUT_SECS;
        use std::time::Duration;

        let config = WorkerConfig::from_stream::<UserCreatedStream>();
        let smtp_timeout = Duration::from_secs(DEFAULT_SMTP_TIMEOUT_SECS);

        assert!(smtp_timeout < config.ack_wait);
        // Queued deliveries are kept alive well before the broker gives up on them.
        assert!(config.progress_interval() < config.ack_wait);
    }
}
