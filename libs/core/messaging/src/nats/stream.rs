use crate::nats::error::NatsError;
use async_nats::jetstream::stream::Config;
use async_nats::jetstream::Context;
use std::time::Duration;
use tracing::debug;

const MAX_MESSAGES: i64 = 100_000;
const MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Create `name` capturing `subject` unless it already exists.
///
/// Both the publisher and the worker call this at startup so neither
/// depends on the other having run first.
pub async fn ensure_stream(jetstream: &Context, name: &str, subject: &str) -> Result<(), NatsError> {
    let mut stream = jetstream
        .get_or_create_stream(Config {
            name: name.to_string(),
            subjects: vec![subject.to_string()],
            max_messages: MAX_MESSAGES,
            max_age: MAX_AGE,
            ..Default::default()
        })
        .await
        .map_err(NatsError::from_jetstream_error)?;

    let info = stream.info().await.map_err(NatsError::from_jetstream_error)?;
    debug!(
        stream = %name,
        messages = info.state.messages,
        consumers = info.state.consumer_count,
        "Stream ready"
    );

    Ok(())
}
