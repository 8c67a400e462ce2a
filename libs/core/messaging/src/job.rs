use serde::{de::DeserializeOwned, Serialize};

/// A payload that travels over the bus and is handled by a [`crate::Processor`].
pub trait Job: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Identifier used to correlate log lines for this job.
    ///
    /// Not a deduplication key: the same job may be delivered more than once.
    fn job_id(&self) -> String;

    /// Short type name for logs and metric labels.
    fn job_type(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
