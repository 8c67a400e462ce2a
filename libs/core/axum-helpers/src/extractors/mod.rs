//! Extractors that reject with an [`crate::ErrorResponse`] body.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
