//! Container-backed fixtures for integration tests.
//!
//! - `TestDatabase`: Postgres with every migration applied (feature `postgres`, default)
//! - `TestNats`: NATS with JetStream enabled (feature `nats`)
//! - [`TestDataBuilder`]: deterministic names and addresses derived from a test name
//!
//! Tests that start containers need Docker and are marked `#[ignore]`;
//! run them with `cargo test -- --ignored`.

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "nats")]
mod nats;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

#[cfg(feature = "nats")]
pub use nats::TestNats;

/// Seeded generator so every run of a test sees the same data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn user_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// `"{label} {seed}"`, e.g. `"Ana 1234"`
    pub fn name(&self, label: &str) -> String {
        format!("{} {}", label, self.seed)
    }

    /// `"{local}.{seed}@example.com"`
    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.com", local, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_data() {
        let a = TestDataBuilder::from_test_name("create_user");
        let b = TestDataBuilder::from_test_name("create_user");

        assert_eq!(a.user_id(), b.user_id());
        assert_eq!(a.email("ana"), b.email("ana"));
    }

    #[test]
    fn test_different_names_differ() {
        let a = TestDataBuilder::from_test_name("create_user");
        let b = TestDataBuilder::from_test_name("delete_user");

        assert_ne!(a.user_id(), b.user_id());
        assert_ne!(a.name("Ana"), b.name("Ana"));
    }

    #[test]
    fn test_email_shape() {
        let email = TestDataBuilder::new(7).email("ana");
        assert_eq!(email, "ana.7@example.com");
    }
}
