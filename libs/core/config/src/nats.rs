use crate::{env_or_default, ConfigError, FromEnv};

/// Message bus connection settings
#[derive(Clone, Debug)]
pub struct NatsConfig {
    pub url: String,
}

impl NatsConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl FromEnv for NatsConfig {
    /// NATS_URL, defaults to the local broker
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_or_default("NATS_URL", "nats://localhost:4222"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nats_config_default_url() {
        temp_env::with_var_unset("NATS_URL", || {
            let config = NatsConfig::from_env().unwrap();
            assert_eq!(config.url, "nats://localhost:4222");
        });
    }

    #[test]
    fn test_nats_config_from_env() {
        temp_env::with_var("NATS_URL", Some("nats://bus:4222"), || {
            let config = NatsConfig::from_env().unwrap();
            assert_eq!(config.url, "nats://bus:4222");
        });
    }
}
