use core_config::{env_first, ConfigError, FromEnv};

/// Settings for the email consumer
#[derive(Clone, Debug)]
pub struct EmailConfig {
    /// Address every email is sent from and recorded with
    pub from_address: String,
}

impl EmailConfig {
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
        }
    }
}

impl FromEnv for EmailConfig {
    /// EMAIL_FROM_ADDRESS, falling back to EMAIL_USERNAME
    fn from_env() -> Result<Self, ConfigError> {
        let from_address = env_first(&["EMAIL_FROM_ADDRESS", "EMAIL_USERNAME"])
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("EMAIL_FROM_ADDRESS".to_string()))?;

        Ok(Self { from_address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_address_prefers_explicit_key() {
        temp_env::with_vars(
            [
                ("EMAIL_FROM_ADDRESS", Some("noreply@x.com")),
                ("EMAIL_USERNAME", Some("smtp-user@x.com")),
            ],
            || {
                let config = EmailConfig::from_env().unwrap();
                assert_eq!(config.from_address, "noreply@x.com");
            },
        );
    }

    #[test]
    fn test_from_address_falls_back_to_username() {
        temp_env::with_vars(
            [
                ("EMAIL_FROM_ADDRESS", None),
                ("EMAIL_USERNAME", Some("smtp-user@x.com")),
            ],
            || {
                let config = EmailConfig::from_env().unwrap();
                assert_eq!(config.from_address, "smtp-user@x.com");
            },
        );
    }

    #[test]
    fn test_from_address_is_required() {
        temp_env::with_vars(
            [("EMAIL_FROM_ADDRESS", None::<&str>), ("EMAIL_USERNAME", None)],
            || {
                let err = EmailConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "EMAIL_FROM_ADDRESS"));
            },
        );
    }
}
