use core_config::{env_first, env_flag, nats::NatsConfig, ConfigError, Environment, FromEnv};
use database::postgres::PostgresConfig;
use email::EmailConfig;

const DEFAULT_HEALTH_PORT: u16 = 8081;

/// Everything the worker reads from the environment at startup
#[derive(Clone, Debug)]
pub struct WorkerSettings {
    pub environment: Environment,
    pub nats: NatsConfig,
    pub database: PostgresConfig,
    pub email: EmailConfig,
    /// `EMAIL_WORKER_HEALTH_PORT`, then `HEALTH_PORT`, then 8081
    pub health_port: u16,
    pub run_migrations: bool,
}

impl WorkerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            nats: NatsConfig::from_env()?,
            database: PostgresConfig::from_env()?,
            email: EmailConfig::from_env()?,
            health_port: health_port()?,
            run_migrations: env_flag("RUN_MIGRATIONS", true),
        })
    }
}

fn health_port() -> Result<u16, ConfigError> {
    match env_first(&["EMAIL_WORKER_HEALTH_PORT", "HEALTH_PORT"]) {
        Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::ParseError {
            key: "EMAIL_WORKER_HEALTH_PORT".to_string(),
            details: e.to_string(),
        }),
        None => Ok(DEFAULT_HEALTH_PORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(
        worker_port: Option<&'static str>,
        generic_port: Option<&'static str>,
    ) -> [(&'static str, Option<&'static str>); 5] {
        [
            ("DATABASE_URL", Some("postgresql://u:p@localhost/email")),
            ("EMAIL_FROM_ADDRESS", Some("noreply@platform.io")),
            ("EMAIL_WORKER_HEALTH_PORT", worker_port),
            ("HEALTH_PORT", generic_port),
            ("RUN_MIGRATIONS", None),
        ]
    }

    #[test]
    fn test_settings_defaults() {
        temp_env::with_vars(vars(None, None), || {
            let settings = WorkerSettings::from_env().unwrap();
            assert_eq!(settings.health_port, 8081);
            assert_eq!(settings.email.from_address, "noreply@platform.io");
            assert!(settings.run_migrations);
        });
    }

    #[test]
    fn test_worker_specific_port_wins() {
        temp_env::with_vars(vars(Some("9100"), Some("9200")), || {
            assert_eq!(WorkerSettings::from_env().unwrap().health_port, 9100);
        });
    }

    #[test]
    fn test_generic_port_fallback() {
        temp_env::with_vars(vars(None, Some("9200")), || {
            assert_eq!(WorkerSettings::from_env().unwrap().health_port, 9200);
        });
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        temp_env::with_vars(vars(Some("not-a-port"), None), || {
            let err = WorkerSettings::from_env().unwrap_err();
            assert!(err.to_string().contains("EMAIL_WORKER_HEALTH_PORT"));
        });
    }

    #[test]
    fn test_sender_is_required() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://u:p@localhost/email")),
                ("EMAIL_FROM_ADDRESS", None),
                ("EMAIL_USERNAME", None),
            ],
            || {
                let err = WorkerSettings::from_env().unwrap_err();
                assert!(err.to_string().contains("EMAIL_FROM_ADDRESS"));
            },
        );
    }
}
