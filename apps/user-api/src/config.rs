use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_flag, nats::NatsConfig, server::ServerConfig,
};
use database::postgres::PostgresConfig;
use std::env;

pub use core_config::Environment;

/// Settings for the user API, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub nats: NatsConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// `RUN_MIGRATIONS`, on unless set to something other than true/1/yes
    pub run_migrations: bool,
    /// `NOTIFICATION_SENDER`, stamped on published messages when set
    pub notification_sender: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?,
            nats: NatsConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            run_migrations: env_flag("RUN_MIGRATIONS", true),
            notification_sender: env::var("NOTIFICATION_SENDER")
                .ok()
                .filter(|sender| !sender.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://u:p@localhost/users")),
                ("NATS_URL", None),
                ("PORT", None),
                ("RUN_MIGRATIONS", None),
                ("NOTIFICATION_SENDER", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "user_api");
                assert_eq!(config.nats.url, "nats://localhost:4222");
                assert_eq!(config.server.port, 8080);
                assert!(config.run_migrations);
                assert_eq!(config.notification_sender, None);
            },
        );
    }

    #[test]
    fn test_config_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://u:p@localhost/users")),
                ("RUN_MIGRATIONS", Some("false")),
                ("NOTIFICATION_SENDER", Some("noreply@platform.io")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(!config.run_migrations);
                assert_eq!(
                    config.notification_sender.as_deref(),
                    Some("noreply@platform.io")
                );
            },
        );
    }

    #[test]
    fn test_blank_sender_is_ignored() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://u:p@localhost/users")),
                ("NOTIFICATION_SENDER", Some("  ")),
            ],
            || {
                assert_eq!(Config::from_env().unwrap().notification_sender, None);
            },
        );
    }
}
