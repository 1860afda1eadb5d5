use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse_or_default,
    server::ServerConfig,
};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Settings specific to the users resource
#[derive(Clone, Debug)]
pub struct UsersConfig {
    /// Collection holding user documents
    pub collection: String,
    /// Create a unique index on `email` at startup
    pub enforce_unique_email: bool,
}

/// Environment variables:
/// - `USERS_COLLECTION` (default: users)
/// - `USERS_UNIQUE_EMAIL_INDEX` (default: false)
impl FromEnv for UsersConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            collection: env_or_default("USERS_COLLECTION", domain_users::mongodb::DEFAULT_COLLECTION),
            enforce_unique_email: env_parse_or_default("USERS_UNIQUE_EMAIL_INDEX", "false")?,
        })
    }
}

/// Application configuration composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub users: UsersConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let users = UsersConfig::from_env()?;

        let app = app_info!();
        let mongodb = if mongodb.app_name.is_none() {
            mongodb.with_app_name(app.name)
        } else {
            mongodb
        };

        Ok(Self {
            app,
            mongodb,
            server,
            environment,
            users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_config_defaults() {
        temp_env::with_vars_unset(["USERS_COLLECTION", "USERS_UNIQUE_EMAIL_INDEX"], || {
            let config = UsersConfig::from_env().unwrap();
            assert_eq!(config.collection, "users");
            assert!(!config.enforce_unique_email);
        });
    }

    #[test]
    fn test_users_config_from_env() {
        temp_env::with_vars(
            [
                ("USERS_COLLECTION", Some("people")),
                ("USERS_UNIQUE_EMAIL_INDEX", Some("true")),
            ],
            || {
                let config = UsersConfig::from_env().unwrap();
                assert_eq!(config.collection, "people");
                assert!(config.enforce_unique_email);
            },
        );
    }

    #[test]
    fn test_users_config_rejects_bad_flag() {
        temp_env::with_var("USERS_UNIQUE_EMAIL_INDEX", Some("yes please"), || {
            let err = UsersConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("USERS_UNIQUE_EMAIL_INDEX"));
        });
    }

    #[test]
    fn test_config_from_env_names_the_mongo_client() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("app")),
                ("MONGODB_APP_NAME", None),
                ("PORT", Some("9090")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.database(), "app");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("users_api"));
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.app.name, "users_api");
            },
        );
    }

    #[test]
    fn test_config_requires_mongodb_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None::<&str>),
                ("MONGODB_DATABASE", Some("app")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
