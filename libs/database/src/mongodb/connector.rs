use mongodb::{
    Client,
    bson::doc,
    options::ClientOptions,
};
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Copy pool, timeout and app-name settings from `config` onto parsed driver options
pub fn apply_config(options: &mut ClientOptions, config: &MongoConfig) {
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.server_selection_timeout);

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }
}

/// Send `ping` to the admin database
pub async fn ping(client: &Client) -> Result<(), mongodb::error::Error> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

/// Build a client from `config` and verify the server answers a ping
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "users");
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    config.validate()?;
    info!(url = %config.redacted_url(), "Attempting to connect to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;
    apply_config(&mut options, config);

    let client = Client::with_options(options)?;

    ping(&client)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(database = %config.database, "Successfully connected to MongoDB");
    Ok(client)
}

/// [`connect_from_config`] with exponential backoff on failure
///
/// `None` uses [`RetryConfig::default`] (3 retries from 100ms).
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    match retry_config {
        Some(policy) => retry_with_backoff(|| connect_from_config(config), policy).await,
        None => retry(|| connect_from_config(config)).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_apply_config_overrides_driver_defaults() {
        let mut config = MongoConfig::with_database("mongodb://localhost:27017", "users")
            .with_app_name("users-api");
        config.max_pool_size = 20;
        config.min_pool_size = 2;
        config.connect_timeout = Duration::from_secs(4);

        let mut options = ClientOptions::parse(config.url()).await.unwrap();
        apply_config(&mut options, &config);

        assert_eq!(options.max_pool_size, Some(20));
        assert_eq!(options.min_pool_size, Some(2));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(4)));
        assert_eq!(options.app_name.as_deref(), Some("users-api"));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config_before_dialing() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "");
        let result = connect_from_config(&config).await;
        assert!(matches!(result, Err(DatabaseError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let config = MongoConfig::with_database("postgres://localhost:5432", "users");
        let result = connect_from_config(&config).await;
        assert!(matches!(result, Err(DatabaseError::Mongo(_))));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_from_config() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = MongoConfig::with_database(url, "test");
        assert!(connect_from_config(&config).await.is_ok());
    }
}
