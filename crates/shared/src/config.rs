//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Image storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which image store backs the service. Chosen once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; images are lost on restart.
    #[default]
    Memory,
    /// S3-compatible object storage.
    S3,
}

/// Image storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Object storage settings, required for the `s3` backend.
    #[serde(default)]
    pub s3: Option<S3Config>,
}

/// S3-compatible object storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    /// Object storage host.
    pub host: String,
    /// Object storage port.
    pub port: u16,
    /// Access key.
    pub access_key: String,
    /// Secret key.
    pub secret_key: String,
    /// Prefix of image URLs handed to browsers.
    pub public_url: String,
    /// Timeout for each remote call in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FAKELINK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl StorageConfig {
    /// The S3 settings, if the `s3` backend is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the `s3` backend is selected without settings.
    pub fn s3_settings(&self) -> Result<Option<&S3Config>, config::ConfigError> {
        match (self.backend, &self.s3) {
            (StorageBackend::Memory, _) => Ok(None),
            (StorageBackend::S3, Some(settings)) => Ok(Some(settings)),
            (StorageBackend::S3, None) => Err(config::ConfigError::Message(
                "storage.s3 settings are required when storage.backend is \"s3\"".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        temp_env::with_vars_unset(
            [
                "FAKELINK__SERVER__PORT",
                "FAKELINK__STORAGE__BACKEND",
                "FAKELINK__STORAGE__S3__HOST",
            ],
            || {
                let config = AppConfig::load().expect("should load");
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.storage.backend, StorageBackend::Memory);
                assert!(config.storage.s3_settings().expect("valid").is_none());
            },
        );
    }

    #[test]
    fn test_loads_s3_settings_from_environment() {
        temp_env::with_vars(
            [
                ("FAKELINK__SERVER__PORT", Some("3000")),
                ("FAKELINK__STORAGE__BACKEND", Some("s3")),
                ("FAKELINK__STORAGE__S3__HOST", Some("minio")),
                ("FAKELINK__STORAGE__S3__PORT", Some("9000")),
                ("FAKELINK__STORAGE__S3__ACCESS_KEY", Some("minioadmin")),
                ("FAKELINK__STORAGE__S3__SECRET_KEY", Some("minio-secret")),
                ("FAKELINK__STORAGE__S3__PUBLIC_URL", Some("http://localhost:9000")),
            ],
            || {
                let config = AppConfig::load().expect("should load");
                assert_eq!(config.server.port, 3000);
                assert_eq!(config.storage.backend, StorageBackend::S3);

                let s3 = config
                    .storage
                    .s3_settings()
                    .expect("valid")
                    .expect("s3 selected");
                assert_eq!(s3.host, "minio");
                assert_eq!(s3.port, 9000);
                assert_eq!(s3.access_key, "minioadmin");
                assert_eq!(s3.secret_key, "minio-secret");
                assert_eq!(s3.public_url, "http://localhost:9000");
                assert_eq!(s3.timeout_secs, 10);
            },
        );
    }

    #[test]
    fn test_s3_backend_requires_settings() {
        let storage = StorageConfig {
            backend: StorageBackend::S3,
            s3: None,
        };
        assert!(storage.s3_settings().is_err());
    }
}
