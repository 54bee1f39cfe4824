//! Object store configuration types.

use std::time::Duration;

use fakelink_shared::config::S3Config;

/// Connection settings for [`S3ImageStore`](super::S3ImageStore).
#[derive(Debug, Clone)]
pub struct S3StoreConfig {
    /// Object storage host name or address.
    pub host: String,
    /// Object storage port.
    pub port: u16,
    /// Access key used to sign requests.
    pub access_key: String,
    /// Secret key used to sign requests.
    pub secret_key: String,
    /// Prefix of the URLs handed out to browsers.
    pub public_url: String,
    /// Bound applied to every remote call.
    pub timeout: Duration,
}

impl S3StoreConfig {
    /// Region presented to the backend. S3-compatible servers ignore it but
    /// request signing needs one.
    pub const REGION: &'static str = "us-east-1";
    /// Default bound on remote calls: 10 seconds.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a new config with the default timeout.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            public_url: public_url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set the bound on remote calls.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint the S3 clients talk to.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Public URL base without a trailing slash.
    #[must_use]
    pub fn public_url_base(&self) -> &str {
        self.public_url.trim_end_matches('/')
    }
}

impl From<S3Config> for S3StoreConfig {
    fn from(settings: S3Config) -> Self {
        Self::new(
            settings.host,
            settings.port,
            settings.access_key,
            settings.secret_key,
            settings.public_url,
        )
        .with_timeout(Duration::from_secs(settings.timeout_secs))
    }
}
