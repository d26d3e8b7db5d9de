//! Where the service layer points and how long it waits.

use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Deployment target of the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Android emulator reaching the host machine.
    Emulator,
    /// Backend running on the same machine.
    Local,
    /// Any other deployment, by base URL.
    Deployed(String),
}

impl Environment {
    /// Base URL of the backend, without a trailing slash.
    pub fn base_url(&self) -> String {
        match self {
            Environment::Emulator => "http://10.0.2.2:3000".to_string(),
            Environment::Local => "http://localhost:3000".to_string(),
            Environment::Deployed(url) => url.trim_end_matches('/').to_string(),
        }
    }
}

/// Settings for an [`ApiClient`](crate::client::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(environment: &Environment) -> Self {
        Self {
            base_url: environment.base_url(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
