use std::fmt::Debug;
use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runtime settings read from the environment at startup.
///
/// | Variable               | Default                 |
/// |------------------------|-------------------------|
/// | `HOST`                 | `0.0.0.0`               |
/// | `PORT`                 | `3000`                  |
/// | `CORS_ORIGINS`         | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS` | `30`                    |
/// | `UPLOAD_DIR`           | `./uploads`             |
/// | `PUBLIC_BASE_URL`      | `http://localhost:3000` |
/// | `MAX_UPLOAD_BYTES`     | 10 MiB                  |
///
/// plus the `JWT_*` variables read by [`JwtConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Uploaded images are written here and served under `/uploads`.
    pub upload_dir: PathBuf,
    /// Prefix for the URLs returned by the upload endpoint, no trailing slash.
    pub public_base_url: String,
    pub max_upload_bytes: usize,
    pub jwt: JwtConfig,
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse `key` when set, else `default`.
///
/// # Panics
///
/// When the variable is set but does not parse.
fn env_parsed<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e:?}")),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

impl ServerConfig {
    /// # Panics
    ///
    /// On an unparsable number or a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        Self {
            host: env_string("HOST", "0.0.0.0"),
            port: env_parsed("PORT", 3000),
            cors_origins: split_origins(&env_string("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", 30),
            upload_dir: PathBuf::from(env_string("UPLOAD_DIR", "./uploads")),
            public_base_url: env_string("PUBLIC_BASE_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            max_upload_bytes: env_parsed("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            jwt: JwtConfig::from_env(),
        }
    }

    /// Public URL for a stored upload file name.
    pub fn upload_url(&self, file_name: &str) -> String {
        format!("{}/uploads/{file_name}", self.public_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            split_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn upload_url_joins_base_and_name() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            upload_dir: PathBuf::from("/tmp"),
            public_base_url: "http://vet.example".into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            jwt: JwtConfig {
                secret: "k".into(),
                access_token_expiry_mins: 60,
            },
        };
        assert_eq!(config.upload_url("x.png"), "http://vet.example/uploads/x.png");
    }
}
