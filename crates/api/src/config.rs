use std::path::PathBuf;
use std::str::FromStr;

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`. Read ahead of [`ServerConfig`] so that
    /// configuration errors can already be logged.
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    /// `json` (any case) selects JSON lines; anything else is pretty output.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Shared secret for the admin routes. `None` makes them answer 500.
    pub admin_token: Option<String>,
    /// Public base URL used in image links, without a trailing slash.
    pub server_url: String,
    /// Directory holding server-managed images.
    pub upload_dir: PathBuf,
    /// PostgreSQL URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on an uploaded image, in bytes.
    pub max_image_bytes: usize,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                   |
    /// |------------------------|---------------------------|
    /// | `HOST`                 | `0.0.0.0`                 |
    /// | `PORT`                 | `8080`                    |
    /// | `ADMIN_TOKEN`          | unset                     |
    /// | `SERVER_URL`           | `http://localhost:{PORT}` |
    /// | `UPLOAD_DIR`           | `./uploads`               |
    /// | `DATABASE_URL`         | unset (in-memory store)   |
    /// | `MAX_IMAGE_BYTES`      | `10485760`                |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or("PORT", var("PORT"), 8080, "port number")?;

        let server_url = var("SERVER_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        let upload_dir = PathBuf::from(var("UPLOAD_DIR").unwrap_or_else(|| "./uploads".into()));

        let max_image_bytes: usize = parse_or(
            "MAX_IMAGE_BYTES",
            var("MAX_IMAGE_BYTES"),
            10 * 1024 * 1024,
            "byte count",
        )?;

        let request_timeout_secs: u64 = parse_or(
            "REQUEST_TIMEOUT_SECS",
            var("REQUEST_TIMEOUT_SECS"),
            30,
            "number of seconds",
        )?;

        Ok(Self {
            host,
            port,
            admin_token: var("ADMIN_TOKEN"),
            server_url,
            upload_dir,
            database_url: var("DATABASE_URL"),
            max_image_bytes,
            request_timeout_secs,
        })
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            var: name,
            expected,
            value,
        }),
    }
}
