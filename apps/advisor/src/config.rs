use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Where user plan collections are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" => Ok(StoreBackend::Postgres),
            "redis" => Ok(StoreBackend::Redis),
            other => bail!("Unknown PLAN_STORE_BACKEND '{other}' (expected memory, postgres or redis)"),
        }
    }
}

/// Where exported plan documents are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Directory,
    S3,
}

impl FromStr for ExportTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "directory" => Ok(ExportTarget::Directory),
            "s3" => Ok(ExportTarget::S3),
            other => bail!("Unknown EXPORT_SINK '{other}' (expected directory or s3)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
/// Backend-specific variables are only required when that backend is selected.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Remote advisor service; `None` means the local generator is used.
    pub advisor_api_base_url: Option<String>,
    pub advisor_max_attempts: u32,
    /// Fall back to the local generator when the remote advisor fails.
    pub advisor_local_fallback: bool,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub export_target: ExportTarget,
    pub export_dir: PathBuf,
    pub s3: Option<S3Config>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let use_mocks = parse_bool(&optional_env("USE_MOCKS"), false)?;
        let advisor_api_base_url = optional_env("ADVISOR_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .filter(|_| !use_mocks);

        let store_backend: StoreBackend = optional_env("PLAN_STORE_BACKEND")
            .unwrap_or_else(|| "memory".to_string())
            .parse()?;
        let database_url = match store_backend {
            StoreBackend::Postgres => Some(require_env("DATABASE_URL")?),
            _ => optional_env("DATABASE_URL"),
        };
        let redis_url = match store_backend {
            StoreBackend::Redis => Some(require_env("REDIS_URL")?),
            _ => optional_env("REDIS_URL"),
        };

        let export_target: ExportTarget = optional_env("EXPORT_SINK")
            .unwrap_or_else(|| "directory".to_string())
            .parse()?;
        let s3 = match export_target {
            ExportTarget::S3 => Some(S3Config {
                bucket: require_env("S3_BUCKET")?,
                endpoint: require_env("S3_ENDPOINT")?,
                access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            }),
            ExportTarget::Directory => None,
        };

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            advisor_api_base_url,
            advisor_max_attempts: optional_env("ADVISOR_MAX_RETRIES")
                .unwrap_or_else(|| "3".to_string())
                .parse::<u32>()
                .context("ADVISOR_MAX_RETRIES must be a non-negative integer")?,
            advisor_local_fallback: parse_bool(&optional_env("ADVISOR_LOCAL_FALLBACK"), true)?,
            store_backend,
            database_url,
            redis_url,
            export_target,
            export_dir: optional_env("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./exports")),
            s3,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_bool(value: &Option<String>, default: bool) -> Result<bool> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) if v == "true" || v == "1" || v == "yes" => Ok(true),
        Some(v) if v == "false" || v == "0" || v == "no" => Ok(false),
        Some(v) => bail!("Expected a boolean, got '{v}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("Postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!(" redis ".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_export_target_parse() {
        assert_eq!("s3".parse::<ExportTarget>().unwrap(), ExportTarget::S3);
        assert!("ftp".parse::<ExportTarget>().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool(&None, true).unwrap());
        assert!(!parse_bool(&Some("".to_string()), false).unwrap());
        assert!(parse_bool(&Some("TRUE".to_string()), false).unwrap());
        assert!(!parse_bool(&Some("0".to_string()), true).unwrap());
        assert!(parse_bool(&Some("maybe".to_string()), true).is_err());
    }
}
