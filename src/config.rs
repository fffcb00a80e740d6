/*
 * Responsibility
 * - Read environment / .env settings (storage, token secret, CORS, admin bootstrap)
 * - Validate values (startup fails when something required is missing)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Which `DocumentStore` backend the process runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORAGE_BACKEND")),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    pub access_token_secret: String,
    pub access_token_ttl_seconds: u64,
    pub access_token_leeway_seconds: u64,

    pub request_timeout_seconds: u64,

    // Users with these emails are created as admins on signup.
    pub admin_emails: Vec<String>,
}

// Keep the token secret out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("storage_backend", &self.storage_backend)
            .field("database_max_connections", &self.database_max_connections)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("admin_emails", &self.admin_emails.len())
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            split_list(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let storage_backend = match std::env::var("STORAGE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StorageBackend::Postgres,
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let access_token_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;
        if access_token_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_SECRET"));
        }

        let access_token_ttl_seconds = std::env::var("ACCESS_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(604_800); // 7 days

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(30);

        let admin_emails = split_list(&std::env::var("ADMIN_EMAILS").unwrap_or_default())
            .into_iter()
            .map(|s| s.to_ascii_lowercase())
            .collect();

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            storage_backend,
            database_url,
            database_max_connections,
            access_token_secret,
            access_token_ttl_seconds,
            access_token_leeway_seconds,
            request_timeout_seconds,
            admin_emails,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blanks() {
        assert_eq!(
            split_list(" a@x.com, ,b@x.com,"),
            vec!["a@x.com".to_string(), "b@x.com".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn storage_backend_parses_known_names() {
        assert_eq!("postgres".parse::<StorageBackend>().ok(), Some(StorageBackend::Postgres));
        assert_eq!(" Memory ".parse::<StorageBackend>().ok(), Some(StorageBackend::Memory));
        assert!("mongo".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn app_env_defaults_to_development() {
        assert_eq!(AppEnv::parse("PROD"), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Development);
    }
}
