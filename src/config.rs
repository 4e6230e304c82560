use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub uploads_dir: PathBuf,
    pub jwt_secret: String,
    pub admin_username: String,
    pub admin_password_hash: String,
    pub session_ttl_hours: i64,
    pub admin_email: String,
    pub mail_from: String,
    pub smtp: Option<SmtpConfig>,
    /// Prepended to stored file paths when building links in emails.
    pub public_base_url: String,
    pub site_url: Option<String>,
    pub public_rps: u32,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let storage_backend = match env::var("STORAGE_BACKEND").ok().as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for STORAGE_BACKEND: {}",
                    other
                )))
            }
        };
        let database_url = match storage_backend {
            StorageBackend::Postgres => Some(get_env("DATABASE_URL")?),
            StorageBackend::Memory => env::var("DATABASE_URL").ok(),
        };

        let smtp = match env::var("SMTP_HOST").ok().filter(|h| !h.is_empty()) {
            Some(host) => Some(SmtpConfig {
                host,
                port: get_env_parse_or("SMTP_PORT", 587)?,
                username: get_env("SMTP_USERNAME")?,
                password: get_env("SMTP_PASSWORD")?,
            }),
            None => None,
        };
        let mail_from = match env::var("MAIL_FROM") {
            Ok(from) => from,
            Err(_) => match &smtp {
                Some(smtp) => format!("\"Job Board\" <{}>", smtp.username),
                None => "\"Job Board\" <no-reply@localhost>".to_string(),
            },
        };

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            storage_backend,
            database_url,
            uploads_dir: env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            jwt_secret: get_env("JWT_SECRET")?,
            admin_username: get_env("ADMIN_USERNAME")?,
            admin_password_hash: get_env("ADMIN_PASSWORD_HASH")?,
            session_ttl_hours: get_env_parse_or("SESSION_TTL_HOURS", 12)?,
            admin_email: get_env("ADMIN_EMAIL")?,
            mail_from,
            smtp,
            public_base_url: get_env("PUBLIC_BASE_URL")?,
            site_url: env::var("SITE_URL").ok().filter(|s| !s.is_empty()),
            public_rps: get_env_parse_or("PUBLIC_RPS", 20)?,
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
