use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub documents_dir: String,
    pub storage_signing_key: String,
    pub signed_url_ttl_seconds: i64,
    pub max_upload_bytes: usize,
    pub public_base_url: String,
    pub cors_allowed_origins: Vec<String>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let jwt_secret = get_env("JWT_SECRET")?;
        let storage_signing_key =
            env::var("STORAGE_SIGNING_KEY").unwrap_or_else(|_| jwt_secret.clone());

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            database_max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 20)?,
            jwt_secret,
            documents_dir: env::var("DOCUMENTS_DIR")
                .unwrap_or_else(|_| "./storage/documents".to_string()),
            storage_signing_key,
            signed_url_ttl_seconds: get_env_parse_or("SIGNED_URL_TTL_SECONDS", 3600)?,
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
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
