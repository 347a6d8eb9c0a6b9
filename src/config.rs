use std::env;

use crate::utils::AppError;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,https://linkup.vercel.app";

/// Runtime settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub database_url: String,
    pub database_name: String,
    pub allowed_origins: Vec<String>,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DB_URI")
            .map_err(|_| AppError::ConfigError("DB_URI must be set".to_string()))?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "8000".to_string()),
            database_url,
            database_name: env::var("DB_NAME").unwrap_or_else(|_| "linkup".to_string()),
            allowed_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string()),
            ),
            production: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: "0".to_string(),
            database_url: "mongodb://localhost:27017".to_string(),
            database_name: "linkup_test".to_string(),
            allowed_origins: parse_origins(DEFAULT_ORIGINS),
            production: false,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
