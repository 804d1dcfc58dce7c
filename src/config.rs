use dotenvy::dotenv;
use std::env;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub db_host:          String,
    pub db_port:          u16,
    pub db_name:          String,
    pub db_user:          String,
    pub db_password:      String,

    // Backend
    pub backend_host:     String,
    pub backend_port:     u16,

    // Weather lookup (weatherapi.com)
    pub weather_api_key:  String,

    // PDF export fonts (a CJK-capable family, e.g. SpoqaHanSansNeo)
    pub pdf_font_dir:     String,
    pub pdf_font_name:    String,

    // Dev account (only active when app_env == "development")
    pub dev_email:        String,
    pub dev_password:     String,

    // App
    pub app_env:          String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        fn require(key: &str) -> Result<String, ConfigError> {
            env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
        }

        fn parse_port(key: &str) -> Result<u16, ConfigError> {
            let raw = require(key)?;
            raw.parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue(key.to_string(), raw))
        }

        Ok(Self {
            db_host:      require("DB_HOST").unwrap_or_else(|_| "db".into()),
            db_port:      parse_port("DB_PORT").unwrap_or(3306),
            db_name:      require("DB_NAME")?,
            db_user:      require("DB_USER")?,
            db_password:  require("DB_PASSWORD")?,

            backend_host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            backend_port: parse_port("BACKEND_PORT").unwrap_or(8080),

            weather_api_key: env::var("WEATHER_API_KEY").unwrap_or_default(),

            pdf_font_dir:  env::var("PDF_FONT_DIR").unwrap_or_else(|_| "assets/fonts".into()),
            pdf_font_name: env::var("PDF_FONT_NAME").unwrap_or_else(|_| "SpoqaHanSansNeo".into()),

            dev_email:    env::var("DEV_EMAIL").unwrap_or_else(|_| "dev@localhost".into()),
            dev_password: env::var("DEV_PASSWORD").unwrap_or_else(|_| "dev".into()),

            app_env:      env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
        })
    }

    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}
