// config.rs
use std::env;

use crate::errors::{AppError, Result};

/// Media travels base64-encoded inside the JSON body, so the default covers a
/// 100 MB video after encoding.
pub const DEFAULT_MAX_BODY_BYTES: usize = 140 * 1024 * 1024;

pub const DEFAULT_CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub api_base: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
    pub store: StoreKind,
    pub cloudinary: CloudinaryConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::configuration(format!("{} must be set", key)))
        };

        let store = match lookup("STORE").as_deref() {
            None | Some("") | Some("mongo") => StoreKind::Mongo,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(AppError::configuration(format!(
                    "STORE must be `mongo` or `memory`, got `{}`",
                    other
                )))
            }
        };

        let database_url = match store {
            StoreKind::Mongo => required("DATABASE_URL")?,
            StoreKind::Memory => lookup("DATABASE_URL").unwrap_or_default(),
        };

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| AppError::configuration(format!("PORT must be a number, got `{}`", port)))?,
            None => 4000,
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(limit) => limit.parse().map_err(|_| {
                AppError::configuration(format!("MAX_BODY_BYTES must be a number, got `{}`", limit))
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(AppConfig {
            database_url,
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "socialmedia".to_string()),
            jwt_secret: required("JWT_SECRET")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            max_body_bytes,
            store,
            cloudinary: CloudinaryConfig {
                api_base: lookup("CLOUDINARY_API_BASE")
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| DEFAULT_CLOUDINARY_API_BASE.to_string()),
                cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
                api_key: required("CLOUDINARY_API_KEY")?,
                api_secret: required("CLOUDINARY_API_SECRET")?,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
