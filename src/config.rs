//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first, if present.

use crate::models::Coords;
use crate::services::map::DEFAULT_ZOOM;
use std::env;
use std::path::PathBuf;

/// Where workouts and products are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// JSON files under `data_dir`
    File,
    /// Process memory only; lost on restart
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Storage backend selection
    pub storage: StorageKind,
    /// Directory for the file store
    pub data_dir: PathBuf,
    /// Starting map position, if known
    pub home: Option<Coords>,
    /// Map zoom level used when centering
    pub map_zoom: u8,
    /// Upstream product API; products are stored locally when unset
    pub products_api_url: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            storage: StorageKind::Memory,
            data_dir: PathBuf::from("./data"),
            home: None,
            map_zoom: DEFAULT_ZOOM,
            products_api_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "file".to_string())
            .as_str()
        {
            "file" => StorageKind::File,
            "memory" => StorageKind::Memory,
            other => return Err(ConfigError::Invalid("STORAGE_BACKEND", other.to_string())),
        };

        let home = match (env::var("HOME_LAT"), env::var("HOME_LNG")) {
            (Ok(lat), Ok(lng)) => Some(Coords::new(
                parse_var("HOME_LAT", &lat)?,
                parse_var("HOME_LNG", &lng)?,
            )),
            _ => None,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            storage,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            home,
            map_zoom: match env::var("MAP_ZOOM") {
                Ok(raw) => parse_var("MAP_ZOOM", &raw)?,
                Err(_) => DEFAULT_ZOOM,
            },
            products_api_url: env::var("PRODUCTS_API_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(name, raw.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
