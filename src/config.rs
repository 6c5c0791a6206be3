//! Application configuration management.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Global configuration instance.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Root folder holding both tape sides, served under `/musics`.
    pub music_dir: PathBuf,
    /// Side A folder name, relative to `music_dir`.
    pub side_a_dir: String,
    /// Side B folder name, relative to `music_dir`.
    pub side_b_dir: String,
    /// Folder receiving extracted cover images, served under `/covers`.
    pub covers_dir: PathBuf,
    /// Folder holding the player UI.
    pub public_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json or pretty).
    pub log_format: LogFormat,
    /// Allowed CORS origins (comma-separated, or * for all).
    pub cors_origins: Vec<String>,
}

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable colored output.
    Pretty,
    /// JSON structured logging for production.
    Json,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if `PORT` is not a valid port number.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16");

        let music_dir =
            PathBuf::from(std::env::var("MUSIC_DIR").unwrap_or_else(|_| "./musics".to_string()));

        let side_a_dir = std::env::var("SIDE_A_DIR").unwrap_or_else(|_| "sideA".to_string());
        let side_b_dir = std::env::var("SIDE_B_DIR").unwrap_or_else(|_| "sideB".to_string());

        let covers_dir =
            PathBuf::from(std::env::var("COVERS_DIR").unwrap_or_else(|_| "./covers".to_string()));

        let public_dir =
            PathBuf::from(std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "./public".to_string()));

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port,
            music_dir,
            side_a_dir,
            side_b_dir,
            covers_dir,
            public_dir,
            log_level,
            log_format,
            cors_origins,
        }
    }

    /// Validate the configuration.
    ///
    /// Missing side folders are not an error: they scan as empty sides.
    ///
    /// # Errors
    /// Returns an error if the covers folder cannot be created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for side_dir in [self.side_a_path(), self.side_b_path()] {
            if !side_dir.is_dir() {
                tracing::warn!(
                    path = %side_dir.display(),
                    "Side folder not found, it will scan as empty"
                );
            }
        }

        if self.covers_dir.exists() && !self.covers_dir.is_dir() {
            return Err(ConfigError::CoversDirNotDirectory(
                self.covers_dir.display().to_string(),
            ));
        }

        if !self.covers_dir.exists() {
            std::fs::create_dir_all(&self.covers_dir).map_err(|e| {
                ConfigError::CoversDirCreationFailed(self.covers_dir.display().to_string(), e)
            })?;
        }

        if !self.public_dir.is_dir() {
            tracing::warn!(path = %self.public_dir.display(), "Player UI folder not found");
        }

        Ok(())
    }

    /// Full path of the side A folder.
    pub fn side_a_path(&self) -> PathBuf {
        self.music_dir.join(&self.side_a_dir)
    }

    /// Full path of the side B folder.
    pub fn side_b_path(&self) -> PathBuf {
        self.music_dir.join(&self.side_b_dir)
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Covers path is not a directory: {0}")]
    CoversDirNotDirectory(String),

    #[error("Failed to create covers directory '{0}': {1}")]
    CoversDirCreationFailed(String, std::io::Error),
}

/// Initialize the global configuration.
///
/// Should be called once at application startup.
pub fn init() -> &'static Config {
    CONFIG.get_or_init(|| {
        dotenvy::dotenv().ok();
        Config::from_env()
    })
}
