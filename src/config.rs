//! Application configuration - database location and media storage settings.
//!
//! Configuration is read from a TOML file, with environment variables
//! (`DATABASE_URL`, `MEDIA_ROOT`) taking precedence over file values so
//! deployments can override the file without editing it.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    /// Connection URL for the SQLite database.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Uploaded-file storage settings.
    #[serde(default)]
    pub media: MediaConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            media: MediaConfig::default(),
        }
    }
}

/// Where uploaded product images live on disk and how they are served.
#[derive(Deserialize, Debug, Clone)]
pub struct MediaConfig {
    /// Base filesystem directory for uploaded files (the media root).
    #[serde(default = "default_media_root")]
    pub root: PathBuf,
    /// URL prefix the surrounding application serves the media root under.
    #[serde(default = "default_media_base_url")]
    pub base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_media_root(),
            base_url: default_media_base_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://data/storefront.sqlite?mode=rwc".to_string()
}

fn default_media_root() -> PathBuf {
    PathBuf::from("media")
}

fn default_media_base_url() -> String {
    "/media".to_string()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path_ref, e)))?;
    let app_config: AppConfig = toml::from_str(&contents).map_err(|e| {
        Error::Config(format!(
            "Failed to parse TOML from config file {:?}: {}",
            path_ref, e
        ))
    })?;
    Ok(app_config)
}

/// Loads the application configuration with environment overrides applied.
///
/// Reads `.env` first (non-fatal if absent), then the TOML file named by
/// `STOREFRONT_CONFIG` (default `config.toml`). A missing file yields the
/// built-in defaults rather than an error.
pub fn load_app_configuration() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config_path =
        std::env::var("STOREFRONT_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let mut config = if Path::new(&config_path).exists() {
        load_config(&config_path)?
    } else {
        tracing::debug!(
            "No config file found at {}, falling back to defaults",
            config_path
        );
        AppConfig::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }
    if let Ok(root) = std::env::var("MEDIA_ROOT") {
        config.media.root = PathBuf::from(root);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_toml() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path)?;
        writeln!(
            file,
            "database_url = \"sqlite::memory:\"\n\n[media]\nroot = \"/srv/media\"\nbase_url = \"https://cdn.example.com/media\""
        )?;

        let config = load_config(&path)?;
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.media.root, PathBuf::from("/srv/media"));
        assert_eq!(config.media.base_url, "https://cdn.example.com/media");
        Ok(())
    }

    #[test]
    fn test_load_config_defaults_for_missing_fields() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_url = \"sqlite::memory:\"")?;

        let config = load_config(&path)?;
        assert_eq!(config.media.root, PathBuf::from("media"));
        assert_eq!(config.media.base_url, "/media");
        Ok(())
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_url = [not toml").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
