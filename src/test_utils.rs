#![allow(dead_code)]
use crate::config::MediaConfig;
use crate::db;
use crate::errors::Result;
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer() // Crucial for `cargo test` output
        .try_init(); // Use try_init to avoid panic if already initialized
}

// Helper to create a fresh in-memory database with the schema applied
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    db::create_tables(&db).await?;
    Ok(db)
}

// Helper media config rooted in a scratch directory; keep the TempDir alive
// for the duration of the test or the folder disappears underneath it
pub(crate) fn test_media_config() -> Result<(TempDir, MediaConfig)> {
    let dir = tempfile::tempdir()?;
    let config = MediaConfig {
        root: dir.path().to_path_buf(),
        base_url: "/media".to_string(),
    };
    Ok((dir, config))
}
