//! Builder for creating and configuring [`Upkeep`] instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Upkeep;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
};

/// Builder for creating and configuring Upkeep instances.
#[derive(Debug, Clone, Default)]
pub struct UpkeepBuilder {
    database_path: Option<PathBuf>,
}

impl UpkeepBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/upkeep/upkeep.db` or `~/.local/share/upkeep/upkeep.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Creates the parent directory, opens the database once to apply the
    /// schema, and returns the façade.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::FileSystem` if the parent directory cannot be
    /// created, `UpkeepError::XdgDirectory` if no default path can be
    /// resolved and `UpkeepError::Database` if initialization fails.
    pub async fn build(self) -> Result<Upkeep> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| UpkeepError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(|_| ()))
            .await
            .map_err(UpkeepError::join)??;

        log::debug!("Using database at {}", db_path.display());
        Ok(Upkeep::new(db_path))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("upkeep")
            .place_data_file("upkeep.db")
            .map_err(|e| UpkeepError::XdgDirectory(e.to_string()))
    }
}
