// Rust guideline compliant 2026-08-05

//! Data directory discovery and path management.

use crate::error::{AppError, Result};
use campus_core::{Config, Storage};
use std::path::{Path, PathBuf};

/// Path metadata for a campus data directory.
#[derive(Debug, Clone)]
pub struct DataContext {
    root: PathBuf,
    campus_dir: PathBuf,
    students_path: PathBuf,
    config_path: PathBuf,
}

impl DataContext {
    /// Discovers a campus data directory starting from an optional root.
    ///
    /// # Arguments
    ///
    /// * `root` - Optional root to pin discovery; defaults to the
    ///   current directory
    ///
    /// # Returns
    ///
    /// A `DataContext` with resolved paths.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The root cannot be resolved
    /// - The `.campus` directory is missing
    pub fn discover(root: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let campus_dir = root.join(".campus");
        if !campus_dir.exists() {
            return Err(AppError::StoreNotInitialized {
                path: campus_dir.clone(),
            });
        }

        Ok(Self {
            root,
            students_path: campus_dir.join("students.jsonl"),
            config_path: campus_dir.join("config.toml"),
            campus_dir,
        })
    }

    /// Initializes a campus data directory at the given root.
    ///
    /// Creates `.campus/` and writes a default `config.toml` if one does
    /// not exist yet; an already-initialized directory is left as is.
    ///
    /// # Arguments
    ///
    /// * `root` - The root under which `.campus` is created
    ///
    /// # Returns
    ///
    /// A `DataContext` for the initialized directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or config cannot be created.
    pub fn init(root: &Path) -> Result<Self> {
        let campus_dir = root.join(".campus");
        std::fs::create_dir_all(&campus_dir)?;

        let config_path = campus_dir.join("config.toml");
        if !config_path.exists() {
            Config::default().save(&campus_dir)?;
        }

        Self::discover(Some(root))
    }

    /// Returns the root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Returns the `.campus` directory path.
    #[must_use]
    pub fn campus_dir(&self) -> &Path {
        self.campus_dir.as_path()
    }

    /// Returns the students JSONL path.
    #[must_use]
    pub fn students_path(&self) -> &Path {
        self.students_path.as_path()
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        self.config_path.as_path()
    }

    /// Opens storage for the students file.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be initialized.
    pub fn open_storage(&self) -> Result<Storage> {
        Ok(Storage::new(self.students_path.clone())?)
    }

    /// Loads the configuration for this data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(self.campus_dir())?)
    }
}
