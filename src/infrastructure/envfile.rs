use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::EnvFile;

pub const VERSIONS_FILE_NAME: &str = "versions.env";

/// Errors that can occur when working with the versions file
#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("failed to read versions file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write versions file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File-backed store for the versions file
#[derive(Debug)]
pub struct EnvFileStore {
    path: PathBuf,
}

impl EnvFileStore {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the versions file. A missing file is not an error: it loads as
    /// empty so the first run can create it.
    ///
    /// # Errors
    ///
    /// Returns `EnvFileError::Read` if the file exists but cannot be read.
    pub fn load(&self) -> Result<EnvFile, EnvFileError> {
        if !self.path.exists() {
            return Ok(EnvFile::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| EnvFileError::Read {
            path: self.path.clone(),
            source,
        })?;

        Ok(EnvFile::from_content(&content))
    }

    /// Write the versions file back to disk.
    ///
    /// # Errors
    ///
    /// Returns `EnvFileError::Write` if the file cannot be written.
    pub fn save(&self, file: &EnvFile) -> Result<(), EnvFileError> {
        fs::write(&self.path, file.to_content()).map_err(|source| EnvFileError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
