use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{Component, ComponentSet, EnvKey, RepoId};
use crate::infrastructure::VERSIONS_FILE_NAME;

/// Errors that can occur while assembling the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to locate the current executable")]
    Executable(#[source] std::io::Error),

    #[error("cannot determine install directory from {}", path.display())]
    InstallDir { path: PathBuf },
}

/// Application configuration: the tracked components and the versions file
/// they are written to
#[derive(Debug, Clone)]
pub struct Config {
    pub components: ComponentSet,
    pub versions_path: PathBuf,
}

impl Config {
    /// Assemble the configuration, resolving the versions file path.
    ///
    /// Without an override the file lives one directory above the directory
    /// containing the executable, next to the installed components.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable path cannot be determined or has no
    /// grandparent directory.
    pub fn load(file_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let versions_path = match file_override {
            Some(path) => path,
            None => default_versions_path()?,
        };

        Ok(Self {
            components: builtin_components(),
            versions_path,
        })
    }
}

/// The fixed set of tracked components, in versions file order
#[must_use]
pub fn builtin_components() -> ComponentSet {
    ComponentSet::new(vec![
        Component::new(
            EnvKey::from("FRONTEND_VERSION"),
            RepoId::from("kiliansen/clogsweb"),
        ),
        Component::new(
            EnvKey::from("BACKEND_VERSION"),
            RepoId::from("kiliansen/clogsserver"),
        ),
        Component::new(
            EnvKey::from("AGENTS_VERSION"),
            RepoId::from("kiliansen/clogsagent"),
        ),
    ])
}

fn default_versions_path() -> Result<PathBuf, ConfigError> {
    let exe = env::current_exe().map_err(ConfigError::Executable)?;

    let install_root = exe
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| ConfigError::InstallDir { path: exe.clone() })?;

    Ok(install_root.join(VERSIONS_FILE_NAME))
}
