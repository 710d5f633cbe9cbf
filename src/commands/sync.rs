use indexmap::IndexMap;
use log::info;
use std::path::Path;
use thiserror::Error;

use crate::domain::{ComponentSet, EnvKey, ReleaseSource, Version, VersionResolver};
use crate::infrastructure::{EnvFileError, EnvFileStore};

/// Errors that can occur while running the sync command
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    EnvFile(#[from] EnvFileError),
}

/// Run the sync command: resolve a version for every component, then merge
/// the results into the versions file.
///
/// Resolution never fails a run; each component degrades to the fallback
/// version on its own. Only versions file I/O is fatal.
///
/// # Errors
///
/// Returns an error if the versions file cannot be read or written.
pub fn run<S: ReleaseSource>(
    source: S,
    components: &ComponentSet,
    versions_path: &Path,
) -> Result<(), SyncError> {
    if components.is_empty() {
        info!("No components configured.");
        return Ok(());
    }

    let resolver = VersionResolver::new(source);
    let mut updates: IndexMap<EnvKey, Version> = IndexMap::with_capacity(components.len());

    info!("Fetching latest versions...");
    for component in components.iter() {
        let resolution = resolver.resolve(&component.repo);
        info!("{}: {}", component.repo, resolution.version());
        updates.insert(component.key.clone(), resolution.version().clone());
    }

    let store = EnvFileStore::new(versions_path);
    let mut file = store.load()?;
    file.merge(&updates);
    store.save(&file)?;

    info!("Updated {}", versions_path.display());
    Ok(())
}
