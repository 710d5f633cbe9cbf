pub mod component;
pub mod envfile;
pub mod resolution;

pub use component::{Component, ComponentSet, EnvKey, RepoId, Version};
pub use envfile::EnvFile;
pub use resolution::{FALLBACK_VERSION, Lookup, ReleaseSource, Resolution, VersionResolver};
