pub mod envfile;
pub mod github;

pub use envfile::{EnvFileError, EnvFileStore, VERSIONS_FILE_NAME};
pub use github::{GithubError, GithubReleases};
