use log::{debug, warn};

use super::{RepoId, Version};

/// Version written when neither a release nor a tag can be determined
pub const FALLBACK_VERSION: &str = "main";

/// Outcome of a single lookup against a release source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The source returned a usable version
    Found(Version),
    /// The source answered, but has nothing: no published release, or an
    /// empty tag list
    NotFound,
    /// The lookup itself failed, with reason
    Error(String),
}

/// Trait for querying published releases and tags of a repository
pub trait ReleaseSource {
    /// Look up the tag of the latest published release
    fn latest_release(&self, repo: &RepoId) -> Lookup;

    /// Look up the most recent tag, used when no release is published
    fn first_tag(&self, repo: &RepoId) -> Lookup;
}

/// How a version was determined for a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Tag of the latest published release
    Release(Version),
    /// Most recent tag of a repository with no published release
    Tag(Version),
    /// Neither stage produced a version
    Fallback(Version),
}

impl Resolution {
    #[must_use]
    pub fn version(&self) -> &Version {
        match self {
            Self::Release(version) | Self::Tag(version) | Self::Fallback(version) => version,
        }
    }
}

/// Resolves repositories to a version, falling back through releases, tags,
/// and finally [`FALLBACK_VERSION`]
pub struct VersionResolver<S: ReleaseSource> {
    source: S,
}

impl<S: ReleaseSource> VersionResolver<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolve a repository to a version. Always produces one: any failure
    /// degrades to [`Resolution::Fallback`] after logging the reason.
    pub fn resolve(&self, repo: &RepoId) -> Resolution {
        debug!("Resolving {repo}");

        match self.source.latest_release(repo) {
            Lookup::Found(version) => Resolution::Release(version),
            Lookup::Error(reason) => {
                warn!("Failed to fetch latest release for {repo}: {reason}");
                fall_back(repo)
            }
            Lookup::NotFound => match self.source.first_tag(repo) {
                Lookup::Found(version) => Resolution::Tag(version),
                // An empty tag list is an answer, not a failure; only the
                // fallback itself gets logged.
                Lookup::NotFound => fall_back(repo),
                Lookup::Error(reason) => {
                    warn!("Failed to fetch tags for {repo}: {reason}");
                    fall_back(repo)
                }
            },
        }
    }
}

fn fall_back(repo: &RepoId) -> Resolution {
    warn!("Falling back to \"{FALLBACK_VERSION}\" for {repo}");
    Resolution::Fallback(Version::from(FALLBACK_VERSION))
}
