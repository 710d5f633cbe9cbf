use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::domain::{Lookup, ReleaseSource, RepoId, Version};

const GITHUB_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "relver-cli";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur when interacting with the Github API
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("failed to create HTTP client")]
    ClientInit(#[source] reqwest::Error),

    #[error("failed to fetch {operation} from {url}")]
    Request {
        operation: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Github API returned status {status} for {url}")]
    ApiStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to parse response from {url}")]
    ParseResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("release at {url} has no tag_name")]
    MissingTagName { url: String },
}

/// Release structure returned by the Github releases API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: Option<String>,
}

/// Tag entry returned by the Github tags API, newest first
#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Release source backed by the Github REST API, unauthenticated
pub struct GithubReleases {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl GithubReleases {
    /// Create a client against the public Github API
    ///
    /// # Errors
    ///
    /// Returns `GithubError::ClientInit` if the HTTP client cannot be
    /// initialized.
    pub fn new() -> Result<Self, GithubError> {
        Self::with_base_url(GITHUB_API_BASE)
    }

    /// Create a client against a custom API base URL
    ///
    /// # Errors
    ///
    /// Returns `GithubError::ClientInit` if the HTTP client cannot be
    /// initialized.
    pub fn with_base_url(base_url: &str) -> Result<Self, GithubError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(GithubError::ClientInit)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Fetch the tag of the latest published release.
    ///
    /// A 404 means the repository has no published release and maps to
    /// `Lookup::NotFound`; any other non-success status is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with an
    /// unexpected status, or the response cannot be parsed.
    pub fn fetch_latest_release(&self, repo: &RepoId) -> Result<Lookup, GithubError> {
        let url = format!("{}/repos/{}/releases/latest", self.base_url, repo);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| GithubError::Request {
                operation: "latest release",
                url: url.clone(),
                source,
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }

        if !response.status().is_success() {
            return Err(GithubError::ApiStatus {
                status: response.status(),
                url,
            });
        }

        let release: Release = response
            .json()
            .map_err(|source| GithubError::ParseResponse {
                url: url.clone(),
                source,
            })?;

        match release.tag_name {
            Some(tag) => Ok(Lookup::Found(Version::from(tag))),
            None => Err(GithubError::MissingTagName { url }),
        }
    }

    /// Fetch the most recent tag of the repository.
    ///
    /// An empty tag list maps to `Lookup::NotFound`. Unlike the release
    /// lookup, a 404 here is an error: the repository itself is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the response cannot be parsed.
    pub fn fetch_first_tag(&self, repo: &RepoId) -> Result<Lookup, GithubError> {
        let url = format!("{}/repos/{}/tags", self.base_url, repo);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| GithubError::Request {
                operation: "tags",
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(GithubError::ApiStatus {
                status: response.status(),
                url,
            });
        }

        let tags: Vec<TagEntry> = response
            .json()
            .map_err(|source| GithubError::ParseResponse {
                url: url.clone(),
                source,
            })?;

        match tags.into_iter().next() {
            Some(tag) => Ok(Lookup::Found(Version::from(tag.name))),
            None => Ok(Lookup::NotFound),
        }
    }
}

impl ReleaseSource for GithubReleases {
    fn latest_release(&self, repo: &RepoId) -> Lookup {
        self.fetch_latest_release(repo)
            .unwrap_or_else(|e| Lookup::Error(e.to_string()))
    }

    fn first_tag(&self, repo: &RepoId) -> Lookup {
        self.fetch_first_tag(repo)
            .unwrap_or_else(|e| Lookup::Error(e.to_string()))
    }
}
