use std::fmt;

/// Key of a versions file entry (e.g., "FRONTEND_VERSION")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvKey(pub String);

impl EnvKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EnvKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EnvKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Github repository in "owner/name" form (e.g., "kiliansen/clogsweb")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId(pub String);

impl RepoId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RepoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A version reference (e.g., "v2.1.0", a tag name, or a branch like "main")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(pub String);

impl Version {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Version {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A tracked component: the versions file key paired with the repository
/// whose releases drive it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub key: EnvKey,
    pub repo: RepoId,
}

impl Component {
    #[must_use]
    pub fn new(key: EnvKey, repo: RepoId) -> Self {
        Self { key, repo }
    }
}

/// Ordered collection of components. Order determines both the fetch order
/// and the order in which missing keys are appended to the versions file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSet(Vec<Component>);

impl ComponentSet {
    #[must_use]
    pub fn new(components: Vec<Component>) -> Self {
        Self(components)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
