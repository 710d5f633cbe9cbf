use indexmap::IndexMap;
use std::collections::HashSet;

use super::{EnvKey, Version};

/// In-memory contents of a versions file, kept as raw lines.
///
/// Each line retains its trailing newline so that unmatched lines round-trip
/// byte-for-byte through a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    lines: Vec<String>,
}

impl EnvFile {
    /// Parse file content into lines, preserving line terminators
    #[must_use]
    pub fn from_content(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(String::from).collect(),
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Serialize back to file content
    #[must_use]
    pub fn to_content(&self) -> String {
        self.lines.concat()
    }

    /// Merge updates into the file: every line starting with `key=` for a key
    /// in `updates` is replaced with the new assignment, all other lines pass
    /// through verbatim, and keys with no existing assignment are appended at
    /// the end in the map's insertion order.
    pub fn merge(&mut self, updates: &IndexMap<EnvKey, Version>) {
        let mut merged = Vec::with_capacity(self.lines.len() + updates.len());
        let mut found: HashSet<&EnvKey> = HashSet::new();

        for line in &self.lines {
            match updates.iter().find(|(key, _)| is_assignment_of(line, key)) {
                Some((key, version)) => {
                    merged.push(format!("{key}={version}\n"));
                    found.insert(key);
                }
                None => merged.push(line.clone()),
            }
        }

        for (key, version) in updates {
            if !found.contains(key) {
                merged.push(format!("{key}={version}\n"));
            }
        }

        self.lines = merged;
    }
}

/// True when the line assigns exactly `key` (prefix `key=`). A key appearing
/// anywhere else in the line (e.g. `# KEY=...` or `XKEY=...`) never matches.
fn is_assignment_of(line: &str, key: &EnvKey) -> bool {
    line.strip_prefix(key.as_str())
        .is_some_and(|rest| rest.starts_with('='))
}
