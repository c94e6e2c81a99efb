use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::version::VersionId;

/// Directory of per-version commit/tag message files.
///
/// One `<version>.txt` per release, authored by the operator before a release
/// is attempted. The store only reads; it never creates, mutates, or deletes
/// message files.
pub struct MessageStore {
    dir: PathBuf,
}

impl MessageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        MessageStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Versions that have a message file, sorted lexicographically by their
    /// rendered identifier.
    ///
    /// A missing directory or a directory with no matching files yields an
    /// empty list, not an error. Files whose stem is not a valid version
    /// identifier are skipped.
    pub fn list(&self) -> Result<Vec<VersionId>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(stem) = name.strip_suffix(".txt") else {
                continue;
            };
            if let Ok(version) = stem.parse::<VersionId>() {
                versions.push(version);
            }
        }

        versions.sort_by_key(|v| v.to_string());
        Ok(versions)
    }

    /// Path of the message file for `version`, whether or not it exists.
    pub fn path_for(&self, version: &VersionId) -> PathBuf {
        self.dir.join(version.file_name())
    }

    pub fn exists(&self, version: &VersionId) -> bool {
        self.path_for(version).is_file()
    }

    /// Full contents of the message file for `version`.
    ///
    /// A missing file is `VersionNotFound`, carrying the known versions as a
    /// remediation hint.
    pub fn read(&self, version: &VersionId) -> Result<String> {
        let path = self.path_for(version);
        if !path.is_file() {
            let known = self
                .list()?
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            return Err(ReleaseError::VersionNotFound {
                version: version.to_string(),
                known,
            });
        }
        Ok(fs::read_to_string(path)?)
    }

    /// First `max_lines` lines of the message, for plan previews.
    pub fn preview(&self, version: &VersionId, max_lines: usize) -> Result<Vec<String>> {
        let contents = self.read(version)?;
        Ok(contents
            .lines()
            .take(max_lines)
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, MessageStore) {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        let store = MessageStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_list_sorted_lexicographically() {
        let (_dir, store) = store_with(&[
            ("v0.2.0.txt", "second"),
            ("v0.1.0-alpha.txt", "first"),
            ("notes.md", "not a version"),
            ("README.txt", "stem is not a version"),
        ]);

        let versions: Vec<String> = store.list().unwrap().iter().map(|v| v.to_string()).collect();
        assert_eq!(versions, vec!["v0.1.0-alpha", "v0.2.0"]);
    }

    #[test]
    fn test_list_is_idempotent() {
        let (_dir, store) = store_with(&[("v0.1.0-alpha.txt", "a"), ("v0.2.0.txt", "b")]);

        let first = store.list().unwrap();
        let second = store.list().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let store = MessageStore::new("/nonexistent/release-messages");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_read_full_contents() {
        let message = "release v1.0.0\n\nfull notes body\n";
        let (_dir, store) = store_with(&[("v1.0.0.txt", message)]);

        let version: VersionId = "v1.0.0".parse().unwrap();
        assert!(store.exists(&version));
        assert_eq!(store.read(&version).unwrap(), message);
    }

    #[test]
    fn test_read_missing_version_lists_known() {
        let (_dir, store) = store_with(&[("v0.1.0.txt", "a"), ("v0.2.0.txt", "b")]);

        let missing: VersionId = "v9.9.9".parse().unwrap();
        let err = store.read(&missing).unwrap_err();
        match err {
            ReleaseError::VersionNotFound { version, known } => {
                assert_eq!(version, "v9.9.9");
                assert_eq!(known, vec!["v0.1.0", "v0.2.0"]);
            }
            other => panic!("expected VersionNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_preview_takes_first_lines() {
        let (_dir, store) = store_with(&[("v1.0.0.txt", "summary\n\nbody line\nmore\n")]);

        let version: VersionId = "v1.0.0".parse().unwrap();
        let preview = store.preview(&version, 2).unwrap();
        assert_eq!(preview, vec!["summary".to_string(), "".to_string()]);
    }
}
