//! Decision loaders
//!
//! A loader turns a decision key into document bytes. The engine calls it
//! for top-level keys and for every sub-decision a `decisionNode` names.

use anyhow::{bail, Context};
use path_absolutize::Absolutize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Source of decision documents
pub trait DecisionLoader: Send + Sync {
    /// Load the raw JSON or YAML document stored under `key`
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

impl<F> DecisionLoader for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self(key)
    }
}

/// Loads documents from files under a root directory
///
/// Keys are paths relative to the root. Keys that resolve outside of the
/// root (absolute paths, `..` segments) are rejected.
///
/// # Example
/// ```no_run
/// use verdict_sdk::FilesystemLoader;
///
/// let loader = FilesystemLoader::new("decisions").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemLoader {
    root: PathBuf,
}

impl FilesystemLoader {
    /// Create a loader rooted at an existing directory
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let path = root.as_ref();

        if !path.is_dir() {
            bail!("decision root '{}' is not a directory", path.display());
        }

        let root = path
            .absolutize()
            .with_context(|| format!("failed to absolutize '{}'", path.display()))?
            .to_path_buf();

        Ok(Self { root })
    }

    /// Absolute root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path inside the root
    fn resolve(&self, key: &str) -> anyhow::Result<PathBuf> {
        if Path::new(key).is_absolute() {
            bail!("decision key '{}' must be relative", key);
        }

        let path = self
            .root
            .join(key)
            .absolutize()
            .with_context(|| format!("failed to resolve decision key '{}'", key))?
            .to_path_buf();

        if !path.starts_with(&self.root) {
            bail!("decision key '{}' escapes the loader root", key);
        }
        Ok(path)
    }
}

impl DecisionLoader for FilesystemLoader {
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.resolve(key)?;
        tracing::debug!("Loading decision '{}' from {}", key, path.display());
        std::fs::read(&path).with_context(|| format!("failed to read '{}'", path.display()))
    }
}

/// Loads documents from an in-memory map
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document (builder form)
    pub fn with(mut self, key: impl Into<String>, document: impl Into<Vec<u8>>) -> Self {
        self.insert(key, document);
        self
    }

    /// Add or replace a document
    pub fn insert(&mut self, key: impl Into<String>, document: impl Into<Vec<u8>>) {
        self.documents.insert(key.into(), document.into());
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DecisionLoader for MemoryLoader {
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        match self.documents.get(key) {
            Some(document) => Ok(document.clone()),
            None => bail!("decision '{}' not found", key),
        }
    }
}
