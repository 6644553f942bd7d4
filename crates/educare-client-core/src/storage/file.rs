use anyhow::Context as _;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tracing::debug;

use super::KeyValueStore;

/// Stores all items in a single RON file. Every write replaces the file as a
/// whole so a crash never leaves it half written.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> anyhow::Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            debug!(path = ?self.path, "no storage file yet");
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read storage file: {:?}", self.path))?;
        ron::from_str(&contents)
            .with_context(|| format!("failed to parse storage file: {:?}", self.path))
    }

    fn save(&self, items: &BTreeMap<String, String>) -> anyhow::Result<()> {
        let contents = ron::ser::to_string_pretty(items, Default::default())
            .context("failed to serialize storage items")?;
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, contents)
            .with_context(|| format!("failed to write {temp_path:?}"))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("failed to replace storage file: {:?}", self.path))
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}
