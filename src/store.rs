//! Persisted layouts, keyed by screen fingerprint.
//!
//! Operations receive a [`LayoutRepository`] handle and call `load`/`save`
//! explicitly; nothing here is global.

use crate::error::{LayoutError, Result};
use crate::model::{Layout, ScreenFingerprint};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutStore {
    layouts: BTreeMap<ScreenFingerprint, Layout>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fingerprint: &ScreenFingerprint) -> Option<&Layout> {
        self.layouts.get(fingerprint)
    }

    pub fn insert(&mut self, fingerprint: ScreenFingerprint, layout: Layout) {
        self.layouts.insert(fingerprint, layout);
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn from_json(path: &Path, contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::new());
        }
        let layouts = serde_json::from_str(contents).map_err(|source| LayoutError::StoreCorrupt {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { layouts })
    }

    pub fn to_json(&self) -> String {
        // BTreeMap of plain data; serialisation cannot fail
        let mut json = serde_json::to_string_pretty(&self.layouts).unwrap_or_default();
        json.push('\n');
        json
    }
}

pub trait LayoutRepository: Send + Sync {
    fn load(&self) -> Result<LayoutStore>;
    fn save(&self, store: &LayoutStore) -> Result<()>;
}

/// Pretty-printed JSON file, replaced atomically on save
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<cache dir>/windowlayouts/windowlayouts.json`
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("windowlayouts")
            .join("windowlayouts.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_err(&self, source: std::io::Error) -> LayoutError {
        LayoutError::StoreWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl LayoutRepository for JsonFileRepository {
    fn load(&self) -> Result<LayoutStore> {
        if !self.path.exists() {
            debug!("No store file at {:?} yet", self.path);
            return Ok(LayoutStore::new());
        }

        info!("Loading stored layouts from {:?}", self.path);
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| LayoutError::StoreUnreadable {
                path: self.path.clone(),
                source,
            })?;
        let store = LayoutStore::from_json(&self.path, &contents)?;
        debug!("{} stored layout(s)", store.len());
        Ok(store)
    }

    fn save(&self, store: &LayoutStore) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.write_err(e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.write_err(e))?;
        tmp.write_all(store.to_json().as_bytes())
            .map_err(|e| self.write_err(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.write_err(e.error))?;

        info!("Stored {} layout(s) to {:?}", store.len(), self.path);
        Ok(())
    }
}

/// Reads through to another repository but never writes
pub struct DryRunRepository<R> {
    inner: R,
}

impl<R: LayoutRepository> DryRunRepository<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: LayoutRepository> LayoutRepository for DryRunRepository<R> {
    fn load(&self) -> Result<LayoutStore> {
        self.inner.load()
    }

    fn save(&self, store: &LayoutStore) -> Result<()> {
        info!("Dry-run: would store {} layout(s)", store.len());
        debug!("Dry-run store contents:\n{}", store.to_json());
        Ok(())
    }
}

/// In-memory repository for tests
#[cfg(test)]
#[derive(Default)]
pub struct MemoryRepository {
    pub store: parking_lot::Mutex<LayoutStore>,
    pub saves: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl LayoutRepository for MemoryRepository {
    fn load(&self) -> Result<LayoutStore> {
        Ok(self.store.lock().clone())
    }

    fn save(&self, store: &LayoutStore) -> Result<()> {
        *self.store.lock() = store.clone();
        self.saves.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
impl LayoutRepository for std::sync::Arc<MemoryRepository> {
    fn load(&self) -> Result<LayoutStore> {
        self.as_ref().load()
    }

    fn save(&self, store: &LayoutStore) -> Result<()> {
        self.as_ref().save(store)
    }
}
