use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::DataLoadError;
use super::loader::load_csv;
use super::model::Dataset;

/// Lazily loaded, explicitly owned dataset slot.
///
/// The first [`get`](Self::get) parses the file; later calls hand out the
/// same `Arc` without touching the disk.  [`invalidate`](Self::invalidate)
/// is the only way to force a re-read.  Failed loads leave the slot empty,
/// so the next `get` retries.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    slot: Option<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            slot: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.is_some()
    }

    pub fn get(&mut self) -> Result<Arc<Dataset>, DataLoadError> {
        if let Some(ds) = &self.slot {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load_csv(&self.path)?);
        self.slot = Some(Arc::clone(&ds));
        Ok(ds)
    }

    /// Drop the cached dataset; the next `get` re-reads the file.
    pub fn invalidate(&mut self) {
        if self.slot.take().is_some() {
            log::info!("Dataset cache invalidated ({})", self.path.display());
        }
    }

    /// Point the cache at another file.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.invalidate();
        self.path = path.into();
    }
}
