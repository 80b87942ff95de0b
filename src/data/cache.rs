use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::LoadError;
use super::loader::load_file;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Session cache for the loaded table
// ---------------------------------------------------------------------------

struct CacheEntry {
    path: PathBuf,
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

/// Holds the most recently loaded dataset as an immutable snapshot.
///
/// The file is only re-read when a different path is requested or the
/// backing file's modification time changed.
#[derive(Default)]
pub struct DatasetCache {
    entry: Option<CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset at `path`, loading it if the cache is cold or stale.
    ///
    /// On error the previously cached snapshot is kept.
    pub fn get(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let io_err = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };
        let canonical = std::fs::canonicalize(path).map_err(io_err)?;
        let modified = std::fs::metadata(&canonical)
            .map_err(io_err)?
            .modified()
            .ok();

        if let Some(entry) = &self.entry {
            if entry.path == canonical && entry.modified == modified {
                log::debug!("dataset cache hit for {}", canonical.display());
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let dataset = Arc::new(load_file(&canonical)?);
        log::info!(
            "Loaded {} locations from {} ({} companies, {} countries)",
            dataset.len(),
            canonical.display(),
            dataset.companies.len(),
            dataset.countries.len()
        );

        self.entry = Some(CacheEntry {
            path: canonical,
            modified,
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }

    /// Path of the cached snapshot, if any.
    pub fn path(&self) -> Option<&Path> {
        self.entry.as_ref().map(|e| e.path.as_path())
    }
}
