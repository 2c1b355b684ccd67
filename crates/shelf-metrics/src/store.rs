//! Date-keyed snapshot storage.

use shelf_common::{Metrics, Result, ShelfError, SnapshotKey};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

/// Append-only collection of snapshots keyed by date.
pub trait SnapshotStore {
    /// Every stored key, ascending.
    fn list(&self) -> Result<Vec<SnapshotKey>>;

    /// The snapshot stored under `key`.
    fn read(&self, key: SnapshotKey) -> Result<Metrics>;

    /// Store `metrics` under `key`, replacing any previous snapshot.
    fn write(&self, key: SnapshotKey, metrics: &Metrics) -> Result<()>;
}

/// Snapshots as `<dir>/YYYY-MM-DD.json` files.
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    dir: PathBuf,
}

impl FsSnapshotStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: SnapshotKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FsSnapshotStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn list(&self) -> Result<Vec<SnapshotKey>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(ShelfError::store_with_source(
                    format!("Failed to list {}", self.dir.display()),
                    err,
                ))
            }
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match stem.parse::<SnapshotKey>() {
                Ok(key) => keys.push(key),
                Err(_) => debug!(file = %path.display(), "Ignoring non-snapshot file"),
            }
        }

        keys.sort_unstable();
        debug!(count = keys.len(), "Listed snapshots");
        Ok(keys)
    }

    fn read(&self, key: SnapshotKey) -> Result<Metrics> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ShelfError::snapshot_not_found(key))
            }
            Err(err) => {
                return Err(ShelfError::store_with_source(
                    format!("Failed to read {}", path.display()),
                    err,
                ))
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            ShelfError::store_with_source(format!("Snapshot {} is not valid JSON", path.display()), e)
        })
    }

    #[instrument(skip(self, metrics), fields(dir = %self.dir.display()))]
    fn write(&self, key: SnapshotKey, metrics: &Metrics) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let mut body = serde_json::to_vec_pretty(metrics)?;
        body.push(b'\n');

        let target = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| {
            ShelfError::store_with_source(format!("Failed to persist {}", target.display()), e)
        })?;

        info!(path = %target.display(), "Wrote snapshot");
        Ok(())
    }
}
