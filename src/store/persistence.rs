use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::store::frequency::FrequencyStore;
use crate::store::snapshot::StoreSnapshot;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String),
    #[error("Snapshot version mismatch: snapshot says {expected}, counts hash to {actual}")]
    VersionMismatch { expected: String, actual: String },
    #[error("Inconsistent snapshot: {0}")]
    Inconsistent(String),
}

/// Write a snapshot of `store` to `path`.
///
/// The snapshot is written to a sibling temp file, synced, then renamed over
/// `path`, so readers see either the previous snapshot or the new one.
pub fn save_snapshot(store: &FrequencyStore, path: &Path) -> Result<StoreSnapshot, PersistenceError> {
    let snapshot = store.dump();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path, &snapshot);

    // Clean up any stale temp file from a crashed previous save of THIS version
    if temp_path.exists() {
        fs::remove_file(&temp_path)?;
    }

    let f = fs::File::create(&temp_path)?;
    serde_json::to_writer_pretty(&f, &snapshot)?;
    f.sync_all()?;

    fs::rename(&temp_path, path)?;

    info!(
        path = %path.display(),
        version = %snapshot.version,
        categories = snapshot.categories.len(),
        training_count = snapshot.training_count,
        "snapshot saved"
    );

    Ok(snapshot)
}

/// Read a snapshot file without restoring it.
pub fn read_snapshot(path: &Path) -> Result<StoreSnapshot, PersistenceError> {
    let f = fs::File::open(path)?;
    let snapshot: StoreSnapshot = serde_json::from_reader(std::io::BufReader::new(f))?;
    Ok(snapshot)
}

/// Read and verify a snapshot file, restoring the store it describes.
pub fn load_snapshot(path: &Path) -> Result<FrequencyStore, PersistenceError> {
    let snapshot = read_snapshot(path)?;
    let version = snapshot.version.clone();

    match FrequencyStore::load(snapshot) {
        Ok(store) => {
            info!(
                path = %path.display(),
                version = %version,
                categories = store.category_count(),
                training_count = store.train_count(None),
                "snapshot loaded"
            );
            Ok(store)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "snapshot rejected");
            Err(err)
        }
    }
}

// Deterministic-but-unique: the first 12 hex chars of the snapshot version
fn temp_path_for(path: &Path, snapshot: &StoreSnapshot) -> PathBuf {
    let fragment = snapshot
        .version
        .as_str()
        .strip_prefix("sha256:")
        .and_then(|hex| hex.get(..12))
        .unwrap_or("snapshot");

    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".tmp.{fragment}"));

    path.with_file_name(name)
}
