use std::fs;
use std::path::PathBuf;

use lugat_types::ImportQueue;

#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("Checkpoint IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Checkpoint serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable storage for the single active import queue. Writes must be
/// complete before they return; every chapter boundary depends on it.
pub trait CheckpointStore: Send + Sync {
    fn save(&self, queue: &ImportQueue) -> Result<(), CheckpointError>;
    fn load(&self) -> Result<Option<ImportQueue>, CheckpointError>;
    fn clear(&self) -> Result<(), CheckpointError>;
}

/// One JSON file holding the queue; replaced atomically via a temp file
/// so a crash mid-write never leaves a torn checkpoint behind.
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn save(&self, queue: &ImportQueue) -> Result<(), CheckpointError> {
        let tmp = self.tmp_path();
        fs::write(&tmp, serde_json::to_vec(queue)?)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(
            "Checkpoint saved: batch={} processed={}/{}",
            queue.batch_id,
            queue.processed,
            queue.entries.len()
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<ImportQueue>, CheckpointError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn clear(&self) -> Result<(), CheckpointError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
