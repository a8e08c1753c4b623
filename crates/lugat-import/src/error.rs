use lugat_store::CheckpointError;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The source did not parse into any entries. No checkpoint was created.
    #[error("Could not read word list: {0}")]
    Parse(String),

    /// One active import per client; finish or clear the current one first.
    #[error("An unfinished import already exists; resume or clear it first")]
    ActiveImportExists,

    #[error("No unfinished import to resume")]
    NoUnfinishedImport,

    /// Losing the checkpoint would silently lose progress, so a failed
    /// save/load aborts the run with the durable cursor untouched.
    #[error("Checkpoint storage failed: {0}")]
    Checkpoint(#[from] CheckpointError),

    /// Non-duplicate sink rejection. The checkpoint stays at the last
    /// committed chapter; `resume_import` retries from there.
    #[error("Persisting cards failed (import can be resumed): {0}")]
    Persistence(String),
}

impl ImportError {
    /// Whether a later `resume_import` can pick the run back up.
    pub fn is_resumable(&self) -> bool {
        matches!(
            self,
            ImportError::Persistence(_) | ImportError::Checkpoint(_)
        )
    }
}

/// Terminal summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Rows the sink accepted
    pub imported: usize,
    /// Words dropped: exhausted retries, hard failures, dedup, or rows
    /// the store already held
    pub skipped: usize,
    /// Entries scheduled (post-cap)
    pub total: usize,
}
