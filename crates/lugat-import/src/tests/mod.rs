
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use lugat_enrich::{EnrichError, Enricher, EnrichmentResult, ProviderMetadata};
use lugat_store::{CardSink, CheckpointError, CheckpointStore, SinkError};
use lugat_types::{EnrichedCard, ImportQueue};

/// In-memory checkpoint slot recording every cursor value it was saved
/// with. Scripted save calls can be made to fail like a full disk.
#[derive(Default)]
pub struct MemoryCheckpoint {
    slot: Mutex<Option<ImportQueue>>,
    saved_cursors: Mutex<Vec<usize>>,
    fail_saves: Mutex<Vec<u32>>,
    save_calls: AtomicU32,
}

impl MemoryCheckpoint {
    /// Reject the nth save call (1-based) with an IO error.
    pub fn failing_save(self, call: u32) -> Self {
        self.fail_saves.lock().unwrap().push(call);
        self
    }

    pub fn saved_cursors(&self) -> Vec<usize> {
        self.saved_cursors.lock().unwrap().clone()
    }
}

impl CheckpointStore for MemoryCheckpoint {
    fn save(&self, queue: &ImportQueue) -> Result<(), CheckpointError> {
        let call = self.save_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_saves.lock().unwrap().contains(&call) {
            return Err(CheckpointError::Io(std::io::Error::other(
                "checkpoint storage unavailable",
            )));
        }
        self.saved_cursors.lock().unwrap().push(queue.processed);
        *self.slot.lock().unwrap() = Some(queue.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<ImportQueue>, CheckpointError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn clear(&self) -> Result<(), CheckpointError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

/// Scripted enrichment service: per-word transient failure budgets and a
/// set of words that always fail hard.
#[derive(Default)]
pub struct FakeEnricher {
    transient_failures: Mutex<HashMap<String, u32>>,
    hard_failures: Mutex<HashSet<String>>,
    pub calls: AtomicU32,
}

impl FakeEnricher {
    pub fn fail_transiently(self, word: &str, times: u32) -> Self {
        self.transient_failures
            .lock()
            .unwrap()
            .insert(word.to_string(), times);
        self
    }

    pub fn fail_hard(self, word: &str) -> Self {
        self.hard_failures.lock().unwrap().insert(word.to_string());
        self
    }
}

#[async_trait::async_trait]
impl Enricher for FakeEnricher {
    async fn enrich(
        &self,
        word: &str,
        _language: lugat_types::TargetLanguage,
    ) -> Result<EnrichmentResult, EnrichError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.hard_failures.lock().unwrap().contains(word) {
            return Err(EnrichError::AuthenticationError);
        }

        let mut transient = self.transient_failures.lock().unwrap();
        if let Some(remaining) = transient.get_mut(word) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(EnrichError::RateLimitExceeded);
            }
        }

        Ok(EnrichmentResult {
            word: word.to_string(),
            translation: Some(format!("{word}-uz")),
            definition: Some(format!("definition of {word}")),
            example: None,
            ipa: None,
            audio: None,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            requires_api_key: false,
        }
    }
}

/// In-memory sink. Can reject scripted insert calls with a non-duplicate
/// error, and can enforce row uniqueness like the real store.
#[derive(Default)]
pub struct MemorySink {
    rows: Mutex<Vec<EnrichedCard>>,
    fail_calls: Mutex<Vec<u32>>,
    calls: AtomicU32,
    unique: bool,
}

impl MemorySink {
    /// Reject the nth insert call (1-based) with a retryable-looking
    /// storage error.
    pub fn failing_call(self, call: u32) -> Self {
        self.fail_calls.lock().unwrap().push(call);
        self
    }

    pub fn with_unique_constraint(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn rows(&self) -> Vec<EnrichedCard> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CardSink for MemorySink {
    async fn insert(&self, rows: &[EnrichedCard]) -> Result<(), SinkError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_calls.lock().unwrap().contains(&call) {
            return Err(SinkError::Rejected {
                status: 503,
                message: "storage unavailable".to_string(),
            });
        }

        let mut stored = self.rows.lock().unwrap();
        if self.unique {
            let clash = rows.iter().any(|row| {
                stored.iter().any(|existing| {
                    existing.word.to_lowercase() == row.word.to_lowercase()
                        && existing.language == row.language
                        && existing.batch_id == row.batch_id
                })
            });
            if clash {
                return Err(SinkError::Duplicate(
                    "duplicate key value violates unique constraint".to_string(),
                ));
            }
        }

        stored.extend_from_slice(rows);
        Ok(())
    }
}
