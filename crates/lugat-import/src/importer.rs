use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use kanal::AsyncSender;
use lugat_config::import::ImportConfig;
use lugat_core::chapter;
use lugat_core::cleanup::{clean_field, compose_back};
use lugat_core::normalize::dedup_key;
use lugat_enrich::{EnrichError, Enricher, EnrichmentResult, with_retry};
use lugat_parser::ParsedList;
use lugat_store::{CardSink, CheckpointStore, SinkError};
use lugat_types::{EnrichedCard, ImportEvent, ImportQueue, MAX_ENTRIES, RawEntry, TargetLanguage};
use uuid::Uuid;

use crate::error::{ImportError, ImportOutcome};

/// The import pipeline: parses a word list into a checkpointed queue and
/// drives it chapter by chapter through enrichment into the card sink.
///
/// One `Importer` owns one checkpoint slot; a second import cannot start
/// while a queue is saved there.
pub struct Importer {
    config: ImportConfig,
    enricher: Arc<dyn Enricher>,
    sink: Arc<dyn CardSink>,
    checkpoint: Arc<dyn CheckpointStore>,
    owner: Uuid,
    events: Option<AsyncSender<ImportEvent>>,
}

impl Importer {
    pub fn new(
        config: ImportConfig,
        enricher: Arc<dyn Enricher>,
        sink: Arc<dyn CardSink>,
        checkpoint: Arc<dyn CheckpointStore>,
        owner: Uuid,
    ) -> Self {
        Self {
            config,
            enricher,
            sink,
            checkpoint,
            owner,
            events: None,
        }
    }

    /// Attach a progress channel; events are dropped if nobody listens.
    pub fn with_events(mut self, events: AsyncSender<ImportEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Start an import from raw PDF bytes.
    pub async fn start_import_pdf(
        &self,
        pdf_bytes: &[u8],
        file_name: &str,
        batch_id: Option<String>,
        language: TargetLanguage,
    ) -> Result<ImportOutcome, ImportError> {
        let list = lugat_parser::parse_pdf(pdf_bytes).map_err(|e| ImportError::Parse(e.to_string()))?;
        self.start_with_list(list, file_name, batch_id, language).await
    }

    /// Start an import from already-extracted text.
    pub async fn start_import_text(
        &self,
        text: &str,
        file_name: &str,
        batch_id: Option<String>,
        language: TargetLanguage,
    ) -> Result<ImportOutcome, ImportError> {
        let list = lugat_parser::parse_text(text);
        self.start_with_list(list, file_name, batch_id, language).await
    }

    /// Continue an interrupted import from its last chapter boundary.
    pub async fn resume_import(&self) -> Result<ImportOutcome, ImportError> {
        let queue = self
            .checkpoint
            .load()?
            .ok_or(ImportError::NoUnfinishedImport)?;

        tracing::info!(
            "Resuming batch {} at {}/{}",
            queue.batch_id,
            queue.processed,
            queue.entries.len()
        );
        self.run_queue(queue).await
    }

    /// Whether a saved queue is waiting to be resumed.
    pub fn has_unfinished_import(&self) -> Result<bool, ImportError> {
        Ok(self.checkpoint.load()?.is_some())
    }

    /// Abandon the saved queue, if any.
    pub fn clear_queue(&self) -> Result<(), ImportError> {
        self.checkpoint.clear()?;
        Ok(())
    }

    async fn start_with_list(
        &self,
        mut list: ParsedList,
        file_name: &str,
        batch_id: Option<String>,
        language: TargetLanguage,
    ) -> Result<ImportOutcome, ImportError> {
        for warning in &list.warnings {
            tracing::warn!("Parser: {warning}");
        }

        if list.entries.is_empty() {
            return Err(ImportError::Parse(list.warnings.join("; ")));
        }

        if self.checkpoint.load()?.is_some() {
            return Err(ImportError::ActiveImportExists);
        }

        let cap = self.config.max_entries.min(MAX_ENTRIES);
        if list.entries.len() > cap {
            tracing::warn!("Entry list capped at {cap} (was {})", list.entries.len());
            list.entries.truncate(cap);
        }

        let batch_id = batch_id.unwrap_or_else(|| derive_batch_id(file_name));
        let queue = ImportQueue::new(batch_id, language, list.entries);

        // The checkpoint exists before the first network call; from here
        // on, any crash leaves a resumable queue behind.
        self.checkpoint.save(&queue)?;

        tracing::info!(
            "Import started: batch={} entries={} lang={}",
            queue.batch_id,
            queue.entries.len(),
            language
        );
        self.run_queue(queue).await
    }

    async fn run_queue(&self, mut queue: ImportQueue) -> Result<ImportOutcome, ImportError> {
        let total = queue.entries.len();
        let size = self.config.chapter_size;
        let pacing = Duration::from_millis(self.config.pacing_ms);

        // Entries below the durable cursor are already persisted; their
        // keys seed the dedup set so a resumed run cannot re-add them.
        let mut seen: HashSet<String> = queue.entries[..queue.processed]
            .iter()
            .map(|e| dedup_key(&e.word))
            .collect();

        let mut imported = 0usize;
        let mut skipped = 0usize;

        let chapters = chapter::chapter_count(total, size);
        let first = chapter::resume_chapter(queue.processed, size);

        for ch in first..chapters {
            let (start, end) = chapter::chapter_bounds(total, size, ch);
            let mut rows: Vec<EnrichedCard> = Vec::with_capacity(end - start);

            for idx in start..end {
                // Resumed chapter: the prefix up to the cursor is durable
                if idx < queue.processed {
                    continue;
                }

                let entry = &queue.entries[idx];
                let word = entry.word.trim();

                self.emit(ImportEvent::Progress {
                    percent: chapter::percent(idx, total),
                    status: format!("{word} ({}/{total})", idx + 1),
                })
                .await;

                if !seen.insert(dedup_key(word)) {
                    skipped += 1;
                    self.emit(ImportEvent::WordSkipped {
                        word: word.to_string(),
                        reason: "duplicate".to_string(),
                    })
                    .await;
                    continue;
                }

                match self.enrich_with_retry(word, queue.language).await {
                    Ok(result) => {
                        rows.push(self.build_card(entry, &result, &queue.batch_id, queue.language));
                    }
                    Err(e) => {
                        // A single bad word must not block the batch
                        skipped += 1;
                        tracing::warn!("Skipping {word:?}: {e}");
                        self.emit(ImportEvent::WordSkipped {
                            word: word.to_string(),
                            reason: e.to_string(),
                        })
                        .await;
                    }
                }

                tokio::time::sleep(pacing).await;
            }

            if !rows.is_empty() {
                match self.sink.insert(&rows).await {
                    Ok(()) => imported += rows.len(),
                    Err(SinkError::Duplicate(msg)) => {
                        // The store already holds these rows; nothing new
                        // was accepted, so they count as skipped
                        skipped += rows.len();
                        tracing::warn!("Sink rejected chapter as already present, continuing: {msg}");
                    }
                    Err(e) => {
                        let message = e.to_string();
                        tracing::error!("Chapter {} insert failed: {message}", ch + 1);
                        self.emit(ImportEvent::Failed {
                            message: message.clone(),
                            resumable: true,
                        })
                        .await;
                        return Err(ImportError::Persistence(message));
                    }
                }
            }

            queue.processed = end;
            if let Err(e) = self.checkpoint.save(&queue) {
                let message = e.to_string();
                tracing::error!("Checkpoint save after chapter {} failed: {message}", ch + 1);
                self.emit(ImportEvent::Failed {
                    message,
                    resumable: true,
                })
                .await;
                return Err(ImportError::Checkpoint(e));
            }

            self.emit(ImportEvent::ChapterCommitted {
                chapter: ch,
                processed: end,
                total,
            })
            .await;
            self.emit(ImportEvent::Progress {
                percent: chapter::percent(end, total),
                status: format!("chapter {}/{chapters} saved", ch + 1),
            })
            .await;
        }

        self.checkpoint.clear()?;
        self.emit(ImportEvent::Completed { imported, skipped }).await;
        tracing::info!(
            "Import finished: batch={} imported={imported} skipped={skipped}",
            queue.batch_id
        );

        Ok(ImportOutcome {
            imported,
            skipped,
            total,
        })
    }

    /// One word through the enrichment service: per-call timeout, up to
    /// `max_attempts` tries, backoff between transient failures.
    async fn enrich_with_retry(
        &self,
        word: &str,
        language: TargetLanguage,
    ) -> Result<EnrichmentResult, EnrichError> {
        let timeout = Duration::from_millis(self.config.request_timeout_ms);
        let backoff = Duration::from_millis(self.config.backoff_ms);

        with_retry(
            || async move {
                match tokio::time::timeout(timeout, self.enricher.enrich(word, language)).await {
                    Ok(result) => result,
                    Err(_) => Err(EnrichError::Timeout),
                }
            },
            self.config.max_attempts,
            EnrichError::is_transient,
            backoff,
        )
        .await
    }

    fn build_card(
        &self,
        entry: &RawEntry,
        result: &EnrichmentResult,
        batch_id: &str,
        language: TargetLanguage,
    ) -> EnrichedCard {
        let definition = result.definition.as_deref().or(entry.definition.as_deref());
        let example = result.example.as_deref().or(entry.example.as_deref());
        let ipa = result.ipa.as_deref().or(entry.ipa.as_deref());

        EnrichedCard {
            owner: self.owner,
            word: entry.word.trim().to_string(),
            back: compose_back(result.translation.as_deref(), definition),
            ipa: ipa.map(clean_field).filter(|s| !s.is_empty()),
            definition: definition.map(clean_field).filter(|s| !s.is_empty()),
            example: example.map(clean_field).filter(|s| !s.is_empty()),
            audio: result.audio.clone().filter(|s| !s.trim().is_empty()),
            batch_id: batch_id.to_string(),
            language,
            created_at: Utc::now(),
        }
    }

    async fn emit(&self, event: ImportEvent) {
        if let Some(tx) = &self.events
            && tx.send(event).await.is_err()
        {
            tracing::debug!("Progress receiver dropped");
        }
    }
}

/// Batch id for callers that did not supply one: file stem plus date.
fn derive_batch_id(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("import");
    format!("{stem}-{}", Utc::now().format("%Y%m%d"))
}
