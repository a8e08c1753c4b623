use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hard cap on entries accepted into a single import queue.
/// Anything past this is silently dropped at queue creation.
pub const MAX_ENTRIES: usize = 200_000;

/// One parsed word-list row, immutable input to enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl RawEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ipa: None,
            definition: None,
            example: None,
        }
    }
}

/// Supported translation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    Uz,
    Ru,
    En,
    Kk,
    Tr,
}

impl TargetLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::Uz => "uz",
            TargetLanguage::Ru => "ru",
            TargetLanguage::En => "en",
            TargetLanguage::Kk => "kk",
            TargetLanguage::Tr => "tr",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uz" => Ok(TargetLanguage::Uz),
            "ru" => Ok(TargetLanguage::Ru),
            "en" => Ok(TargetLanguage::En),
            "kk" => Ok(TargetLanguage::Kk),
            "tr" => Ok(TargetLanguage::Tr),
            other => Err(format!("unsupported language code: {other}")),
        }
    }
}

/// The checkpoint record. One active queue per client; `processed` only
/// moves forward, and only after a chapter's rows are durably inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportQueue {
    pub batch_id: String,
    pub language: TargetLanguage,
    pub entries: Vec<RawEntry>,
    pub processed: usize,
    pub created_at: DateTime<Utc>,
}

impl ImportQueue {
    /// Build a queue, truncating the entry list at [`MAX_ENTRIES`].
    pub fn new(batch_id: String, language: TargetLanguage, mut entries: Vec<RawEntry>) -> Self {
        entries.truncate(MAX_ENTRIES);
        Self {
            batch_id,
            language,
            entries,
            processed: 0,
            created_at: Utc::now(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.entries.len().saturating_sub(self.processed)
    }
}

/// A flashcard row as written to the persistence sink. All text fields
/// have been cleaned (no markup, no stray links) before this exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedCard {
    pub owner: Uuid,
    pub word: String,
    /// Composed display string: translation line, blank line,
    /// parenthesized definition when one survived cleanup.
    pub back: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    pub batch_id: String,
    pub language: TargetLanguage,
    pub created_at: DateTime<Utc>,
}

/// Progress and lifecycle events emitted by the import pipeline.
#[derive(Debug, Clone)]
pub enum ImportEvent {
    Progress {
        percent: u8,
        status: String,
    },
    WordSkipped {
        word: String,
        reason: String,
    },
    ChapterCommitted {
        chapter: usize,
        processed: usize,
        total: usize,
    },
    Completed {
        imported: usize,
        skipped: usize,
    },
    Failed {
        message: String,
        resumable: bool,
    },
}
