use std::env;

use serde::{Deserialize, Serialize};

fn default_chapter_size() -> usize {
    50
}

fn default_pacing_ms() -> u64 {
    300
}

fn default_backoff_ms() -> u64 {
    2000
}

fn default_max_attempts() -> u32 {
    3
}

fn default_max_entries() -> usize {
    200_000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

/// Pipeline tuning. Every knob has an env override so batch runs can be
/// throttled without a config file.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ImportConfig {
    /// Entries per chapter, the atomic unit of checkpoint durability
    #[serde(default = "default_chapter_size")]
    pub chapter_size: usize,
    /// Delay between word-level enrichment calls
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    /// Delay before retrying a transient enrichment failure
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
    /// Attempts per word before it is skipped
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Queue cap; entries past this are dropped at creation
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Per-call timeout for enrichment requests
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ImportConfig {
    pub fn new() -> Self {
        let chapter_size = env::var("LUGAT_CHAPTER_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&v: &usize| v > 0)
            .unwrap_or_else(default_chapter_size);

        let pacing_ms = env::var("LUGAT_PACING_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_pacing_ms);

        let backoff_ms = env::var("LUGAT_BACKOFF_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_backoff_ms);

        let max_attempts = env::var("LUGAT_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&v: &u32| v > 0)
            .unwrap_or_else(default_max_attempts);

        let max_entries = env::var("LUGAT_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_entries);

        let request_timeout_ms = env::var("LUGAT_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_ms);

        Self {
            chapter_size,
            pacing_ms,
            backoff_ms,
            max_attempts,
            max_entries,
            request_timeout_ms,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            chapter_size: default_chapter_size(),
            pacing_ms: default_pacing_ms(),
            backoff_ms: default_backoff_ms(),
            max_attempts: default_max_attempts(),
            max_entries: default_max_entries(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
