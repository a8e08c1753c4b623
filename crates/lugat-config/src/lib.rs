use std::env;

use serde::{Deserialize, Serialize};

use self::enrich::EnrichConfig;
use self::import::ImportConfig;
use self::store::StoreConfig;

pub mod enrich;
pub mod import;
pub mod store;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub import: ImportConfig,
    pub enrich: EnrichConfig,
    pub store: StoreConfig,

    /// Path of the checkpoint file holding the active import queue
    pub checkpoint_path: String,
}

impl Config {
    pub fn new() -> Self {
        let checkpoint_path = env::var("LUGAT_CHECKPOINT_PATH")
            .unwrap_or_else(|_| "lugat-import-queue.json".to_string());

        Config {
            import: ImportConfig::new(),
            enrich: EnrichConfig::new(),
            store: StoreConfig::new(),

            checkpoint_path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
