use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "http://localhost:54321/rest/v1/flashcards".to_string()
}

/// Remote row store (per-user isolated) reached over REST.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
}

impl StoreConfig {
    pub fn new() -> Self {
        let api_url = env::var("LUGAT_STORE_URL").unwrap_or_else(|_| default_api_url());
        let api_key = env::var("LUGAT_STORE_KEY").unwrap_or_default();

        Self { api_url, api_key }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
        }
    }
}
