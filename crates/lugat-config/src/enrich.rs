use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.lugat.app/v1/enrich".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
}

impl EnrichConfig {
    pub fn new() -> Self {
        let api_url = env::var("LUGAT_ENRICH_URL").unwrap_or_else(|_| default_api_url());
        let api_key = env::var("LUGAT_ENRICH_KEY").unwrap_or_default();

        Self { api_url, api_key }
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
        }
    }
}
