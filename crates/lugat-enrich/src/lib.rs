use lugat_types::TargetLanguage;
use serde::Deserialize;

pub mod http;
pub mod retry;

pub use http::HttpEnricher;
pub use retry::with_retry;

/// Enrichment provider interface
#[async_trait::async_trait]
pub trait Enricher: Send + Sync {
    /// Fetch translation, definition, example and pronunciation for one word
    async fn enrich(
        &self,
        word: &str,
        language: TargetLanguage,
    ) -> Result<EnrichmentResult, EnrichError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// What the service returns for one word. Any field may be absent; the
/// pipeline fills gaps during cleanup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichmentResult {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub ipa: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Upstream error: HTTP {status}")]
    Upstream { status: u16 },

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request timed out")]
    Timeout,
}

impl EnrichError {
    /// Whether a retry could plausibly succeed. Rate limits, upstream
    /// 429/500s and timeouts qualify; auth and payload errors do not.
    pub fn is_transient(&self) -> bool {
        match self {
            EnrichError::RateLimitExceeded | EnrichError::Timeout => true,
            EnrichError::Upstream { status } => *status == 429 || *status == 500,
            EnrichError::NetworkError(e) => e.is_timeout() || e.is_connect(),
            EnrichError::ApiError(msg) => {
                msg.contains("429") || msg.contains("500") || msg.contains("Too Many Requests")
            }
            _ => false,
        }
    }
}
