use lugat_types::EnrichedCard;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Duplicate-key rejection. Deduplication also runs client-side, so
    /// this is a race, not a bug; callers downgrade it to a warning.
    #[error("Duplicate row: {0}")]
    Duplicate(String),

    #[error("Insert rejected: HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Row sink for finished flashcards. One call per chapter.
#[async_trait::async_trait]
pub trait CardSink: Send + Sync {
    async fn insert(&self, rows: &[EnrichedCard]) -> Result<(), SinkError>;
}

/// Remote relational store reached over its REST row API, scoped to the
/// authenticated owner by the service itself.
#[derive(Clone)]
pub struct RestCardSink {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct RestErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: String,
}

impl RestCardSink {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl CardSink for RestCardSink {
    async fn insert(&self, rows: &[EnrichedCard]) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(rows)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body: RestErrorBody = response.json().await.unwrap_or(RestErrorBody {
            message: String::new(),
            code: String::new(),
        });

        // 409, PostgreSQL unique-violation code, or a message naming it
        if status.as_u16() == 409
            || body.code == "23505"
            || body.message.to_lowercase().contains("duplicate key")
        {
            return Err(SinkError::Duplicate(body.message));
        }

        Err(SinkError::Rejected {
            status: status.as_u16(),
            message: body.message,
        })
    }
}
