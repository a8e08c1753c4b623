use lugat_types::TargetLanguage;
use serde_json::json;

use crate::{EnrichError, Enricher, EnrichmentResult, ProviderMetadata};

/// Enrichment over the hosted dictionary/translation endpoint.
#[derive(Clone)]
pub struct HttpEnricher {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpEnricher {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl Enricher for HttpEnricher {
    async fn enrich(
        &self,
        word: &str,
        language: TargetLanguage,
    ) -> Result<EnrichmentResult, EnrichError> {
        if self.api_key.is_empty() {
            return Err(EnrichError::AuthenticationError);
        }

        let body = json!({
            "word": word,
            "target_lang": language.code(),
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            return Err(EnrichError::RateLimitExceeded);
        }

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(EnrichError::AuthenticationError);
        }

        if status.is_server_error() {
            return Err(EnrichError::Upstream {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(EnrichError::ApiError(format!("HTTP {status}")));
        }

        let result: EnrichmentResult = response
            .json()
            .await
            .map_err(|e| EnrichError::MalformedResponse(e.to_string()))?;

        Ok(result)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "lugat-api".to_string(),
            requires_api_key: true,
        }
    }
}
