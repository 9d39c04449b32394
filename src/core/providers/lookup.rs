//! HTTP definition provider backed by the dictionary service.
//!
//! `GET <lookup_url>?word=<word>` answers with the backend's word record,
//! whose examples pair Marathi text with an English translation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{DefinitionProvider, ProviderError, Result};
use crate::config::ApiConfig;
use crate::core::models::{Example, WordEntry};

#[derive(Debug, Deserialize)]
struct ExamplePayload {
    #[serde(alias = "source")]
    marathi: String,
    #[serde(alias = "target")]
    english: String,
}

#[derive(Debug, Deserialize)]
struct LookupPayload {
    word: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    meaning: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    examples: Vec<ExamplePayload>,
}

impl From<LookupPayload> for WordEntry {
    fn from(p: LookupPayload) -> Self {
        WordEntry {
            word: p.word.trim().to_string(),
            language: p.language,
            meaning: p.meaning,
            explanation: p.explanation,
            examples: p
                .examples
                .into_iter()
                .map(|e| Example::new(e.marathi, e.english))
                .collect(),
        }
    }
}

pub struct HttpDefinitionProvider {
    lookup_url: String,
    client: Client,
}

impl HttpDefinitionProvider {
    pub fn new(lookup_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            lookup_url: lookup_url.into(),
            client,
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(api.lookup_url.clone(), Duration::from_secs(api.timeout_secs))
    }
}

#[async_trait]
impl DefinitionProvider for HttpDefinitionProvider {
    async fn lookup(&self, word: &str) -> Result<WordEntry> {
        let start = std::time::Instant::now();
        let resp = self
            .client
            .get(&self.lookup_url)
            .query(&[("word", word)])
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(word.to_string()));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let payload: LookupPayload = resp.json().await?;
        let entry = WordEntry::from(payload);
        if !entry.is_valid() {
            return Err(ProviderError::InvalidResponse(
                "Missing word in response".to_string(),
            ));
        }

        log::info!(
            "Looked up '{}' in {}ms",
            entry.word,
            start.elapsed().as_millis()
        );
        Ok(entry)
    }
}
