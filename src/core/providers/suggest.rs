//! HTTP suggestion provider.
//!
//! Latin-script terms go to a Datamuse-compatible `/sug` endpoint.
//! Devanagari and everything else go to the dictionary backend's suggest
//! endpoint, which understands Marathi and transliterated input.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, Result, SuggestionProvider};
use crate::config::ApiConfig;
use crate::core::search::script::{Script, SuggestionQuery};

/// One row of a Datamuse `/sug` response.
#[derive(Debug, Deserialize)]
struct DatamuseSuggestion {
    word: String,
    #[allow(dead_code)]
    #[serde(default)]
    score: Option<u64>,
}

pub struct HttpSuggestionProvider {
    latin_url: String,
    script_url: String,
    max_suggestions: usize,
    client: Client,
}

impl HttpSuggestionProvider {
    pub fn new(
        latin_url: impl Into<String>,
        script_url: impl Into<String>,
        timeout: Duration,
        max_suggestions: usize,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            latin_url: latin_url.into(),
            script_url: script_url.into(),
            max_suggestions,
            client,
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(
            api.latin_suggest_url.clone(),
            api.script_suggest_url.clone(),
            Duration::from_secs(api.timeout_secs),
            api.max_suggestions,
        )
    }

    async fn query_latin(&self, term: &str) -> Result<Vec<String>> {
        let max = self.max_suggestions.to_string();
        let resp = self
            .client
            .get(&self.latin_url)
            .query(&[("s", term), ("max", max.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let rows: Vec<DatamuseSuggestion> = resp.json().await?;
        Ok(rows.into_iter().map(|r| r.word).collect())
    }

    async fn query_backend(&self, term: &str, script: Script) -> Result<Vec<String>> {
        let resp = self
            .client
            .get(&self.script_url)
            .query(&[("prefix", term), ("script", script.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let words: Vec<String> = resp.json().await?;
        Ok(words)
    }
}

#[async_trait]
impl SuggestionProvider for HttpSuggestionProvider {
    async fn query(&self, query: &SuggestionQuery) -> Result<Vec<String>> {
        let mut words = match query.script {
            Script::Latin => self.query_latin(&query.raw_term).await?,
            script => self.query_backend(&query.raw_term, script).await?,
        };

        words.truncate(self.max_suggestions);
        log::debug!(
            "{} suggestion(s) for '{}' ({})",
            words.len(),
            query.raw_term,
            query.script.as_str()
        );
        Ok(words)
    }
}
