//! Async driver for [`SearchValidationPipeline`].
//!
//! Suggestion and lookup calls run as tokio tasks and report back over an
//! unbounded channel. The owner drains the channel from its tick handler,
//! so all pipeline state is mutated on a single logical thread.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use super::pipeline::{
    Admission, LookupRequest, PipelineConfig, SearchValidationPipeline, SuggestionRequest,
};
use crate::core::history::HistoryStore;
use crate::core::models::WordEntry;
use crate::core::providers::{DefinitionProvider, ProviderError, SuggestionProvider};

/// Completion of a spawned provider call.
#[derive(Debug)]
pub enum SearchUpdate {
    Suggestions {
        seq: u64,
        result: Result<Vec<String>, ProviderError>,
    },
    Lookup {
        seq: u64,
        result: Result<WordEntry, ProviderError>,
    },
}

pub struct SearchController {
    pipeline: SearchValidationPipeline,
    suggester: Arc<dyn SuggestionProvider>,
    definitions: Arc<dyn DefinitionProvider>,
    history: Arc<dyn HistoryStore>,
    update_tx: mpsc::UnboundedSender<SearchUpdate>,
    update_rx: mpsc::UnboundedReceiver<SearchUpdate>,
    suggestion_requests: u64,
}

impl SearchController {
    pub fn new(
        config: PipelineConfig,
        suggester: Arc<dyn SuggestionProvider>,
        definitions: Arc<dyn DefinitionProvider>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        Self {
            pipeline: SearchValidationPipeline::new(config),
            suggester,
            definitions,
            history,
            update_tx,
            update_rx,
            suggestion_requests: 0,
        }
    }

    pub fn pipeline(&self) -> &SearchValidationPipeline {
        &self.pipeline
    }

    pub fn admission(&self) -> Admission {
        self.pipeline.admission()
    }

    /// Number of suggestion fetches issued so far.
    pub fn suggestion_requests_issued(&self) -> u64 {
        self.suggestion_requests
    }

    // ── Events ──────────────────────────────────────────────────────

    pub fn on_input(&mut self, text: &str) {
        self.on_input_at(text, Instant::now());
    }

    pub fn on_input_at(&mut self, text: &str, now: Instant) {
        self.pipeline.on_input(text, now);
    }

    pub fn select_suggestion(&mut self, word: &str) {
        self.pipeline.select_suggestion(word);
    }

    /// Issue a lookup if the current term is admitted. Returns whether one started.
    pub fn search(&mut self) -> bool {
        match self.pipeline.search() {
            Some(request) => {
                self.spawn_lookup(request);
                true
            }
            None => false,
        }
    }

    /// Drain finished provider calls, then settle pending input.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        while let Ok(update) = self.update_rx.try_recv() {
            self.apply(update);
        }

        if let Some(request) = self.pipeline.poll(now) {
            self.spawn_suggestions(request);
        }
    }

    /// Wait for the next provider completion and apply it.
    ///
    /// Returns false if no task can ever report back.
    pub async fn next_update(&mut self) -> bool {
        match self.update_rx.recv().await {
            Some(update) => {
                self.apply(update);
                true
            }
            None => false,
        }
    }

    // ── Internals ───────────────────────────────────────────────────

    fn apply(&mut self, update: SearchUpdate) {
        match update {
            SearchUpdate::Suggestions { seq, result } => {
                self.pipeline.apply_suggestions(seq, result);
            }
            SearchUpdate::Lookup { seq, result } => {
                if let Some(entry) = self.pipeline.apply_lookup(seq, result) {
                    self.spawn_save(entry);
                }
            }
        }
    }

    fn spawn_suggestions(&mut self, request: SuggestionRequest) {
        self.suggestion_requests += 1;
        let suggester = self.suggester.clone();
        let tx = self.update_tx.clone();

        tokio::spawn(async move {
            let result = suggester.query(&request.query).await;
            let _ = tx.send(SearchUpdate::Suggestions {
                seq: request.seq,
                result,
            });
        });
    }

    fn spawn_lookup(&self, request: LookupRequest) {
        let definitions = self.definitions.clone();
        let tx = self.update_tx.clone();

        tokio::spawn(async move {
            let result = definitions.lookup(&request.word).await;
            let _ = tx.send(SearchUpdate::Lookup {
                seq: request.seq,
                result,
            });
        });
    }

    /// Persist a surfaced definition. Failure is logged only.
    fn spawn_save(&self, entry: WordEntry) {
        let history = self.history.clone();

        tokio::spawn(async move {
            match history.save(&entry).await {
                Ok(saved) => log::info!(
                    "Saved '{}' to history (id {}, looked up {} time(s))",
                    saved.entry.word,
                    saved.id,
                    saved.lookup_count
                ),
                Err(e) => log::warn!("Failed to save '{}' to history: {e}", entry.word),
            }
        });
    }
}
