//! Search validation pipeline.
//!
//! Turns raw keystrokes into debounced suggestion requests and decides
//! whether a definition lookup may be issued. The pipeline never performs
//! I/O itself: callers feed it input with a timestamp, `poll` it on every
//! tick, run the requests it hands out and report the results back.
//!
//! Every request carries a sequence number. Only the response to the most
//! recently issued request is applied; anything older is dropped on arrival,
//! whatever order the network delivers it in.

use std::time::{Duration, Instant};

use super::script::SuggestionQuery;
use crate::config::SearchConfig;
use crate::core::models::WordEntry;
use crate::core::providers::ProviderError;

/// Message shown when a lookup fails for any reason.
pub const LOOKUP_FAILED_MESSAGE: &str = "Could not find the word. Please try again.";

/// Pipeline tuning.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Quiescence window: input must stay unchanged this long to settle.
    pub debounce: Duration,
    /// Settled terms shorter than this (in chars) are denied without a fetch.
    pub min_term_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_term_chars: 2,
        }
    }
}

impl From<&SearchConfig> for PipelineConfig {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_term_chars: config.min_term_chars,
        }
    }
}

/// Lookup admission gate.
///
/// Reset to `Unknown` on every keystroke, so a lookup is only possible once
/// a fresh validation for the current text has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Unknown,
    Validating,
    Valid,
    Invalid,
}

/// A suggestion fetch the caller should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub seq: u64,
    pub query: SuggestionQuery,
}

/// A definition lookup the caller should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub seq: u64,
    pub word: String,
}

/// Recorded result of validating one settled term.
#[derive(Debug, Clone)]
struct Outcome {
    term: String,
    suggestions: Vec<String>,
    admitted: bool,
}

pub struct SearchValidationPipeline {
    config: PipelineConfig,

    // ── Visible state ───────────────────────────────────────────────
    term: String,
    admission: Admission,
    suggestions: Vec<String>,
    result: Option<WordEntry>,
    error: Option<String>,
    loading: bool,

    // ── Settling ────────────────────────────────────────────────────
    /// Time of the last unsettled edit.
    pending_since: Option<Instant>,
    /// Last term that went through settle (fetched, short-circuited or selected).
    last_processed: Option<String>,
    /// Validation result for `last_processed`, once known.
    last_outcome: Option<Outcome>,

    // ── Request sequencing ──────────────────────────────────────────
    suggestion_seq: u64,
    /// Term of the latest suggestion request still awaiting a response.
    in_flight: Option<(u64, String)>,
    lookup_seq: u64,
}

impl SearchValidationPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            term: String::new(),
            admission: Admission::Unknown,
            suggestions: Vec::new(),
            result: None,
            error: None,
            loading: false,
            pending_since: None,
            last_processed: None,
            last_outcome: None,
            suggestion_seq: 0,
            in_flight: None,
            lookup_seq: 0,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn admission(&self) -> Admission {
        self.admission
    }

    pub fn is_admitted(&self) -> bool {
        self.admission == Admission::Valid
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn result(&self) -> Option<&WordEntry> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while typed input is waiting out the quiescence window.
    pub fn is_settling(&self) -> bool {
        self.pending_since.is_some()
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Record the latest raw input. Admission is revoked immediately.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        self.term = text.to_string();
        self.admission = Admission::Unknown;
        self.pending_since = Some(now);
    }

    /// Settle the input if it has been quiet for the debounce window.
    ///
    /// Returns a request when the settled term needs a suggestion fetch.
    pub fn poll(&mut self, now: Instant) -> Option<SuggestionRequest> {
        let since = self.pending_since?;
        if now.saturating_duration_since(since) < self.config.debounce {
            return None;
        }
        self.pending_since = None;

        let settled = self.term.trim().to_string();

        if self.last_processed.as_deref() == Some(settled.as_str()) {
            self.restore_outcome(&settled);
            return None;
        }
        self.last_processed = Some(settled.clone());

        if settled.chars().count() < self.config.min_term_chars {
            // Supersede anything still in flight for a longer term.
            self.suggestion_seq += 1;
            self.in_flight = None;
            self.record_and_show(Outcome {
                term: settled,
                suggestions: Vec::new(),
                admitted: false,
            });
            return None;
        }

        self.suggestion_seq += 1;
        self.in_flight = Some((self.suggestion_seq, settled.clone()));
        self.last_outcome = None;
        self.admission = Admission::Validating;

        log::debug!("Validating '{}' (seq {})", settled, self.suggestion_seq);
        Some(SuggestionRequest {
            seq: self.suggestion_seq,
            query: SuggestionQuery::new(settled),
        })
    }

    /// Apply a suggestion response. Returns false if it was discarded as stale.
    pub fn apply_suggestions(
        &mut self,
        seq: u64,
        result: Result<Vec<String>, ProviderError>,
    ) -> bool {
        let term = match self.in_flight.take() {
            Some((latest, term)) if latest == seq => term,
            other => {
                self.in_flight = other;
                log::debug!("Discarding stale suggestions (seq {seq})");
                return false;
            }
        };

        let outcome = match result {
            Ok(candidates) => {
                let needle = term.to_lowercase();
                let admitted = candidates.iter().any(|c| c.to_lowercase() == needle);
                Outcome {
                    term,
                    suggestions: candidates,
                    admitted,
                }
            }
            Err(e) => {
                log::warn!("Suggestion fetch for '{term}' failed: {e}");
                Outcome {
                    term,
                    suggestions: Vec::new(),
                    admitted: false,
                }
            }
        };

        if self.pending_since.is_none() && self.term.trim() == outcome.term {
            self.record_and_show(outcome);
        } else {
            // Newer input is still settling; keep the result for a collapse.
            self.last_outcome = Some(outcome);
        }
        true
    }

    /// Accept a suggestion verbatim, bypassing the settle-and-validate cycle.
    pub fn select_suggestion(&mut self, word: &str) {
        self.term = word.to_string();
        self.pending_since = None;
        self.suggestions.clear();
        self.admission = Admission::Valid;

        // Anything in flight was issued for older text.
        self.suggestion_seq += 1;
        self.in_flight = None;

        let settled = word.trim().to_string();
        self.last_processed = Some(settled.clone());
        self.last_outcome = Some(Outcome {
            term: settled,
            suggestions: Vec::new(),
            admitted: true,
        });
    }

    // ── Lookup ──────────────────────────────────────────────────────

    /// Start a lookup for the current term if it is admitted.
    pub fn search(&mut self) -> Option<LookupRequest> {
        let word = self.term.trim();
        if word.is_empty() || !self.is_admitted() {
            return None;
        }
        let word = word.to_string();

        self.result = None;
        self.suggestions.clear();
        self.error = None;
        self.loading = true;
        self.lookup_seq += 1;

        log::info!("Looking up '{}' (seq {})", word, self.lookup_seq);
        Some(LookupRequest {
            seq: self.lookup_seq,
            word,
        })
    }

    /// Apply a lookup response.
    ///
    /// Returns the entry when it was surfaced, so the caller can persist it.
    pub fn apply_lookup(
        &mut self,
        seq: u64,
        result: Result<WordEntry, ProviderError>,
    ) -> Option<WordEntry> {
        if seq != self.lookup_seq {
            log::debug!("Discarding stale lookup (seq {seq})");
            return None;
        }
        self.loading = false;

        match result {
            Ok(entry) => {
                self.result = Some(entry.clone());
                Some(entry)
            }
            Err(e) => {
                log::warn!("Lookup failed: {e}");
                self.error = Some(LOOKUP_FAILED_MESSAGE.to_string());
                self.admission = Admission::Invalid;
                None
            }
        }
    }

    // ── Helpers ─────────────────────────────────────────────────────

    fn restore_outcome(&mut self, settled: &str) {
        match &self.last_outcome {
            Some(outcome) if outcome.term == settled => {
                self.suggestions = outcome.suggestions.clone();
                self.admission = if outcome.admitted {
                    Admission::Valid
                } else {
                    Admission::Invalid
                };
            }
            _ if self.in_flight.is_some() => self.admission = Admission::Validating,
            _ => self.admission = Admission::Invalid,
        }
    }

    fn record_and_show(&mut self, outcome: Outcome) {
        self.suggestions = outcome.suggestions.clone();
        self.admission = if outcome.admitted {
            Admission::Valid
        } else {
            Admission::Invalid
        };
        self.last_outcome = Some(outcome);
    }
}

impl Default for SearchValidationPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
