use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub quiz: QuizConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// Remote dictionary endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Definition lookup endpoint (`?word=`).
    pub lookup_url: String,
    /// Datamuse-compatible suggestion endpoint for Latin-script terms.
    pub latin_suggest_url: String,
    /// Backend suggestion endpoint for Devanagari and other scripts.
    pub script_suggest_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of suggestions shown.
    pub max_suggestions: usize,
}

/// Search input validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiescence window before a typed term is validated.
    pub debounce_ms: u64,
    /// Terms shorter than this are never sent to the suggestion service.
    pub min_term_chars: usize,
}

/// Quiz settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Draw from mastered words as well as words in review.
    pub include_mastered: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 50 }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            lookup_url: "http://127.0.0.1:8080/api/dictionary/lookup".to_string(),
            latin_suggest_url: "https://api.datamuse.com/sug".to_string(),
            script_suggest_url: "http://127.0.0.1:8080/api/dictionary/suggest".to_string(),
            timeout_secs: 10,
            max_suggestions: 8,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_term_chars: 2,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/wordhoard/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("wordhoard").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

/// `~/.local/share/wordhoard` (or platform equivalent), falling back to `./data`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("wordhoard"))
        .unwrap_or_else(|| PathBuf::from("data"))
}
