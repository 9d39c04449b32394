use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::history::HistoryStore;
use crate::core::providers::{
    DefinitionProvider, HttpDefinitionProvider, HttpSuggestionProvider, SuggestionProvider,
};
use crate::database::Database;

use super::events::AppEvent;

/// Centralized handle to all backend services.
///
/// Created once at startup. Collaborators are held as trait objects so views
/// share one instance and tests can swap in mocks.
pub struct Services {
    pub config: AppConfig,
    pub suggester: Arc<dyn SuggestionProvider>,
    pub definitions: Arc<dyn DefinitionProvider>,
    pub history: Arc<dyn HistoryStore>,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Initialize all services from config.
    ///
    /// A database that cannot be opened is fatal.
    pub async fn init(
        config: AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = config.data_dir();
        log::info!("Initializing services with data dir: {}", data_dir.display());

        let database = Database::new(&data_dir).await?;
        log::info!("SQLite database initialized");

        let suggester = HttpSuggestionProvider::from_config(&config.api);
        let definitions = HttpDefinitionProvider::from_config(&config.api);
        log::info!(
            "Dictionary endpoints: lookup={} latin={} script={}",
            config.api.lookup_url,
            config.api.latin_suggest_url,
            config.api.script_suggest_url
        );

        Ok(Self::with_providers(
            config,
            Arc::new(suggester),
            Arc::new(definitions),
            Arc::new(database),
            event_tx,
        ))
    }

    /// Assemble services from already-built collaborators.
    pub fn with_providers(
        config: AppConfig,
        suggester: Arc<dyn SuggestionProvider>,
        definitions: Arc<dyn DefinitionProvider>,
        history: Arc<dyn HistoryStore>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            config,
            suggester,
            definitions,
            history,
            event_tx,
        }
    }
}
