//! Application state wiring all adapters together.
//!
//! AppState holds the concrete adapters used by the CLI commands. Core logic
//! is generic over the port traits; AppState pins it to the infra
//! implementations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use sleepyhead_core::chat::controller::ChatSessionController;
use sleepyhead_core::journal::store::JournalStore;
use sleepyhead_infra::config::{
    API_URL_ENV, apply_api_url_override, load_app_config, resolve_data_dir,
};
use sleepyhead_infra::http::HttpChatBackend;
use sleepyhead_infra::printer::CommandPrinter;
use sleepyhead_infra::sqlite::kv::SqliteKvStore;
use sleepyhead_infra::sqlite::pool::{DatabasePool, database_url};
use sleepyhead_types::config::AppConfig;

/// Journal store pinned to SQLite storage.
pub type ConcreteJournalStore = JournalStore<SqliteKvStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub backend: Arc<HttpChatBackend>,
    pub kv_store: SqliteKvStore,
    pub printer: CommandPrinter,
}

impl AppState {
    /// Initialize the application state: load config, open storage, build the client.
    ///
    /// `api_url` (from `--api-url`) takes precedence over `SLEEPYHEAD_API_URL`,
    /// which takes precedence over `config.toml`.
    pub async fn init(api_url: Option<&str>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let mut config = load_app_config(&data_dir).await;
        let env_url = std::env::var(API_URL_ENV).ok();
        apply_api_url_override(&mut config, env_url.as_deref());
        apply_api_url_override(&mut config, api_url);

        let db_pool = DatabasePool::new(&database_url(&data_dir))
            .await
            .context("Failed to open local storage")?;

        let backend = HttpChatBackend::new(
            config.chat.base_url.clone(),
            Duration::from_secs(config.chat.request_timeout_secs),
        )?;

        Ok(Self {
            backend: Arc::new(backend),
            kv_store: SqliteKvStore::new(db_pool),
            printer: CommandPrinter::new(config.journal.print_command.clone()),
            config,
        })
    }

    /// A fresh chat session using the configured session ID and timeout.
    pub fn new_chat_session(&self) -> ChatSessionController {
        ChatSessionController::new(
            self.config.chat.session_id.clone(),
            Duration::from_secs(self.config.chat.request_timeout_secs),
        )
    }

    /// Open the journal, loading any saved text.
    pub async fn open_journal(&self) -> anyhow::Result<ConcreteJournalStore> {
        let store = JournalStore::load(
            self.kv_store.clone(),
            Duration::from_secs(self.config.journal.notice_ttl_secs),
        )
        .await?;
        Ok(store)
    }
}
