//! Application state wiring storage and the responder together.
//!
//! AppState holds the concrete instances used by both CLI commands and REST
//! handlers. Core types are generic over the context repository; AppState
//! pins them to the SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use sprite_core::context::store::ContextStore;
use sprite_core::llm::box_provider::BoxLlmProvider;
use sprite_core::responder::orchestrator::ResponseOrchestrator;
use sprite_core::responder::prompt::PromptTemplate;
use sprite_infra::config::{load_config, resolve_api_key, resolve_data_dir, validate};
use sprite_infra::llm::openai_compat::OpenAiCompatibleProvider;
use sprite_infra::llm::openai_compat::config::{OpenAiCompatConfig, groq_defaults};
use sprite_infra::sqlite::context::SqliteContextRepository;
use sprite_infra::sqlite::pool::{DatabasePool, database_url};
use sprite_types::config::SpriteConfig;

pub type ConcreteStore = ContextStore<SqliteContextRepository>;

pub type ConcreteOrchestrator = ResponseOrchestrator<SqliteContextRepository>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SpriteConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
    pub store: Arc<ConcreteStore>,
    /// Present only for commands that answer messages (`serve`, `chat`).
    pub responder: Option<Arc<ConcreteOrchestrator>>,
}

impl AppState {
    /// Initialize state: resolve the data dir, load config, open the database.
    ///
    /// With `with_responder`, also validates the config, reads the API key,
    /// and builds the completion provider.
    pub async fn init(with_responder: bool) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        let provider = if with_responder {
            validate(&config)?;
            let api_key = resolve_api_key(&config, |key| std::env::var(key).ok())?;
            let provider_config = provider_config(&config, api_key);
            let provider_name = provider_config.provider_name.clone();
            let provider = OpenAiCompatibleProvider::new(provider_config)?;
            tracing::info!(
                provider = %provider_name,
                model = %config.model,
                "completion provider ready"
            );
            Some(BoxLlmProvider::new(provider))
        } else {
            None
        };

        Ok(Self::from_parts(config, data_dir, db_pool, provider))
    }

    /// Wire state from already-built parts.
    pub fn from_parts(
        config: SpriteConfig,
        data_dir: PathBuf,
        db_pool: DatabasePool,
        provider: Option<BoxLlmProvider>,
    ) -> Self {
        let store = Arc::new(ContextStore::new(
            SqliteContextRepository::new(db_pool.clone()),
            config.context,
        ));

        let responder = provider.map(|provider| {
            Arc::new(ResponseOrchestrator::new(
                config.bot_id.clone(),
                config.model.clone(),
                PromptTemplate::from_config(config.persona.as_deref()),
                Arc::clone(&store),
                provider,
            ))
        });

        Self {
            config: Arc::new(config),
            data_dir,
            db_pool,
            store,
            responder,
        }
    }

    /// Wait for pending evictions, then close the database.
    pub async fn shutdown(&self) {
        self.store.flush().await;
        self.db_pool.close().await;
    }
}

/// Completion-provider settings for `config`: Groq defaults retargeted at
/// the configured endpoint, model, and timeout.
fn provider_config(config: &SpriteConfig, api_key: SecretString) -> OpenAiCompatConfig {
    groq_defaults(api_key, &config.model)
        .with_base_url(config.base_url.as_str())
        .with_timeout(Duration::from_secs(config.request_timeout_secs))
}
