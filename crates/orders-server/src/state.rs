//! Application state shared by all handlers.
//!
//! Nothing here is mutable between requests: the store gateway owns the
//! connection pool and its own admission control, and the proxy holds a
//! shared HTTP client. Cloning [`AppState`] is cheap.

use orders_storage::StoreGateway;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::proxy::KeywordProxy;
use crate::service::EntityService;

#[derive(Clone)]
pub struct AppState {
    /// CRUD over the backed relations.
    pub entities: EntityService,
    /// External keyword service client.
    pub proxy: KeywordProxy,
}

impl AppState {
    /// Opens the database named by `config.db_path`.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let store = StoreGateway::open(&config.db_path, config.pool.clone())?;
        Ok(Self::with_store(store, config))
    }

    /// Uses a fresh database in a private temp directory, removed with the
    /// last clone of the state.
    pub fn temporary(config: &ServerConfig) -> Result<Self, ApiError> {
        let store = StoreGateway::temporary(config.pool.clone())?;
        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: StoreGateway, config: &ServerConfig) -> Self {
        AppState {
            entities: EntityService::new(store),
            proxy: KeywordProxy::new(config.say_url.clone(), config.say_timeout),
        }
    }
}
