//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod habits;
pub mod today;
pub mod tui;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use habitrack_core::api::ApiClient;
use habitrack_core::config::Config;
use habitrack_core::guard::{AuthGuard, Guarded, SESSION_EXPIRED_MESSAGE};
use habitrack_core::session::Session;
use habitrack_core::storage::{FileStorage, Storage};

/// Handles shared by the scripted commands.
pub struct Context {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub api: ApiClient,
    pub guard: AuthGuard,
    pub session: Session,
}

impl Context {
    pub fn open(config: Config) -> Result<Self> {
        let storage: Arc<dyn Storage> =
            Arc::new(FileStorage::open_default().context("open session storage")?);
        let api = ApiClient::from_config(&config, Arc::clone(&storage))?;
        Ok(Self {
            guard: AuthGuard::new(Arc::clone(&storage)),
            session: Session::new(Arc::clone(&storage)),
            config,
            storage,
            api,
        })
    }
}

/// Unwraps a guarded call, turning an auth failure into the session-expired error.
pub fn require<T>(result: Guarded<T>, action: &str) -> Result<T> {
    match result {
        Guarded::Ok(value) => Ok(value),
        Guarded::AuthFailed { .. } => anyhow::bail!(SESSION_EXPIRED_MESSAGE),
        Guarded::Failed(err) => Err(anyhow::Error::new(err).context(action.to_string())),
    }
}
