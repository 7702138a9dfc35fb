//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return `UiEvent`. The runtime uses
//! `spawn_effect` to spawn them and send results to the inbox. They do NOT
//! mutate UI state directly.

pub mod auth;
pub mod habits;
pub mod today;

use std::sync::Arc;

pub use auth::*;
use habitrack_core::api::ApiClient;
use habitrack_core::guard::AuthGuard;
use habitrack_core::session::Session;
use habitrack_core::storage::Storage;
pub use habits::*;
pub use today::*;

/// Shared I/O handles cloned into each spawned handler.
#[derive(Clone)]
pub struct Services {
    pub api: ApiClient,
    pub guard: AuthGuard,
    pub session: Session,
    pub storage: Arc<dyn Storage>,
}

impl Services {
    pub fn new(api: ApiClient) -> Self {
        let storage = Arc::clone(api.storage());
        Self {
            guard: AuthGuard::new(Arc::clone(&storage)),
            session: Session::new(Arc::clone(&storage)),
            storage,
            api,
        }
    }
}

#[cfg(test)]
mod tests;
