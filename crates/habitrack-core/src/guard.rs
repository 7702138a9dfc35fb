//! Forced logout on authentication failure.

use std::future::Future;
use std::sync::Arc;

use crate::api::{ApiError, ApiResult};
use crate::storage::{Storage, StorageKey};

/// Shown whenever a guarded call forces a logout.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Screens the client can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Today,
    Habits,
}

/// Outcome of a guarded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    Ok(T),
    /// Credentials were cleared; the caller should navigate to `redirect`.
    AuthFailed { redirect: Route },
    Failed(ApiError),
}

impl<T> Guarded<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Guarded<U> {
        match self {
            Guarded::Ok(v) => Guarded::Ok(f(v)),
            Guarded::AuthFailed { redirect } => Guarded::AuthFailed { redirect },
            Guarded::Failed(e) => Guarded::Failed(e),
        }
    }
}

/// Wraps API calls so an authentication failure logs the user out.
#[derive(Clone)]
pub struct AuthGuard {
    storage: Arc<dyn Storage>,
}

impl AuthGuard {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Awaits `call`. Authentication errors clear the token and username and
    /// resolve to [`Guarded::AuthFailed`]; other errors pass through.
    pub async fn run<T, F>(&self, call: F) -> Guarded<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        match call.await {
            Ok(value) => Guarded::Ok(value),
            Err(err) if err.is_authentication() => {
                tracing::warn!(error = %err, "Authentication failed; clearing session");
                self.clear_credentials();
                Guarded::AuthFailed {
                    redirect: Route::Login,
                }
            }
            Err(err) => Guarded::Failed(err),
        }
    }

    fn clear_credentials(&self) {
        for key in [StorageKey::JwtToken, StorageKey::Username] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key = key.as_str(), "Failed to clear stored credential: {e:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn seeded() -> Arc<MemoryStorage> {
        let storage = Arc::new(MemoryStorage::with_token("tok"));
        storage.set(StorageKey::Username, "alice").unwrap();
        storage.set(StorageKey::UserPoints, "4").unwrap();
        storage
    }

    #[tokio::test]
    async fn test_ok_passes_value() {
        let storage = seeded();
        let guard = AuthGuard::new(storage.clone());
        let out = guard.run(async { Ok::<_, ApiError>(7) }).await;
        assert_eq!(out, Guarded::Ok(7));
        assert!(storage.token().is_some());
    }

    #[tokio::test]
    async fn test_auth_failure_clears_token_and_username() {
        let storage = seeded();
        let guard = AuthGuard::new(storage.clone());
        let out: Guarded<()> = guard
            .run(async { Err(ApiError::authentication("expired")) })
            .await;

        assert_eq!(
            out,
            Guarded::AuthFailed {
                redirect: Route::Login
            }
        );
        assert!(storage.token().is_none());
        assert!(storage.get(StorageKey::Username).is_none());
        assert_eq!(storage.get(StorageKey::UserPoints).as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_generic_failure_passes_through() {
        let storage = seeded();
        let guard = AuthGuard::new(storage.clone());
        let out: Guarded<()> = guard.run(async { Err(ApiError::request("boom")) }).await;

        assert_eq!(out, Guarded::Failed(ApiError::request("boom")));
        assert!(storage.token().is_some());
    }
}
