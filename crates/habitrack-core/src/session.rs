//! Login state persisted in client storage.

use std::sync::Arc;

use anyhow::Result;

use crate::api::{LoginResponse, User};
use crate::guard::Route;
use crate::points::PointStore;
use crate::storage::{Storage, StorageKey, mask_token};

#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn is_logged_in(&self) -> bool {
        self.storage.token().is_some()
    }

    pub fn username(&self) -> Option<String> {
        self.storage.get(StorageKey::Username)
    }

    /// Screen shown at start-up.
    pub fn start_route(&self) -> Route {
        if self.is_logged_in() {
            Route::Today
        } else {
            Route::Login
        }
    }

    /// Stores the token, username and balance from a successful login.
    ///
    /// # Errors
    /// Returns an error if storage cannot be written.
    pub fn store_login(&self, response: &LoginResponse) -> Result<PointStore> {
        self.storage.set(StorageKey::JwtToken, &response.token)?;
        self.storage
            .set(StorageKey::Username, &response.user.username)?;
        let points = PointStore::new(response.user.points);
        points.save(self.storage.as_ref())?;
        tracing::info!(
            username = %response.user.username,
            token = %mask_token(&response.token),
            "Logged in"
        );
        Ok(points)
    }

    /// Replaces the local balance with the server's.
    ///
    /// # Errors
    /// Returns an error if storage cannot be written.
    pub fn reconcile(&self, user: &User, points: &mut PointStore) -> Result<()> {
        if points.points() != user.points {
            tracing::debug!(
                local = points.points(),
                server = user.points,
                "Reconciling point balance"
            );
        }
        points.set(user.points);
        points.save(self.storage.as_ref())
    }

    /// Clears every stored session key.
    ///
    /// # Errors
    /// Returns an error if storage cannot be written.
    pub fn logout(&self) -> Result<()> {
        for key in StorageKey::ALL {
            self.storage.remove(key)?;
        }
        tracing::info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn login_response() -> LoginResponse {
        LoginResponse {
            token: "jwt-token-value".into(),
            user: User {
                id: "u1".into(),
                username: "alice".into(),
                points: 21,
            },
        }
    }

    #[test]
    fn test_start_route_follows_token() {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        assert_eq!(session.start_route(), Route::Login);

        session.store_login(&login_response()).unwrap();
        assert_eq!(session.start_route(), Route::Today);
    }

    #[test]
    fn test_login_stores_all_keys() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let session = Session::new(Arc::clone(&storage));
        let points = session.store_login(&login_response()).unwrap();

        assert_eq!(points.points(), 21);
        assert_eq!(storage.token().as_deref(), Some("jwt-token-value"));
        assert_eq!(session.username().as_deref(), Some("alice"));
        assert_eq!(storage.get(StorageKey::UserPoints).as_deref(), Some("21"));
    }

    #[test]
    fn test_logout_clears_everything() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let session = Session::new(Arc::clone(&storage));
        session.store_login(&login_response()).unwrap();
        session.logout().unwrap();

        for key in StorageKey::ALL {
            assert!(storage.get(key).is_none());
        }
    }

    #[test]
    fn test_reconcile_overwrites_local_balance() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let session = Session::new(Arc::clone(&storage));
        let mut points = PointStore::new(99);
        let user = User {
            id: "u1".into(),
            username: "alice".into(),
            points: 4,
        };
        session.reconcile(&user, &mut points).unwrap();
        assert_eq!(points.points(), 4);
        assert_eq!(storage.get(StorageKey::UserPoints).as_deref(), Some("4"));
    }
}
