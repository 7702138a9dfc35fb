//! The user's point balance.

use anyhow::Result;

use crate::config::PointsConfig;
use crate::storage::{Storage, StorageKey};

/// Point balance mirrored from the server and adjusted optimistically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointStore {
    points: i64,
}

impl PointStore {
    pub fn new(points: i64) -> Self {
        Self { points }
    }

    /// Reads the persisted balance; missing or malformed values read as zero.
    pub fn load(storage: &dyn Storage) -> Self {
        let points = storage
            .get(StorageKey::UserPoints)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        Self { points }
    }

    /// # Errors
    /// Returns an error if storage cannot be written.
    pub fn save(&self, storage: &dyn Storage) -> Result<()> {
        storage.set(StorageKey::UserPoints, &self.points.to_string())
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    /// Replaces the balance with the server's value.
    pub fn set(&mut self, points: i64) {
        self.points = points;
    }

    pub fn add(&mut self, delta: i64) {
        self.points = self.points.saturating_add(delta);
    }

    /// Applies a completion award and returns the amount added.
    pub fn award(&mut self, rules: &PointsConfig, all_done: bool) -> i64 {
        let mut delta = rules.habit_done;
        if all_done {
            delta = delta.saturating_add(rules.all_done_bonus);
        }
        self.add(delta);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_load_defaults_to_zero() {
        let storage = MemoryStorage::new();
        storage.set(StorageKey::UserPoints, "not a number").unwrap();
        assert_eq!(PointStore::load(&storage).points(), 0);
    }

    #[test]
    fn test_save_round_trips_through_storage() {
        let storage = MemoryStorage::new();
        let mut store = PointStore::new(10);
        store.add(3);
        store.save(&storage).unwrap();
        assert_eq!(storage.get(StorageKey::UserPoints).as_deref(), Some("13"));
        assert_eq!(PointStore::load(&storage).points(), 13);
    }

    #[test]
    fn test_award_includes_bonus_only_when_all_done() {
        let rules = PointsConfig::default();
        let mut store = PointStore::default();
        assert_eq!(store.award(&rules, false), 3);
        assert_eq!(store.award(&rules, true), 8);
        assert_eq!(store.points(), 11);
    }
}
