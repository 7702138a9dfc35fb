//! Habit list management.

use crate::api::Habit;

/// Client-enforced cap on registered habits.
pub const MAX_HABITS: usize = 5;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load habits";
pub const REGISTER_FAILED_MESSAGE: &str = "Failed to register habit";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete habit";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitList {
    habits: Vec<Habit>,
}

impl HabitList {
    pub fn new(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn can_add(&self) -> bool {
        self.habits.len() < MAX_HABITS
    }

    pub fn get(&self, index: usize) -> Option<&Habit> {
        self.habits.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Appends a registered habit with its server-assigned id.
    pub fn push(&mut self, habit: Habit) {
        self.habits.push(habit);
    }

    /// Removes the habit with `id`, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Habit> {
        let index = self.habits.iter().position(|h| h.id == id)?;
        Some(self.habits.remove(index))
    }
}
