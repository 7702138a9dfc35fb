//! Habit management screen state.

use habitrack_core::api::Habit;
use habitrack_core::habits::HabitList;

#[derive(Debug, Clone, Default)]
pub struct HabitsState {
    pub list: HabitList,
    pub selected: usize,
    pub loading: bool,
    /// A registration or deletion is in flight.
    pub pending: bool,
}

impl HabitsState {
    pub fn selected_habit(&self) -> Option<&Habit> {
        self.list.get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.list.len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.list.len().saturating_sub(1));
    }
}
