//! Habit management reducer.

use crossterm::event::{KeyCode, KeyEvent};
use habitrack_core::alert::Severity;
use habitrack_core::api::Habit;
use habitrack_core::guard::{Guarded, Route};
use habitrack_core::habits::{
    DELETE_FAILED_MESSAGE, HabitList, LOAD_FAILED_MESSAGE, MAX_HABITS, REGISTER_FAILED_MESSAGE,
};

use crate::effects::UiEffect;
use crate::events::HabitsUiEvent;
use crate::overlays::OverlayRequest;
use crate::state::TuiState;

/// Handles keys on the habit screen. May ask for an overlay.
pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> (Vec<UiEffect>, Option<OverlayRequest>) {
    match key.code {
        KeyCode::Char('q') => (vec![UiEffect::Quit], None),
        KeyCode::Up | KeyCode::Char('k') => {
            tui.habits.select_prev();
            (vec![], None)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            tui.habits.select_next();
            (vec![], None)
        }
        KeyCode::Char('a') => {
            if tui.habits.list.can_add() {
                (vec![], Some(OverlayRequest::AddHabit))
            } else {
                tui.show_alert(
                    format!("You can register up to {MAX_HABITS} habits"),
                    Severity::Warning,
                );
                (vec![], None)
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let request = tui
                .habits
                .selected_habit()
                .cloned()
                .map(OverlayRequest::ConfirmDelete);
            (vec![], request)
        }
        KeyCode::Esc | KeyCode::Tab | KeyCode::Char('t') => (tui.navigate(Route::Today), None),
        KeyCode::Char('r') => (tui.navigate(Route::Habits), None),
        KeyCode::Char('L') => (vec![UiEffect::Logout], None),
        _ => (vec![], None),
    }
}

pub fn handle_event(tui: &mut TuiState, event: HabitsUiEvent) -> Vec<UiEffect> {
    match event {
        HabitsUiEvent::Loaded(result) => match result {
            Guarded::Ok(habits) => {
                tui.habits.list = HabitList::new(habits);
                tui.habits.loading = false;
                tui.habits.clamp_selection();
                vec![]
            }
            Guarded::AuthFailed { .. } => tui.session_expired(),
            Guarded::Failed(_) => {
                tui.habits.loading = false;
                tui.show_alert(LOAD_FAILED_MESSAGE, Severity::Error);
                vec![]
            }
        },
        HabitsUiEvent::Registered { name, result } => {
            tui.habits.pending = false;
            match result {
                Guarded::Ok(id) => {
                    tui.habits.list.push(Habit {
                        id,
                        user_id: String::new(),
                        name,
                    });
                    vec![]
                }
                Guarded::AuthFailed { .. } => tui.session_expired(),
                Guarded::Failed(_) => {
                    tui.show_alert(REGISTER_FAILED_MESSAGE, Severity::Error);
                    vec![]
                }
            }
        }
        HabitsUiEvent::Deleted { id, result } => {
            tui.habits.pending = false;
            match result {
                Guarded::Ok(()) => {
                    tui.habits.list.remove(&id);
                    tui.habits.clamp_selection();
                    vec![]
                }
                Guarded::AuthFailed { .. } => tui.session_expired(),
                Guarded::Failed(_) => {
                    tui.show_alert(DELETE_FAILED_MESSAGE, Severity::Error);
                    vec![]
                }
            }
        }
    }
}
