//! Today feature reducer.

use crossterm::event::{KeyCode, KeyEvent};
use habitrack_core::alert::Severity;
use habitrack_core::daily::{ALL_DONE_MESSAGE, Rejected, TodayTrack};
use habitrack_core::guard::{Guarded, Route};

use crate::effects::UiEffect;
use crate::events::TodayUiEvent;
use crate::state::TuiState;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load today's habits";
pub const MARK_FAILED_MESSAGE: &str = "Failed to mark habit done";
pub const ALREADY_DONE_MESSAGE: &str = "Already done today";

pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Up | KeyCode::Char('k') => {
            tui.today.select_prev();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            tui.today.select_next();
            vec![]
        }
        KeyCode::Enter | KeyCode::Char(' ') => mark_selected_done(tui),
        KeyCode::Char('h') | KeyCode::Tab => tui.navigate(Route::Habits),
        KeyCode::Char('r') => tui.navigate(Route::Today),
        KeyCode::Char('L') => vec![UiEffect::Logout],
        _ => vec![],
    }
}

fn mark_selected_done(tui: &mut TuiState) -> Vec<UiEffect> {
    let Some(habit_id) = tui.today.selected_status().map(|s| s.habit_id.clone()) else {
        return vec![];
    };
    let Some(track) = tui.today.track.as_mut() else {
        return vec![];
    };

    match track.begin(&habit_id) {
        Ok(()) => vec![UiEffect::MarkDone {
            date: track.date().to_string(),
            habit_id,
        }],
        Err(Rejected::AlreadyDone) => {
            tui.show_alert(ALREADY_DONE_MESSAGE, Severity::Info);
            vec![]
        }
        Err(Rejected::InFlight | Rejected::UnknownHabit) => vec![],
    }
}

pub fn handle_event(tui: &mut TuiState, event: TodayUiEvent) -> Vec<UiEffect> {
    match event {
        TodayUiEvent::UserLoaded(result) => match result {
            Guarded::Ok(user) => {
                tui.username = Some(user.username);
                tui.points.set(user.points);
                vec![UiEffect::PersistPoints {
                    points: tui.points.points(),
                }]
            }
            Guarded::AuthFailed { .. } => tui.session_expired(),
            // Keep the local balance when reconciliation fails.
            Guarded::Failed(_) => vec![],
        },
        TodayUiEvent::TrackLoaded(result) => match result {
            Guarded::Ok(track) => {
                tui.today.set_track(TodayTrack::new(track));
                vec![]
            }
            Guarded::AuthFailed { .. } => tui.session_expired(),
            Guarded::Failed(err) => {
                tui.today.loading = false;
                tui.show_alert(format!("{LOAD_FAILED_MESSAGE}: {err}"), Severity::Error);
                vec![]
            }
        },
        TodayUiEvent::MarkDoneFinished { habit_id, result } => {
            handle_mark_done(tui, &habit_id, result)
        }
    }
}

fn handle_mark_done(tui: &mut TuiState, habit_id: &str, result: Guarded<()>) -> Vec<UiEffect> {
    let Some(track) = tui.today.track.as_mut() else {
        return vec![];
    };

    match result {
        Guarded::Ok(()) => {
            let Some(award) = track.succeed(habit_id, &mut tui.points, &tui.config.points) else {
                return vec![];
            };
            if award.all_done {
                tui.show_alert(ALL_DONE_MESSAGE, Severity::Success);
            }
            vec![UiEffect::PersistPoints {
                points: tui.points.points(),
            }]
        }
        Guarded::AuthFailed { .. } => {
            track.fail(habit_id);
            tui.session_expired()
        }
        Guarded::Failed(err) => {
            track.fail(habit_id);
            tui.show_alert(format!("{MARK_FAILED_MESSAGE}: {err}"), Severity::Error);
            vec![]
        }
    }
}
