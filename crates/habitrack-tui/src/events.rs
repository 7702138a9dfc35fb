//! UI events consumed by the reducer.
//!
//! Terminal input and timer ticks come from the runtime loop; every other
//! variant is the result of an effect handler, delivered through the inbox.

use crossterm::event::Event;
use habitrack_core::api::{DailyTrack, Habit, User};
use habitrack_core::guard::Guarded;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer; drives the alert lifecycle.
    Tick,
    Terminal(Event),
    Auth(AuthUiEvent),
    Today(TodayUiEvent),
    Habits(HabitsUiEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedIn {
    pub username: String,
    pub points: i64,
}

#[derive(Debug)]
pub enum AuthUiEvent {
    /// `Err` carries the message to show under the form.
    LoginFinished(Result<LoggedIn, String>),
    SignUpFinished(Result<(), String>),
    LoggedOut,
}

#[derive(Debug)]
pub enum TodayUiEvent {
    UserLoaded(Guarded<User>),
    TrackLoaded(Guarded<DailyTrack>),
    MarkDoneFinished {
        habit_id: String,
        result: Guarded<()>,
    },
}

#[derive(Debug)]
pub enum HabitsUiEvent {
    Loaded(Guarded<Vec<Habit>>),
    Registered {
        name: String,
        /// Server-assigned id on success.
        result: Guarded<String>,
    },
    Deleted {
        id: String,
        result: Guarded<()>,
    },
}
