//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── route           (active screen)
//! │   ├── points: PointStore
//! │   ├── alert: AlertStore
//! │   ├── auth: AuthState     (login / sign-up forms)
//! │   ├── today: TodayState   (today's track, selection)
//! │   └── habits: HabitsState (habit list, selection)
//! └── overlay: Option<Overlay> (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay key
//! handlers can borrow `&mut self` and `&TuiState` at the same time.

use std::time::Instant;

use habitrack_core::alert::{AlertStore, Severity};
use habitrack_core::config::Config;
use habitrack_core::guard::Route;
use habitrack_core::points::PointStore;

use crate::auth::AuthState;
use crate::effects::UiEffect;
use crate::habits::HabitsState;
use crate::overlays::Overlay;
use crate::today::TodayState;

/// Values read from client storage before the UI starts.
#[derive(Debug, Clone, Default)]
pub struct Startup {
    pub route: Route,
    pub username: Option<String>,
    pub points: i64,
}

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, startup: Startup) -> Self {
        Self {
            tui: TuiState::new(config, startup),
            overlay: None,
        }
    }

    /// Effects for entering the start-up screen.
    pub fn start(&mut self) -> Vec<UiEffect> {
        let route = self.tui.route;
        self.tui.navigate(route)
    }
}

/// Non-overlay UI state.
pub struct TuiState {
    pub config: Config,
    pub route: Route,
    pub username: Option<String>,
    pub points: PointStore,
    pub alert: AlertStore,
    pub auth: AuthState,
    pub today: TodayState,
    pub habits: HabitsState,
    pub should_quit: bool,
}

impl TuiState {
    pub fn new(config: Config, startup: Startup) -> Self {
        let alert = AlertStore::new(&config.alert);
        Self {
            config,
            route: startup.route,
            username: startup.username,
            points: PointStore::new(startup.points),
            alert,
            auth: AuthState::default(),
            today: TodayState::default(),
            habits: HabitsState::default(),
            should_quit: false,
        }
    }

    /// Switches screens and returns the effects that load the new screen.
    pub fn navigate(&mut self, route: Route) -> Vec<UiEffect> {
        self.route = route;
        match route {
            Route::Login => {
                self.auth.clear_secrets();
                vec![]
            }
            Route::Today => {
                self.today.loading = true;
                vec![UiEffect::FetchUser, UiEffect::LoadTodayTrack]
            }
            Route::Habits => {
                self.habits.loading = true;
                vec![UiEffect::LoadHabits]
            }
        }
    }

    /// Drops screen data after the guard cleared the stored credentials.
    pub fn session_expired(&mut self) -> Vec<UiEffect> {
        self.username = None;
        self.today = TodayState::default();
        self.habits = HabitsState::default();
        self.auth.show_expired();
        self.navigate(Route::Login)
    }

    pub fn show_alert(&mut self, message: impl Into<String>, severity: Severity) {
        self.alert.show(message, severity, Instant::now());
    }
}
