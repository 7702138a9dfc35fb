//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Handlers run as spawned tasks and send their `UiEvent` result to
//! `inbox_tx`. The runtime drains `inbox_rx` each frame.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use habitrack_core::api::ApiClient;
use habitrack_core::config::Config;
use habitrack_core::points::PointStore;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

pub use self::handlers::Services;
use crate::effects::UiEffect;
use crate::events::{AuthUiEvent, UiEvent};
use crate::state::{AppState, Startup};
use crate::{render, terminal, update};

/// Sender for the runtime's event inbox.
pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;

/// Receiver for the runtime's event inbox.
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Tick cadence; drives alert expiry and batched redraws.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    services: Services,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Reads the stored session and enters the alternate screen.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: Config, api: ApiClient) -> Result<Self> {
        let services = Services::new(api);
        let startup = Startup {
            route: services.session.start_route(),
            username: services.session.username(),
            points: PointStore::load(services.storage.as_ref()).points(),
        };

        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state: AppState::new(config, startup),
            services,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if reading terminal input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(route = ?self.state.tui.route, "TUI started");
        let effects = self.state.start();
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.tui.should_quit {
            let events = self.collect_events()?;
            for event in events {
                if !matches!(event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            // Alerts expire on ticks, so a visible alert keeps the frame live.
            if dirty || self.state.tui.alert.is_active() {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        tracing::info!("TUI exiting");
        Ok(())
    }

    /// Collects events from the inbox and the terminal, then emits a Tick
    /// when due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick unless there is already work queued.
        let poll_duration = if events.is_empty() {
            TICK_INTERVAL.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns an async handler and sends its result event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce(Services) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let services = self.services.clone();
        tokio::spawn(async move {
            let _ = tx.send(f(services).await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            // Auth effects
            UiEffect::Login { username, password } => {
                self.spawn_effect(move |s| handlers::login(s, username, password));
            }
            UiEffect::SignUp {
                username,
                password,
                confirmation,
            } => {
                self.spawn_effect(move |s| handlers::signup(s, username, password, confirmation));
            }
            UiEffect::Logout => {
                if let Err(e) = self.services.session.logout() {
                    tracing::warn!(error = %e, "Failed to clear session");
                }
                self.dispatch_event(UiEvent::Auth(AuthUiEvent::LoggedOut));
            }

            // Today effects
            UiEffect::FetchUser => self.spawn_effect(handlers::fetch_user),
            UiEffect::LoadTodayTrack => self.spawn_effect(handlers::load_today_track),
            UiEffect::MarkDone { date, habit_id } => {
                self.spawn_effect(move |s| handlers::mark_done(s, date, habit_id));
            }
            UiEffect::PersistPoints { points } => {
                // The balance is already in state; a write failure only loses it on restart.
                if let Err(e) = PointStore::new(points).save(self.services.storage.as_ref()) {
                    tracing::warn!(error = %e, points, "Failed to persist points");
                }
            }

            // Habit effects
            UiEffect::LoadHabits => self.spawn_effect(handlers::load_habits),
            UiEffect::RegisterHabit { name } => {
                self.spawn_effect(move |s| handlers::register_habit(s, name));
            }
            UiEffect::DeleteHabit { id } => {
                self.spawn_effect(move |s| handlers::delete_habit(s, id));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
