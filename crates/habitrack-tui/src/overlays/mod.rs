//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay is self-contained: it owns its state, key handler, and render function.
//!
//! - `add_habit.rs`: habit name input
//! - `confirm_delete.rs`: delete confirmation
//! - `render_utils.rs`: shared rendering utilities

pub mod add_habit;
pub mod confirm_delete;
pub mod render_utils;

pub use add_habit::AddHabitState;
pub use confirm_delete::ConfirmDeleteState;
use crossterm::event::KeyEvent;
use habitrack_core::api::Habit;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::state::TuiState;

/// Requests to open a new overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayRequest {
    AddHabit,
    ConfirmDelete(Habit),
}

/// Transition returned by overlay key handlers.
#[derive(Debug, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    AddHabit(AddHabitState),
    ConfirmDelete(ConfirmDeleteState),
}

impl Overlay {
    pub fn open(request: OverlayRequest) -> Self {
        match request {
            OverlayRequest::AddHabit => Overlay::AddHabit(AddHabitState::open()),
            OverlayRequest::ConfirmDelete(habit) => {
                Overlay::ConfirmDelete(ConfirmDeleteState::open(habit))
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::AddHabit(s) => s.render(frame, area),
            Overlay::ConfirmDelete(s) => s.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::AddHabit(s) => s.handle_key(tui, key),
            Overlay::ConfirmDelete(s) => s.handle_key(tui, key),
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(overlay) = self {
            overlay.render(frame, area);
        }
    }
}
