//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use habitrack_core::guard::Route;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::{Overlay, OverlayTransition, OverlayUpdate};
use crate::state::AppState;
use crate::{auth, habits, today};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            app.tui.alert.tick(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Auth(event) => auth::handle_event(&mut app.tui, event),
        // Results of requests started before a logout belong to no session.
        UiEvent::Today(_) | UiEvent::Habits(_) if app.tui.route == Route::Login => {
            tracing::debug!("dropping result that arrived after logout");
            vec![]
        }
        UiEvent::Today(event) => today::handle_event(&mut app.tui, event),
        UiEvent::Habits(event) => habits::handle_event(&mut app.tui, event),
    };

    // Overlays only belong to the habit screen.
    if app.tui.route != Route::Habits {
        app.overlay = None;
    }

    mark_pending(app, &effects);
    effects
}

/// Tracks habit mutations in flight so a second one cannot start.
fn mark_pending(app: &mut AppState, effects: &[UiEffect]) {
    if effects.iter().any(|effect| {
        matches!(
            effect,
            UiEffect::RegisterHabit { .. } | UiEffect::DeleteHabit { .. }
        )
    }) {
        app.tui.habits.pending = true;
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Raw mode swallows SIGINT, so Ctrl+C arrives as a key.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        if app.overlay.is_some() {
            app.overlay = None;
            return vec![];
        }
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(&app.tui, key);
        return apply_overlay_update(app, update);
    }

    match app.tui.route {
        Route::Login => auth::handle_key(&mut app.tui, key),
        Route::Today => today::handle_key(&mut app.tui, key),
        Route::Habits => {
            let (effects, request) = habits::handle_key(&mut app.tui, key);
            if let Some(request) = request
                && app.overlay.is_none()
            {
                app.overlay = Some(Overlay::open(request));
            }
            effects
        }
    }
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    match update.transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => app.overlay = None,
    }
    update.effects
}
