//! Auth feature reducer.
//!
//! Handles form editing on the login / sign-up screen and the results of the
//! login, sign-up and logout effects.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use habitrack_core::guard::Route;
use habitrack_core::points::PointStore;

use super::state::{AuthMode, AuthState, SIGNUP_SUCCESS_MESSAGE};
use crate::effects::UiEffect;
use crate::events::AuthUiEvent;
use crate::habits::HabitsState;
use crate::state::TuiState;
use crate::today::TodayState;

pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let auth = &mut tui.auth;

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('t') if ctrl => {
            if !auth.is_submitting() {
                auth.switch_mode();
            }
            vec![]
        }
        KeyCode::Tab | KeyCode::Down => {
            auth.focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            auth.focus_prev();
            vec![]
        }
        KeyCode::Enter => {
            if auth.can_submit() {
                submit(auth)
            } else {
                auth.focus_next();
                vec![]
            }
        }
        KeyCode::Backspace => {
            if !auth.is_submitting() {
                let mut value = auth.focused_value();
                value.pop();
                auth.set_focused_value(value);
            }
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            if !auth.is_submitting() {
                let mut value = auth.focused_value();
                value.push(c);
                auth.set_focused_value(value);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn submit(auth: &mut AuthState) -> Vec<UiEffect> {
    auth.error = None;
    match auth.mode {
        AuthMode::Login => {
            auth.login.submitting = true;
            vec![UiEffect::Login {
                username: auth.login.username.clone(),
                password: auth.login.password.clone(),
            }]
        }
        AuthMode::SignUp => {
            auth.signup.submitting = true;
            vec![UiEffect::SignUp {
                username: auth.signup.username().to_string(),
                password: auth.signup.password().to_string(),
                confirmation: auth.signup.confirmation().to_string(),
            }]
        }
    }
}

pub fn handle_event(tui: &mut TuiState, event: AuthUiEvent) -> Vec<UiEffect> {
    match event {
        AuthUiEvent::LoginFinished(Ok(logged_in)) => {
            tui.auth.login.submitting = false;
            tui.auth.error = None;
            tui.auth.notice = None;
            tui.username = Some(logged_in.username);
            tui.points.set(logged_in.points);
            tui.navigate(Route::Today)
        }
        AuthUiEvent::LoginFinished(Err(message)) => {
            tui.auth.login.submitting = false;
            tui.auth.notice = None;
            tui.auth.error = Some(message);
            vec![]
        }
        AuthUiEvent::SignUpFinished(Ok(())) => {
            tui.auth.signup.submitting = false;
            tui.auth.switch_mode();
            tui.auth.clear_secrets();
            tui.auth.notice = Some(SIGNUP_SUCCESS_MESSAGE.to_string());
            vec![]
        }
        AuthUiEvent::SignUpFinished(Err(message)) => {
            tui.auth.signup.submitting = false;
            tui.auth.error = Some(message);
            vec![]
        }
        AuthUiEvent::LoggedOut => {
            tui.username = None;
            tui.points = PointStore::default();
            tui.today = TodayState::default();
            tui.habits = HabitsState::default();
            tui.auth = AuthState::default();
            tui.navigate(Route::Login)
        }
    }
}
