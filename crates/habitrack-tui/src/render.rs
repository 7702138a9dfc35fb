//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference and draw to a
//! ratatui Frame. They never mutate state or return effects.

use habitrack_core::alert::{Alert, Severity};
use habitrack_core::guard::Route;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;
use crate::overlays::OverlayExt;
use crate::overlays::render_utils::{InputHint, hint_line};
use crate::state::{AppState, TuiState};
use crate::{auth, habits, today};

const HEADER_HEIGHT: u16 = 1;
const ALERT_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;

pub const APP_NAME: &str = "habitrack";

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(ALERT_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_header(frame, state, chunks[0]);
    match state.route {
        Route::Login => auth::render_auth(frame, &state.auth, chunks[1]),
        Route::Today => today::render_today(frame, &state.today, chunks[1]),
        Route::Habits => habits::render_habits(frame, &state.habits, chunks[1]),
    }
    if let Some(alert) = state.alert.visible() {
        render_alert(frame, alert, chunks[2]);
    }
    render_footer(frame, state, chunks[3]);

    app.overlay.render(frame, area);
}

fn render_header(frame: &mut Frame, state: &TuiState, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {APP_NAME} "),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(username) = &state.username
        && state.route != Route::Login
    {
        let user = truncate_with_ellipsis(username, area.width.saturating_sub(30) as usize);
        spans.push(Span::raw("  "));
        spans.push(Span::styled(user, Style::default().fg(Color::White)));
        spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("{} pts", state.points.points()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

fn render_alert(frame: &mut Frame, alert: &Alert, area: Rect) {
    let color = severity_color(alert.severity);
    let message = truncate_with_ellipsis(&alert.message, area.width.saturating_sub(4) as usize);
    let line = Line::from(vec![
        Span::styled(" ▌ ", Style::default().fg(color)),
        Span::styled(message, Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, state: &TuiState, area: Rect) {
    let hints: &[InputHint] = match state.route {
        // The login popup draws its own hints.
        Route::Login => return,
        Route::Today => &[
            InputHint::new("↑↓", "select"),
            InputHint::new("Enter", "done"),
            InputHint::new("h", "habits"),
            InputHint::new("r", "reload"),
            InputHint::new("L", "logout"),
            InputHint::new("q", "quit"),
        ],
        Route::Habits => &[
            InputHint::new("↑↓", "select"),
            InputHint::new("a", "add"),
            InputHint::new("d", "delete"),
            InputHint::new("t", "today"),
            InputHint::new("L", "logout"),
            InputHint::new("q", "quit"),
        ],
    };
    frame.render_widget(Paragraph::new(hint_line(hints, Color::Cyan)), area);
}
