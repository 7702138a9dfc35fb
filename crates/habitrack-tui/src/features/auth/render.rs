//! Auth feature view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{AuthMode, AuthState, Field};
use crate::common::{mask, truncate_start_with_ellipsis};
use crate::overlays::render_utils::{
    InputHint, calculate_overlay_area, hint_line, render_overlay_container,
};

/// Renders the login / sign-up form centered in `area`.
pub fn render_auth(frame: &mut Frame, auth: &AuthState, area: Rect) {
    let (title, height) = match auth.mode {
        AuthMode::Login => ("Log in", 12),
        AuthMode::SignUp => ("Sign up", 16),
    };
    let popup = calculate_overlay_area(area, 56, height);
    render_overlay_container(frame, popup, title, Color::Cyan);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    let mut lines = Vec::new();
    lines.push(match &auth.notice {
        Some(notice) => styled(notice, Color::Green),
        None => Line::from(""),
    });

    for field in auth.fields() {
        lines.push(styled(field_label(*field), Color::DarkGray));
        lines.push(field_line(auth, *field, inner.width));
        if auth.mode == AuthMode::SignUp
            && let Some(reason) = field_reason(auth, *field)
        {
            lines.push(styled(&reason, Color::Yellow));
        } else {
            lines.push(Line::from(""));
        }
    }

    if let Some(error) = &auth.error {
        lines.push(styled(error, Color::Red));
    } else if auth.is_submitting() {
        let text = match auth.mode {
            AuthMode::Login => "Logging in...",
            AuthMode::SignUp => "Creating account...",
        };
        lines.push(styled(text, Color::Yellow));
    }

    let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines), body);

    let switch = match auth.mode {
        AuthMode::Login => "sign up",
        AuthMode::SignUp => "log in",
    };
    let submit_color = if auth.can_submit() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let hints = [
        InputHint::new("Enter", "submit"),
        InputHint::new("Tab", "next"),
        InputHint::new("Ctrl+T", switch),
        InputHint::new("Esc", "quit"),
    ];
    let hints_area = Rect::new(
        inner.x,
        (inner.y + inner.height).saturating_sub(1),
        inner.width,
        1,
    );
    frame.render_widget(Paragraph::new(hint_line(&hints, submit_color)), hints_area);
}

fn styled(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Username => "Username",
        Field::Password => "Password",
        Field::Confirmation => "Confirm password",
    }
}

fn field_line(auth: &AuthState, field: Field, width: u16) -> Line<'static> {
    let focused = auth.focus == field;
    let raw = auth.value(field);
    let value = if field == Field::Username {
        raw
    } else {
        mask(&raw)
    };
    let value = truncate_start_with_ellipsis(&value, width.saturating_sub(3) as usize);

    let mut spans = vec![
        Span::styled(
            if focused { "> " } else { "  " },
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            value,
            Style::default().fg(if focused { Color::White } else { Color::Gray }),
        ),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

/// Inline validation reason, shown once the user has typed into the field.
fn field_reason(auth: &AuthState, field: Field) -> Option<String> {
    let form = &auth.signup;
    match field {
        Field::Username if !form.username().is_empty() => {
            form.username_error().map(|e| e.to_string())
        }
        Field::Confirmation if !form.password().is_empty() || !form.confirmation().is_empty() => {
            form.password_error().map(|e| e.to_string())
        }
        _ => None,
    }
}
