//! Add-habit overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use habitrack_core::habits::MAX_HABITS;
use habitrack_core::validation::{HABIT_NAME_MAX_LEN, validate_habit_name};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use crate::effects::UiEffect;
use crate::state::TuiState;

#[derive(Debug, Clone, Default)]
pub struct AddHabitState {
    pub input: String,
    /// Validation message for the current input.
    pub error: Option<String>,
}

impl AddHabitState {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        render_add_habit_overlay(frame, self, area);
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Clear error on any input
        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Enter => {
                if !tui.habits.list.can_add() {
                    self.error = Some(format!("You can register up to {MAX_HABITS} habits"));
                    return OverlayUpdate::stay();
                }
                if tui.habits.pending {
                    self.error = Some("Another change is in progress...".to_string());
                    return OverlayUpdate::stay();
                }
                match validate_habit_name(&self.input) {
                    Ok(name) => OverlayUpdate::close().with_ui_effects(vec![
                        UiEffect::RegisterHabit {
                            name: name.to_string(),
                        },
                    ]),
                    Err(e) => {
                        self.error = Some(e.to_string());
                        OverlayUpdate::stay()
                    }
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }
}

fn render_add_habit_overlay(frame: &mut Frame, state: &AddHabitState, area: Rect) {
    use super::render_utils::{
        InputHint, InputLine, OverlayConfig, render_input_line, render_overlay, render_separator,
    };

    let hints = [
        InputHint::new("Enter", "register"),
        InputHint::new("Esc", "cancel"),
    ];
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: "New Habit",
            border_color: Color::Yellow,
            width: 50,
            height: 7,
            hints: &hints,
        },
    );

    let input_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, 1);
    render_input_line(
        frame,
        input_area,
        &InputLine {
            value: &state.input,
            placeholder: Some("Habit name..."),
            prompt: "> ",
            prompt_color: Color::DarkGray,
            text_color: Color::Yellow,
            placeholder_color: Color::DarkGray,
            cursor_color: Some(Color::Yellow),
        },
    );

    render_separator(frame, layout.body, 1);

    let help = format!("Up to {HABIT_NAME_MAX_LEN} characters");
    let (help_text, help_style) = if let Some(error) = &state.error {
        (error.as_str(), Style::default().fg(Color::Red))
    } else {
        (help.as_str(), Style::default().fg(Color::DarkGray))
    };
    let help_area = Rect::new(layout.body.x, layout.body.y + 2, layout.body.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(help_text.to_string(), help_style))),
        help_area,
    );

    render_separator(frame, layout.body, 3);
}
