//! Delete confirmation overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use habitrack_core::api::Habit;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use crate::common::truncate_with_ellipsis;
use crate::effects::UiEffect;
use crate::state::TuiState;

#[derive(Debug, Clone)]
pub struct ConfirmDeleteState {
    pub habit: Habit,
}

impl ConfirmDeleteState {
    pub fn open(habit: Habit) -> Self {
        Self { habit }
    }

    /// Question shown in the dialog.
    pub fn prompt(&self) -> String {
        format!("Delete \"{}\"?", self.habit.name)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        render_confirm_delete_overlay(frame, self, area);
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                if tui.habits.pending {
                    return OverlayUpdate::stay();
                }
                OverlayUpdate::close().with_ui_effects(vec![UiEffect::DeleteHabit {
                    id: self.habit.id.clone(),
                }])
            }
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }
}

fn render_confirm_delete_overlay(frame: &mut Frame, state: &ConfirmDeleteState, area: Rect) {
    use super::render_utils::{InputHint, OverlayConfig, render_overlay};

    let hints = [InputHint::new("y", "delete"), InputHint::new("n", "cancel")];
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: "Delete Habit",
            border_color: Color::Red,
            width: 44,
            height: 6,
            hints: &hints,
        },
    );

    let prompt = truncate_with_ellipsis(&state.prompt(), layout.body.width as usize);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            prompt,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        layout.body,
    );
}
