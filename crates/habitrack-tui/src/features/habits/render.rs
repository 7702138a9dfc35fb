//! Habit management view.

use habitrack_core::habits::MAX_HABITS;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::HabitsState;
use crate::common::truncate_with_ellipsis;

const EMPTY_LIST_MESSAGE: &str = "No habits registered.";

pub fn render_habits(frame: &mut Frame, habits: &HabitsState, area: Rect) {
    let title = format!(" Habits · {}/{MAX_HABITS} ", habits.list.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = if habits.loading && habits.list.is_empty() {
        vec![dim("Loading...")]
    } else if habits.list.is_empty() {
        vec![dim(EMPTY_LIST_MESSAGE)]
    } else {
        let name_width = inner.width.saturating_sub(4) as usize;
        habits
            .list
            .habits()
            .iter()
            .enumerate()
            .map(|(i, habit)| {
                let selected = i == habits.selected;
                let style = if selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(vec![
                    Span::styled(
                        if selected { "> " } else { "  " },
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(truncate_with_ellipsis(&habit.name, name_width), style),
                ])
            })
            .collect()
    };

    lines.push(Line::from(""));
    if habits.pending {
        lines.push(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(Color::Yellow),
        )));
    } else if !habits.list.can_add() {
        lines.push(dim(&format!(
            "Limit reached: at most {MAX_HABITS} habits (adding disabled)"
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn dim(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}
