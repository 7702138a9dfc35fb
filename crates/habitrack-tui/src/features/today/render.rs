//! Today feature view.

use habitrack_core::daily::EMPTY_TRACK_MESSAGE;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::TodayState;
use crate::common::truncate_with_ellipsis;

pub fn render_today(frame: &mut Frame, today: &TodayState, area: Rect) {
    let title = match &today.track {
        Some(track) if !track.date().is_empty() => format!(" Today · {} ", track.date()),
        _ => " Today ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match &today.track {
        None if today.loading => vec![dim("Loading...")],
        None => vec![dim("Press r to load today's habits.")],
        Some(track) if track.is_empty() => vec![dim(EMPTY_TRACK_MESSAGE)],
        Some(track) => {
            let name_width = inner.width.saturating_sub(8) as usize;
            let mut lines: Vec<Line> = track
                .statuses()
                .iter()
                .enumerate()
                .map(|(i, status)| {
                    let selected = i == today.selected;
                    let (mark, mark_color) = if status.is_done {
                        ("[x]", Color::Green)
                    } else if track.is_in_flight(&status.habit_id) {
                        ("[…]", Color::Yellow)
                    } else {
                        ("[ ]", Color::Gray)
                    };
                    let name_style = if status.is_done {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let name_style = if selected {
                        name_style.add_modifier(Modifier::REVERSED)
                    } else {
                        name_style
                    };
                    Line::from(vec![
                        Span::styled(
                            if selected { "> " } else { "  " },
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::styled(mark, Style::default().fg(mark_color)),
                        Span::raw(" "),
                        Span::styled(
                            truncate_with_ellipsis(&status.habit_name, name_width),
                            name_style,
                        ),
                    ])
                })
                .collect();

            lines.push(Line::from(""));
            let remaining = track.remaining();
            lines.push(if remaining == 0 {
                Line::from(Span::styled(
                    "Everything is done for today.",
                    Style::default().fg(Color::Green),
                ))
            } else {
                dim(&format!("{remaining} remaining"))
            });
            lines
        }
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

fn dim(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}
