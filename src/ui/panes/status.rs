//! Status bar rendering with keybindings and state indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

/// Badge shown at the right end of the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Idle,
    Playing,
    Paused,
    Done,
    Cancelled,
}

impl StatusIndicator {
    fn badge(self) -> (&'static str, Color) {
        match self {
            StatusIndicator::Idle => (" IDLE ", DEFAULT_THEME.comment),
            StatusIndicator::Playing => (" ▶ PLAYING ", DEFAULT_THEME.secondary),
            StatusIndicator::Paused => (" ‖ PAUSED ", DEFAULT_THEME.primary),
            StatusIndicator::Done => (" DONE ", DEFAULT_THEME.success),
            StatusIndicator::Cancelled => (" CANCELLED ", DEFAULT_THEME.error),
        }
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    size: usize,
    delay: Duration,
    indicator: StatusIndicator,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    // Left side: run settings and last message
    let left_spans = vec![
        Span::styled(
            format!(" n={} · {}ms ", size, delay.as_millis()),
            Style::default()
                .bg(if indicator == StatusIndicator::Cancelled {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default().bg(DEFAULT_THEME.status_bg).fg(
                if indicator == StatusIndicator::Cancelled {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                },
            ),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (key, desc) in [
        ("←/→", "step"),
        ("⎵", "play"),
        ("↵", "finish"),
        ("n", "new"),
        ("s", "stop"),
        ("+/-", "size"),
        ("[/]", "speed"),
        ("a", "algo"),
        ("q", "quit"),
    ] {
        right_spans.push(Span::styled(format!(" {key} "), key_style));
        right_spans.push(Span::styled(format!(" {desc} "), desc_style));
        right_spans.push(Span::styled("│", sep_style));
    }

    let (label, color) = indicator.badge();
    right_spans.push(Span::styled(
        label,
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    ));

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
