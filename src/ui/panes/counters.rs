//! Counters pane: tallies and history depth for one run

use crate::counters::Counts;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};
use std::time::Duration;

pub struct CountersRenderData<'a> {
    pub title: &'a str,
    pub counts: Counts,
    pub elapsed: Option<Duration>,
    /// (history, future, cap); `None` where there is no history to show
    pub history: Option<(usize, usize, usize)>,
    /// Banner shown under the tallies, e.g. a winner label or a fault
    pub banner: Option<(String, bool)>,
}

fn row<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{label:<12}"),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

pub fn render_counters_pane(frame: &mut Frame, area: Rect, data: &CountersRenderData) {
    let block = Block::default()
        .title(format!(" {} ", data.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 0, 0, 0));

    let mut lines = vec![
        row("Comparisons", data.counts.comparisons.to_string()),
        row("Swaps", data.counts.swaps.to_string()),
    ];

    if let Some(elapsed) = data.elapsed {
        lines.push(row("Elapsed", format!("{:.1} ms", elapsed.as_secs_f64() * 1000.0)));
    }

    if let Some((history, future, cap)) = data.history {
        lines.push(row("History", format!("{history}/{cap}")));
        lines.push(row("Ahead", future.to_string()));
    }

    if let Some((text, is_error)) = &data.banner {
        let color = if *is_error {
            DEFAULT_THEME.error
        } else {
            DEFAULT_THEME.success
        };
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
