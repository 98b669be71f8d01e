//! Bar chart of the array being sorted
//!
//! One bar per element, height proportional to its value. Active indices are
//! drawn in the active colour, boundary indices in the boundary colour, and
//! the remaining bars shade from the base colour toward the hot colour as
//! their swap heat approaches the run's threshold.

use crate::algorithms::{Highlights, Value};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Everything the bars pane needs for one draw
pub struct BarsRenderData<'a> {
    pub title: String,
    pub array: &'a [Value],
    pub highlights: Highlights,
    /// Per-index heat and the threshold at which a bar is fully hot
    pub heat: Option<(&'a [u32], f64)>,
    pub emphasized: bool,
}

/// Colour of the bar at `index`
pub fn bar_color(index: usize, highlights: &Highlights, heat: Option<(&[u32], f64)>) -> Color {
    if highlights.is_active(index) {
        return DEFAULT_THEME.active;
    }
    if highlights.is_boundary(index) {
        return DEFAULT_THEME.boundary;
    }
    match heat {
        Some((heat, threshold)) if threshold > 0.0 => {
            let level = heat.get(index).copied().unwrap_or(0) as f64;
            blend(DEFAULT_THEME.bar, DEFAULT_THEME.hot, (level / threshold).min(1.0))
        }
        _ => DEFAULT_THEME.bar,
    }
}

fn blend(from: Color, to: Color, t: f64) -> Color {
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t >= 1.0 => to,
        _ => from,
    }
}

/// Render the array as a bar chart
pub fn render_bars_pane(frame: &mut Frame, area: Rect, data: &BarsRenderData) {
    let border_style = if data.emphasized {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", data.title))
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.array.is_empty() {
        let paragraph = Paragraph::new("(no array)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar> = data
        .array
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            Bar::default()
                .value(u64::try_from(value).unwrap_or(0))
                .text_value(String::new())
                .style(Style::default().fg(bar_color(i, &data.highlights, data.heat)))
        })
        .collect();

    // Widest bars that still fit, with a one-column gap when there is room
    let inner_width = area.width.saturating_sub(2) as usize;
    let per_bar = (inner_width / data.array.len()).max(1);
    let (bar_width, bar_gap) = if per_bar >= 3 {
        (per_bar as u16 - 1, 1)
    } else {
        (per_bar as u16, 0)
    };

    let max = data
        .array
        .iter()
        .copied()
        .max()
        .and_then(|m| u64::try_from(m).ok())
        .unwrap_or(1)
        .max(1);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(max);

    frame.render_widget(chart, area);
}
