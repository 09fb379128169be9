use unicode_width::UnicodeWidthStr;
use vexium_core::{
    theme::{Element, Theme},
    NeedBar,
};
use ratatui::{
    prelude::{Constraint, Direction, Frame, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Gauge, Paragraph},
};

const ROW_HEIGHT: u16 = 3;

pub fn render_needs(frame: &mut Frame, area: Rect, theme: &Theme, bars: &[NeedBar], selected: usize) {
    let panel = Block::new()
        .borders(Borders::ALL)
        .title(" Needs ")
        .style(theme.ratatui_style(Element::Text));
    let inner = panel.inner(area);
    frame.render_widget(panel, area);

    if bars.is_empty() {
        let empty = Paragraph::new("No needs configured").style(theme.ratatui_style(Element::Inactive));
        frame.render_widget(empty, inner);
        return;
    }

    let mut constraints: Vec<Constraint> = bars.iter().map(|_| Constraint::Length(ROW_HEIGHT)).collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let label_width = bars
        .iter()
        .map(|bar| bar.label.width())
        .max()
        .unwrap_or_default();

    for (index, (bar, row)) in bars.iter().zip(rows.iter()).enumerate() {
        let border = if index == selected {
            theme.ratatui_style(Element::Highlight)
        } else {
            theme.ratatui_style(Element::Border)
        };

        let gauge = Gauge::default()
            .block(
                Block::new()
                    .borders(Borders::ALL)
                    .title(gauge_title(bar, label_width))
                    .border_style(border),
            )
            .gauge_style(theme.need_style(bar.category, bar.is_critical()))
            .ratio(gauge_ratio(bar))
            .label(Span::raw(gauge_label(bar)))
            .use_unicode(true);

        frame.render_widget(gauge, *row);
    }
}

/// Gauge fill in `0.0..=1.0`; the underlying percentage is unclamped.
pub fn gauge_ratio(bar: &NeedBar) -> f64 {
    let ratio = bar.percentage() / 100.0;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn gauge_label(bar: &NeedBar) -> String {
    let percentage = bar.percentage();
    if percentage.is_finite() {
        format!("{:.0}%", percentage)
    } else {
        "--".to_string()
    }
}

/// ` 🍴 Food   10/100 `, with labels padded to a common display width.
pub fn gauge_title(bar: &NeedBar, label_width: usize) -> String {
    let padding = label_width.saturating_sub(bar.label.width());
    format!(
        " {} {}{}  {} ",
        bar.symbol(),
        bar.label,
        " ".repeat(padding),
        bar.readout()
    )
}
