use vexium_core::{
    theme::{Element, Theme},
    NeedBar,
};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::Span,
    widgets::{block::Title, Block, Borders, Paragraph},
};

pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme, title: &str, bars: &[NeedBar]) {
    let title = Title::from(format!(" {} ", title)).alignment(Alignment::Left);
    let (status_text, element) = need_status(bars);

    let header = Paragraph::new(Span::styled(status_text, theme.ratatui_style(element)))
        .style(theme.ratatui_style(Element::Text))
        .alignment(Alignment::Left)
        .block(
            Block::new()
                .borders(Borders::ALL)
                .title(title)
                .title_style(theme.ratatui_style(Element::Title))
                .style(theme.ratatui_style(Element::Text)),
        );

    frame.render_widget(header, area);
}

/// Summary line: which needs are critical, if any.
pub fn need_status(bars: &[NeedBar]) -> (String, Element) {
    let critical: Vec<&str> = bars
        .iter()
        .filter(|bar| bar.is_critical())
        .map(|bar| bar.label.as_str())
        .collect();

    if critical.is_empty() {
        ("All needs satisfied".to_string(), Element::Ok)
    } else {
        (
            format!("{} critical: {}", critical.len(), critical.join(", ")),
            Element::Critical,
        )
    }
}
