use vexium_core::theme::{Element, Theme};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme, message: Option<&str>) {
    let footer_block = Block::default()
        .borders(Borders::ALL)
        .style(theme.ratatui_style(Element::Text));

    let inner_area = footer_block.inner(area);

    let content = match message {
        Some(message) => Line::from(Span::styled(message, theme.ratatui_style(Element::Title))),
        None => Line::from(vec![
            Span::raw("[↑↓]"),
            Span::styled(" select", theme.ratatui_style(Element::Inactive)),
            Span::raw(" | "),
            Span::raw("[←→]"),
            Span::styled(" adjust", theme.ratatui_style(Element::Inactive)),
            Span::raw(" | "),
            Span::raw("[E]"),
            Span::styled("xport", theme.ratatui_style(Element::Inactive)),
            Span::raw(" | "),
            Span::raw("[T]"),
            Span::styled("heme", theme.ratatui_style(Element::Inactive)),
            Span::raw(" | "),
            Span::raw("[Q]"),
            Span::styled("uit", theme.ratatui_style(Element::Inactive)),
        ]),
    }
    .alignment(Alignment::Center);

    let footer_paragraph = Paragraph::new(content).style(theme.ratatui_style(Element::Text));

    frame.render_widget(footer_block, area);
    frame.render_widget(footer_paragraph, inner_area);
}
