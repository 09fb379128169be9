//! Taffy flexbox layout for the three application rows.
//!
//! Header and footer are fixed at three rows; the needs panel grows to fill
//! whatever is left.

use ratatui::layout::Rect;
use taffy::{
    style::{Dimension, FlexDirection, Style},
    NodeId, TaffyTree,
};

const HEADER_ROWS: f32 = 3.0;
const FOOTER_ROWS: f32 = 3.0;

/// Screen areas for one frame, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRects {
    /// Title and need status, fixed height at the top.
    pub header: Rect,
    /// Need rows; takes the remaining height.
    pub body: Rect,
    /// Key hints or the status message, fixed height at the bottom.
    pub footer: Rect,
}

pub struct AppLayout {
    taffy: TaffyTree,
    root: NodeId,
    header: NodeId,
    body: NodeId,
    footer: NodeId,
}

impl AppLayout {
    pub fn new() -> Result<Self, taffy::TaffyError> {
        let mut taffy = TaffyTree::new();

        let header = taffy.new_leaf(fixed_row(HEADER_ROWS))?;
        let body = taffy.new_leaf(Style {
            size: taffy::geometry::Size {
                width: Dimension::Percent(1.0),
                height: Dimension::Auto,
            },
            flex_grow: 1.0,
            ..Default::default()
        })?;
        let footer = taffy.new_leaf(fixed_row(FOOTER_ROWS))?;

        let root = taffy.new_with_children(
            Style {
                size: taffy::geometry::Size {
                    width: Dimension::Percent(1.0),
                    height: Dimension::Percent(1.0),
                },
                flex_direction: FlexDirection::Column,
                ..Default::default()
            },
            &[header, body, footer],
        )?;

        Ok(Self {
            taffy,
            root,
            header,
            body,
            footer,
        })
    }

    /// Lay the three rows out inside `area`.
    pub fn compute(&mut self, area: Rect) -> Result<LayoutRects, taffy::TaffyError> {
        let available_space = taffy::geometry::Size {
            width: taffy::AvailableSpace::Definite(area.width as f32),
            height: taffy::AvailableSpace::Definite(area.height as f32),
        };
        self.taffy.compute_layout(self.root, available_space)?;

        Ok(LayoutRects {
            header: self.rect(self.header, area)?,
            body: self.rect(self.body, area)?,
            footer: self.rect(self.footer, area)?,
        })
    }

    fn rect(&self, node: NodeId, area: Rect) -> Result<Rect, taffy::TaffyError> {
        let layout = self.taffy.layout(node)?;
        let rect = Rect {
            x: area.x + layout.location.x as u16,
            y: area.y + layout.location.y as u16,
            width: layout.size.width as u16,
            height: layout.size.height as u16,
        };
        // Taffy may overflow a tiny terminal; never hand ratatui a rect outside it.
        Ok(rect.intersection(area))
    }
}

fn fixed_row(rows: f32) -> Style {
    Style {
        size: taffy::geometry::Size {
            width: Dimension::Percent(1.0),
            height: Dimension::Length(rows),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}
