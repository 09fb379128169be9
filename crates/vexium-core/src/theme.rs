//! Everforest theme for the terminal front-end.
//!
//! Dark and light palettes, each with a fill colour per need category.

use crate::need::NeedCategory;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Which Everforest palette is active. Stored by name in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeVariant {
    /// Dark background, the default.
    #[default]
    EverforestDark,
    /// Light background.
    EverforestLight,
}

/// Colours for one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    /// Screen background.
    pub background: Color,
    /// Body text.
    pub foreground: Color,
    /// Titles and the "all needs satisfied" status.
    pub accent: Color,
    /// Red. Critical bars and the critical status.
    pub secondary: Color,
    /// Borders and dimmed text.
    pub border: Color,
    /// Background of the highlighted element.
    pub selection: Color,
    /// Gauge fill for food.
    pub food: Color,
    /// Gauge fill for water.
    pub water: Color,
    /// Gauge fill for sleep.
    pub sleep: Color,
}

/// UI element types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// Plain text on the background.
    Text,
    /// Bold accent, for the header title and row titles.
    Title,
    /// Unselected borders.
    Border,
    /// Bold text on the selection colour.
    Highlight,
    /// Dimmed text, such as key hints.
    Inactive,
    /// Bold red, for critical needs.
    Critical,
    /// Accent status text for satisfied needs.
    Ok,
}

#[derive(Debug, Clone)]
pub struct Theme {
    variant: ThemeVariant,
    colors: ColorPalette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        let colors = match variant {
            ThemeVariant::EverforestDark => ColorPalette {
                background: Color::Rgb(45, 53, 59),    // #2d353b
                foreground: Color::Rgb(211, 198, 170), // #d3c6aa
                accent: Color::Rgb(167, 192, 128),     // #a7c080
                secondary: Color::Rgb(230, 126, 128),  // #e67e80
                border: Color::Rgb(116, 125, 135),     // #747d87
                selection: Color::Rgb(64, 72, 78),     // #40484e
                food: Color::Rgb(230, 152, 117),       // #e69875
                water: Color::Rgb(127, 187, 179),      // #7fbbb3
                sleep: Color::Rgb(214, 153, 182),      // #d699b6
            },
            ThemeVariant::EverforestLight => ColorPalette {
                background: Color::Rgb(253, 246, 227), // #fdf6e3
                foreground: Color::Rgb(92, 106, 114),  // #5c6a72
                accent: Color::Rgb(141, 161, 1),       // #8da101
                secondary: Color::Rgb(248, 85, 82),    // #f85552
                border: Color::Rgb(150, 160, 170),     // #96a0aa
                selection: Color::Rgb(243, 236, 217),  // #f3ecd9
                food: Color::Rgb(245, 125, 38),        // #f57d26
                water: Color::Rgb(58, 148, 197),       // #3a94c5
                sleep: Color::Rgb(223, 105, 186),      // #df69ba
            },
        };

        Self { variant, colors }
    }

    pub fn variant(&self) -> ThemeVariant {
        self.variant
    }

    pub fn colors(&self) -> &ColorPalette {
        &self.colors
    }

    pub fn toggle(&mut self) {
        let next = match self.variant {
            ThemeVariant::EverforestDark => ThemeVariant::EverforestLight,
            ThemeVariant::EverforestLight => ThemeVariant::EverforestDark,
        };
        *self = Self::new(next);
    }

    pub fn set_variant(&mut self, variant: ThemeVariant) {
        if self.variant != variant {
            *self = Self::new(variant);
        }
    }

    pub fn ratatui_style(&self, element: Element) -> Style {
        let base = Style::default().bg(self.colors.background);
        match element {
            Element::Text => base.fg(self.colors.foreground),
            Element::Title => base.fg(self.colors.accent).add_modifier(Modifier::BOLD),
            Element::Border => base.fg(self.colors.border),
            Element::Highlight => Style::default()
                .fg(self.colors.foreground)
                .bg(self.colors.selection)
                .add_modifier(Modifier::BOLD),
            Element::Inactive => base.fg(self.colors.border),
            Element::Critical => base.fg(self.colors.secondary).add_modifier(Modifier::BOLD),
            Element::Ok => base.fg(self.colors.accent),
        }
    }

    pub fn category_color(&self, category: NeedCategory) -> Color {
        match category {
            NeedCategory::Food => self.colors.food,
            NeedCategory::Water => self.colors.water,
            NeedCategory::Sleep => self.colors.sleep,
        }
    }

    /// Gauge style for a need bar; critical bars switch to red.
    pub fn need_style(&self, category: NeedCategory, critical: bool) -> Style {
        let fill = if critical {
            self.colors.secondary
        } else {
            self.category_color(category)
        };
        let style = Style::default().fg(fill).bg(self.colors.selection);
        if critical {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}
