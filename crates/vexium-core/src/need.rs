//! Need indicators.
//!
//! A [`NeedBar`] is a pure mapping from a labelled quantity to a horizontal
//! bar: the fill width tracks `value / max_value` and a critical modifier is
//! added below [`CRITICAL_THRESHOLD`] percent. Nothing here is clamped; see
//! [`NeedBar::validate`] for callers that want to reject degenerate input.

use crate::error::NeedError;
use crate::markup::{push_attr, Markup, Render};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// Denominator used when no explicit maximum is given.
pub const DEFAULT_MAX_VALUE: f64 = 100.0;

/// Fill percentage below which a need is flagged as critical.
pub const CRITICAL_THRESHOLD: f64 = 25.0;

/// Resource types tracked as a depleting quantity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NeedCategory {
    Food,
    Water,
    Sleep,
}

impl NeedCategory {
    /// Default icon for the category.
    pub fn glyph(self) -> &'static Glyph {
        match self {
            Self::Food => &FOOD_GLYPH,
            Self::Water => &WATER_GLYPH,
            Self::Sleep => &SLEEP_GLYPH,
        }
    }

    /// Title-cased name for terminal display.
    pub fn title(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Water => "Water",
            Self::Sleep => "Sleep",
        }
    }
}

impl FromStr for NeedCategory {
    type Err = NeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|category| category.as_ref() == s)
            .ok_or_else(|| NeedError::UnknownCategory(s.to_string()))
    }
}

/// A static, parameter-free vector icon.
#[derive(Debug, PartialEq, Eq)]
pub struct Glyph {
    pub name: &'static str,
    /// SVG path data on a 24x24 view box, stroked with `currentColor`.
    pub paths: &'static [&'static str],
    /// Single-cell stand-in for terminals.
    pub symbol: &'static str,
}

pub static FOOD_GLYPH: Glyph = Glyph {
    name: "utensils",
    paths: &[
        "M3 2v7c0 1.1.9 2 2 2h4a2 2 0 0 0 2-2V2",
        "M7 2v20",
        "M21 15V2a5 5 0 0 0-5 5v6c0 1.1.9 2 2 2h3Zm0 0v7",
    ],
    symbol: "🍴",
};

pub static WATER_GLYPH: Glyph = Glyph {
    name: "droplet",
    paths: &["M12 22a7 7 0 0 0 7-7c0-2-1-3.9-3-5.5s-3.5-4-4-6.5c-.5 2.5-2 4.9-4 6.5C6 11.1 5 13 5 15a7 7 0 0 0 7 7z"],
    symbol: "💧",
};

pub static SLEEP_GLYPH: Glyph = Glyph {
    name: "moon",
    paths: &["M12 3a6 6 0 0 0 9 9 9 9 0 1 1-9-9Z"],
    symbol: "🌙",
};

impl Render for Glyph {
    fn render_to(&self, out: &mut String) {
        out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\" width=\"16\" height=\"16\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\" aria-hidden=\"true\"");
        push_attr(out, "data-glyph", self.name);
        out.push('>');
        for path in self.paths {
            out.push_str("<path");
            push_attr(out, "d", path);
            out.push_str("/>");
        }
        out.push_str("</svg>");
    }
}

/// The icon a bar will actually show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Icon<'a> {
    Default(&'static Glyph),
    Custom(&'a Markup),
}

impl Render for Icon<'_> {
    fn render_to(&self, out: &mut String) {
        match self {
            Icon::Default(glyph) => glyph.render_to(out),
            Icon::Custom(markup) => markup.render_to(out),
        }
    }
}

/// Input record for a single need indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct NeedBar {
    pub label: String,
    pub value: f64,
    pub max_value: f64,
    pub category: NeedCategory,
    /// Overrides the category glyph when present.
    pub icon: Option<Markup>,
    /// Overrides the category's terminal symbol when present.
    pub symbol: Option<String>,
}

impl NeedBar {
    pub fn new(label: impl Into<String>, value: f64, category: NeedCategory) -> Self {
        Self {
            label: label.into(),
            value,
            max_value: DEFAULT_MAX_VALUE,
            category,
            icon: None,
            symbol: None,
        }
    }

    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = max_value;
        self
    }

    pub fn with_icon(mut self, icon: Markup) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// `(value / max_value) * 100`, unclamped.
    pub fn percentage(&self) -> f64 {
        (self.value / self.max_value) * 100.0
    }

    pub fn is_critical(&self) -> bool {
        self.percentage() < CRITICAL_THRESHOLD
    }

    /// `round(value)/max_value`; only the value is rounded.
    pub fn readout(&self) -> String {
        format!("{}/{}", round_half_up(self.value), self.max_value)
    }

    /// CSS width of the fill element.
    pub fn fill_width(&self) -> String {
        let percentage = self.percentage();
        if percentage.is_finite() {
            format!("{}%", percentage)
        } else {
            "0%".to_string()
        }
    }

    pub fn fill_classes(&self) -> String {
        let base = "need-bar__fill".to_string();
        let category = format!("need-bar__fill--{}", self.category);
        let critical = self
            .is_critical()
            .then(|| "need-bar__fill--critical".to_string());

        [Some(base), Some(category), critical]
            .into_iter()
            .flatten()
            .join(" ")
    }

    pub fn icon(&self) -> Icon<'_> {
        match &self.icon {
            Some(custom) => Icon::Custom(custom),
            None => Icon::Default(self.category.glyph()),
        }
    }

    /// Plain-text stand-in for the icon, for surfaces that cannot draw markup.
    pub fn symbol(&self) -> &str {
        self.symbol
            .as_deref()
            .unwrap_or(self.category.glyph().symbol)
    }

    pub fn validate(&self) -> Result<(), NeedError> {
        if !self.value.is_finite() {
            return Err(NeedError::NonFiniteValue);
        }
        if !self.max_value.is_finite() {
            return Err(NeedError::NonFiniteMax);
        }
        if self.max_value <= 0.0 {
            return Err(NeedError::NonPositiveMax(self.max_value));
        }
        Ok(())
    }
}

impl Render for NeedBar {
    fn render_to(&self, out: &mut String) {
        out.push_str("<div class=\"need-bar\">");

        out.push_str("<div class=\"need-bar__header\">");
        out.push_str("<span class=\"need-bar__icon\">");
        self.icon().render_to(out);
        out.push_str("</span><span class=\"need-bar__label\">");
        self.label.render_to(out);
        out.push_str("</span><span class=\"need-bar__value\">");
        self.readout().render_to(out);
        out.push_str("</span></div>");

        out.push_str("<div class=\"need-bar__track\"><div");
        push_attr(out, "class", &self.fill_classes());
        push_attr(out, "style", &format!("width: {}", self.fill_width()));
        out.push_str("></div></div>");

        out.push_str("</div>");
    }
}

/// Round half towards positive infinity, so `2.5 -> 3` and `-2.5 -> -2`.
///
/// Works from the floor rather than `(value + 0.5).floor()`, whose addition
/// rounds in binary and turns `0.49999999999999994` into `1` and odd integers
/// above 2^52 into their even neighbour.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // -0.0 would print as "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
