//! Document shell.
//!
//! Produces the outermost HTML document for every page: language attribute,
//! head metadata, font preconnect hints and the font stylesheet. The body is
//! handed to a [`ContextProvider`] which encloses the caller's content.

use crate::markup::{push_attr, Markup, Render};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Static page metadata, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            title: "Vexium Verse".to_string(),
            description: "The economic operating system for the Vexium universe".to_string(),
        }
    }
}

/// `<link rel="preconnect">` hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preconnect {
    pub href: String,
    #[serde(default)]
    pub crossorigin: bool,
}

impl Preconnect {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            crossorigin: false,
        }
    }

    pub fn anonymous(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            crossorigin: true,
        }
    }
}

/// CSS `font-display` strategies accepted by the font stylesheet endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FontDisplay {
    Auto,
    Block,
    #[default]
    Swap,
    Fallback,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    pub stylesheet_base: String,
    pub family: String,
    pub weights: Vec<u16>,
    pub display: FontDisplay,
    pub preconnect: Vec<Preconnect>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            stylesheet_base: "https://fonts.googleapis.com/css2".to_string(),
            family: "Inter".to_string(),
            weights: vec![400, 500, 600, 700],
            display: FontDisplay::Swap,
            preconnect: vec![
                Preconnect::new("https://fonts.googleapis.com"),
                Preconnect::anonymous("https://fonts.gstatic.com"),
            ],
        }
    }
}

impl FontConfig {
    /// Web-font request URL for the configured family, weights and display.
    pub fn stylesheet_href(&self) -> String {
        format!(
            "{}?family={}:wght@{}&display={}",
            self.stylesheet_base,
            self.family.replace(' ', "+"),
            self.weights.iter().join(";"),
            self.display
        )
    }
}

/// Everything the shell needs that used to be hard-coded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    pub lang: String,
    pub metadata: PageMetadata,
    pub fonts: FontConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            metadata: PageMetadata::default(),
            fonts: FontConfig::default(),
        }
    }
}

/// Wraps the page body in an interactive context.
///
/// Implementations must write `children` exactly once and must not alter it.
pub trait ContextProvider {
    fn wrap(&self, children: &dyn Render, out: &mut String);
}

/// Mount point for the client-side authentication context.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthProvider;

impl ContextProvider for AuthProvider {
    fn wrap(&self, children: &dyn Render, out: &mut String) {
        out.push_str("<div data-provider=\"auth\">");
        children.render_to(out);
        out.push_str("</div>");
    }
}

pub struct DocumentShell<P = AuthProvider> {
    config: ShellConfig,
    provider: P,
}

impl DocumentShell<AuthProvider> {
    pub fn new(config: ShellConfig) -> Self {
        Self::with_provider(config, AuthProvider)
    }
}

impl<P: ContextProvider> DocumentShell<P> {
    pub fn with_provider(config: ShellConfig, provider: P) -> Self {
        Self { config, provider }
    }

    /// Render a full document around `children`.
    pub fn render<C: Render + ?Sized>(&self, children: &C) -> Markup {
        let mut out = String::from("<!DOCTYPE html><html");
        push_attr(&mut out, "lang", &self.config.lang);
        out.push('>');

        self.render_head(&mut out);

        out.push_str("<body>");
        self.provider.wrap(&Borrowed(children), &mut out);
        out.push_str("</body></html>");

        tracing::debug!(bytes = out.len(), "rendered document shell");
        Markup::raw(out)
    }

    fn render_head(&self, out: &mut String) {
        let metadata = &self.config.metadata;
        let fonts = &self.config.fonts;

        out.push_str("<head><meta charset=\"utf-8\">");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");

        out.push_str("<title>");
        metadata.title.render_to(out);
        out.push_str("</title>");

        out.push_str("<meta name=\"description\"");
        push_attr(out, "content", &metadata.description);
        out.push('>');

        for hint in &fonts.preconnect {
            out.push_str("<link rel=\"preconnect\"");
            push_attr(out, "href", &hint.href);
            if hint.crossorigin {
                out.push_str(" crossorigin=\"anonymous\"");
            }
            out.push('>');
        }

        out.push_str("<link rel=\"stylesheet\"");
        push_attr(out, "href", &fonts.stylesheet_href());
        out.push_str("></head>");
    }
}

/// Lets an unsized `C` travel through `&dyn Render`.
struct Borrowed<'a, C: ?Sized>(&'a C);

impl<C: Render + ?Sized> Render for Borrowed<'_, C> {
    fn render_to(&self, out: &mut String) {
        self.0.render_to(out);
    }
}
