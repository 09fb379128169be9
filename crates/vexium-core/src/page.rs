//! Composition of the shell with a panel of need bars.

use crate::markup::{Markup, Render};
use crate::need::NeedBar;
use crate::shell::{DocumentShell, ShellConfig};

/// An ordered group of need bars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeedPanel {
    bars: Vec<NeedBar>,
}

impl NeedPanel {
    pub fn new(bars: Vec<NeedBar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[NeedBar] {
        &self.bars
    }

    /// Bars currently below the critical threshold, in display order.
    pub fn critical(&self) -> impl Iterator<Item = &NeedBar> {
        self.bars.iter().filter(|bar| bar.is_critical())
    }
}

impl From<Vec<NeedBar>> for NeedPanel {
    fn from(bars: Vec<NeedBar>) -> Self {
        Self::new(bars)
    }
}

impl Render for NeedPanel {
    fn render_to(&self, out: &mut String) {
        out.push_str("<section class=\"need-panel\">");
        self.bars.render_to(out);
        out.push_str("</section>");
    }
}

/// Full HTML page: the default shell around `panel`.
pub fn render_page(config: &ShellConfig, panel: &NeedPanel) -> Markup {
    let shell = DocumentShell::new(config.clone());
    let page = shell.render(panel);
    tracing::info!(
        bars = panel.bars().len(),
        critical = panel.critical().count(),
        "rendered need page"
    );
    page
}
