use anyhow::{Context, Result};
use std::path::Path;
use vexium_core::{render_page, NeedBar, NeedPanel, ShellConfig};

/// Render `bars` inside the configured shell and write the page to `path`.
pub async fn export_page(shell: &ShellConfig, bars: &[NeedBar], path: &Path) -> Result<()> {
    let page = render_page(shell, &NeedPanel::from(bars.to_vec()));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, page.as_str())
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = page.as_str().len(), "exported page");
    Ok(())
}
