//! Catalog generation command.

use std::path::PathBuf;

use console::style;

use crate::catalog::{render_catalog, scan_reports};
use crate::config::Settings;

/// Scan the report tree and write the markdown catalog.
pub fn cmd_catalog(settings: &Settings, output: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = scan_reports(&settings.repo_root);
    let total: usize = catalog.values().map(Vec::len).sum();

    if total == 0 {
        println!(
            "{} No PDF reports found under {}",
            style("!").yellow(),
            settings.repo_root.display()
        );
        return Ok(());
    }

    let rendered = render_catalog(&catalog);
    let output = output.unwrap_or_else(|| settings.repo_root.join("CATALOG.md"));
    std::fs::write(&output, rendered)?;

    println!(
        "{} Catalog generated: {} ({} reports, {} categories)",
        style("✓").green(),
        output.display(),
        total,
        catalog.len()
    );
    Ok(())
}
