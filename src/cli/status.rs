//! Collection status command.

use console::style;

use crate::config::Settings;
use crate::models::Document;
use crate::store::DocumentStore;

/// Tally processed, error-stamped, and pending documents.
pub fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let store = DocumentStore::new(settings.resolved_store_path());
    let documents = store.load()?;

    let processed = documents.iter().filter(|d| d.is_processed()).count();
    let errors = documents.iter().filter(|d| has_error(d)).count();
    let pending = documents.len() - processed - errors;

    println!("\n{}", style("Collection Status").bold());
    println!("{}", "-".repeat(40));
    println!("  {:<12} {}", "store", store.path().display());
    println!("  {:<12} {}", "total", documents.len());
    println!("  {:<12} {}", "processed", style(processed).green());
    println!("  {:<12} {}", "errors", style(errors).red());
    println!("  {:<12} {}", "pending", style(pending).yellow());
    println!();
    Ok(())
}

/// Unprocessed documents carrying an error sentinel from a prior run.
fn has_error(document: &Document) -> bool {
    !document.is_processed()
        && document
            .ai_analysis
            .as_ref()
            .map(|a| a.get("error").is_some())
            .unwrap_or(false)
}
