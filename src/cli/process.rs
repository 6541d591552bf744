//! Batch processing command.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use super::helpers::truncate;
use crate::analysis::vocab::Vocabulary;
use crate::batch::{BatchRunner, Outcome};
use crate::config::Settings;
use crate::store::DocumentStore;

/// Run the analysis pipeline over `[start, end)` of the collection.
pub fn cmd_process(
    settings: &Settings,
    start: usize,
    end: usize,
    force: bool,
) -> anyhow::Result<()> {
    let vocabulary = Vocabulary::load_or_default(settings.resolved_vocabulary_path().as_deref())?;
    let runner = BatchRunner::new(settings, &vocabulary)?;
    let store = DocumentStore::new(settings.resolved_store_path());

    let mut documents = store.load()?;
    let total = documents.len();
    let end = if end == 0 { total } else { end.min(total) };
    let start = start.min(end);

    println!(
        "Processing documents {}..{} of {} from {}",
        start,
        end,
        total,
        store.path().display()
    );

    let pb = ProgressBar::new((end - start) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let stats = runner.run(
        &mut documents,
        &store,
        start..end,
        force,
        |_, document, outcome| {
            pb.set_message(truncate(document.display_title(), 40));
            if let Outcome::Failed(error) = outcome {
                pb.println(format!(
                    "{} {}: {}",
                    style("✗").red(),
                    truncate(document.display_title(), 50),
                    error
                ));
            }
            pb.inc(1);
        },
    )?;
    pb.finish_and_clear();

    println!(
        "{} Processing complete: {} processed, {} skipped, {} errors",
        style("✓").green(),
        stats.processed,
        stats.skipped,
        stats.errors
    );
    Ok(())
}
