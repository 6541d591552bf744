//! PDF-to-text companion conversion command.

use std::path::PathBuf;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use super::helpers::truncate;
use crate::config::Settings;
use crate::extract::TextExtractor;

/// Companions carry the whole document, not the analysis sample.
const CONVERT_MAX_CHARS: usize = 1_000_000;

/// Write an extracted-text `.md` companion next to every PDF under the root.
pub fn cmd_convert(settings: &Settings, force: bool) -> anyhow::Result<()> {
    let pdfs: Vec<PathBuf> = WalkDir::new(&settings.repo_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .map(|x| x.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    if pdfs.is_empty() {
        println!(
            "{} No PDF reports found under {}",
            style("!").yellow(),
            settings.repo_root.display()
        );
        return Ok(());
    }

    let extractor = TextExtractor::new(CONVERT_MAX_CHARS, settings.min_text_chars);
    let pb = ProgressBar::new(pdfs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let mut converted = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for path in &pdfs {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(truncate(&name, 40));

        let companion = path.with_extension("md");
        if companion.exists() && !force {
            skipped += 1;
            pb.inc(1);
            continue;
        }

        match extractor.extract(path) {
            Ok(extracted) => {
                std::fs::write(&companion, extracted.text)?;
                converted += 1;
            }
            Err(error) => {
                failed += 1;
                pb.println(format!("{} {name}: {error}", style("✗").red()));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{} Conversion complete: {} converted, {} skipped, {} failed",
        style("✓").green(),
        converted,
        skipped,
        failed
    );
    Ok(())
}
