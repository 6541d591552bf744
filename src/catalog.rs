//! Markdown catalog generation for the report tree.
//!
//! Scans the repository for PDF reports and their extracted-text companions,
//! parses `<Author> - <Title> (<Year>).pdf` filenames, and renders a
//! categorized index with aggregate statistics.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use walkdir::WalkDir;

/// One catalogued PDF on disk.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub author: String,
    pub title: String,
    pub year: String,
    /// Path relative to the scanned root.
    pub rel_path: PathBuf,
    pub size_mb: f64,
    /// Whether an extracted-text `.md` companion sits next to the PDF.
    pub has_companion: bool,
}

/// Reports grouped by category (their directory under the root).
pub type Catalog = BTreeMap<String, Vec<ReportEntry>>;

static PAREN_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((\d{4})\)").unwrap());
static TRAILING_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d{4}\)\s*$").unwrap());

/// Parse report metadata out of a `<Author> - <Title> (<Year>).pdf` filename.
///
/// Filenames that do not follow the convention degrade to an Unknown author
/// with the whole stem as title.
pub fn parse_filename(file_name: &str) -> (String, String, String) {
    let stem = file_name
        .strip_suffix(".pdf")
        .or_else(|| file_name.strip_suffix(".PDF"))
        .unwrap_or(file_name);

    let year = PAREN_YEAR_RE
        .captures(stem)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    match stem.split_once(" - ") {
        Some((author, rest)) => {
            let title = TRAILING_YEAR_RE.replace(rest.trim(), "").trim().to_string();
            (author.trim().to_string(), title, year)
        }
        None => ("Unknown".to_string(), stem.to_string(), year),
    }
}

/// Walk `root` and group every PDF report by its directory.
///
/// Entries are sorted newest-first within a category, then by author.
pub fn scan_reports(root: &Path) -> Catalog {
    let mut catalog = Catalog::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        let is_pdf = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !entry.file_type().is_file() || !is_pdf {
            continue;
        }

        let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let category = rel_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Root".to_string());

        let file_name = entry.file_name().to_string_lossy();
        let (author, title, year) = parse_filename(&file_name);
        let size_mb = entry
            .metadata()
            .map(|m| m.len() as f64 / (1024.0 * 1024.0))
            .unwrap_or(0.0);

        catalog.entry(category).or_default().push(ReportEntry {
            author,
            title,
            year,
            has_companion: path.with_extension("md").exists(),
            rel_path,
            size_mb,
        });
    }

    for entries in catalog.values_mut() {
        entries.sort_by(|a, b| {
            let a_year = if a.year == "Unknown" { "0000" } else { a.year.as_str() };
            let b_year = if b.year == "Unknown" { "0000" } else { b.year.as_str() };
            b_year.cmp(a_year).then_with(|| a.author.cmp(&b.author))
        });
    }

    catalog
}

/// Render the catalog as markdown.
pub fn render_catalog(catalog: &Catalog) -> String {
    let total: usize = catalog.values().map(Vec::len).sum();
    let with_companion: usize = catalog
        .values()
        .flatten()
        .filter(|r| r.has_companion)
        .count();
    let total_size: f64 = catalog.values().flatten().map(|r| r.size_mb).sum();
    let companion_pct = if total > 0 {
        with_companion as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let mut md = String::new();
    md.push_str("# Game Industry Reports Catalog\n\n");
    md.push_str(&format!(
        "*Last updated: {}*\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Statistics\n\n");
    md.push_str(&format!("- **Total Reports**: {total}\n"));
    md.push_str(&format!(
        "- **Text Versions Available**: {with_companion} ({companion_pct:.1}%)\n"
    ));
    md.push_str(&format!("- **Total Size**: {total_size:.2} MB\n"));
    md.push_str(&format!("- **Categories**: {}\n\n", catalog.len()));

    md.push_str("## Table of Contents\n\n");
    for (category, entries) in catalog {
        md.push_str(&format!(
            "- [{category}](#{}) ({} reports)\n",
            anchor(category),
            entries.len()
        ));
    }
    md.push_str("\n---\n\n");

    for (category, entries) in catalog {
        md.push_str(&format!("## {category}\n\n*{} reports*\n\n", entries.len()));
        md.push_str("| Author | Title | Year | Size | Links |\n");
        md.push_str("|--------|-------|------|------|-------|\n");
        for entry in entries {
            let pdf_path = entry.rel_path.to_string_lossy();
            let links = if entry.has_companion {
                let md_path = entry.rel_path.with_extension("md");
                format!("[PDF]({pdf_path}) · [MD]({})", md_path.to_string_lossy())
            } else {
                format!("[PDF]({pdf_path}) · —")
            };
            md.push_str(&format!(
                "| {} | {} | {} | {:.1} MB | {} |\n",
                entry.author, entry.title, entry.year, entry.size_mb, links
            ));
        }
        md.push('\n');
    }

    md.push_str("---\n\n*This catalog was generated by `rmine catalog`*\n");
    md
}

fn anchor(category: &str) -> String {
    category.to_lowercase().replace([' ', '/'], "-")
}
