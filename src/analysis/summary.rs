//! Summary and key-findings generation.

use std::sync::LazyLock;

use regex::Regex;

use super::char_prefix;

const SUMMARY_MAX_CHARS: usize = 800;
/// Raw characters taken from a located summary section before capping.
const SECTION_WINDOW_CHARS: usize = 1600;
const MIN_PARAGRAPH_CHARS: usize = 100;

const MAX_FINDINGS: usize = 10;
const MIN_FINDING_CHARS: usize = 20;
const MAX_FINDING_CHARS: usize = 400;
/// Sentence fallbacks only look at the head of the document.
const SENTENCE_SCAN_CHARS: usize = 10_000;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:executive\s+summary|summary|abstract|introduction|overview)\b").unwrap()
});

static FINDINGS_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)key\s+finding|key\s+insight|highlight|key\s+takeaway|conclusion").unwrap()
});

static BULLET_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[•▪●○◦‣·\-\*]|\d+[\.\)])\s+").unwrap());

static ITEM_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s•▪●○◦‣·\-\*\d\.\)]+").unwrap());

static NUMERIC_INDICATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*%|\$\s*\d|\bbillion\b|\bmillion\b|\d+\s+percent").unwrap()
});

static SENTENCE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Derive a prose summary for a document.
///
/// Prefers text at the first summary-like heading, then the first substantial
/// paragraphs, then a sentence templated from title and category.
pub fn build_summary(text: &str, title: &str, category: &str) -> String {
    if let Some(found) = HEADING_RE.find(text) {
        let section: String = text[found.start()..]
            .chars()
            .take(SECTION_WINDOW_CHARS)
            .collect();
        let section = normalize_ws(&section);
        if !section.is_empty() {
            return truncate_chars(&section, SUMMARY_MAX_CHARS);
        }
    }

    let paragraphs: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_PARAGRAPH_CHARS)
        .take(3)
        .collect();
    if !paragraphs.is_empty() {
        return truncate_chars(&normalize_ws(&paragraphs.join(" ")), SUMMARY_MAX_CHARS);
    }

    format!(
        "This {} report titled '{}' provides analysis and insights on market trends, \
         key metrics, and industry developments in the gaming sector.",
        category, title
    )
}

/// Pull key findings out of report text.
///
/// Bullet or numbered lines inside a findings/highlights section come first;
/// sentences carrying market language with numbers back them up, and plain
/// numeric sentences are the last resort.
pub fn extract_key_findings(text: &str) -> Vec<String> {
    let mut findings: Vec<String> = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        if findings.len() >= MAX_FINDINGS {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if FINDINGS_SECTION_RE.is_match(trimmed) && !BULLET_START_RE.is_match(line) {
            in_section = true;
            continue;
        }
        if in_section && is_heading_exit(trimmed) {
            in_section = false;
            continue;
        }
        if in_section || BULLET_START_RE.is_match(line) {
            let cleaned = ITEM_PREFIX_RE.replace(trimmed, "").trim().to_string();
            push_finding(&mut findings, cleaned, MIN_FINDING_CHARS);
        }
    }

    if findings.len() < 5 {
        let head = char_prefix(text, SENTENCE_SCAN_CHARS);
        for sentence in SENTENCE_SPLIT_RE.split(head) {
            if findings.len() >= MAX_FINDINGS {
                break;
            }
            let sentence = sentence.trim();
            if NUMERIC_INDICATOR_RE.is_match(sentence) {
                push_finding(&mut findings, normalize_ws(sentence), 50);
            }
        }
    }

    if findings.len() < 5 {
        let head = char_prefix(text, SENTENCE_SCAN_CHARS);
        for sentence in SENTENCE_SPLIT_RE.split(head) {
            if findings.len() >= MAX_FINDINGS {
                break;
            }
            let sentence = sentence.trim();
            if sentence.chars().any(|c| c.is_ascii_digit()) {
                push_finding(&mut findings, normalize_ws(sentence), MIN_FINDING_CHARS);
            }
        }
    }

    findings
}

fn push_finding(findings: &mut Vec<String>, candidate: String, min_chars: usize) {
    let len = candidate.chars().count();
    if len >= min_chars && len <= MAX_FINDING_CHARS && !findings.contains(&candidate) {
        findings.push(candidate);
    }
}

/// A loud standalone header line ends a findings section.
fn is_heading_exit(line: &str) -> bool {
    line.chars().count() > 10
        && line.chars().any(|c| c.is_alphabetic())
        && line == line.to_uppercase()
}

pub(crate) fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
