//! Document-level classification heuristics: timeframe, geography, report
//! type, and sentiment.

use std::sync::LazyLock;

use regex::Regex;

use super::char_prefix;
use super::entities::{GroupSet, TermSet};
use crate::models::Sentiment;

/// Characters of body text consulted for the year-frequency fallback.
const YEAR_SCAN_CHARS: usize = 2000;

// Deliberately loose: filenames run years and quarter tokens together with
// underscores and digits, where word boundaries never fire.
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(20\d{2})").unwrap());
static QUARTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Q([1-4])").unwrap());
static HALF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)H([12])").unwrap());

/// Infer the period a report covers.
///
/// Precedence: quarter or half-year token plus a year in the filename, a bare
/// year in the filename, the most frequent year in the head of the text, and
/// finally "Not specified".
pub fn infer_timeframe(file_name: &str, text: &str) -> String {
    if let Some(year) = YEAR_RE.captures(file_name).and_then(|c| c.get(1)) {
        let year = year.as_str();
        if let Some(quarter) = QUARTER_RE.captures(file_name).and_then(|c| c.get(1)) {
            return format!("Q{} {}", quarter.as_str(), year);
        }
        if let Some(half) = HALF_RE.captures(file_name).and_then(|c| c.get(1)) {
            return format!("H{} {}", half.as_str(), year);
        }
        return year.to_string();
    }

    if let Some(year) = most_frequent_year(char_prefix(text, YEAR_SCAN_CHARS)) {
        return year;
    }

    "Not specified".to_string()
}

/// Most frequent 4-digit year token; earliest first appearance wins ties.
fn most_frequent_year(text: &str) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for caps in YEAR_RE.captures_iter(text) {
        if let Some(year) = caps.get(1) {
            match counts.iter_mut().find(|(y, _)| *y == year.as_str()) {
                Some(entry) => entry.1 += 1,
                None => counts.push((year.as_str(), 1)),
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (year, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((year, count));
        }
    }
    best.map(|(year, _)| year.to_string())
}

/// Collapse matched regions into a geographic scope label.
///
/// Zero or three-plus matches read as global coverage, as does an explicit
/// match of the Global region itself; one or two matches are joined verbatim.
pub fn infer_geography(regions: &[String]) -> String {
    if regions.is_empty() || regions.len() >= 3 || regions.iter().any(|r| r == "Global") {
        return "Global".to_string();
    }
    regions.join(", ")
}

/// First-match-wins report-type classification, title before body.
pub fn classify_report_type(rules: &GroupSet, title: &str, body: &str) -> String {
    rules
        .first_match(title)
        .or_else(|| rules.first_match(body))
        .unwrap_or("Industry Report")
        .to_string()
}

/// Weighted keyword sentiment: positive when positive mentions outnumber
/// negative ones by more than half again, and vice versa.
pub fn analyze_sentiment(positive: &TermSet, negative: &TermSet, text: &str) -> Sentiment {
    let positive_count = positive.count(text) as f64;
    let negative_count = negative.count(text) as f64;

    if positive_count > negative_count * 1.5 {
        Sentiment::Positive
    } else if negative_count > positive_count * 1.5 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::vocab::Vocabulary;

    fn word_set(words: &[&str]) -> TermSet {
        let owned: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        TermSet::new(&owned).unwrap()
    }

    #[test]
    fn test_timeframe_quarter_from_filename() {
        assert_eq!(infer_timeframe("Report Q2 2023.pdf", ""), "Q2 2023");
        assert_eq!(infer_timeframe("report_q4_2021.pdf", ""), "Q4 2021");
    }

    #[test]
    fn test_timeframe_half_from_filename() {
        assert_eq!(infer_timeframe("Mobile H1 2024 Review.pdf", ""), "H1 2024");
    }

    #[test]
    fn test_timeframe_bare_year_from_filename() {
        assert_eq!(infer_timeframe("Report 2022.pdf", ""), "2022");
    }

    #[test]
    fn test_timeframe_most_frequent_year_in_text() {
        let text = "Figures for 2021 improved on 2020. By late 2021 the trend held, \
                    and 2021 closed strong.";
        assert_eq!(infer_timeframe("report.pdf", text), "2021");
    }

    #[test]
    fn test_timeframe_tie_goes_to_first_seen() {
        assert_eq!(infer_timeframe("report.pdf", "2019 versus 2020"), "2019");
    }

    #[test]
    fn test_timeframe_not_specified() {
        assert_eq!(infer_timeframe("report.pdf", "no years here"), "Not specified");
    }

    #[test]
    fn test_timeframe_ignores_years_beyond_scan_window() {
        let text = format!("{}2021", "x".repeat(3000));
        assert_eq!(infer_timeframe("report.pdf", &text), "Not specified");
    }

    #[test]
    fn test_geography_zero_matches_is_global() {
        assert_eq!(infer_geography(&[]), "Global");
    }

    #[test]
    fn test_geography_single_match_verbatim() {
        assert_eq!(infer_geography(&["Japan".to_string()]), "Japan");
    }

    #[test]
    fn test_geography_two_matches_joined() {
        let regions = vec!["Europe".to_string(), "China".to_string()];
        assert_eq!(infer_geography(&regions), "Europe, China");
    }

    #[test]
    fn test_geography_three_matches_is_global() {
        let regions = vec![
            "Europe".to_string(),
            "China".to_string(),
            "India".to_string(),
        ];
        assert_eq!(infer_geography(&regions), "Global");
    }

    #[test]
    fn test_geography_explicit_global_wins() {
        let regions = vec!["Global".to_string(), "Japan".to_string()];
        assert_eq!(infer_geography(&regions), "Global");
    }

    #[test]
    fn test_report_type_title_beats_body() {
        let vocab = Vocabulary::default();
        let rules = GroupSet::new(&vocab.report_types).unwrap();
        // "survey" in the title outranks "benchmark" in the body because the
        // title is consulted first.
        assert_eq!(
            classify_report_type(&rules, "Player Survey 2023", "benchmark data inside"),
            "Survey Report"
        );
    }

    #[test]
    fn test_report_type_rule_order_within_title() {
        let vocab = Vocabulary::default();
        let rules = GroupSet::new(&vocab.report_types).unwrap();
        assert_eq!(
            classify_report_type(&rules, "Industry Benchmark Review", ""),
            "Benchmark Report"
        );
    }

    #[test]
    fn test_report_type_default() {
        let vocab = Vocabulary::default();
        let rules = GroupSet::new(&vocab.report_types).unwrap();
        assert_eq!(
            classify_report_type(&rules, "Untitled", "nothing matching here"),
            "Industry Report"
        );
    }

    #[test]
    fn test_sentiment_positive() {
        let positive = word_set(&["growth", "strong"]);
        let negative = word_set(&["decline"]);
        let text = "strong growth, more growth, sustained growth against one decline";
        assert_eq!(
            analyze_sentiment(&positive, &negative, text),
            Sentiment::Positive
        );
    }

    #[test]
    fn test_sentiment_negative() {
        let positive = word_set(&["growth"]);
        let negative = word_set(&["decline", "risk"]);
        let text = "decline and risk; decline outweighed growth";
        assert_eq!(
            analyze_sentiment(&positive, &negative, text),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_sentiment_neutral_on_balance() {
        let positive = word_set(&["growth"]);
        let negative = word_set(&["decline"]);
        assert_eq!(
            analyze_sentiment(&positive, &negative, "growth met decline"),
            Sentiment::Neutral
        );
        assert_eq!(
            analyze_sentiment(&positive, &negative, "no keywords at all"),
            Sentiment::Neutral
        );
    }
}
