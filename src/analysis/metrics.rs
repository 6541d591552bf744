//! Numeric metric extraction.
//!
//! An ordered list of regex templates pulls currency amounts, growth
//! percentages, and audience counts out of report text, each with a bounded
//! window of surrounding context.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Metric, MetricKind};

const MAX_METRICS: usize = 15;
/// Bytes of raw text captured on each side of a match before normalization.
const CONTEXT_RADIUS: usize = 50;
const MAX_CONTEXT_CHARS: usize = 150;

/// Metric templates in priority order. `None` takes the unit from the second
/// capture group; a fixed unit otherwise.
static TEMPLATES: LazyLock<Vec<(Regex, MetricKind, Option<&'static str>)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"(?i)\$\s*(\d+(?:\.\d+)?)\s*(billion|million|B|M)\b").unwrap(),
            MetricKind::Revenue,
            None,
        ),
        (
            Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(billion|million)\s+(?:dollars|USD)\b").unwrap(),
            MetricKind::Revenue,
            None,
        ),
        (
            Regex::new(
                r"(?i)\b(\d+(?:\.\d+)?)\s*%\s*(?:growth|increase|decrease|decline|YoY|year-over-year)\b",
            )
            .unwrap(),
            MetricKind::Growth,
            Some("percent"),
        ),
        (
            Regex::new(r"(?i)\b(?:grew|increased|decreased|declined)\s+(?:by\s+)?(\d+(?:\.\d+)?)\s*%")
                .unwrap(),
            MetricKind::Growth,
            Some("percent"),
        ),
        (
            Regex::new(r"(?i)\bCAGR\D{0,40}?(\d+(?:\.\d+)?)\s*%").unwrap(),
            MetricKind::Growth,
            Some("percent"),
        ),
        (
            Regex::new(
                r"(?i)\b(\d+(?:\.\d+)?)\s*(billion|million|B|M)\s+(?:users|players|downloads|installs|MAU|DAU)\b",
            )
            .unwrap(),
            MetricKind::Users,
            None,
        ),
    ]
});

/// Extract structured metrics from `text`, capped at 15.
pub fn extract_metrics(text: &str) -> Vec<Metric> {
    let mut metrics = Vec::new();
    for (regex, kind, fixed_unit) in TEMPLATES.iter() {
        for caps in regex.captures_iter(text) {
            if metrics.len() >= MAX_METRICS {
                return metrics;
            }
            let (Some(whole), Some(value)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let unit = match fixed_unit {
                Some(unit) => (*unit).to_string(),
                None => caps
                    .get(2)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            };
            metrics.push(Metric {
                value: value.as_str().to_string(),
                unit,
                context: context_window(text, whole.start(), whole.end()),
                kind: *kind,
            });
        }
    }
    metrics
}

/// Whitespace-normalized window around a match, capped in length.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let from = floor_char_boundary(text, start.saturating_sub(CONTEXT_RADIUS));
    let to = ceil_char_boundary(text, (end + CONTEXT_RADIUS).min(text.len()));
    let normalized = text[from..to].split_whitespace().collect::<Vec<_>>().join(" ");
    normalized.chars().take(MAX_CONTEXT_CHARS).collect()
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_with_currency_symbol() {
        let metrics = extract_metrics("The market reached $2.5 billion in consumer spending.");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].value, "2.5");
        assert_eq!(metrics[0].unit, "billion");
        assert_eq!(metrics[0].kind, MetricKind::Revenue);
        assert!(metrics[0].context.contains("consumer spending"));
    }

    #[test]
    fn test_revenue_spelled_out() {
        let metrics = extract_metrics("operators earned 300 million dollars last year");
        assert_eq!(metrics[0].kind, MetricKind::Revenue);
        assert_eq!(metrics[0].value, "300");
    }

    #[test]
    fn test_growth_percentage() {
        let metrics = extract_metrics("The segment grew by 15% year over year.");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].value, "15");
        assert_eq!(metrics[0].unit, "percent");
        assert_eq!(metrics[0].kind, MetricKind::Growth);
    }

    #[test]
    fn test_cagr() {
        let metrics = extract_metrics("a CAGR of 8.4% through the forecast window");
        assert_eq!(metrics[0].value, "8.4");
        assert_eq!(metrics[0].kind, MetricKind::Growth);
    }

    #[test]
    fn test_user_counts() {
        let metrics = extract_metrics("the title passed 500 million downloads worldwide");
        assert_eq!(metrics[0].value, "500");
        assert_eq!(metrics[0].unit, "million");
        assert_eq!(metrics[0].kind, MetricKind::Users);
    }

    #[test]
    fn test_cap_at_fifteen() {
        let text = "revenue of $1 million. ".repeat(40);
        assert_eq!(extract_metrics(&text).len(), 15);
    }

    #[test]
    fn test_context_normalized_and_bounded() {
        let text = format!(
            "{}\n\n  spending   hit $3 billion \t overall {}",
            "lead ".repeat(30),
            "tail ".repeat(30)
        );
        let metrics = extract_metrics(&text);
        let context = &metrics[0].context;
        assert!(context.contains("spending hit $3 billion overall"));
        assert!(!context.contains('\n'));
        assert!(context.chars().count() <= 150);
    }

    #[test]
    fn test_plain_numbers_ignored() {
        assert!(extract_metrics("chapter 12 covers 2023 methodology").is_empty());
    }
}
