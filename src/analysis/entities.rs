//! Whole-word vocabulary matching.
//!
//! Presence is binary: a term either occurs as a whole word (case
//! insensitive) or it does not. Matchers always emit the canonical
//! vocabulary label, never the raw matched text.

use regex::{Regex, RegexBuilder};

use super::vocab::KeywordGroup;

/// Compiled matcher over a flat list of canonical terms.
pub struct TermSet {
    entries: Vec<(String, Regex)>,
}

impl TermSet {
    pub fn new(terms: &[String]) -> Result<Self, regex::Error> {
        let mut entries = Vec::with_capacity(terms.len());
        for term in terms {
            if term.is_empty() {
                continue;
            }
            entries.push((term.clone(), compile(&word_pattern(term))?));
        }
        Ok(Self { entries })
    }

    /// Canonical terms present in `text`, in vocabulary order, capped.
    pub fn matches(&self, text: &str, cap: usize) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(term, _)| term.clone())
            .take(cap)
            .collect()
    }

    /// Total occurrences of any term in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.entries
            .iter()
            .map(|(_, re)| re.find_iter(text).count())
            .sum()
    }
}

/// Compiled matcher over labeled keyword groups.
pub struct GroupSet {
    groups: Vec<(String, Regex)>,
}

impl GroupSet {
    pub fn new(groups: &[KeywordGroup]) -> Result<Self, regex::Error> {
        let mut compiled = Vec::with_capacity(groups.len());
        for group in groups {
            let alternation: Vec<String> = group
                .keywords
                .iter()
                .filter(|k| !k.is_empty())
                .map(|k| word_pattern(k))
                .collect();
            if alternation.is_empty() {
                continue;
            }
            let pattern = format!("(?:{})", alternation.join("|"));
            compiled.push((group.label.clone(), compile(&pattern)?));
        }
        Ok(Self { groups: compiled })
    }

    /// Labels whose group has at least one keyword hit, in table order.
    pub fn matches(&self, text: &str, cap: usize) -> Vec<String> {
        self.groups
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(label, _)| label.clone())
            .take(cap)
            .collect()
    }

    /// First label with a keyword hit; for ordered rule lists.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(label, _)| label.as_str())
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Escaped whole-word pattern for one term.
///
/// `\b` only works against word characters, so terms that start or end with
/// punctuation ("U.S.", ".io") get the boundary on the word-character side
/// only.
fn word_pattern(term: &str) -> String {
    let escaped = regex::escape(term);
    let lead = if term.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    let trail = if term.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    format!("{lead}{escaped}{trail}")
}
