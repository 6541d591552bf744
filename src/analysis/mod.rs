//! Heuristic document analysis.
//!
//! Every extractor in this module is a pure function of the text and the
//! vocabulary tables: no I/O, no randomness. Extractors that find nothing
//! return their empty default instead of failing, so analysis of a document
//! as a whole cannot fail.

mod classify;
mod entities;
mod metrics;
mod summary;
pub mod vocab;

use chrono::Utc;

use crate::extract::ExtractedText;
use crate::models::Analysis;
use entities::{GroupSet, TermSet};
use vocab::Vocabulary;

/// Characters of text consulted for keyword-group categories.
const CATEGORY_SCAN_CHARS: usize = 5000;
/// Characters of text consulted for geography and audience inference.
const SCOPE_SCAN_CHARS: usize = 3000;
/// Characters of body text consulted for report-type rules.
const REPORT_TYPE_SCAN_CHARS: usize = 2000;

const MAX_COMPANIES: usize = 20;
const MAX_GAMES: usize = 15;
const MAX_TOPICS: usize = 10;
const MAX_PER_CATEGORY: usize = 10;
const MAX_AUDIENCES: usize = 5;

/// Identity fields consulted by the analyzer; everything else comes from the
/// extracted text.
#[derive(Debug, Clone, Copy)]
pub struct DocumentIdentity<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub file_name: &'a str,
}

/// Compiled heuristic analyzer.
///
/// Compiling the vocabulary once per run keeps the per-document cost down to
/// regex scans.
pub struct DocumentAnalyzer {
    companies: TermSet,
    games: TermSet,
    platforms: GroupSet,
    regions: GroupSet,
    genres: GroupSet,
    technologies: GroupSet,
    business_models: GroupSet,
    topics: GroupSet,
    audiences: GroupSet,
    report_types: GroupSet,
    positive: TermSet,
    negative: TermSet,
}

impl DocumentAnalyzer {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, regex::Error> {
        Ok(Self {
            companies: TermSet::new(&vocabulary.companies)?,
            games: TermSet::new(&vocabulary.games)?,
            platforms: GroupSet::new(&vocabulary.platforms)?,
            regions: GroupSet::new(&vocabulary.regions)?,
            genres: GroupSet::new(&vocabulary.genres)?,
            technologies: GroupSet::new(&vocabulary.technologies)?,
            business_models: GroupSet::new(&vocabulary.business_models)?,
            topics: GroupSet::new(&vocabulary.topics)?,
            audiences: GroupSet::new(&vocabulary.audiences)?,
            report_types: GroupSet::new(&vocabulary.report_types)?,
            positive: TermSet::new(&vocabulary.positive_words)?,
            negative: TermSet::new(&vocabulary.negative_words)?,
        })
    }

    /// Run every extractor and assemble the analysis record.
    pub fn analyze(&self, identity: DocumentIdentity<'_>, extracted: &ExtractedText) -> Analysis {
        let text = extracted.text.as_str();
        let category_scope = char_prefix(text, CATEGORY_SCAN_CHARS);
        let narrow_scope = char_prefix(text, SCOPE_SCAN_CHARS);

        let topic_scope = format!("{} {}", identity.title, category_scope);
        let geo_regions = self.regions.matches(narrow_scope, MAX_PER_CATEGORY);

        let mut target_audience = self.audiences.matches(narrow_scope, MAX_AUDIENCES);
        if target_audience.is_empty() {
            target_audience.push("Industry Professionals".to_string());
        }

        Analysis {
            summary: summary::build_summary(text, identity.title, identity.category),
            key_findings: summary::extract_key_findings(text),
            topics: self.topics.matches(&topic_scope, MAX_TOPICS),
            companies: self.companies.matches(text, MAX_COMPANIES),
            games: self.games.matches(text, MAX_GAMES),
            platforms: self.platforms.matches(category_scope, MAX_PER_CATEGORY),
            regions: self.regions.matches(category_scope, MAX_PER_CATEGORY),
            genres: self.genres.matches(category_scope, MAX_PER_CATEGORY),
            technologies: self.technologies.matches(category_scope, MAX_PER_CATEGORY),
            business_models: self
                .business_models
                .matches(category_scope, MAX_PER_CATEGORY),
            extracted_metrics: metrics::extract_metrics(text),
            timeframe: classify::infer_timeframe(identity.file_name, text),
            geographic_scope: classify::infer_geography(&geo_regions),
            report_type: classify::classify_report_type(
                &self.report_types,
                identity.title,
                char_prefix(text, REPORT_TYPE_SCAN_CHARS),
            ),
            target_audience,
            sentiment: classify::analyze_sentiment(
                &self.positive,
                &self.negative,
                category_scope,
            ),
            page_count: extracted.page_count,
            text_length: text.chars().count(),
            error: None,
            processed: true,
            processed_at: Utc::now(),
        }
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub(crate) fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> DocumentAnalyzer {
        DocumentAnalyzer::new(&Vocabulary::default()).unwrap()
    }

    fn extracted(text: &str) -> ExtractedText {
        ExtractedText {
            text: text.to_string(),
            page_count: 4,
        }
    }

    const IDENTITY: DocumentIdentity<'static> = DocumentIdentity {
        title: "Mobile Games Market Report",
        category: "Market Research",
        file_name: "Mobile Games Market Report Q4 2023.pdf",
    };

    #[test]
    fn test_analyze_assembles_record() {
        let text = "Executive Summary\n\
                    Supercell and Tencent led mobile spending growth this year. Revenue \
                    reached $3.2 billion across iOS and Android storefronts, with strong \
                    growth in Japan driven by free-to-play titles like Clash of Clans.";
        let analysis = analyzer().analyze(IDENTITY, &extracted(text));

        assert!(analysis.processed);
        assert!(analysis.companies.contains(&"Supercell".to_string()));
        assert!(analysis.companies.contains(&"Tencent".to_string()));
        assert!(analysis.games.contains(&"Clash of Clans".to_string()));
        assert!(analysis.platforms.contains(&"Mobile".to_string()));
        assert!(analysis
            .business_models
            .contains(&"Free-to-Play".to_string()));
        assert_eq!(analysis.timeframe, "Q4 2023");
        assert_eq!(analysis.geographic_scope, "Japan");
        assert_eq!(analysis.report_type, "Market Research Report");
        assert_eq!(analysis.page_count, 4);
        assert!(analysis.error.is_none());
        assert!(analysis.summary.starts_with("Executive Summary"));
        assert!(!analysis.extracted_metrics.is_empty());
    }

    #[test]
    fn test_analyze_empty_signal_degrades_to_defaults() {
        let text = "Plain prose without any recognizable vocabulary, figures, or \
                    headings to anchor on, repeated to stay realistic in length.";
        let analysis = analyzer().analyze(
            DocumentIdentity {
                title: "Untitled",
                category: "Gaming",
                file_name: "scan.pdf",
            },
            &extracted(text),
        );

        assert!(analysis.companies.is_empty());
        assert!(analysis.games.is_empty());
        assert_eq!(analysis.timeframe, "Not specified");
        assert_eq!(analysis.geographic_scope, "Global");
        assert_eq!(analysis.report_type, "Industry Report");
        assert_eq!(
            analysis.target_audience,
            vec!["Industry Professionals".to_string()]
        );
        assert!(analysis.processed);
    }

    #[test]
    fn test_analyze_deterministic() {
        let text = "Survey respondents reported 45% growth in session length on PC \
                    and console platforms across Europe and North America.";
        let identity = DocumentIdentity {
            title: "Player Survey",
            category: "Research",
            file_name: "survey_2022.pdf",
        };
        let first = analyzer().analyze(identity, &extracted(text));
        let second = analyzer().analyze(identity, &extracted(text));
        assert_eq!(first.topics, second.topics);
        assert_eq!(first.extracted_metrics, second.extracted_metrics);
        assert_eq!(first.sentiment, second.sentiment);
        assert_eq!(first.report_type, "Survey Report");
    }

    #[test]
    fn test_labels_come_from_vocabulary() {
        let vocabulary = Vocabulary::default();
        let text = "Global mobile market analysis: revenue, monetization, esports, \
                    retention, PC and console trends across Europe, China and Japan, \
                    with blockchain, NFT and cloud gaming technology adoption.";
        let analysis = analyzer().analyze(IDENTITY, &extracted(text));

        assert!(analysis
            .topics
            .iter()
            .all(|t| vocabulary.topics.iter().any(|g| g.label == *t)));
        assert!(analysis
            .regions
            .iter()
            .all(|r| vocabulary.regions.iter().any(|g| g.label == *r)));
        assert!(analysis
            .companies
            .iter()
            .all(|c| vocabulary.companies.contains(c)));
        assert!(analysis.topics.len() <= MAX_TOPICS);
        assert!(analysis.regions.len() <= MAX_PER_CATEGORY);
    }

    #[test]
    fn test_char_prefix_multibyte() {
        let text = "héllo wörld";
        assert_eq!(char_prefix(text, 4), "héll");
        assert_eq!(char_prefix(text, 100), text);
    }
}
