// Keyword extraction and the aggregate research report.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::cluster::{DEFAULT_SIMILARITY_THRESHOLD, cluster_keywords};
use crate::frequency::{KeywordFrequency, analyze_frequency};
use crate::intent::{Intent, IntentShare, KeywordIntent, intent_distribution};
use crate::opportunity::{OpportunityRow, estimate_difficulty, opportunity_score};

/// Tokens shorter than this never count as keywords.
pub const MIN_KEYWORD_LENGTH: usize = 2;

/// Common English words that carry no keyword signal.
const STOPWORDS: [&str; 46] = [
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "or", "that", "the", "to", "was", "will", "with", "this", "but", "not",
    "you", "all", "can", "her", "what", "which", "who", "am", "have", "if", "me", "my", "these",
    "those", "your", "about", "could", "does",
];

/// Extracts candidate keywords from free text.
///
/// Text is lowercased and split on non-word characters. Stopwords and tokens
/// shorter than [`MIN_KEYWORD_LENGTH`] are dropped. Every surviving
/// occurrence is kept, in document order, so the caller can count frequency.
pub fn extract_keywords(text: &str) -> Vec<String> {
    extract_keywords_with_min_length(text, MIN_KEYWORD_LENGTH)
}

/// Same as [`extract_keywords`] with an explicit minimum token length.
pub fn extract_keywords_with_min_length(text: &str, min_length: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut keywords = Vec::new();
    let mut current = String::new();

    for ch in lowered.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.push(ch);
        } else {
            flush_token(&mut current, &mut keywords, min_length);
        }
    }
    flush_token(&mut current, &mut keywords, min_length);

    keywords
}

fn flush_token(current: &mut String, keywords: &mut Vec<String>, min_length: usize) {
    if current.is_empty() {
        return;
    }
    if current.chars().count() >= min_length && !STOPWORDS.contains(&current.as_str()) {
        keywords.push(current.clone());
    }
    current.clear();
}

/// Expands a seed keyword into the query shapes searchers actually type.
pub fn keyword_variations(keyword: &str) -> Vec<String> {
    let mut variations = vec![keyword.to_string()];

    // Naive pluralization. Words already ending in "s" are left alone.
    if !keyword.ends_with('s') {
        variations.push(format!("{keyword}s"));
    }

    variations.extend([
        format!("what is {keyword}"),
        format!("how to {keyword}"),
        format!("best {keyword}"),
        format!("{keyword} tips"),
        format!("{keyword} guide"),
        format!("{keyword} tutorial"),
        format!("{keyword} tools"),
    ]);

    variations
}

/// Everything the research pipeline knows about one keyword corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordReport {
    pub total_keywords: usize,
    pub unique_keywords: usize,
    /// Top keywords ranked by occurrence count.
    pub frequency: Vec<KeywordFrequency>,
    /// Search intent of each top keyword.
    pub intents: Vec<KeywordIntent>,
    /// Intent counts over the top keywords.
    pub intent_summary: Vec<IntentShare>,
    /// Top keywords ranked by opportunity score, best first.
    pub opportunities: Vec<OpportunityRow>,
    /// Similarity clusters among the top keywords, keyed by cluster leader.
    pub clusters: BTreeMap<String, Vec<String>>,
}

impl KeywordReport {
    pub fn is_empty(&self) -> bool {
        self.total_keywords == 0
    }

    /// The best scoring opportunities, at most `limit` of them.
    pub fn top_opportunities(&self, limit: usize) -> &[OpportunityRow] {
        &self.opportunities[..self.opportunities.len().min(limit)]
    }

    /// The most common intent among the top keywords, if any were classified.
    pub fn dominant_intent(&self) -> Option<Intent> {
        let mut best: Option<&IntentShare> = None;
        for share in &self.intent_summary {
            if best.is_none_or(|b| share.count > b.count) {
                best = Some(share);
            }
        }
        best.map(|share| share.intent)
    }
}

/// Runs the whole research pipeline over an extracted keyword corpus.
///
/// Frequency, intent, opportunity, and clustering are all computed over the
/// `top_n` most frequent keywords. An empty corpus yields an empty report.
pub fn generate_keyword_report(keywords: &[String], top_n: usize) -> KeywordReport {
    let total_keywords = keywords.len();
    let unique_keywords = keywords.iter().collect::<HashSet<_>>().len();

    let frequency = analyze_frequency(keywords, top_n);
    let top_keywords: Vec<String> = frequency.iter().map(|row| row.keyword.clone()).collect();

    let (intents, intent_summary) = intent_distribution(&top_keywords);

    let mut opportunities: Vec<OpportunityRow> = frequency
        .iter()
        .map(|row| OpportunityRow {
            keyword: row.keyword.clone(),
            frequency: row.frequency,
            opportunity: opportunity_score(&row.keyword, row.frequency, total_keywords, 0),
            difficulty: estimate_difficulty(&row.keyword, row.frequency, total_keywords),
        })
        .collect();
    // Stable sort keeps the frequency-table order for equal scores.
    opportunities.sort_by(|a, b| b.opportunity.score.total_cmp(&a.opportunity.score));

    let clusters = cluster_keywords(&top_keywords, DEFAULT_SIMILARITY_THRESHOLD);

    KeywordReport {
        total_keywords,
        unique_keywords,
        frequency,
        intents,
        intent_summary,
        opportunities,
        clusters,
    }
}
