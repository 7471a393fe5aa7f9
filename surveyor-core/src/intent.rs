// Search intent classification.
//
// Two classifiers share one label set. `keyword_intent` is tuned for short
// keywords pulled out of crawled copy and checks informational markers first.
// `candidate_intent` is tuned for TF-IDF terms and checks transactional
// markers first, falling back to Unknown rather than Mixed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a searcher typing this term is probably trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Informational,
    Transactional,
    Navigational,
    Mixed,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Informational => "Informational",
            Intent::Transactional => "Transactional",
            Intent::Navigational => "Navigational",
            Intent::Mixed => "Mixed",
            Intent::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const INFORMATIONAL_MARKERS: [&str; 20] = [
    "what",
    "how",
    "why",
    "when",
    "where",
    "guide",
    "tutorial",
    "tips",
    "best",
    "top",
    "learn",
    "understand",
    "explain",
    "definition",
    "vs",
    "comparison",
    "review",
    "article",
    "blog",
    "news",
];

const TRANSACTIONAL_MARKERS: [&str; 14] = [
    "buy", "price", "coupon", "discount", "order", "shop", "sale", "deal", "offer", "purchase",
    "checkout", "cart", "cost", "fee",
];

const NAVIGATIONAL_MARKERS: [&str; 11] = [
    "login",
    "signin",
    "sign up",
    "register",
    "facebook",
    "twitter",
    "instagram",
    "youtube",
    "app",
    "download",
    "official",
];

/// Classifies a keyword by substring markers.
///
/// Checked in order: informational, transactional, navigational. A keyword
/// matching none of the vocabularies is [`Intent::Mixed`].
pub fn keyword_intent(keyword: &str) -> Intent {
    let lowered = keyword.to_lowercase();

    if INFORMATIONAL_MARKERS.iter().any(|m| lowered.contains(m)) {
        Intent::Informational
    } else if TRANSACTIONAL_MARKERS.iter().any(|m| lowered.contains(m)) {
        Intent::Transactional
    } else if NAVIGATIONAL_MARKERS.iter().any(|m| lowered.contains(m)) {
        Intent::Navigational
    } else {
        Intent::Mixed
    }
}

const CANDIDATE_TRANSACTIONAL: [&str; 8] = [
    "buy", "price", "coupon", "discount", "order", "shop", "compare", "sale",
];

const CANDIDATE_NAVIGATIONAL: [&str; 7] = [
    "login",
    "signin",
    "signup",
    "facebook",
    "twitter",
    "instagram",
    "youtube",
];

const CANDIDATE_INFORMATIONAL: [&str; 8] = [
    "how", "what", "why", "guide", "tutorial", "best", "tips", "how to",
];

/// Classifies a ranking-candidate term by substring markers.
///
/// Checked in order: transactional, navigational, informational. A question
/// mark counts as informational. Anything else is [`Intent::Unknown`].
pub fn candidate_intent(term: &str) -> Intent {
    let lowered = term.to_lowercase();

    if CANDIDATE_TRANSACTIONAL.iter().any(|m| lowered.contains(m)) {
        Intent::Transactional
    } else if CANDIDATE_NAVIGATIONAL.iter().any(|m| lowered.contains(m)) {
        Intent::Navigational
    } else if CANDIDATE_INFORMATIONAL.iter().any(|m| lowered.contains(m)) || lowered.contains('?')
    {
        Intent::Informational
    } else {
        Intent::Unknown
    }
}

/// One keyword and the intent it classified to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordIntent {
    pub keyword: String,
    pub intent: Intent,
}

/// How many of the classified keywords landed on one intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentShare {
    pub intent: Intent,
    pub count: usize,
    /// Share of the classified keywords, as a percentage rounded to 1 dp.
    pub percentage: f64,
}

/// Classifies every keyword and tallies the intent distribution.
///
/// Distribution rows appear in the order each intent was first seen.
pub fn intent_distribution(keywords: &[String]) -> (Vec<KeywordIntent>, Vec<IntentShare>) {
    let mut intents = Vec::with_capacity(keywords.len());
    let mut tallies: Vec<(Intent, usize)> = Vec::new();

    for keyword in keywords {
        let intent = keyword_intent(keyword);
        intents.push(KeywordIntent {
            keyword: keyword.clone(),
            intent,
        });
        match tallies.iter_mut().find(|(i, _)| *i == intent) {
            Some((_, count)) => *count += 1,
            None => tallies.push((intent, 1)),
        }
    }

    let total = keywords.len();
    let summary = tallies
        .into_iter()
        .map(|(intent, count)| IntentShare {
            intent,
            count,
            percentage: if total > 0 {
                (count as f64 / total as f64 * 1000.0).round() / 10.0
            } else {
                0.0
            },
        })
        .collect();

    (intents, summary)
}
