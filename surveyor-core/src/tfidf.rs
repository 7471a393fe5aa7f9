// TF-IDF term extraction over a small page corpus.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, Result};

pub const DEFAULT_NGRAM_RANGE: (usize, usize) = (1, 2);
pub const DEFAULT_MAX_FEATURES: usize = 10_000;

/// A term and its TF-IDF weight within one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermScore {
    pub term: String,
    pub score: f64,
}

/// Scores the terms of each document against the rest of the corpus.
///
/// Weights use smoothed inverse document frequency,
/// `ln((1 + docs) / (1 + doc_freq)) + 1`, and each document's weight vector
/// is L2-normalized, so scores are comparable across documents.
#[derive(Debug, Clone)]
pub struct TfidfExtractor {
    ngram_range: (usize, usize),
    max_features: usize,
}

impl Default for TfidfExtractor {
    fn default() -> Self {
        Self {
            ngram_range: DEFAULT_NGRAM_RANGE,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl TfidfExtractor {
    /// Builds an extractor, validating the configuration up front.
    pub fn new(ngram_range: (usize, usize), max_features: usize) -> Result<Self> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || max_n < min_n {
            return Err(AnalysisError::InvalidConfig(format!(
                "ngram range ({min_n}, {max_n}) must satisfy 1 <= min <= max"
            )));
        }
        if max_features == 0 {
            return Err(AnalysisError::InvalidConfig(
                "max_features must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            ngram_range,
            max_features,
        })
    }

    /// The `top_n` highest-weighted terms of every document, best first.
    ///
    /// Equal weights are broken alphabetically. Documents with no scorable
    /// terms produce an empty list; output length always matches input
    /// length.
    pub fn top_terms(&self, documents: &[String], top_n: usize) -> Vec<Vec<TermScore>> {
        if documents.is_empty() {
            return Vec::new();
        }

        let doc_counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| self.term_counts(doc))
            .collect();

        // Corpus-wide occurrence count and document frequency per term.
        let mut corpus: HashMap<&str, (usize, usize)> = HashMap::new();
        for counts in &doc_counts {
            for (term, &count) in counts {
                let entry = corpus.entry(term.as_str()).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let vocabulary: HashSet<&str> = if corpus.len() > self.max_features {
            debug!(
                "capping vocabulary from {} to {} terms",
                corpus.len(),
                self.max_features
            );
            let mut ranked: Vec<(&str, usize)> =
                corpus.iter().map(|(term, &(count, _))| (*term, count)).collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(self.max_features);
            ranked.into_iter().map(|(term, _)| term).collect()
        } else {
            corpus.keys().copied().collect()
        };

        let doc_total = documents.len() as f64;
        let idf = |doc_freq: usize| ((1.0 + doc_total) / (1.0 + doc_freq as f64)).ln() + 1.0;

        doc_counts
            .iter()
            .map(|counts| {
                let mut weighted: Vec<(&str, f64)> = counts
                    .iter()
                    .filter(|(term, _)| vocabulary.contains(term.as_str()))
                    .map(|(term, &count)| {
                        let (_, doc_freq) = corpus[term.as_str()];
                        (term.as_str(), count as f64 * idf(doc_freq))
                    })
                    .collect();

                let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, weight) in &mut weighted {
                        *weight /= norm;
                    }
                }

                weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
                weighted.truncate(top_n);
                weighted
                    .into_iter()
                    .map(|(term, score)| TermScore {
                        term: term.to_string(),
                        score,
                    })
                    .collect()
            })
            .collect()
    }

    /// Occurrence counts of every n-gram in one document.
    fn term_counts(&self, document: &str) -> HashMap<String, usize> {
        let tokens = tokenize(document);
        let (min_n, max_n) = self.ngram_range;

        let mut counts = HashMap::new();
        for n in min_n..=max_n {
            if n == 0 || n > tokens.len() {
                continue;
            }
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Splits text into lowercase word tokens, dropping English stopwords.
///
/// A token is a run of word characters and interior hyphens, at least two
/// characters long. Stopwords are removed before n-grams are built, so
/// "state of the art" yields the bigram "state art".
fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in lowered.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '-' {
            current.push(ch);
        } else {
            flush_token(&mut current, &mut tokens);
        }
    }
    flush_token(&mut current, &mut tokens);

    tokens
}

fn flush_token(current: &mut String, tokens: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let trimmed = current.trim_matches('-');
    if trimmed.chars().count() >= 2 && !ENGLISH_STOPWORDS.contains(&trimmed) {
        tokens.push(trimmed.to_string());
    }
    current.clear();
}

/// The classic English stopword list used by text-mining vectorizers.
const ENGLISH_STOPWORDS: [&str; 318] = [
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];
