use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of the keyword frequency table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordFrequency {
    pub keyword: String,
    /// Number of occurrences in the corpus.
    pub frequency: usize,
    /// Share of all keyword occurrences, as a percentage rounded to 2 dp.
    pub percentage: f64,
}

/// Ranks keywords by occurrence count, most frequent first.
///
/// Ties keep the order in which the keywords first appeared in the corpus.
/// Returns at most `top_n` rows; an empty corpus yields an empty table.
pub fn analyze_frequency(keywords: &[String], top_n: usize) -> Vec<KeywordFrequency> {
    if keywords.is_empty() {
        return Vec::new();
    }

    let total = keywords.len();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for keyword in keywords {
        match index.get(keyword.as_str()) {
            Some(&at) => counts[at].1 += 1,
            None => {
                index.insert(keyword.as_str(), counts.len());
                counts.push((keyword.as_str(), 1));
            }
        }
    }

    // Stable sort, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);

    counts
        .into_iter()
        .map(|(keyword, frequency)| KeywordFrequency {
            keyword: keyword.to_string(),
            frequency,
            percentage: round2(frequency as f64 / total as f64 * 100.0),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
