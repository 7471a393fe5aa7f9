use std::collections::{BTreeMap, HashSet};

/// Minimum character-set similarity for two keywords to share a cluster.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Groups keywords into clusters of similar spellings.
///
/// Keywords are considered lexicographically; each unclaimed keyword becomes
/// a cluster leader and claims every later keyword whose character-set
/// Jaccard similarity meets the threshold. A keyword belongs to at most one
/// cluster, the leader is included in its own member list, and clusters with
/// a single member are dropped. The map is keyed by cluster leader.
pub fn cluster_keywords(keywords: &[String], threshold: f64) -> BTreeMap<String, Vec<String>> {
    let mut ordered: Vec<&str> = keywords.iter().map(|k| k.as_str()).collect();
    ordered.sort_unstable();

    let mut clusters = BTreeMap::new();
    let mut claimed: HashSet<&str> = HashSet::new();

    for leader in &ordered {
        if claimed.contains(leader) {
            continue;
        }
        claimed.insert(leader);

        let mut members = vec![leader.to_string()];
        for other in keywords {
            let other = other.as_str();
            if other == *leader || claimed.contains(other) {
                continue;
            }
            if jaccard_chars(leader, other) >= threshold {
                members.push(other.to_string());
                claimed.insert(other);
            }
        }

        if members.len() > 1 {
            clusters.insert(leader.to_string(), members);
        }
    }

    clusters
}

/// Jaccard similarity over the character sets of two words.
fn jaccard_chars(a: &str, b: &str) -> f64 {
    let chars_a: HashSet<char> = a.chars().collect();
    let chars_b: HashSet<char> = b.chars().collect();
    if chars_a.is_empty() || chars_b.is_empty() {
        return 0.0;
    }

    let intersection = chars_a.intersection(&chars_b).count();
    let union = chars_a.union(&chars_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::jaccard_chars;

    #[test]
    fn test_jaccard_of_identical_words_is_one() {
        assert_eq!(jaccard_chars("seo", "seo"), 1.0);
    }

    #[test]
    fn test_jaccard_of_disjoint_words_is_zero() {
        assert_eq!(jaccard_chars("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_jaccard_counts_distinct_characters_only() {
        // {c, a, t} vs {c, a, t, s}
        assert_eq!(jaccard_chars("cat", "cats"), 0.75);
    }

    #[test]
    fn test_jaccard_of_empty_word_is_zero() {
        assert_eq!(jaccard_chars("", "seo"), 0.0);
    }
}
