// Opportunity scoring and difficulty estimation.

use serde::{Deserialize, Serialize};

/// How urgently a keyword is worth targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// An opportunity score with its weighted components.
///
/// All values live on a 0 to 100 scale and are rounded to 1 dp, except the
/// ranking penalty which is left unrounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityScore {
    pub score: f64,
    pub frequency_score: f64,
    pub length_score: f64,
    pub ranking_penalty: f64,
    pub priority: Priority,
}

/// Scores how strong an opportunity a keyword represents.
///
/// Components: how often the keyword occurs relative to the corpus (long-tail
/// volume proxy), how many words it has (longer queries convert better), and
/// a penalty for queries the site already ranks for. The blend is
/// `0.4 * frequency + 0.4 * length - 0.2 * penalty`, clamped to 0..=100.
pub fn opportunity_score(
    keyword: &str,
    frequency: usize,
    total_keywords: usize,
    current_rankings: usize,
) -> OpportunityScore {
    let frequency_score = if total_keywords > 0 {
        (frequency as f64 / total_keywords as f64 * 100.0 * 2.0).min(100.0)
    } else {
        0.0
    };

    let word_count = keyword.split_whitespace().count();
    let length_score = (word_count as f64 * 15.0).min(100.0);

    let ranking_penalty = current_rankings as f64 * 20.0;

    let score =
        (frequency_score * 0.4 + length_score * 0.4 - ranking_penalty * 0.2).clamp(0.0, 100.0);

    let priority = if score >= 70.0 {
        Priority::High
    } else if score >= 40.0 {
        Priority::Medium
    } else {
        Priority::Low
    };

    OpportunityScore {
        score: round1(score),
        frequency_score: round1(frequency_score),
        length_score: round1(length_score),
        ranking_penalty,
        priority,
    }
}

/// How hard ranking for a keyword is likely to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
        }
    }
}

/// A difficulty estimate on a 0 to 100 scale, rounded to 1 dp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyEstimate {
    pub score: f64,
    pub level: DifficultyLevel,
}

/// Estimates ranking difficulty from corpus share and keyword length.
///
/// Rare keywords score as harder, each extra word shaves a point off.
/// Below 30 is Easy, below 60 Medium, everything else Hard.
pub fn estimate_difficulty(
    keyword: &str,
    frequency: usize,
    total_keywords: usize,
) -> DifficultyEstimate {
    let frequency_ratio = if total_keywords > 0 {
        frequency as f64 / total_keywords as f64
    } else {
        0.0
    };

    let word_count = keyword.split_whitespace().count();
    let score =
        ((1.0 - frequency_ratio) * 100.0 - word_count as f64 * 0.1 * 10.0).clamp(0.0, 100.0);

    let level = if score < 30.0 {
        DifficultyLevel::Easy
    } else if score < 60.0 {
        DifficultyLevel::Medium
    } else {
        DifficultyLevel::Hard
    };

    DifficultyEstimate {
        score: round1(score),
        level,
    }
}

/// One keyword with its opportunity and difficulty, as ranked in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityRow {
    pub keyword: String,
    pub frequency: usize,
    pub opportunity: OpportunityScore,
    pub difficulty: DifficultyEstimate,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
