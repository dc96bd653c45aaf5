//! Category scoring: every category starts at 100 and loses a fixed penalty per error.

use std::collections::BTreeMap;

use super::models::{CategoryScores, ForeignWorkerCategory, ResumeCategory, SpellCheckError};

pub const MAX_SCORE: u32 = 100;

/// A closed set of scored categories.
pub trait ScoreCategory: Copy + Ord + 'static {
    fn all() -> &'static [Self];
    /// The category an error counts against, if any.
    fn of(error: &SpellCheckError) -> Option<Self>;
}

impl ScoreCategory for ResumeCategory {
    fn all() -> &'static [Self] {
        &ResumeCategory::ALL
    }

    fn of(error: &SpellCheckError) -> Option<Self> {
        error.resume_category
    }
}

impl ScoreCategory for ForeignWorkerCategory {
    fn all() -> &'static [Self] {
        &ForeignWorkerCategory::ALL
    }

    fn of(error: &SpellCheckError) -> Option<Self> {
        error.foreign_worker_category
    }
}

/// Penalty subtracted from a category score per matching error.
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyWeights<C: Ord> {
    weights: BTreeMap<C, u32>,
}

impl<C: ScoreCategory> PenaltyWeights<C> {
    pub fn get(&self, category: C) -> u32 {
        self.weights.get(&category).copied().unwrap_or(0)
    }

    pub fn with_weight(mut self, category: C, penalty: u32) -> Self {
        self.weights.insert(category, penalty);
        self
    }

    pub fn with_overrides(self, overrides: impl IntoIterator<Item = (C, u32)>) -> Self {
        overrides
            .into_iter()
            .fold(self, |weights, (category, penalty)| weights.with_weight(category, penalty))
    }
}

impl Default for PenaltyWeights<ResumeCategory> {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                (ResumeCategory::Honorific, 10),
                (ResumeCategory::TabooWords, 8),
                (ResumeCategory::SentenceLength, 5),
                (ResumeCategory::ParagraphStructure, 5),
                (ResumeCategory::ExperienceDescription, 6),
            ]),
        }
    }
}

impl Default for PenaltyWeights<ForeignWorkerCategory> {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                (ForeignWorkerCategory::Pronunciation, 5),
                (ForeignWorkerCategory::FinalConsonant, 5),
                (ForeignWorkerCategory::Particle, 5),
                (ForeignWorkerCategory::Spacing, 3),
                (ForeignWorkerCategory::CommonWord, 4),
                (ForeignWorkerCategory::Ending, 4),
            ]),
        }
    }
}

/// Scores every category of `C`, clamped to [0, 100]. Untouched categories stay at 100.
pub fn calculate_category_scores<C: ScoreCategory>(
    errors: &[SpellCheckError],
    weights: &PenaltyWeights<C>,
) -> CategoryScores<C> {
    let mut scores: CategoryScores<C> = C::all().iter().map(|&c| (c, MAX_SCORE)).collect();
    for error in errors {
        if let Some(category) = C::of(error) {
            if let Some(score) = scores.get_mut(&category) {
                *score = score.saturating_sub(weights.get(category));
            }
        }
    }
    scores
}

/// Resume-category scores for the foreign-worker check.
pub fn calculate_foreign_worker_category_scores(
    errors: &[SpellCheckError],
    weights: &PenaltyWeights<ResumeCategory>,
) -> CategoryScores<ResumeCategory> {
    calculate_category_scores(errors, weights)
}

/// Mean of all category scores, rounded half up. An empty map scores 100.
pub fn calculate_overall_foreign_worker_score<C: Ord>(scores: &CategoryScores<C>) -> u32 {
    if scores.is_empty() {
        return MAX_SCORE;
    }
    let sum: u32 = scores.values().sum();
    (sum as f64 / scores.len() as f64).round() as u32
}

pub fn calculate_overall_resume_score(scores: &CategoryScores<ResumeCategory>) -> u32 {
    calculate_overall_foreign_worker_score(scores)
}
