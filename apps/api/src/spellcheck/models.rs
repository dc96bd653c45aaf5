use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Error value types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    Spelling,
    Grammar,
    Punctuation,
    Spacing,
    ResumeSpecific,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Resume quality categories. Scored and used to group improvement suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResumeCategory {
    Honorific,
    TabooWords,
    SentenceLength,
    ParagraphStructure,
    ExperienceDescription,
}

impl ResumeCategory {
    pub const ALL: [ResumeCategory; 5] = [
        ResumeCategory::Honorific,
        ResumeCategory::TabooWords,
        ResumeCategory::SentenceLength,
        ResumeCategory::ParagraphStructure,
        ResumeCategory::ExperienceDescription,
    ];
}

/// Error patterns typical of Korean written by non-native speakers.
/// One variant per local detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForeignWorkerCategory {
    Pronunciation,
    FinalConsonant,
    Particle,
    Spacing,
    CommonWord,
    Ending,
}

impl ForeignWorkerCategory {
    pub const ALL: [ForeignWorkerCategory; 6] = [
        ForeignWorkerCategory::Pronunciation,
        ForeignWorkerCategory::FinalConsonant,
        ForeignWorkerCategory::Particle,
        ForeignWorkerCategory::Spacing,
        ForeignWorkerCategory::CommonWord,
        ForeignWorkerCategory::Ending,
    ];

    /// Prefix used to namespace error ids produced by this detector.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ForeignWorkerCategory::Pronunciation => "pronunciation",
            ForeignWorkerCategory::FinalConsonant => "final-consonant",
            ForeignWorkerCategory::Particle => "particle",
            ForeignWorkerCategory::Spacing => "spacing",
            ForeignWorkerCategory::CommonWord => "common-word",
            ForeignWorkerCategory::Ending => "ending",
        }
    }
}

/// Character offsets (not bytes) into the checked text. `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCheckError {
    pub id: String,
    pub word: String,
    pub position: Position,
    pub error_type: ErrorType,
    pub severity: Severity,
    pub confidence: f64,
    pub suggestion: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_category: Option<ResumeCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_worker_category: Option<ForeignWorkerCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Result envelopes
// ────────────────────────────────────────────────────────────────────────────

/// Response envelope shared by every check entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_words: usize,
    pub error_count: usize,
    pub accuracy: f64,
    pub errors_by_type: BTreeMap<ErrorType, usize>,
}

impl Statistics {
    pub fn compute(text: &str, errors: &[SpellCheckError]) -> Self {
        let total_words = count_words(text);
        let mut errors_by_type = BTreeMap::new();
        for error in errors {
            *errors_by_type.entry(error.error_type).or_insert(0) += 1;
        }
        Self {
            total_words,
            error_count: errors.len(),
            accuracy: accuracy(total_words, errors.len()),
            errors_by_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCheckResult {
    pub errors: Vec<SpellCheckError>,
    pub statistics: Statistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Outcome of one independently-failing pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageStatus {
    Ok,
    Skipped,
    Failed { reason: String },
}

pub type CategoryScores<C> = BTreeMap<C, u32>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignWorkerCheckResult {
    pub general_errors: Vec<SpellCheckError>,
    pub resume_specific_errors: Vec<SpellCheckError>,
    pub category_scores: CategoryScores<ResumeCategory>,
    pub overall_resume_score: u32,
    pub suggestions: BTreeMap<ResumeCategory, Vec<String>>,
    pub foreign_worker_scores: CategoryScores<ForeignWorkerCategory>,
    pub overall_foreign_worker_score: u32,
    pub general_check: StageStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `(words - errors) / words * 100`, clamped to [0, 100] and rounded to one decimal.
/// Returns 100 when there are no words.
pub fn accuracy(total_words: usize, total_errors: usize) -> f64 {
    if total_words == 0 {
        return 100.0;
    }
    let raw = (total_words as f64 - total_errors as f64) / total_words as f64 * 100.0;
    (raw.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

/// Converts a byte range produced by the regex engine into a character range.
pub fn char_span(text: &str, byte_start: usize, byte_end: usize) -> Position {
    let start = text[..byte_start].chars().count();
    let end = start + text[byte_start..byte_end].chars().count();
    Position { start, end }
}
