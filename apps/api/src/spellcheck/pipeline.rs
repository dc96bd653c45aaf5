//! Pipeline orchestration: merges the external general check with the local
//! detectors, then scores and aggregates suggestions.
//!
//! Flow: general check ∥ local detectors → join → category scores →
//!       overall scores → suggestions.
//!
//! The general stage fails independently: local findings are returned with
//! `generalCheck = failed` unless strict mode is on.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use super::detectors::run_foreign_worker_detectors;
use super::external::{build_result, GeneralChecker, GENERAL_CHECK_FAILED};
use super::models::{
    accuracy, char_span, count_words, ApiResponse, ErrorType, ForeignWorkerCategory,
    ForeignWorkerCheckResult, ResumeCategory, Severity, SpellCheckError, SpellCheckResult,
    StageStatus,
};
use super::resume_rules::run_resume_rule_detectors;
use super::scoring::{
    calculate_category_scores, calculate_foreign_worker_category_scores,
    calculate_overall_foreign_worker_score, calculate_overall_resume_score, PenaltyWeights,
};
use super::suggestions::generate_foreign_worker_suggestions;
use crate::models::resume::{
    ResumeCheckResult, ResumeFormData, ResumeSection, SectionCheck, SectionKind,
};

pub const FOREIGN_WORKER_CHECK_FAILED: &str = "외국인 근로자 맞춤법 검사 중 오류가 발생했습니다.";
pub const RESUME_CHECK_FAILED: &str = "이력서 검사 중 오류가 발생했습니다.";

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref PHONE_PATTERN: Regex =
        Regex::new(r"^(?:\+?82[- ]?)?0?1[016789][- ]?\d{3,4}[- ]?\d{4}$").unwrap();
}

/// All local detectors: the six foreign-worker ones plus the resume-quality ones.
pub fn run_local_detectors(text: &str) -> Vec<SpellCheckError> {
    let mut errors = run_foreign_worker_detectors(text);
    errors.extend(run_resume_rule_detectors(text));
    errors
}

pub struct SpellCheckPipeline {
    checker: Arc<dyn GeneralChecker>,
    resume_weights: PenaltyWeights<ResumeCategory>,
    detector_weights: PenaltyWeights<ForeignWorkerCategory>,
    strict_general_check: bool,
}

impl SpellCheckPipeline {
    pub fn new(checker: Arc<dyn GeneralChecker>) -> Self {
        Self {
            checker,
            resume_weights: PenaltyWeights::default(),
            detector_weights: PenaltyWeights::default(),
            strict_general_check: false,
        }
    }

    /// Strict mode fails the whole call when the general check fails.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_general_check = strict;
        self
    }

    pub fn with_resume_weights(mut self, weights: PenaltyWeights<ResumeCategory>) -> Self {
        self.resume_weights = weights;
        self
    }

    pub fn with_detector_weights(mut self, weights: PenaltyWeights<ForeignWorkerCategory>) -> Self {
        self.detector_weights = weights;
        self
    }

    /// General spelling check only. Blank text never reaches the service.
    pub async fn check_spelling(
        &self,
        text: &str,
        section: Option<&str>,
    ) -> ApiResponse<SpellCheckResult> {
        if text.trim().is_empty() {
            return ApiResponse::ok(build_result(text, vec![], section));
        }
        self.checker.check(text, section).await
    }

    pub async fn check_foreign_worker_spelling(
        &self,
        text: &str,
    ) -> ApiResponse<ForeignWorkerCheckResult> {
        if text.trim().is_empty() {
            return ApiResponse::ok(self.assemble(vec![], vec![], StageStatus::Skipped));
        }

        let ((general_errors, general_check), local_errors) = tokio::join!(
            self.general_stage(text, None),
            async { run_local_detectors(text) }
        );

        if self.strict_general_check && matches!(general_check, StageStatus::Failed { .. }) {
            warn!("General check failed in strict mode; discarding local results");
            return ApiResponse::failure(FOREIGN_WORKER_CHECK_FAILED);
        }

        debug!(
            general = general_errors.len(),
            local = local_errors.len(),
            "Foreign worker check completed"
        );
        ApiResponse::ok(self.assemble(general_errors, local_errors, general_check))
    }

    /// Checks each non-empty resume section independently.
    pub async fn check_resume(&self, form: &ResumeFormData) -> ApiResponse<ResumeCheckResult> {
        let mut sections = Vec::new();

        for (section, text) in form.sections() {
            let (errors, general_check) = match section.kind() {
                SectionKind::Identity => (vec![], StageStatus::Skipped),
                SectionKind::EmailAddress => (
                    validate_contact(text, section, &EMAIL_PATTERN),
                    StageStatus::Skipped,
                ),
                SectionKind::PhoneNumber => (
                    validate_contact(text, section, &PHONE_PATTERN),
                    StageStatus::Skipped,
                ),
                SectionKind::Prose => {
                    let ((mut errors, status), local) = tokio::join!(
                        self.general_stage(text, Some(section.label())),
                        async { run_local_detectors(text) }
                    );
                    if self.strict_general_check && matches!(status, StageStatus::Failed { .. }) {
                        warn!(section = section.label(), "General check failed in strict mode");
                        return ApiResponse::failure(RESUME_CHECK_FAILED);
                    }
                    errors.extend(local);
                    (errors, status)
                }
            };

            sections.push(SectionCheck {
                section,
                word_count: count_words(text),
                error_count: errors.len(),
                errors,
                general_check,
            });
        }

        let total_words = sections.iter().map(|s| s.word_count).sum();
        let total_errors = sections.iter().map(|s| s.error_count).sum();

        debug!(
            sections = sections.len(),
            total_words, total_errors, "Resume check completed"
        );
        ApiResponse::ok(ResumeCheckResult {
            sections,
            total_words,
            total_errors,
            accuracy: accuracy(total_words, total_errors),
        })
    }

    async fn general_stage(
        &self,
        text: &str,
        section: Option<&str>,
    ) -> (Vec<SpellCheckError>, StageStatus) {
        if !self.checker.enabled() {
            return (vec![], StageStatus::Skipped);
        }
        let response = self.checker.check(text, section).await;
        match response.data {
            Some(result) if response.success => (result.errors, StageStatus::Ok),
            _ => (
                vec![],
                StageStatus::Failed {
                    reason: response
                        .error
                        .unwrap_or_else(|| GENERAL_CHECK_FAILED.to_string()),
                },
            ),
        }
    }

    fn assemble(
        &self,
        general_errors: Vec<SpellCheckError>,
        resume_specific_errors: Vec<SpellCheckError>,
        general_check: StageStatus,
    ) -> ForeignWorkerCheckResult {
        let category_scores =
            calculate_foreign_worker_category_scores(&resume_specific_errors, &self.resume_weights);
        let foreign_worker_scores =
            calculate_category_scores(&resume_specific_errors, &self.detector_weights);
        ForeignWorkerCheckResult {
            overall_resume_score: calculate_overall_resume_score(&category_scores),
            overall_foreign_worker_score: calculate_overall_foreign_worker_score(
                &foreign_worker_scores,
            ),
            suggestions: generate_foreign_worker_suggestions(&resume_specific_errors),
            general_errors,
            resume_specific_errors,
            category_scores,
            foreign_worker_scores,
            general_check,
        }
    }
}

/// One error for the whole field when it doesn't match the expected format.
fn validate_contact(text: &str, section: ResumeSection, pattern: &Regex) -> Vec<SpellCheckError> {
    let trimmed = text.trim();
    if pattern.is_match(trimmed) {
        return vec![];
    }
    let (suggestion, description) = match section {
        ResumeSection::Phone => ("010-1234-5678", "전화번호 형식이 올바르지 않습니다"),
        _ => ("example@email.com", "이메일 형식이 올바르지 않습니다"),
    };
    let byte_start = text.len() - text.trim_start().len();
    vec![SpellCheckError {
        id: format!("{}-format-0", section.label()),
        word: trimmed.to_string(),
        position: char_span(text, byte_start, byte_start + trimmed.len()),
        error_type: ErrorType::ResumeSpecific,
        severity: Severity::High,
        confidence: 1.0,
        suggestion: suggestion.to_string(),
        description: description.to_string(),
        resume_category: None,
        foreign_worker_category: None,
        improvement: None,
    }]
}
