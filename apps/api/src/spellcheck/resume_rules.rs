//! Resume-quality detectors feeding the five resume categories.

use lazy_static::lazy_static;
use regex::Regex;

use super::detectors::{assign_ids, scan_rules};
use super::models::{char_span, ErrorType, ResumeCategory, Severity, SpellCheckError};
use super::rules::{
    EXPERIENCE_IMPROVEMENT, HONORIFIC_RULES, MAX_BLOCK_CHARS, MAX_SENTENCES_PER_PARAGRAPH,
    MAX_SENTENCE_CHARS, PARAGRAPH_IMPROVEMENT, SENTENCE_LENGTH_IMPROVEMENT, TABOO_RULES,
    VAGUE_EXPERIENCE_PHRASES,
};

lazy_static! {
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n[ \t]*\n").unwrap();
}

/// A trimmed byte range of the input.
#[derive(Debug, Clone, Copy)]
struct Segment<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn push_trimmed<'a>(source: &'a str, start: usize, end: usize, out: &mut Vec<Segment<'a>>) {
    let slice = &source[start..end];
    let lead = slice.len() - slice.trim_start().len();
    let trimmed_end = start + slice.trim_end().len();
    let trimmed_start = start + lead;
    if trimmed_start < trimmed_end {
        out.push(Segment {
            text: &source[trimmed_start..trimmed_end],
            start: trimmed_start,
            end: trimmed_end,
        });
    }
}

/// Splits on sentence terminators and line breaks. Terminators stay with their sentence.
fn sentences(text: &str, offset: usize) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?' | '。' | '\n') {
            let end = i + c.len_utf8();
            push_trimmed(text, start, end, &mut out);
            start = end;
        }
    }
    push_trimmed(text, start, text.len(), &mut out);
    for s in &mut out {
        s.start += offset;
        s.end += offset;
    }
    out
}

fn paragraphs(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for m in PARAGRAPH_BREAK.find_iter(text) {
        push_trimmed(text, start, m.start(), &mut out);
        start = m.end();
    }
    push_trimmed(text, start, text.len(), &mut out);
    out
}

fn resume_error(
    source: &str,
    start: usize,
    end: usize,
    category: ResumeCategory,
    suggestion: &str,
    description: &str,
    improvement: &str,
) -> SpellCheckError {
    SpellCheckError {
        id: String::new(),
        word: source[start..end].to_string(),
        position: char_span(source, start, end),
        error_type: ErrorType::ResumeSpecific,
        severity: Severity::Medium,
        confidence: 0.7,
        suggestion: suggestion.to_string(),
        description: description.to_string(),
        resume_category: Some(category),
        foreign_worker_category: None,
        improvement: Some(improvement.to_string()),
    }
}

pub fn detect_honorific_errors(text: &str) -> Vec<SpellCheckError> {
    scan_rules(text, &HONORIFIC_RULES, "honorific", None)
}

pub fn detect_taboo_words(text: &str) -> Vec<SpellCheckError> {
    scan_rules(text, &TABOO_RULES, "taboo-words", None)
}

pub fn detect_long_sentences(text: &str) -> Vec<SpellCheckError> {
    let mut errors: Vec<_> = sentences(text, 0)
        .into_iter()
        .filter(|s| s.text.chars().count() > MAX_SENTENCE_CHARS)
        .map(|s| {
            resume_error(
                text,
                s.start,
                s.end,
                ResumeCategory::SentenceLength,
                "두 문장 이상으로 나누어 쓰세요",
                "문장이 너무 깁니다",
                SENTENCE_LENGTH_IMPROVEMENT,
            )
        })
        .collect();
    assign_ids(&mut errors, "sentence-length");
    errors
}

/// Flags one unbroken block over the length limit, or a paragraph with too many sentences.
pub fn detect_paragraph_structure_errors(text: &str) -> Vec<SpellCheckError> {
    let mut errors = Vec::new();
    for p in paragraphs(text) {
        let unbroken = !p.text.contains('\n') && p.text.chars().count() > MAX_BLOCK_CHARS;
        let crowded = sentences(p.text, p.start).len() > MAX_SENTENCES_PER_PARAGRAPH;
        let description = if unbroken {
            "줄바꿈 없이 긴 글입니다"
        } else if crowded {
            "한 문단에 문장이 너무 많습니다"
        } else {
            continue;
        };
        errors.push(resume_error(
            text,
            p.start,
            p.end,
            ResumeCategory::ParagraphStructure,
            "내용별로 문단을 나누세요",
            description,
            PARAGRAPH_IMPROVEMENT,
        ));
    }
    assign_ids(&mut errors, "paragraph-structure");
    errors
}

/// Vague phrases in sentences that carry no number.
pub fn detect_vague_experience(text: &str) -> Vec<SpellCheckError> {
    let mut errors = Vec::new();
    for s in sentences(text, 0) {
        if s.text.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        for phrase in VAGUE_EXPERIENCE_PHRASES {
            for (i, _) in s.text.match_indices(phrase) {
                let start = s.start + i;
                errors.push(resume_error(
                    text,
                    start,
                    start + phrase.len(),
                    ResumeCategory::ExperienceDescription,
                    "기간, 업무 내용, 수량을 구체적으로 적으세요",
                    "경력 설명이 구체적이지 않습니다",
                    EXPERIENCE_IMPROVEMENT,
                ));
            }
        }
    }
    assign_ids(&mut errors, "experience-description");
    errors
}

pub fn run_resume_rule_detectors(text: &str) -> Vec<SpellCheckError> {
    let mut errors = detect_honorific_errors(text);
    errors.extend(detect_taboo_words(text));
    errors.extend(detect_long_sentences(text));
    errors.extend(detect_paragraph_structure_errors(text));
    errors.extend(detect_vague_experience(text));
    errors
}
