//! Category detectors for Korean written by foreign workers.
//!
//! Every detector is a pure function `&str -> Vec<SpellCheckError>`: empty
//! input or no match yields an empty vec. Ids are namespaced per detector
//! (`<detector>-<start>-<n>`) so merged error lists never collide.

use super::models::{char_span, ForeignWorkerCategory, SpellCheckError};
use super::rules::{
    Rule, COMMON_WORD_RULES, ENDING_RULES, FINAL_CONSONANT_RULES, PARTICLE_RULES,
    PRONUNCIATION_RULES, SPACING_RULES,
};

/// Runs every rule of a table over `text` and returns errors sorted by position.
pub(crate) fn scan_rules(
    text: &str,
    rules: &[Rule],
    id_prefix: &str,
    category: Option<ForeignWorkerCategory>,
) -> Vec<SpellCheckError> {
    if text.is_empty() {
        return vec![];
    }

    let mut errors = Vec::new();
    for rule in rules {
        for caps in rule.pattern.captures_iter(text) {
            let Some(target) = caps.get(rule.target_group) else {
                continue;
            };
            if target.as_str().is_empty() {
                continue;
            }
            errors.push(SpellCheckError {
                id: String::new(),
                word: target.as_str().to_string(),
                position: char_span(text, target.start(), target.end()),
                error_type: rule.error_type,
                severity: rule.severity,
                confidence: rule.confidence,
                suggestion: rule.suggest(&caps),
                description: rule.description.to_string(),
                resume_category: rule.resume_category,
                foreign_worker_category: category,
                improvement: rule.improvement.map(str::to_string),
            });
        }
    }

    assign_ids(&mut errors, id_prefix);
    errors
}

/// Sorts by position and stamps `<prefix>-<start>-<n>` ids.
pub(crate) fn assign_ids(errors: &mut [SpellCheckError], id_prefix: &str) {
    errors.sort_by_key(|e| (e.position.start, e.position.end));
    for (n, error) in errors.iter_mut().enumerate() {
        error.id = format!("{id_prefix}-{}-{n}", error.position.start);
    }
}

fn detect(text: &str, rules: &[Rule], category: ForeignWorkerCategory) -> Vec<SpellCheckError> {
    scan_rules(text, rules, category.id_prefix(), Some(category))
}

/// Words spelled the way they sound (e.g. 신빨 → 신발).
pub fn detect_pronunciation_errors(text: &str) -> Vec<SpellCheckError> {
    detect(text, &PRONUNCIATION_RULES, ForeignWorkerCategory::Pronunciation)
}

/// Dropped or misspelled final consonants, and verb stems with no ending.
pub fn detect_final_consonant_errors(text: &str) -> Vec<SpellCheckError> {
    detect(
        text,
        &FINAL_CONSONANT_RULES,
        ForeignWorkerCategory::FinalConsonant,
    )
}

pub fn detect_particle_errors(text: &str) -> Vec<SpellCheckError> {
    detect(text, &PARTICLE_RULES, ForeignWorkerCategory::Particle)
}

pub fn detect_spacing_errors(text: &str) -> Vec<SpellCheckError> {
    detect(text, &SPACING_RULES, ForeignWorkerCategory::Spacing)
}

/// Casual words and slang that need a formal replacement.
pub fn detect_common_word_errors(text: &str) -> Vec<SpellCheckError> {
    detect(text, &COMMON_WORD_RULES, ForeignWorkerCategory::CommonWord)
}

/// Informal sentence endings.
///
/// Triggers on exactly these patterns:
/// - one or more `~`, `～` or `〜` directly after a Hangul syllable (only the
///   tildes are reported, so an informal ending before them is scored separately)
/// - two or more chat jamo in a row (`ㅋㅋ`, `ㅎㅎ`, `ㅠㅠ`, `ㅜㅜ`)
/// - the polite-informal endings `-했어요`, `-해요`, `-할게요`, `-있어요`, `-없어요`, `-싶어요`
///
/// A tilde separated from the word by a space does not trigger.
pub fn detect_ending_errors(text: &str) -> Vec<SpellCheckError> {
    detect(text, &ENDING_RULES, ForeignWorkerCategory::Ending)
}

/// Runs all six foreign-worker detectors and concatenates their output.
pub fn run_foreign_worker_detectors(text: &str) -> Vec<SpellCheckError> {
    let mut errors = detect_pronunciation_errors(text);
    errors.extend(detect_final_consonant_errors(text));
    errors.extend(detect_particle_errors(text));
    errors.extend(detect_spacing_errors(text));
    errors.extend(detect_common_word_errors(text));
    errors.extend(detect_ending_errors(text));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spellcheck::models::{ErrorType, ResumeCategory};

    type Detector = fn(&str) -> Vec<SpellCheckError>;

    const DETECTORS: [Detector; 6] = [
        detect_pronunciation_errors,
        detect_final_consonant_errors,
        detect_particle_errors,
        detect_spacing_errors,
        detect_common_word_errors,
        detect_ending_errors,
    ];

    #[test]
    fn test_all_detectors_empty_input() {
        for detector in DETECTORS {
            assert!(detector("").is_empty());
        }
    }

    #[test]
    fn test_all_detectors_positions_in_bounds() {
        let text = "저는 신빨 공장에 일했슴니다. 학교에 가서 일하러가다 할수있습니다. \
                    나는 알바를 했어요~ ㅋㅋ 열심히 일하.";
        let len = text.chars().count();
        for detector in DETECTORS {
            let errors = detector(text);
            assert!(!errors.is_empty());
            for e in errors {
                assert!(e.position.start < e.position.end, "{e:?}");
                assert!(e.position.end <= len, "{e:?}");
                let word: String = text
                    .chars()
                    .skip(e.position.start)
                    .take(e.position.end - e.position.start)
                    .collect();
                assert_eq!(word, e.word);
            }
        }
    }

    #[test]
    fn test_pronunciation_shoes() {
        let errors = detect_pronunciation_errors("새 신빨을 샀습니다.");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].word, "신빨");
        assert_eq!(errors[0].suggestion, "신발");
        assert_eq!(errors[0].error_type, ErrorType::Spelling);
        assert_eq!(errors[0].id, "pronunciation-2-0");
    }

    #[test]
    fn test_pronunciation_correct_forms_clean() {
        assert!(detect_pronunciation_errors("새 신발을 샀습니다. 며칠 동안 일했습니다.").is_empty());
    }

    #[test]
    fn test_pronunciation_requires_word_start() {
        // '몇일' embedded after another syllable is not a standalone token.
        assert!(detect_pronunciation_errors("가몇일").is_empty());
    }

    #[test]
    fn test_final_consonant_seumnida() {
        let errors = detect_final_consonant_errors("공장에서 일했슴니다");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].word, "일했슴니다");
        assert_eq!(errors[0].suggestion, "일했습니다");
    }

    #[test]
    fn test_final_consonant_truncated_stem() {
        let errors = detect_final_consonant_errors("저는 열심히 일하.");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].word, "일하");
        assert_eq!(errors[0].suggestion, "일합니다");
    }

    #[test]
    fn test_final_consonant_complete_ending_clean() {
        assert!(detect_final_consonant_errors("저는 열심히 일합니다. 경험이 있습니다.").is_empty());
    }

    #[test]
    fn test_particle_motion_verb() {
        let errors = detect_particle_errors("학교에 가서");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].word, "학교에 가서");
        assert_eq!(errors[0].suggestion, "학교로 가서");
    }

    #[test]
    fn test_particle_motion_verb_closed_syllable() {
        let errors = detect_particle_errors("병원에 갔습니다");
        assert_eq!(errors[0].suggestion, "병원으로 갔");
    }

    #[test]
    fn test_particle_action_location() {
        let errors = detect_particle_errors("공장에 일했습니다");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].suggestion, "공장에서 일했");
    }

    #[test]
    fn test_particle_subject_jega() {
        let errors = detect_particle_errors("저가 하겠습니다");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].word, "저가");
        assert_eq!(errors[0].suggestion, "제가");
        assert_eq!(errors[0].position.end, 2);
    }

    #[test]
    fn test_particle_subject_jega_after_place() {
        let errors = detect_particle_errors("저가 공장에서 일했습니다");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].suggestion, "제가");
    }

    #[test]
    fn test_particle_low_price_noun_not_flagged() {
        assert!(detect_particle_errors("저가 상품을 판매했습니다").is_empty());
        assert!(detect_particle_errors("저가 상품입니다").is_empty());
    }

    #[test]
    fn test_particle_existence_location() {
        let errors = detect_particle_errors("서울에서 있습니다");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].suggestion, "서울에 있습니다");
    }

    #[test]
    fn test_particle_event_location_not_flagged() {
        assert!(detect_particle_errors("회사에서 있었던 일을 배웠습니다").is_empty());
    }

    #[test]
    fn test_spacing_go_to_work() {
        let errors = detect_spacing_errors("일하러가다");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].suggestion, "일하러 가다");
        assert_eq!(errors[0].error_type, ErrorType::Spacing);
    }

    #[test]
    fn test_spacing_dependent_noun_su() {
        let errors = detect_spacing_errors("한국어를 할수있습니다");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].word, "할수있");
        assert_eq!(errors[0].suggestion, "할 수 있");
    }

    #[test]
    fn test_spacing_correct_text_clean() {
        assert!(detect_spacing_errors("일하러 가다. 할 수 있습니다. 3년 동안").is_empty());
    }

    #[test]
    fn test_common_word_register_is_honorific() {
        let errors = detect_common_word_errors("나는 알바를 했습니다");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].suggestion, "저는");
        assert_eq!(errors[1].suggestion, "아르바이트");
        assert!(errors
            .iter()
            .all(|e| e.resume_category == Some(ResumeCategory::Honorific)));
    }

    #[test]
    fn test_common_word_slang_is_taboo() {
        let errors = detect_common_word_errors("회사에서 짤렸습니다");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].resume_category, Some(ResumeCategory::TabooWords));
    }

    #[test]
    fn test_ending_tilde() {
        let errors = detect_ending_errors("감사합니다~~");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].word, "~~");
        assert_eq!(errors[0].position.start, 5);
        assert_eq!(errors[0].suggestion, "");
        assert_eq!(errors[0].error_type, ErrorType::Punctuation);
    }

    #[test]
    fn test_ending_tilde_does_not_overlap_informal_ending() {
        let errors = detect_ending_errors("했어요~");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].word, "했어요");
        assert_eq!(errors[0].suggestion, "했습니다");
        assert_eq!(errors[1].word, "~");
        assert!(errors[0].position.end <= errors[1].position.start);
    }

    #[test]
    fn test_ending_detached_tilde_ignored() {
        assert!(detect_ending_errors("감사합니다 ~").is_empty());
    }

    #[test]
    fn test_ending_chat_markers_removed() {
        let errors = detect_ending_errors("재미있습니다 ㅋㅋㅋ");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].suggestion, "");
    }

    #[test]
    fn test_ending_polite_informal() {
        let errors = detect_ending_errors("물류 일을 했어요");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].suggestion, "했습니다");
    }

    #[test]
    fn test_ids_unique_across_detectors() {
        let errors = run_foreign_worker_detectors("나는 신빨 일하러가다 했어요~");
        let mut ids: Vec<_> = errors.iter().map(|e| e.id.clone()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
