//! Declarative rule tables for the local detectors.
//!
//! Each detector is a scan over one of these tables. Adding a rule never
//! requires touching detector control flow: append a row, add a test.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::models::{ErrorType, ResumeCategory, Severity};

/// Hangul syllable block start ('가') and final-consonant stride.
const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const JONGSEONG_COUNT: u32 = 28;
/// Jongseong index of ㄹ. Nouns ending in ㄹ take '로', not '으로'.
const JONGSEONG_RIEUL: u32 = 8;

#[derive(Debug, Clone)]
pub enum Correction {
    /// Capture-group template, e.g. `"${1} 수 ${2}"`. Plain text is used as-is.
    Template(Cow<'static, str>),
    /// `<noun>에 <motion verb>` → `<noun>(으)로 <motion verb>`.
    /// Group 1 holds the noun, group 2 the verb.
    DirectionalParticle,
    /// The flagged text should simply be deleted.
    Remove,
}

#[derive(Debug)]
pub struct Rule {
    pub pattern: Regex,
    pub correction: Correction,
    /// Capture group whose span is reported as the error. 0 = whole match.
    pub target_group: usize,
    pub description: &'static str,
    pub error_type: ErrorType,
    pub severity: Severity,
    pub confidence: f64,
    pub resume_category: Option<ResumeCategory>,
    pub improvement: Option<&'static str>,
}

impl Rule {
    fn new(
        pattern: &str,
        correction: Correction,
        description: &'static str,
        error_type: ErrorType,
        severity: Severity,
        confidence: f64,
    ) -> Self {
        Self {
            // Patterns are compile-time literals; a bad one is a programming error.
            pattern: Regex::new(pattern).unwrap(),
            correction,
            target_group: 0,
            description,
            error_type,
            severity,
            confidence,
            resume_category: None,
            improvement: None,
        }
    }

    fn target(mut self, group: usize) -> Self {
        self.target_group = group;
        self
    }

    fn resume(mut self, category: ResumeCategory, improvement: &'static str) -> Self {
        self.resume_category = Some(category);
        self.improvement = Some(improvement);
        self
    }

    /// Builds the replacement text for one match.
    pub fn suggest(&self, caps: &Captures<'_>) -> String {
        match &self.correction {
            Correction::Template(template) => {
                let mut out = String::new();
                caps.expand(template, &mut out);
                out
            }
            Correction::DirectionalParticle => {
                let noun = caps.get(1).map_or("", |m| m.as_str());
                let verb = caps.get(2).map_or("", |m| m.as_str());
                format!("{noun}{} {verb}", directional_particle(noun))
            }
            Correction::Remove => String::new(),
        }
    }
}

/// Chooses '로' or '으로' from the final consonant of the noun's last syllable.
pub fn directional_particle(noun: &str) -> &'static str {
    let Some(last) = noun.chars().last() else {
        return "로";
    };
    let code = last as u32;
    if !(HANGUL_BASE..=HANGUL_LAST).contains(&code) {
        return "로";
    }
    match (code - HANGUL_BASE) % JONGSEONG_COUNT {
        0 | JONGSEONG_RIEUL => "로",
        _ => "으로",
    }
}

fn word_rule(
    wrong: &str,
    right: &'static str,
    description: &'static str,
    error_type: ErrorType,
    severity: Severity,
    confidence: f64,
) -> Rule {
    Rule::new(
        &format!(r"\b{}", regex::escape(wrong)),
        Correction::Template(Cow::Borrowed(right)),
        description,
        error_type,
        severity,
        confidence,
    )
}

/// A verb stem left without its ending at the end of a sentence or line.
fn truncated_stem_rule(stem: &str, corrected: &'static str) -> Rule {
    Rule::new(
        &format!(r"(?m)\b({})(?:[.!?]|[ \t]*$)", regex::escape(stem)),
        Correction::Template(Cow::Borrowed(corrected)),
        "동사 어간 뒤에 종결 어미가 빠졌습니다",
        ErrorType::Grammar,
        Severity::High,
        0.8,
    )
    .target(1)
}

/// A casual sentence-final ending in resume prose.
fn casual_ending_rule(ending: &str, formal: &str) -> Rule {
    Rule::new(
        &format!(r"(?m)\b(([가-힣]*){})(?:[.!?]|[ \t]*$)", regex::escape(ending)),
        Correction::Template(Cow::Owned(format!("${{2}}{formal}"))),
        "이력서에 반말 어미를 사용했습니다",
        ErrorType::ResumeSpecific,
        Severity::High,
        0.85,
    )
    .target(1)
    .resume(ResumeCategory::Honorific, HONORIFIC_IMPROVEMENT)
}

const HONORIFIC_IMPROVEMENT: &str =
    "이력서는 '-습니다/-입니다' 형태의 격식체로 통일해서 작성하세요.";
const TABOO_IMPROVEMENT: &str =
    "부정적이거나 속된 표현 대신 중립적이고 긍정적인 표현을 사용하세요.";
pub const SENTENCE_LENGTH_IMPROVEMENT: &str =
    "한 문장에는 한 가지 내용만 담고, 긴 문장은 두세 문장으로 나누세요.";
pub const PARAGRAPH_IMPROVEMENT: &str =
    "내용별로 문단을 나누고, 한 문단은 3~5문장 정도로 구성하세요.";
pub const EXPERIENCE_IMPROVEMENT: &str =
    "경력은 기간, 담당 업무, 수량이나 성과 같은 구체적인 숫자와 함께 적으세요.";

/// Sentences longer than this many characters are flagged.
pub const MAX_SENTENCE_CHARS: usize = 100;
/// An unbroken block longer than this many characters is flagged.
pub const MAX_BLOCK_CHARS: usize = 300;
pub const MAX_SENTENCES_PER_PARAGRAPH: usize = 6;

/// Vague experience phrases. Flagged only in sentences without a number.
pub const VAGUE_EXPERIENCE_PHRASES: &[&str] = &[
    "열심히 했습니다",
    "열심히 일했습니다",
    "여러 가지",
    "여러가지",
    "다양한 일",
    "다양한 업무",
    "많은 일",
    "이것저것",
    "잡일",
];

lazy_static! {
    /// Words misspelled the way they sound.
    pub static ref PRONUNCIATION_RULES: Vec<Rule> = [
        ("신빨", "신발"),
        ("몇일", "며칠"),
        ("어떻해", "어떻게"),
        ("웬지", "왠지"),
        ("금새", "금세"),
        ("설겆이", "설거지"),
        ("희안", "희한"),
        ("일일히", "일일이"),
        ("깨끗히", "깨끗이"),
        ("할께요", "할게요"),
        ("역활", "역할"),
        ("오랫만", "오랜만"),
        ("곰곰히", "곰곰이"),
        ("궂이", "굳이"),
        ("뵈요", "봬요"),
        ("안밖", "안팎"),
        ("어의없", "어이없"),
        ("닥달", "닦달"),
    ]
    .into_iter()
    .map(|(wrong, right)| {
        word_rule(
            wrong,
            right,
            "발음이 비슷해서 잘못 쓴 단어입니다",
            ErrorType::Spelling,
            Severity::Medium,
            0.95,
        )
    })
    .collect();

    /// Final-consonant (받침) mistakes and verb stems missing their ending.
    pub static ref FINAL_CONSONANT_RULES: Vec<Rule> = {
        let mut rules = vec![
            Rule::new(
                r"\b([가-힣]*)슴니다",
                Correction::Template(Cow::Borrowed("${1}습니다")),
                "'-습니다'를 소리 나는 대로 썼습니다",
                ErrorType::Spelling,
                Severity::High,
                0.95,
            ),
            Rule::new(
                r"\b([가-힣]*[았었였했겠])읍니다",
                Correction::Template(Cow::Borrowed("${1}습니다")),
                "'-읍니다'는 '-습니다'로 써야 합니다",
                ErrorType::Spelling,
                Severity::Medium,
                0.9,
            ),
            Rule::new(
                r"\b([가-힣]*)됬([가-힣]*)",
                Correction::Template(Cow::Borrowed("${1}됐${2}")),
                "'되었'의 준말은 '됐'입니다",
                ErrorType::Spelling,
                Severity::Medium,
                0.95,
            ),
            word_rule(
                "이씁니다",
                "있습니다",
                "받침 'ㅆ'이 빠졌습니다",
                ErrorType::Spelling,
                Severity::High,
                0.9,
            ),
            word_rule(
                "업습니다",
                "없습니다",
                "받침 'ㅄ'이 빠졌습니다",
                ErrorType::Spelling,
                Severity::High,
                0.9,
            ),
        ];
        rules.extend(
            [
                ("일하", "일합니다"),
                ("근무하", "근무합니다"),
                ("노력하", "노력합니다"),
                ("공부하", "공부합니다"),
                ("생각하", "생각합니다"),
                ("좋아하", "좋아합니다"),
                ("잘하", "잘합니다"),
                ("배우", "배웁니다"),
                ("있", "있습니다"),
                ("없", "없습니다"),
            ]
            .into_iter()
            .map(|(stem, corrected)| truncated_stem_rule(stem, corrected)),
        );
        rules
    };

    /// Particles used where a different one is required.
    pub static ref PARTICLE_RULES: Vec<Rule> = vec![
        Rule::new(
            r"\b([가-힣]+)에 (가서|갔|가고|가다|갑니다|가요|가려고)",
            Correction::DirectionalParticle,
            "이동 방향은 '에' 대신 '(으)로'를 쓰는 것이 자연스럽습니다",
            ErrorType::Grammar,
            Severity::Low,
            0.6,
        ),
        Rule::new(
            r"\b([가-힣]+)에 (일하|일했|근무하|근무했|공부하|공부했)",
            Correction::Template(Cow::Borrowed("${1}에서 ${2}")),
            "행동이 일어나는 장소에는 '에서'를 씁니다",
            ErrorType::Grammar,
            Severity::Medium,
            0.8,
        ),
        Rule::new(
            r"\b([가-힣]+)에서 (있습니다|있어요)",
            Correction::Template(Cow::Borrowed("${1}에 ${2}")),
            "존재하는 장소에는 '에서' 대신 '에'를 씁니다",
            ErrorType::Grammar,
            Severity::Medium,
            0.75,
        ),
        // '저가' alone is also the noun "low price"; only flag it as a subject
        // followed by a predicate, optionally after one place word.
        Rule::new(
            r"\b(저가) (?:[가-힣]+(?:에서|에게|에) )?[가-힣]*(?:합니다|했습니다|하겠습니다|했어요|해요|하고|했고)\b",
            Correction::Template(Cow::Borrowed("제가")),
            "'저'에 주격 조사 '가'가 붙으면 '제가'가 됩니다",
            ErrorType::Grammar,
            Severity::High,
            0.9,
        )
        .target(1),
    ];

    /// Words written together that must be spaced.
    pub static ref SPACING_RULES: Vec<Rule> = vec![
        Rule::new(
            r"\b(일하러|공부하러|배우러|만나러|놀러)(가|오|갔|왔|간|온)([가-힣]*)",
            Correction::Template(Cow::Borrowed("${1} ${2}${3}")),
            "'-러' 뒤의 이동 동사는 띄어 씁니다",
            ErrorType::Spacing,
            Severity::Low,
            0.9,
        ),
        Rule::new(
            r"(일할|만들|읽을|할|될|볼|갈|올|줄|쓸)수(있|없)",
            Correction::Template(Cow::Borrowed("${1} 수 ${2}")),
            "의존 명사 '수'는 앞뒤를 띄어 씁니다",
            ErrorType::Spacing,
            Severity::Low,
            0.9,
        ),
        Rule::new(
            r"것같(다|습니다|아요|은)",
            Correction::Template(Cow::Borrowed("것 같${1}")),
            "'것'과 '같다'는 띄어 씁니다",
            ErrorType::Spacing,
            Severity::Low,
            0.9,
        ),
        Rule::new(
            r"(\d+)(년|개월)동안",
            Correction::Template(Cow::Borrowed("${1}${2} 동안")),
            "기간 뒤의 '동안'은 띄어 씁니다",
            ErrorType::Spacing,
            Severity::Low,
            0.85,
        ),
        Rule::new(
            r"열심히(하|일하|배우|노력하)",
            Correction::Template(Cow::Borrowed("열심히 ${1}")),
            "부사 '열심히'는 뒤 단어와 띄어 씁니다",
            ErrorType::Spacing,
            Severity::Low,
            0.85,
        ),
        Rule::new(
            r"\b안(돼|되|됩)",
            Correction::Template(Cow::Borrowed("안 ${1}")),
            "부정의 '안'은 띄어 씁니다",
            ErrorType::Spacing,
            Severity::Low,
            0.6,
        ),
    ];

    /// Casual words that need a higher-register replacement in a resume.
    pub static ref COMMON_WORD_RULES: Vec<Rule> = {
        let register = |pattern: &str, right: &'static str| {
            Rule::new(
                pattern,
                Correction::Template(Cow::Borrowed(right)),
                "이력서에 어울리지 않는 구어체 표현입니다",
                ErrorType::ResumeSpecific,
                Severity::Medium,
                0.85,
            )
            .resume(ResumeCategory::Honorific, HONORIFIC_IMPROVEMENT)
        };
        let slang = |pattern: &str, right: &'static str| {
            Rule::new(
                pattern,
                Correction::Template(Cow::Borrowed(right)),
                "이력서에 쓰기 어려운 속어입니다",
                ErrorType::ResumeSpecific,
                Severity::High,
                0.85,
            )
            .resume(ResumeCategory::TabooWords, TABOO_IMPROVEMENT)
        };
        vec![
            register(r"\b나는", "저는"),
            register(r"\b내가", "제가"),
            register(r"\b알바", "아르바이트"),
            register(r"\b엄청", "매우"),
            register(r"\b진짜", "정말"),
            register(r"\b완전 ", "매우 "),
            register(r"\b근데", "그런데"),
            register(r"\b(?:글구|그리구)", "그리고"),
            register(r"\b좀\b", "조금"),
            slang(r"\b짤렸", "퇴사했"),
            slang(r"\b빡세", "힘들"),
            slang(r"\b대박", "큰 성과"),
            slang(r"\b짱", "최고"),
        ]
    };

    /// Informal sentence endings: tilde markers, chat markers, polite-informal '-요'.
    pub static ref ENDING_RULES: Vec<Rule> = vec![
        Rule::new(
            r"[가-힣]([~～〜]+)",
            Correction::Remove,
            "물결표(~)는 비격식 표현입니다",
            ErrorType::Punctuation,
            Severity::Medium,
            0.9,
        )
        .resume(ResumeCategory::Honorific, HONORIFIC_IMPROVEMENT),
        Rule::new(
            r"[ㅋㅎㅠㅜ]{2,}",
            Correction::Remove,
            "채팅용 자모 표현은 이력서에 쓰지 않습니다",
            ErrorType::Punctuation,
            Severity::High,
            0.95,
        )
        .resume(ResumeCategory::Honorific, HONORIFIC_IMPROVEMENT),
        Rule::new(
            r"\b([가-힣]*)했어요",
            Correction::Template(Cow::Borrowed("${1}했습니다")),
            "'-요'체 대신 '-습니다'체를 쓰세요",
            ErrorType::Grammar,
            Severity::Low,
            0.8,
        )
        .resume(ResumeCategory::Honorific, HONORIFIC_IMPROVEMENT),
        Rule::new(
            r"\b([가-힣]*)해요",
            Correction::Template(Cow::Borrowed("${1}합니다")),
            "'-요'체 대신 '-습니다'체를 쓰세요",
            ErrorType::Grammar,
            Severity::Low,
            0.8,
        )
        .resume(ResumeCategory::Honorific, HONORIFIC_IMPROVEMENT),
        Rule::new(
            r"\b([가-힣]*)할게요",
            Correction::Template(Cow::Borrowed("${1}하겠습니다")),
            "'-요'체 대신 '-습니다'체를 쓰세요",
            ErrorType::Grammar,
            Severity::Low,
            0.8,
        )
        .resume(ResumeCategory::Honorific, HONORIFIC_IMPROVEMENT),
        Rule::new(
            r"\b([가-힣]*)(있|없|싶)어요",
            Correction::Template(Cow::Borrowed("${1}${2}습니다")),
            "'-요'체 대신 '-습니다'체를 쓰세요",
            ErrorType::Grammar,
            Severity::Low,
            0.8,
        )
        .resume(ResumeCategory::Honorific, HONORIFIC_IMPROVEMENT),
    ];

    /// Plain speech (반말) at sentence end.
    pub static ref HONORIFIC_RULES: Vec<Rule> = {
        let mut rules: Vec<Rule> = [
            ("했어", "했습니다"),
            ("했지", "했습니다"),
            ("했음", "했습니다"),
            ("이야", "입니다"),
            ("거야", "것입니다"),
            ("할래", "하겠습니다"),
        ]
        .into_iter()
        .map(|(ending, formal)| casual_ending_rule(ending, formal))
        .collect();
        // Any past tense stem + '-어': 힘들었어, 좋았어, 보였어.
        rules.push(
            Rule::new(
                r"(?m)\b(([가-힣]*[았었였])어)(?:[.!?]|[ \t]*$)",
                Correction::Template(Cow::Borrowed("${2}습니다")),
                "이력서에 반말 어미를 사용했습니다",
                ErrorType::ResumeSpecific,
                Severity::High,
                0.85,
            )
            .target(1)
            .resume(ResumeCategory::Honorific, HONORIFIC_IMPROVEMENT),
        );
        rules
    };

    /// Negative or inappropriate words for a resume.
    pub static ref TABOO_RULES: Vec<Rule> = [
        ("짜증", "어려움"),
        ("싫어서", "새로운 도전을 위해"),
        ("때려치", "그만두"),
        ("최악", "어려운"),
        ("망했", "아쉬운 결과를 얻었"),
        ("대충", "꼼꼼히"),
    ]
    .into_iter()
    .map(|(word, replacement)| {
        word_rule(
            word,
            replacement,
            "이력서에 부정적인 인상을 주는 표현입니다",
            ErrorType::ResumeSpecific,
            Severity::High,
            0.8,
        )
        .resume(ResumeCategory::TabooWords, TABOO_IMPROVEMENT)
    })
    .collect();
}
