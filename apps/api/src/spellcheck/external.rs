//! External checker adapter for general spelling/grammar via a third-party service.
//!
//! The service takes `query=<text>` as a form POST and answers with
//! `message.result.errata[]` (`orgStr`, `candWord`, `help`, `start`, `end`).
//! Any other shape is read as "no errors". Transport, status and JSON
//! failures become a failed `ApiResponse`; nothing escapes as an error.

use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::detectors::assign_ids;
use super::models::{ApiResponse, ErrorType, Position, Severity, SpellCheckError, SpellCheckResult, Statistics};

pub const GENERAL_CHECK_FAILED: &str = "맞춤법 검사 중 오류가 발생했습니다.";
const DEFAULT_CONFIDENCE: f64 = 0.8;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

#[derive(Debug, Error)]
pub enum SpellCheckerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spell-check service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// General-purpose checker. Implementations must never panic or return
/// partial data on failure: failures are `ApiResponse::failure`.
#[async_trait]
pub trait GeneralChecker: Send + Sync {
    async fn check(&self, text: &str, section: Option<&str>) -> ApiResponse<SpellCheckResult>;

    /// Name for logs and diagnostics.
    fn backend(&self) -> &'static str;

    /// `false` when the checker never consults a service.
    fn enabled(&self) -> bool {
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RemoteSpellChecker (HTTP-backed)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct RemoteSpellChecker {
    client: Client,
    endpoint: String,
}

impl RemoteSpellChecker {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SpellCheckerError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    async fn fetch(&self, text: &str) -> Result<Value, SpellCheckerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("query", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpellCheckerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl GeneralChecker for RemoteSpellChecker {
    async fn check(&self, text: &str, section: Option<&str>) -> ApiResponse<SpellCheckResult> {
        match self.fetch(text).await {
            Ok(body) => {
                let errors = normalize_errata(text, &body);
                debug!(
                    section = section.unwrap_or("-"),
                    errors = errors.len(),
                    "General spell check completed"
                );
                ApiResponse::ok(build_result(text, errors, section))
            }
            Err(e) => {
                warn!(section = section.unwrap_or("-"), "General spell check failed: {e}");
                ApiResponse::failure(GENERAL_CHECK_FAILED)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DisabledChecker (no endpoint configured)
// ────────────────────────────────────────────────────────────────────────────

/// Reports no general errors. The orchestrator marks its stage as skipped.
pub struct DisabledChecker;

#[async_trait]
impl GeneralChecker for DisabledChecker {
    async fn check(&self, text: &str, section: Option<&str>) -> ApiResponse<SpellCheckResult> {
        ApiResponse::ok(build_result(text, vec![], section))
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }

    fn enabled(&self) -> bool {
        false
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response normalization
// ────────────────────────────────────────────────────────────────────────────

pub fn build_result(
    text: &str,
    errors: Vec<SpellCheckError>,
    section: Option<&str>,
) -> SpellCheckResult {
    SpellCheckResult {
        statistics: Statistics::compute(text, &errors),
        errors,
        section: section.map(str::to_string),
    }
}

/// Maps the service's `message.result.errata[]` onto `SpellCheckError`s.
/// Missing containers yield no errors; malformed entries are skipped.
pub fn normalize_errata(text: &str, body: &Value) -> Vec<SpellCheckError> {
    let Some(errata) = body
        .pointer("/message/result/errata")
        .and_then(Value::as_array)
    else {
        return vec![];
    };

    let mut errors: Vec<_> = errata
        .iter()
        .filter_map(|erratum| normalize_erratum(text, erratum))
        .collect();
    assign_ids(&mut errors, "general");
    errors
}

fn normalize_erratum(text: &str, erratum: &Value) -> Option<SpellCheckError> {
    let word = erratum.get("orgStr").and_then(Value::as_str)?;
    if word.is_empty() {
        return None;
    }

    let suggestion = erratum
        .get("candWord")
        .and_then(Value::as_str)
        .and_then(|c| c.split('|').map(str::trim).find(|c| !c.is_empty()))
        .unwrap_or(word)
        .to_string();

    let help = erratum
        .get("help")
        .and_then(Value::as_str)
        .map(|h| HTML_TAG.replace_all(h, " ").split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|h| !h.is_empty());

    let position = reported_position(erratum, text, word).or_else(|| locate(text, word))?;

    Some(SpellCheckError {
        id: String::new(),
        word: word.to_string(),
        position,
        error_type: classify(word, &suggestion, help.as_deref()),
        severity: Severity::Medium,
        confidence: DEFAULT_CONFIDENCE,
        suggestion,
        description: help.unwrap_or_else(|| "맞춤법 오류입니다".to_string()),
        resume_category: None,
        foreign_worker_category: None,
        improvement: None,
    })
}

/// The service's offsets, kept only when they cover exactly `word`.
fn reported_position(erratum: &Value, text: &str, word: &str) -> Option<Position> {
    let start = erratum.get("start").and_then(Value::as_u64)? as usize;
    let end = erratum.get("end").and_then(Value::as_u64)? as usize;
    if start >= end {
        return None;
    }
    let covered: String = text.chars().skip(start).take(end - start).collect();
    (covered == word).then_some(Position { start, end })
}

/// Character position of the first occurrence of `word`.
fn locate(text: &str, word: &str) -> Option<Position> {
    let byte_start = text.find(word)?;
    let start = text[..byte_start].chars().count();
    Some(Position {
        start,
        end: start + word.chars().count(),
    })
}

fn classify(word: &str, suggestion: &str, help: Option<&str>) -> ErrorType {
    let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    if word != suggestion && squash(word) == squash(suggestion) {
        return ErrorType::Spacing;
    }
    match help {
        Some(h) if h.contains("띄어") => ErrorType::Spacing,
        Some(h) if h.contains("문장 부호") => ErrorType::Punctuation,
        Some(h) if h.contains("문법") || h.contains("조사") => ErrorType::Grammar,
        _ => ErrorType::Spelling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Serves `body` for every POST on an ephemeral local port.
    async fn mock_service(body: &'static str) -> String {
        let app = Router::new().route("/", post(move || async move { body }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[test]
    fn test_normalize_full_erratum() {
        let text = "저는 한국에서 일했슴니다";
        let body = json!({
            "message": {"result": {"errata": [
                {"orgStr": "일했슴니다", "candWord": "일했습니다|일했읍니다", "help": "맞춤법<br/>오류", "start": 8, "end": 13}
            ]}}
        });
        let errors = normalize_errata(text, &body);
        assert_eq!(errors.len(), 1);
        let e = &errors[0];
        assert_eq!(e.id, "general-8-0");
        assert_eq!(e.suggestion, "일했습니다");
        assert_eq!(e.description, "맞춤법 오류");
        assert_eq!(e.position, Position { start: 8, end: 13 });
        assert_eq!(e.error_type, ErrorType::Spelling);
    }

    #[test]
    fn test_normalize_missing_result_is_empty() {
        assert!(normalize_errata("텍스트", &json!({"message": {}})).is_empty());
        assert!(normalize_errata("텍스트", &json!({"unexpected": true})).is_empty());
        assert!(normalize_errata("텍스트", &json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_normalize_relocates_bad_positions() {
        let text = "안녕 하세요";
        let body = json!({"message": {"result": {"errata": [
            {"orgStr": "안녕 하세요", "candWord": "안녕하세요", "start": 40, "end": 2}
        ]}}});
        let errors = normalize_errata(text, &body);
        assert_eq!(errors[0].position, Position { start: 0, end: 6 });
        assert_eq!(errors[0].error_type, ErrorType::Spacing);
    }

    #[test]
    fn test_normalize_relocates_span_covering_other_text() {
        let text = "저는 한국에서 신빨을 샀습니다";
        let body = json!({"message": {"result": {"errata": [
            {"orgStr": "신빨", "candWord": "신발", "start": 0, "end": 2}
        ]}}});
        let errors = normalize_errata(text, &body);
        assert_eq!(errors.len(), 1);
        let e = &errors[0];
        assert_eq!(e.position, Position { start: 8, end: 10 });
        let covered: String = text
            .chars()
            .skip(e.position.start)
            .take(e.position.end - e.position.start)
            .collect();
        assert_eq!(covered, e.word);
        assert_eq!(e.id, "general-8-0");
    }

    #[test]
    fn test_normalize_skips_unlocatable_entries() {
        let body = json!({"message": {"result": {"errata": [
            {"orgStr": "없는말"},
            {"candWord": "no orgStr"}
        ]}}});
        assert!(normalize_errata("전혀 다른 문장", &body).is_empty());
    }

    #[tokio::test]
    async fn test_remote_malformed_response_is_empty_success() {
        let url = mock_service(r#"{"message": {"status": "ok"}}"#).await;
        let checker = RemoteSpellChecker::new(url, Duration::from_secs(5)).unwrap();
        let resp = checker.check("안녕하세요 반갑습니다", None).await;
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert!(data.errors.is_empty());
        assert_eq!(data.statistics.error_count, 0);
        assert_eq!(data.statistics.accuracy, 100.0);
    }

    #[tokio::test]
    async fn test_remote_non_json_is_failure() {
        let url = mock_service("<html>gateway</html>").await;
        let checker = RemoteSpellChecker::new(url, Duration::from_secs(5)).unwrap();
        let resp = checker.check("안녕하세요", Some("introduction")).await;
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some(GENERAL_CHECK_FAILED));
    }

    #[tokio::test]
    async fn test_remote_errata_are_normalized() {
        let url = mock_service(
            r#"{"message":{"result":{"errata":[{"orgStr":"신빨","candWord":"신발","help":"","start":0,"end":2}]}}}"#,
        )
        .await;
        let checker = RemoteSpellChecker::new(url, Duration::from_secs(5)).unwrap();
        let resp = checker.check("신빨 샀습니다", Some("skills")).await;
        let data = resp.data.unwrap();
        assert_eq!(data.errors.len(), 1);
        assert_eq!(data.errors[0].suggestion, "신발");
        assert_eq!(data.section.as_deref(), Some("skills"));
        assert_eq!(data.statistics.total_words, 2);
        assert_eq!(data.statistics.accuracy, 50.0);
    }

    #[tokio::test]
    async fn test_remote_unreachable_is_failure() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let checker =
            RemoteSpellChecker::new(format!("http://{addr}/"), Duration::from_secs(2)).unwrap();
        let resp = checker.check("안녕하세요", None).await;
        assert!(!resp.success);
        assert!(resp.data.is_none());
    }

    #[tokio::test]
    async fn test_remote_error_status_is_failure() {
        let app = Router::new().route(
            "/",
            post(|| async { (axum::http::StatusCode::BAD_GATEWAY, Json(json!({}))) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let checker =
            RemoteSpellChecker::new(format!("http://{addr}/"), Duration::from_secs(5)).unwrap();
        assert!(!checker.check("안녕하세요", None).await.success);
    }

    #[tokio::test]
    async fn test_disabled_checker_reports_nothing() {
        let resp = DisabledChecker.check("무엇이든", None).await;
        assert!(resp.success);
        assert!(resp.data.unwrap().errors.is_empty());
    }
}
