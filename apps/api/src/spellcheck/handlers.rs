//! Axum route handlers for the Spell-check API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::resume::{ResumeCheckResult, ResumeFormData};
use crate::spellcheck::models::{ApiResponse, ForeignWorkerCheckResult, SpellCheckResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SpellCheckRequest {
    pub text: String,
    #[serde(default)]
    pub section: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForeignWorkerCheckRequest {
    pub text: String,
}

fn ensure_within_limit(field: &str, text: &str, max_chars: usize) -> Result<(), AppError> {
    let len = text.chars().count();
    if len > max_chars {
        return Err(AppError::Validation(format!(
            "{field} is {len} characters; the limit is {max_chars}"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/spellcheck
///
/// General spelling check through the external service only.
pub async fn handle_spellcheck(
    State(state): State<AppState>,
    Json(request): Json<SpellCheckRequest>,
) -> Result<Json<ApiResponse<SpellCheckResult>>, AppError> {
    ensure_within_limit("text", &request.text, state.config.max_text_chars)?;

    let response = state
        .pipeline
        .check_spelling(&request.text, request.section.as_deref())
        .await;

    Ok(Json(response))
}

/// POST /api/v1/spellcheck/foreign-worker
///
/// Full pipeline: general check + local detectors → scores → suggestions.
pub async fn handle_foreign_worker_check(
    State(state): State<AppState>,
    Json(request): Json<ForeignWorkerCheckRequest>,
) -> Result<Json<ApiResponse<ForeignWorkerCheckResult>>, AppError> {
    ensure_within_limit("text", &request.text, state.config.max_text_chars)?;

    Ok(Json(
        state
            .pipeline
            .check_foreign_worker_spelling(&request.text)
            .await,
    ))
}

/// POST /api/v1/resumes/check
///
/// Per-section check of a whole resume form.
pub async fn handle_resume_check(
    State(state): State<AppState>,
    Json(form): Json<ResumeFormData>,
) -> Result<Json<ApiResponse<ResumeCheckResult>>, AppError> {
    for (section, text) in form.sections() {
        ensure_within_limit(section.label(), text, state.config.max_text_chars)?;
    }

    Ok(Json(state.pipeline.check_resume(&form).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::routes::build_router;
    use crate::spellcheck::external::DisabledChecker;
    use crate::spellcheck::pipeline::SpellCheckPipeline;

    fn test_app(max_text_chars: usize) -> Router {
        let config = Config {
            spellcheck_api_url: None,
            spellcheck_timeout: Duration::from_secs(5),
            max_text_chars,
            strict_general_check: false,
            resume_penalty_overrides: vec![],
            detector_penalty_overrides: vec![],
            port: 0,
            rust_log: "info".to_string(),
        };
        build_router(AppState {
            config,
            pipeline: Arc::new(SpellCheckPipeline::new(Arc::new(DisabledChecker))),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_limit_accepts_exact_length() {
        assert!(ensure_within_limit("text", "가나다", 3).is_ok());
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 3 Hangul syllables are 9 bytes.
        assert!(ensure_within_limit("text", "가나다", 5).is_ok());
        assert!(matches!(
            ensure_within_limit("text", "가나다라", 3),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_health_route() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = test_app(10).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_spellcheck_route_returns_envelope() {
        let (status, body) = post_json(
            test_app(10),
            "/api/v1/spellcheck",
            json!({"text": "안녕하세요", "section": "introduction"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["section"], "introduction");
        assert_eq!(body["data"]["errors"], json!([]));
    }

    #[tokio::test]
    async fn test_spellcheck_route_rejects_oversized_text() {
        let (status, body) = post_json(
            test_app(10),
            "/api/v1/spellcheck",
            json!({"text": "가".repeat(11)}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("10"));
    }

    #[tokio::test]
    async fn test_foreign_worker_route_scores_in_camel_case() {
        let (status, body) = post_json(
            test_app(10),
            "/api/v1/spellcheck/foreign-worker",
            json!({"text": "나는 짤렸어"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let data = &body["data"];
        assert_eq!(data["categoryScores"]["tabooWords"], 92);
        assert_eq!(data["categoryScores"]["honorific"], 90);
        assert_eq!(data["generalCheck"]["status"], "skipped");
        assert!(data["resumeSpecificErrors"].as_array().unwrap().len() >= 2);
        assert!(data["overallForeignWorkerScore"].is_u64());
    }

    #[tokio::test]
    async fn test_foreign_worker_route_rejects_oversized_text() {
        let (status, body) = post_json(
            test_app(3),
            "/api/v1/spellcheck/foreign-worker",
            json!({"text": "안녕하세요"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_resume_route_limits_each_section() {
        let (status, body) = post_json(
            test_app(10),
            "/api/v1/resumes/check",
            json!({"name": "Nguyen", "experience": "가".repeat(11)}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("experience"));
    }

    #[tokio::test]
    async fn test_resume_route_checks_sections() {
        let (status, body) = post_json(
            test_app(10),
            "/api/v1/resumes/check",
            json!({"name": "Nguyen", "phone": "010-1234"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let sections = body["data"]["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1]["section"], "phone");
        assert_eq!(sections[1]["errorCount"], 1);
        assert_eq!(body["data"]["totalErrors"], 1);
    }
}
