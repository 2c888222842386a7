pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/api/health", get(health::health_handler))
        .route(
            "/api/cover-letter/generate",
            post(handlers::handle_cover_letter),
        )
        .route("/api/roaster/roast", post(handlers::handle_roast))
        .route("/api/ats/score", post(handlers::handle_ats_score))
        .route("/api/ats/score-file", post(handlers::handle_ats_score_file))
        .route("/api/interview/generate", post(handlers::handle_interview))
        .route(
            "/api/interview/generate-file",
            post(handlers::handle_interview_file),
        )
        .route("/api/suggest", post(handlers::handle_suggest))
        .route("/api/suggest/", post(handlers::handle_suggest))
        .fallback(not_found)
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}

/// Credentialed CORS for the configured origins. A `*` entry mirrors the
/// request origin, since a literal wildcard cannot be combined with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {origin}");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::fixtures::docx_bytes;
    use crate::llm_client::mock::ScriptedGenerator;
    use crate::llm_client::{GeminiClient, TextGenerator};

    const BOUNDARY: &str = "resumio-test-boundary";
    const RESUME: &str = "Jane Doe\nSenior Software Engineer\nBuilt distributed systems in Rust for 6 years, cutting p99 latency by 40%.";

    fn app_with(generator: Arc<dyn TextGenerator>) -> Router {
        build_router(AppState::new(Config::default(), None, generator))
    }

    fn scripted(generator: ScriptedGenerator) -> (Router, Arc<ScriptedGenerator>) {
        let generator = Arc::new(generator);
        (app_with(generator.clone()), generator)
    }

    fn gemini(api_key: Option<&str>, base_url: &str) -> Router {
        let client = GeminiClient::new(
            api_key.map(String::from),
            "gemini-flash-latest",
            base_url,
            Duration::from_secs(5),
        )
        .unwrap();
        app_with(Arc::new(client))
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_post(uri: &str, file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn cover_letter_body() -> Value {
        json!({
            "resumeText": RESUME,
            "jobDescription": "Own our Rust platform.",
            "companyName": "Acme",
            "jobRole": "Engineer"
        })
    }

    fn ats_json() -> String {
        json!({
            "score": 72,
            "breakdown": {"keywords": 60, "verbs": 80, "metrics": 70, "sections": 90, "experience": 65},
            "missing_keywords": ["Kubernetes"],
            "tips": ["Add a skills section."]
        })
        .to_string()
    }

    fn interview_json() -> String {
        json!({
            "technical_questions": [{
                "question": "How do you avoid deadlocks in async Rust?",
                "suggested_answer": "Never hold a std Mutex across an await...",
                "category": "technical",
                "difficulty": "medium"
            }],
            "behavioral_questions": []
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_cover_letter_defaults_tone_to_professional() {
        let (app, generator) = scripted(ScriptedGenerator::always("Dear Hiring Manager, ..."));

        let (status, body) = send(app, json_post("/api/cover-letter/generate", cover_letter_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "Dear Hiring Manager, ...");
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Tone: Professional"));
        assert!(prompts[0].contains("role of Engineer at Acme"));
    }

    #[tokio::test]
    async fn test_cover_letter_missing_field_is_400_not_422() {
        let (app, generator) = scripted(ScriptedGenerator::always("unused"));
        let mut body = cover_letter_body();
        body.as_object_mut().unwrap().remove("companyName");

        let (status, body) = send(app, json_post("/api/cover-letter/generate", body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert!(body["detail"].as_str().unwrap().contains("companyName"));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_request() {
        let (app, _) = scripted(ScriptedGenerator::always("unused"));
        let request = Request::builder()
            .method("POST")
            .uri("/api/cover-letter/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_roast_rejects_short_text_file() {
        let (app, generator) = scripted(ScriptedGenerator::always("unused"));

        let (status, body) = send(
            app,
            multipart_post("/api/roaster/roast", Some(("cv.txt", b"0123456789".as_slice())), &[]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "TOO_SHORT");
        assert_eq!(body["detail"], "Resume content is too short or empty.");
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_roast_rejects_unsupported_extension() {
        let (app, _) = scripted(ScriptedGenerator::always("unused"));

        let (status, body) = send(
            app,
            multipart_post("/api/roaster/roast", Some(("setup.exe", b"MZ\x90\x00binary".as_slice())), &[]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNSUPPORTED_FORMAT");
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Failed to parse resume"));
    }

    #[tokio::test]
    async fn test_roast_rejects_corrupt_docx() {
        let (app, _) = scripted(ScriptedGenerator::always("unused"));

        let (status, body) = send(
            app,
            multipart_post("/api/roaster/roast", Some(("cv.docx", b"definitely not a zip".as_slice())), &[]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "CORRUPT_DOCUMENT");
    }

    #[tokio::test]
    async fn test_roast_requires_a_file() {
        let (app, _) = scripted(ScriptedGenerator::always("unused"));

        let (status, body) = send(
            app,
            multipart_post("/api/roaster/roast", None, &[("jobDesc", "Rust role")]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_roast_without_multipart_body_is_invalid_request() {
        let (app, _) = scripted(ScriptedGenerator::always("unused"));

        let (status, body) = send(app, json_post("/api/roaster/roast", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_roast_docx_end_to_end() {
        let (app, generator) = scripted(ScriptedGenerator::always("🔥 **First Impression**: bold."));
        let docx = docx_bytes(&[
            "Jane Doe",
            "Senior Software Engineer",
            "Built distributed systems in Rust for six years.",
        ]);

        let (status, body) = send(
            app,
            multipart_post("/api/roaster/roast", Some(("Jane_CV.DOCX", docx.as_slice())), &[]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["roast"], "🔥 **First Impression**: bold.");
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("Jane Doe\nSenior Software Engineer\nBuilt distributed systems"));
    }

    #[tokio::test]
    async fn test_every_generation_endpoint_reports_not_configured() {
        let resume = RESUME.as_bytes();
        let requests = vec![
            json_post("/api/cover-letter/generate", cover_letter_body()),
            multipart_post("/api/roaster/roast", Some(("cv.txt", resume)), &[]),
            json_post("/api/ats/score", json!({"resumeText": RESUME})),
            multipart_post("/api/ats/score-file", Some(("cv.txt", resume)), &[]),
            json_post(
                "/api/interview/generate",
                json!({"resume_text": RESUME, "question_type": "mixed", "count": 4}),
            ),
            multipart_post("/api/interview/generate-file", Some(("cv.txt", resume)), &[]),
            json_post("/api/suggest", json!({"task": "bullet", "sourceText": "did stuff"})),
        ];

        for request in requests {
            let uri = request.uri().to_string();
            let (status, body) = send(gemini(None, "http://127.0.0.1:1"), request).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
            assert_eq!(body["code"], "NOT_CONFIGURED", "{uri}");
            assert_eq!(
                body["detail"],
                "AI service is not configured (missing API key)",
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_502_without_credentials() {
        let app = gemini(Some("secret-key-123"), "http://127.0.0.1:1");

        let (status, body) = send(app, json_post("/api/cover-letter/generate", cover_letter_body())).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "UPSTREAM_ERROR");
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Failed to generate cover letter"));
        assert!(!detail.contains("secret-key-123"));
        assert!(!detail.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn test_ats_score_returns_report() {
        let (app, _) = scripted(ScriptedGenerator::always(format!("```json\n{}\n```", ats_json())));

        let (status, body) = send(
            app,
            json_post("/api/ats/score", json!({"resumeText": RESUME, "jobDesc": "Kubernetes"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 72);
        assert_eq!(body["breakdown"]["sections"], 90);
        assert_eq!(body["missing_keywords"][0], "Kubernetes");
    }

    #[tokio::test]
    async fn test_ats_file_passes_job_description_to_prompt() {
        let (app, generator) = scripted(ScriptedGenerator::always(ats_json()));

        let (status, _) = send(
            app,
            multipart_post(
                "/api/ats/score-file",
                Some(("cv.txt", RESUME.as_bytes())),
                &[("jobDesc", "Looking for Kubernetes operators")],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(generator.prompts()[0].contains("Looking for Kubernetes operators"));
    }

    #[tokio::test]
    async fn test_ats_prose_output_is_bad_gateway() {
        let (app, _) = scripted(ScriptedGenerator::always("Your resume scores about 70/100."));

        let (status, body) = send(app, json_post("/api/ats/score", json!({"resumeText": RESUME}))).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Failed to score resume"));
    }

    #[tokio::test]
    async fn test_interview_json_endpoint() {
        let (app, generator) = scripted(ScriptedGenerator::always(interview_json()));

        let (status, body) = send(
            app,
            json_post(
                "/api/interview/generate",
                json!({
                    "resume_text": RESUME,
                    "job_description": "Rust backend",
                    "question_type": "technical",
                    "count": 3
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["technical_questions"][0]["difficulty"], "medium");
        assert!(body["technical_questions"][0].get("context").is_none());
        assert!(generator.prompts()[0].contains("exactly 3 technical question(s) and 0 behavioral"));
    }

    #[tokio::test]
    async fn test_interview_json_rejects_unknown_question_type() {
        let (app, _) = scripted(ScriptedGenerator::always(interview_json()));

        let (status, body) = send(
            app,
            json_post(
                "/api/interview/generate",
                json!({"resume_text": RESUME, "question_type": "trivia", "count": 3}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_interview_file_uses_form_counts() {
        let (app, generator) = scripted(ScriptedGenerator::always(interview_json()));

        let (status, _) = send(
            app,
            multipart_post(
                "/api/interview/generate-file",
                Some(("cv.txt", RESUME.as_bytes())),
                &[("numTechQuestions", "2"), ("numBehavioralQuestions", "4")],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(generator.prompts()[0].contains("exactly 2 technical question(s) and 4 behavioral"));
    }

    #[tokio::test]
    async fn test_interview_file_rejects_zero_questions() {
        let (app, generator) = scripted(ScriptedGenerator::always(interview_json()));

        let (status, _) = send(
            app,
            multipart_post(
                "/api/interview/generate-file",
                Some(("cv.txt", RESUME.as_bytes())),
                &[("numTechQuestions", "0"), ("numBehavioralQuestions", "0")],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_accepts_trailing_slash() {
        let (app, _) = scripted(ScriptedGenerator::always(
            r#"{"suggestions": ["Led migration to Rust, cutting costs 30%", ""]}"#,
        ));

        let (status, body) = send(
            app,
            json_post(
                "/api/suggest/",
                json!({"task": "bullet", "sourceText": "moved stuff to rust", "level": "senior", "count": 2}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["suggestions"],
            json!(["Led migration to Rust, cutting costs 30%"])
        );
    }

    #[tokio::test]
    async fn test_health_reports_db_false_without_database() {
        let (app, _) = scripted(ScriptedGenerator::always("unused"));

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "env": "development", "db": false}));
    }

    #[tokio::test]
    async fn test_root_and_unknown_routes() {
        let (app, _) = scripted(ScriptedGenerator::always("unused"));

        let root = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = send(app.clone(), root).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");

        let missing = Request::builder()
            .uri("/api/nope")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, missing).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not Found");
    }

    fn limited_app(max_upload_bytes: usize) -> (Router, Arc<ScriptedGenerator>) {
        let generator = Arc::new(ScriptedGenerator::always("unused"));
        let config = Config {
            max_upload_bytes,
            ..Config::default()
        };
        let app = build_router(AppState::new(config, None, generator.clone()));
        (app, generator)
    }

    #[tokio::test]
    async fn test_oversized_upload_is_413() {
        let (app, generator) = limited_app(1024);
        let resume = "Rust engineer. ".repeat(300);

        let (status, body) = send(
            app,
            multipart_post("/api/roaster/roast", Some(("cv.txt", resume.as_bytes())), &[]),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(body["detail"], "Upload exceeds 1024 bytes");
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_json_body_is_413() {
        let (app, generator) = limited_app(1024);
        let mut body = cover_letter_body();
        body["resumeText"] = "Rust engineer. ".repeat(300).into();

        let (status, body) = send(app, json_post("/api/cover-letter/generate", body)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_upload_within_limit_is_accepted() {
        let (app, _) = limited_app(4096);

        let (status, _) = send(
            app,
            multipart_post("/api/roaster/roast", Some(("cv.txt", RESUME.as_bytes())), &[]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin_with_credentials() {
        let (app, _) = scripted(ScriptedGenerator::always("unused"));

        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }
}
