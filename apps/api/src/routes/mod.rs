pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::dashboard;
use crate::errors::AppError;
use crate::job_description::handlers as jd_handlers;
use crate::scoring::handlers as scoring_handlers;
use crate::screening::handlers as screening_handlers;
use crate::state::AppState;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.scoring.body_limit();

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route(
            "/api/v1/job-descriptions/generate",
            post(jd_handlers::handle_generate_jd),
        )
        .route(
            "/api/v1/resumes/score",
            post(scoring_handlers::handle_score_resumes),
        )
        .route(
            "/api/v1/resumes/score/upload",
            post(scoring_handlers::handle_score_upload),
        )
        .route("/api/v1/screenings", post(screening_handlers::handle_screening))
        // Coming soon
        .route("/api/v1/job-postings", post(not_implemented))
        .route("/api/v1/interviews/schedule", post(not_implemented))
        .route("/api/v1/offer-letters", post(not_implemented))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedModel;
    use crate::media::DataUri;
    use crate::scoring::ScoringConfig;

    const JD: &str = "Senior Rust engineer to build distributed storage services with Tokio.";

    fn app(model: ScriptedModel) -> Router {
        app_with(Arc::new(model))
    }

    fn app_with(model: Arc<ScriptedModel>) -> Router {
        build_router(AppState {
            llm: model,
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                scoring: ScoringConfig::default(),
            },
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const BOUNDARY: &str = "X-TALENTAI-BOUNDARY";

    /// Upload request with the job description field and one text file per entry.
    fn multipart_request(files: &[(String, String)]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{JD}\r\n"
        );
        for (file_name, contents) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"{file_name}\"\r\n\
                 Content-Type: text/plain\r\n\r\n{contents}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::post("/api/v1/resumes/score/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn text_uri(body: &str) -> String {
        DataUri::encode("text/plain", body.as_bytes()).to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(ScriptedModel::fixed("")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_score_endpoint_returns_one_result_per_resume() {
        let model = ScriptedModel::fixed(r#"{"score": 66, "reason": "Decent"}"#);
        let uris = vec![text_uri("Alice, Rust"), text_uri("Bob, Go")];
        let request = post_json(
            "/api/v1/resumes/score",
            json!({"job_description": JD, "resume_data_uris": uris}),
        );
        let (status, body) = send(app(model), request).await;

        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1]["index"], 1);
        assert_eq!(results[1]["resume_data_uri"], uris[1]);
        assert_eq!(results[0]["score"], 66);
        assert!(body["run_id"].is_string());
    }

    #[tokio::test]
    async fn test_score_endpoint_rejects_missing_resumes() {
        let request = post_json(
            "/api/v1/resumes/score",
            json!({"job_description": JD, "resume_data_uris": []}),
        );
        let (status, body) = send(app(ScriptedModel::fixed("")), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Job description and at least one resume are required."
        );
    }

    #[tokio::test]
    async fn test_upload_endpoint_converts_files() {
        let model = ScriptedModel::fixed(r#"{"score": 91, "reason": "Excellent"}"#);
        let boundary = "X-TALENTAI-BOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{jd}\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"alice.txt\"\r\n\
             Content-Type: application/octet-stream\r\n\r\nAlice, ten years of Rust\r\n\
             --{b}--\r\n",
            b = boundary,
            jd = JD
        );
        let request = Request::post("/api/v1/resumes/score/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(app(model), request).await;

        assert_eq!(status, StatusCode::OK);
        let result = &body["results"][0];
        assert_eq!(result["score"], 91);
        assert_eq!(
            result["resume_data_uri"],
            text_uri("Alice, ten years of Rust")
        );
    }

    #[tokio::test]
    async fn test_score_endpoint_chunks_large_requests() {
        let entries: Vec<Value> = (1..=7)
            .map(|n| json!({"resumeId": format!("resume-{n}"), "score": n * 10, "reason": "ok"}))
            .collect();
        let model = Arc::new(ScriptedModel::fixed(&Value::Array(entries).to_string()));
        let uris: Vec<String> = (0..7).map(|i| text_uri(&format!("candidate {i}"))).collect();
        let request = post_json(
            "/api/v1/resumes/score",
            json!({"job_description": JD, "resume_data_uris": uris}),
        );
        let (status, body) = send(app_with(model.clone()), request).await;

        assert_eq!(status, StatusCode::OK);
        let scores: Vec<u64> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["score"].as_u64().unwrap())
            .collect();
        assert_eq!(scores, vec![10, 20, 30, 40, 50, 60, 70]);
        // 7 resumes in chunks of 5
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn test_upload_endpoint_enforces_max_resumes() {
        let max = ScoringConfig::default().max_resumes;
        let files: Vec<(String, String)> = (0..=max)
            .map(|i| (format!("cv{i}.txt"), format!("candidate {i}")))
            .collect();
        let model = Arc::new(ScriptedModel::fixed(r#"{"score": 50, "reason": "ok"}"#));
        let (status, body) = send(app_with(model.clone()), multipart_request(&files)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            format!("You can upload a maximum of {max} resumes.")
        );
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_jd_endpoint() {
        let model = ScriptedModel::fixed(r#"{"job_description": "Backend Engineer (Rust)"}"#);
        let request = post_json(
            "/api/v1/job-descriptions/generate",
            json!({
                "role_brief": "Backend engineer with 3+ years of Rust and async networking experience.",
                "language": "en"
            }),
        );
        let (status, body) = send(app(model), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_description"], "Backend Engineer (Rust)");
        assert_eq!(body["language"], "en");
    }

    #[tokio::test]
    async fn test_generate_jd_rejects_unknown_language() {
        let request = post_json(
            "/api/v1/job-descriptions/generate",
            json!({"role_brief": "x".repeat(60), "language": "fr"}),
        );
        let (status, _) = send(app(ScriptedModel::fixed("")), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_screening_endpoint_surfaces_llm_failure() {
        let request = post_json(
            "/api/v1/screenings",
            json!({
                "resume_text": "R".repeat(120),
                "job_description": "J".repeat(60),
                "screening_questions": "Notice period?, Remote?"
            }),
        );
        let (status, body) = send(app(ScriptedModel::fixed("no json here")), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_coming_soon_routes_return_501() {
        let request = post_json("/api/v1/offer-letters", json!({}));
        let (status, body) = send(app(ScriptedModel::fixed("")), request).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["error"]["code"], "NOT_IMPLEMENTED");
    }

    #[tokio::test]
    async fn test_dashboard_route() {
        let request = Request::get("/api/v1/dashboard").body(Body::empty()).unwrap();
        let (status, body) = send(app(ScriptedModel::fixed("")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["drop_off"][0]["name"], "Applied");
    }
}
