use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, State},
    http::Method,
    middleware,
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    error::AppError,
    models::{SentimentResult, SummaryResult, TabularResponse, TextRequest},
    services::{sentiment, tabular, text},
    AppState,
};

use super::auth::require_service_key;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/api/ai/summarize", post(summarize_text))
        .route("/api/ai/sentiment", post(analyze_sentiment))
        .route(
            "/api/ai/csv",
            post(analyze_table).layer(DefaultBodyLimit::max(max_file_size)),
        )
        .route_layer(middleware::from_fn_with_state(state, require_service_key))
        .layer(cors)
}

fn text_payload(payload: Result<Json<TextRequest>, JsonRejection>) -> Result<TextRequest, AppError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

async fn summarize_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<SummaryResult>, AppError> {
    let start = std::time::Instant::now();
    let request = text_payload(payload)?;

    let result = text::summarize(request.text.as_deref(), &state.summarizer).await?;

    tracing::info!(
        "Summary ready via {:?}: {} -> {} words in {:?}",
        result.meta.strategy,
        result.meta.original_words,
        result.meta.summary_words,
        start.elapsed()
    );
    Ok(Json(result))
}

async fn analyze_sentiment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<SentimentResult>, AppError> {
    let request = text_payload(payload)?;
    let text = text::summarizer::validate_text(request.text.as_deref())?;

    let result = sentiment::analyze(text, state.scorer.as_ref())?;
    Ok(Json(result))
}

async fn analyze_table(mut multipart: Multipart) -> Result<Json<TabularResponse>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(e.body_text()))?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::InvalidInput("CSV file is required".to_string()))?;

    let name = file_name.clone();
    let summary = tokio::task::spawn_blocking(move || tabular::profile_table(&data, &name))
        .await
        .map_err(|e| AppError::Internal(format!("Profiling task failed: {}", e)))??;

    Ok(Json(TabularResponse {
        success: true,
        summary,
        file_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routes::app;
    use crate::services::abstractive::{AbstractiveSummarizer, LazySummarizer};
    use crate::services::sentiment::PolarityScorer;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const KEY: &str = "test-key";
    const BOUNDARY: &str = "XBOUNDARYX";

    struct Canned;

    #[async_trait]
    impl AbstractiveSummarizer for Canned {
        async fn summarize(&self, _text: &str, _max: usize, _min: usize) -> Result<String, AppError> {
            Ok("A short abstract.".to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl AbstractiveSummarizer for Broken {
        async fn summarize(&self, _text: &str, _max: usize, _min: usize) -> Result<String, AppError> {
            Err(AppError::ModelError("tensor shape mismatch".to_string()))
        }
    }

    struct Fixed(f64);

    impl PolarityScorer for Fixed {
        fn compound(&self, _text: &str) -> Result<f64, AppError> {
            Ok(self.0)
        }
    }

    fn state_with(
        service_key: Option<&str>,
        summarizer: Arc<dyn AbstractiveSummarizer>,
        polarity: f64,
    ) -> Arc<AppState> {
        let config = Config {
            service_key: service_key.map(str::to_string),
            ..Config::default()
        };
        Arc::new(AppState::with_parts(
            config,
            LazySummarizer::ready(summarizer),
            Arc::new(Fixed(polarity)),
        ))
    }

    fn default_state() -> Arc<AppState> {
        state_with(Some(KEY), Arc::new(Canned), 0.6)
    }

    fn json_request(uri: &str, key: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(key) = key {
            builder = builder.header("X-Service-Key", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn upload_request(file_name: &str, contents: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
             Content-Type: text/csv\r\n\r\n{c}\r\n--{b}--\r\n",
            b = BOUNDARY,
            f = file_name,
            c = contents
        );
        Request::builder()
            .method("POST")
            .uri("/api/ai/csv")
            .header("X-Service-Key", KEY)
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(state: Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
        let response = app(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn health_needs_no_key() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(default_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_or_wrong_key_is_unauthorized() {
        for key in [None, Some("nope")] {
            let request = json_request("/api/ai/summarize", key, json!({ "text": "hello" }));
            let (status, body) = send(default_state(), request).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["error"], "Unauthorized service request");
        }
    }

    #[tokio::test]
    async fn unconfigured_key_rejects_everything() {
        let state = state_with(None, Arc::new(Canned), 0.0);
        let request = json_request("/api/ai/sentiment", Some(""), json!({ "text": "hello" }));
        let (status, _) = send(state, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn summarize_short_text() {
        let request = json_request("/api/ai/summarize", Some(KEY), json!({ "text": "  Tiny input here.  " }));
        let (status, body) = send(default_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["original"], "Tiny input here.");
        assert_eq!(body["summary"], "Tiny input here.");
        assert_eq!(body["meta"]["strategy"], "original-too-short");
        assert_eq!(body["meta"]["original_words"], 3);
        assert_eq!(body["meta"]["summary_words"], 3);
    }

    #[tokio::test]
    async fn summarize_long_text_uses_gateway() {
        let text = vec!["token"; 80].join(" ");
        let request = json_request("/api/ai/summarize", Some(KEY), json!({ "text": text }));
        let (status, body) = send(default_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "A short abstract.");
        assert_eq!(body["meta"]["strategy"], "bart-abstractive");
    }

    #[tokio::test]
    async fn summarize_model_failure_is_500_with_generic_message() {
        let state = state_with(Some(KEY), Arc::new(Broken), 0.0);
        let text = vec!["token"; 80].join(" ");
        let request = json_request("/api/ai/summarize", Some(KEY), json!({ "text": text }));
        let (status, body) = send(state, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Model error");
    }

    #[tokio::test]
    async fn summarize_validation_errors() {
        let (status, body) = send(
            default_state(),
            json_request("/api/ai/summarize", Some(KEY), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Text is required");

        let (status, body) = send(
            default_state(),
            json_request("/api/ai/summarize", Some(KEY), json!({ "text": "a ".repeat(600) })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Input must be <= 1000 characters");
    }

    #[tokio::test]
    async fn malformed_json_keeps_error_shape() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/ai/sentiment")
            .header("content-type", "application/json")
            .header("X-Service-Key", KEY)
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(default_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn sentiment_returns_polarity_and_tone() {
        let state = state_with(Some(KEY), Arc::new(Canned), -0.31234);
        let request = json_request("/api/ai/sentiment", Some(KEY), json!({ "text": "meh" }));
        let (status, body) = send(state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["polarity"], -0.312);
        assert_eq!(body["tone"], "Negative");
    }

    #[tokio::test]
    async fn sentiment_requires_text() {
        let request = json_request("/api/ai/sentiment", Some(KEY), json!({ "text": "   " }));
        let (status, body) = send(default_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Text is required");
    }

    #[tokio::test]
    async fn csv_upload_is_profiled() {
        let request = upload_request("scores.csv", "name,score\nann,1\nbob,2\ncy,3\n");
        let (status, body) = send(default_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["fileName"], "scores.csv");
        assert_eq!(body["rows"], 3);
        assert_eq!(body["columns"], 2);
        assert_eq!(body["columnNames"], json!(["name", "score"]));
        assert_eq!(body["numericSummary"], json!({ "score": { "min": 1.0, "max": 3.0, "avg": 2.0 } }));
    }

    #[tokio::test]
    async fn csv_upload_rejects_other_extensions() {
        let request = upload_request("scores.txt", "a,b\n1,2\n");
        let (status, body) = send(default_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("supported"));
    }

    #[tokio::test]
    async fn csv_upload_requires_file_field() {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{b}--\r\n",
            b = BOUNDARY
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/ai/csv")
            .header("X-Service-Key", KEY)
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(default_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "CSV file is required");
    }
}
