//! API Module
//!
//! HTTP API layer of the Blaze server.
//! Each submodule handles endpoints for a specific concern.

pub mod error;
pub mod health;
pub mod identity;
pub mod language;
pub mod runner;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use blaze_runner::{CancellationToken, JobPoller};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub poller: Arc<JobPoller>,
    /// Cancelled on shutdown; every run polls under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(poller: Arc<JobPoller>, shutdown: CancellationToken) -> Self {
        Self { poller, shutdown }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/languages", get(language::list_languages))
        .route("/runners", post(runner::run_code))
        .layer(cors);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .nest("/api", api)
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use blaze_client::ClientError;
    use blaze_core::domain::job::JobHandle;
    use blaze_core::dto::judge0::{
        StatusBody, SubmissionAck, SubmissionDetails, SubmissionRequest,
    };
    use blaze_runner::{Config, ExecutionBackend, ImmediatePause};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Accepts every submission and reports a fixed status on first poll
    struct FixedBackend {
        token: Option<&'static str>,
        status: u32,
    }

    #[async_trait]
    impl ExecutionBackend for FixedBackend {
        async fn create_submission(
            &self,
            _req: &SubmissionRequest,
        ) -> Result<SubmissionAck, ClientError> {
            Ok(SubmissionAck {
                token: self.token.map(String::from),
            })
        }

        async fn get_submission(
            &self,
            _handle: &JobHandle,
        ) -> Result<SubmissionDetails, ClientError> {
            Ok(SubmissionDetails {
                status: Some(StatusBody {
                    id: self.status,
                    description: None,
                }),
                stdout: Some("hello\n".to_string()),
                stderr: None,
                compile_output: None,
                time: Some(0.004),
                memory: Some(2048),
            })
        }
    }

    fn app_with(backend: FixedBackend, shutdown: CancellationToken) -> Router {
        let poller = JobPoller::new(Config::new("http://judge0.test"), Arc::new(backend))
            .with_pause(Arc::new(ImmediatePause));
        let cors = ServerConfig::default().cors_layer().unwrap();
        create_router(AppState::new(Arc::new(poller), shutdown), cors)
    }

    fn app(status: u32) -> Router {
        app_with(
            FixedBackend {
                token: Some("tok"),
                status,
            },
            CancellationToken::new(),
        )
    }

    fn run_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/runners")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
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

    #[tokio::test]
    async fn test_health() {
        let response = app(3)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_run_success() {
        let body = json!({ "code": "print('hello')", "language": "Python" }).to_string();
        let (status, body) = send(app(3), run_request(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], 200);
        assert_eq!(body["payload"]["success"], true);
        assert_eq!(body["payload"]["stdout"], "hello\n");
        assert_eq!(body["payload"]["timeTaken"], 0.004);
        assert!(body["payload"]["stderr"].is_null());
    }

    #[tokio::test]
    async fn test_run_wrong_answer_is_not_success() {
        let body = json!({ "code": "x", "language": "C" }).to_string();
        let (status, body) = send(app(4), run_request(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["payload"]["success"], false);
    }

    #[tokio::test]
    async fn test_unsupported_language() {
        let body = json!({ "code": "x", "language": "Cobol" }).to_string();
        let (status, body) = send(app(3), run_request(&body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "Unsupported language: Cobol");
    }

    #[tokio::test]
    async fn test_missing_code() {
        let body = json!({ "language": "Python" }).to_string();
        let (status, body) = send(app(3), run_request(&body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Code and language are required");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (status, body) = send(app(3), run_request("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_submission_without_token() {
        let backend = FixedBackend {
            token: None,
            status: 3,
        };
        let body = json!({ "code": "x", "language": "Go" }).to_string();
        let (status, body) = send(
            app_with(backend, CancellationToken::new()),
            run_request(&body),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert_eq!(body["message"], "Failed to create submission");
    }

    #[tokio::test]
    async fn test_polling_timeout() {
        let body = json!({ "code": "x", "language": "Rust" }).to_string();
        let (status, body) = send(app(2), run_request(&body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_runs() {
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let backend = FixedBackend {
            token: Some("tok"),
            status: 3,
        };
        let body = json!({ "code": "x", "language": "Ruby" }).to_string();
        let (status, body) = send(app_with(backend, shutdown), run_request(&body)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], 503);
    }

    #[tokio::test]
    async fn test_caller_identity_header() {
        let body = json!({ "code": "x", "language": "Java" }).to_string();

        let mut request = run_request(&body);
        request
            .headers_mut()
            .insert("x-user", r#"{"id": 12, "email": "dev@blaze.io"}"#.parse().unwrap());
        let (status, _) = send(app(3), request).await;
        assert_eq!(status, StatusCode::OK);

        let mut request = run_request(&body);
        request
            .headers_mut()
            .insert("x-user", "undefined".parse().unwrap());
        let (status, body) = send(app(3), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid x-user header");
    }

    #[tokio::test]
    async fn test_list_languages() {
        let (status, body) = send(
            app(3),
            Request::get("/api/languages").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let languages = body["payload"].as_array().unwrap();
        assert_eq!(languages.len(), 10);
        assert!(
            languages
                .iter()
                .any(|l| l["name"] == "C++" && l["id"] == 54)
        );
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/runners")
            .header(header::ORIGIN, "https://tryblaze.netlify.app")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app(3).oneshot(request).await.unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "https://tryblaze.netlify.app"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }
}
