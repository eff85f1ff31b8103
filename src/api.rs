use axum::{
    body::Body,
    extract::{Extension, State},
    http::{HeaderMap, HeaderName, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::ai::gemini::ImagePayload;
use crate::analysis::{AnalysisOutcome, AnalysisRequest, Analyzer};
use crate::messages;
use crate::session::SessionStore;
use crate::system_info::get_system_info;

const SESSION_HEADER: &str = "x-session-id";
const DEFAULT_SESSION: &str = "default";

#[derive(Clone)]
pub struct AppState {
    store: SessionStore,
    analyzer: Option<Arc<Analyzer>>,
}

#[derive(Clone, Debug)]
struct RequestContext {
    request_id: String,
}

#[derive(Debug, Deserialize)]
struct CommitContextRequest {
    vehicle_type: String,
    purpose: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContextResponse {
    pub vehicle_type: String,
    pub purpose: String,
}

#[derive(Debug, Serialize)]
struct AppliedResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct OptionsResponse {
    vehicle_types: Vec<&'static str>,
    purposes: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct TextAnalysisRequest {
    #[serde(default)]
    query: String,
}

#[derive(Debug, Deserialize)]
struct VisionAnalysisRequest {
    #[serde(default)]
    image: String,
    #[serde(default)]
    mime_type: String,
}

#[derive(Debug, Deserialize)]
struct FusionAnalysisRequest {
    #[serde(default)]
    query: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    mime_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WarningResponse {
    pub warning: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    info: String,
}

pub fn router(store: SessionStore, analyzer: Option<Analyzer>) -> Router {
    let request_id_layer = middleware::from_fn(assign_request_id);
    let state = AppState {
        store,
        analyzer: analyzer.map(Arc::new),
    };
    Router::new()
        .route("/api/health", get(health))
        .route("/api/options", get(get_options))
        .route("/api/context", get(get_context).post(commit_context))
        .route("/api/analyze/text", post(analyze_text))
        .route("/api/analyze/vision", post(analyze_vision))
        .route("/api/analyze/fusion", post(analyze_fusion))
        .with_state(state)
        .layer(request_id_layer)
}

async fn health() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            info: get_system_info(),
        }),
    )
        .into_response()
}

async fn get_options() -> Response {
    (
        StatusCode::OK,
        Json(OptionsResponse {
            vehicle_types: messages::VEHICLE_TYPE_OPTIONS.to_vec(),
            purposes: messages::PURPOSE_OPTIONS.to_vec(),
        }),
    )
        .into_response()
}

async fn get_context(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    headers: HeaderMap,
) -> Response {
    let session_id = extract_session_id(&headers);
    let context = state.store.read(&session_id).await;
    tracing::debug!(
        request_id = %request.request_id,
        session_id = %session_id,
        "Read session context"
    );
    (
        StatusCode::OK,
        Json(ContextResponse {
            vehicle_type: context.vehicle_type,
            purpose: context.purpose,
        }),
    )
        .into_response()
}

async fn commit_context(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    headers: HeaderMap,
    Json(payload): Json<CommitContextRequest>,
) -> Response {
    let session_id = extract_session_id(&headers);
    state
        .store
        .commit(&session_id, payload.vehicle_type, payload.purpose)
        .await;
    tracing::debug!(
        request_id = %request.request_id,
        session_id = %session_id,
        "Applied session context"
    );
    (
        StatusCode::OK,
        Json(AppliedResponse {
            message: messages::CONTEXT_APPLIED,
        }),
    )
        .into_response()
}

async fn analyze_text(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    headers: HeaderMap,
    Json(payload): Json<TextAnalysisRequest>,
) -> Response {
    let Some(analyzer) = state.analyzer.clone() else {
        return disabled_response();
    };
    let session_id = extract_session_id(&headers);
    let context = state.store.read(&session_id).await;
    let outcome = analyzer
        .analyze(
            &context,
            AnalysisRequest::TextOnly {
                query: payload.query,
            },
        )
        .await;
    outcome_response(&request.request_id, &session_id, "text", outcome)
}

async fn analyze_vision(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    headers: HeaderMap,
    Json(payload): Json<VisionAnalysisRequest>,
) -> Response {
    let Some(analyzer) = state.analyzer.clone() else {
        return disabled_response();
    };
    let session_id = extract_session_id(&headers);
    let image = match decode_image(&payload.image, payload.mime_type) {
        Ok(image) => image,
        Err(err) => {
            tracing::debug!(
                request_id = %request.request_id,
                session_id = %session_id,
                error = %err,
                "Image payload failed to decode"
            );
            return bad_request_response();
        }
    };
    let context = state.store.read(&session_id).await;
    let outcome = analyzer
        .analyze(&context, AnalysisRequest::ImageOnly { image })
        .await;
    outcome_response(&request.request_id, &session_id, "vision", outcome)
}

async fn analyze_fusion(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    headers: HeaderMap,
    Json(payload): Json<FusionAnalysisRequest>,
) -> Response {
    let Some(analyzer) = state.analyzer.clone() else {
        return disabled_response();
    };
    let session_id = extract_session_id(&headers);
    let image = match decode_image(&payload.image, payload.mime_type) {
        Ok(image) => image,
        Err(err) => {
            tracing::debug!(
                request_id = %request.request_id,
                session_id = %session_id,
                error = %err,
                "Image payload failed to decode"
            );
            return bad_request_response();
        }
    };
    let context = state.store.read(&session_id).await;
    let outcome = analyzer
        .analyze(
            &context,
            AnalysisRequest::TextAndImage {
                query: payload.query,
                image,
            },
        )
        .await;
    outcome_response(&request.request_id, &session_id, "fusion", outcome)
}

fn outcome_response(
    request_id: &str,
    session_id: &str,
    mode: &str,
    outcome: AnalysisOutcome,
) -> Response {
    match outcome {
        AnalysisOutcome::Success { text } => {
            tracing::debug!(
                request_id,
                session_id,
                mode,
                report_chars = text.len(),
                "Analysis succeeded"
            );
            (StatusCode::OK, Json(ReportResponse { text })).into_response()
        }
        AnalysisOutcome::Rejected { warning } => {
            tracing::debug!(request_id, session_id, mode, warning, "Analysis input rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(WarningResponse {
                    warning: warning.to_string(),
                }),
            )
                .into_response()
        }
        AnalysisOutcome::Failure { message } => {
            tracing::error!(request_id, session_id, mode, message = %message, "Analysis failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse { error: message }),
            )
                .into_response()
        }
    }
}

// Sessions are identified by an opaque caller-chosen header value. Absent or
// blank headers share one default session.
fn extract_session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .to_string()
}

fn decode_image(encoded: &str, mime_type: String) -> Result<ImagePayload, base64::DecodeError> {
    let data = base64::engine::general_purpose::STANDARD.decode(encoded)?;
    Ok(ImagePayload { mime_type, data })
}

async fn assign_request_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
    });
    let method = req.method().clone();
    let uri = req.uri().clone();
    let mut response = next.run(req).await;
    let status = response.status();
    if let Ok(value) = request_id.parse() {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }
    tracing::debug!(
        request_id,
        method = %method,
        uri = %uri,
        status = %status,
        "API request completed"
    );
    response
}

fn disabled_response() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: messages::ANALYSIS_DISABLED.to_string(),
        }),
    )
        .into_response()
}

fn bad_request_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "invalid_request".to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::config::GeminiConfig;
    use crate::ai::gemini::GeminiClient;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use base64::Engine as _;
    use proptest::prelude::*;
    use serde_json::json;
    use tower::ServiceExt;

    // Analyzer pointed at a dead endpoint: fine for paths that must reject
    // before dispatching.
    fn offline_analyzer() -> Analyzer {
        Analyzer::new(GeminiClient::new(GeminiConfig {
            api_key: "test".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_url: Some("http://127.0.0.1:9".to_string()),
        }))
    }

    fn test_router() -> Router {
        router(SessionStore::new(), Some(offline_analyzer()))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_reports_build_info_and_request_id() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let payload = body_json(response).await;
        assert!(payload["info"].as_str().unwrap().contains("autosage"));
    }

    #[tokio::test]
    async fn options_lists_presets() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/options")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response).await;
        assert_eq!(payload["vehicle_types"][1], "Bike");
        assert_eq!(payload["purposes"][0], "Buying Decision");
    }

    #[tokio::test]
    async fn context_defaults_until_committed() {
        let app = test_router();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/context")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let payload = body_json(response).await;
        assert_eq!(payload["vehicle_type"], "Not Specified");
        assert_eq!(payload["purpose"], "General Analysis");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/context")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(
                            &json!({ "vehicle_type": "Bike", "purpose": "Buying Decision" }),
                        )
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["message"], messages::CONTEXT_APPLIED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/context")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let payload = body_json(response).await;
        assert_eq!(payload["vehicle_type"], "Bike");
        assert_eq!(payload["purpose"], "Buying Decision");
    }

    #[tokio::test]
    async fn context_is_scoped_by_session_header() {
        let app = test_router();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/context")
                    .header(SESSION_HEADER, "session-a")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(
                            &json!({ "vehicle_type": "Car", "purpose": "Maintenance Tips" }),
                        )
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/context")
                    .header(SESSION_HEADER, "session-b")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let payload = body_json(response).await;
        assert_eq!(payload["vehicle_type"], "Not Specified");
    }

    #[tokio::test]
    async fn text_analysis_rejects_blank_query() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze/text")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let payload = body_json(response).await;
        assert_eq!(payload["warning"], messages::MISSING_QUERY_TEXT_MODE);
    }

    #[tokio::test]
    async fn vision_analysis_rejects_missing_image() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze/vision")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let payload = body_json(response).await;
        assert_eq!(payload["warning"], messages::MISSING_IMAGE_VISION_MODE);
    }

    #[tokio::test]
    async fn vision_analysis_rejects_undecodable_image() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze/vision")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"image":"not base64!!","mime_type":"image/png"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fusion_analysis_rejects_missing_image_then_blank_query() {
        let app = test_router();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze/fusion")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"Is this an EV?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = body_json(response).await;
        assert_eq!(payload["warning"], messages::MISSING_IMAGE_FUSION_MODE);

        let image = base64::engine::general_purpose::STANDARD.encode(b"img-bytes");
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze/fusion")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(
                            &json!({ "query": "", "image": image, "mime_type": "image/jpeg" }),
                        )
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = body_json(response).await;
        assert_eq!(payload["warning"], messages::MISSING_QUERY_FUSION_MODE);
    }

    #[tokio::test]
    async fn analysis_disabled_without_ai_config() {
        let app = router(SessionStore::new(), None);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze/text")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"Tata Nexon"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let payload = body_json(response).await;
        assert_eq!(payload["error"], messages::ANALYSIS_DISABLED);
    }

    proptest! {
        #[test]
        fn session_id_parses_from_header(id in "[A-Za-z0-9_-]{1,64}") {
            let mut headers = HeaderMap::new();
            headers.insert(SESSION_HEADER, id.parse().unwrap());
            prop_assert_eq!(extract_session_id(&headers), id);
        }
    }

    #[test]
    fn blank_session_header_falls_back_to_default() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, "   ".parse().unwrap());
        assert_eq!(extract_session_id(&headers), DEFAULT_SESSION);
        assert_eq!(extract_session_id(&HeaderMap::new()), DEFAULT_SESSION);
    }
}
