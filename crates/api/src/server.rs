//! Risk lookup HTTP server.
//!
//! ## Endpoints
//!
//! - `GET /api/risk?lat=<f64>&lon=<f64>` — fetch the RiskIndexes record for
//!   the point and return it flattened
//! - `GET /health` — liveness check
//!
//! Errors are returned as `{"detail": "<message>"}`: `422` for a missing or
//! unparseable coordinate, `500` for any provider failure. Provider calls are
//! not retried and a failed lookup never returns a partial record.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use hs_core::types::GeoPoint;
use hs_nris::{flatten, FlatRiskRecord};
use hs_providers::{ProviderError, RiskFetcher};

/// Shared state for the handlers, built once at startup.
pub struct AppState {
    /// Source of raw RiskIndexes documents.
    pub fetcher: Arc<dyn RiskFetcher>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn RiskFetcher>) -> Self {
        Self { fetcher }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// JSON response for the `/health` endpoint.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handler failures and the status each maps to.
#[derive(Debug)]
pub enum ApiError {
    /// `lat`/`lon` missing or not a number.
    InvalidQuery(String),
    /// The provider call failed.
    Upstream(ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::InvalidQuery(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Upstream(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Build the service router with permissive CORS.
pub fn router(state: Arc<AppState>) -> Router {
    // Browsers reject credentials with wildcard origins, so none are allowed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/risk", get(risk_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(cors)
}

/// `GET /api/risk` — fetch and flatten the risk record for a point.
async fn risk_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<GeoPoint>, QueryRejection>,
) -> Result<Json<FlatRiskRecord>, ApiError> {
    let Query(point) = query.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;

    match state.fetcher.fetch(point).await {
        Ok(document) => {
            let record = flatten(&document);
            info!(%point, hazards = record.reported_hazards(), "risk lookup served");
            Ok(Json(record))
        }
        Err(err) => {
            error!(%point, error = %err, "risk lookup failed");
            Err(ApiError::Upstream(err))
        }
    }
}

/// `GET /health` — simple liveness check.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Bind `addr` and serve until `cancel` fires.
pub async fn run_server(
    state: Arc<AppState>,
    addr: &str,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Fetcher that replays a canned result and records the points it saw.
    struct StubFetcher {
        response: Result<Value, (u16, String)>,
        seen: Mutex<Vec<GeoPoint>>,
    }

    impl StubFetcher {
        fn ok(document: Value) -> Arc<Self> {
            Arc::new(Self { response: Ok(document), seen: Mutex::new(Vec::new()) })
        }

        fn status(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Err((status, body.to_string())),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl RiskFetcher for StubFetcher {
        async fn fetch(&self, point: GeoPoint) -> Result<Value, ProviderError> {
            self.seen.lock().unwrap().push(point);
            match &self.response {
                Ok(doc) => Ok(doc.clone()),
                Err((status, body)) => Err(ProviderError::Status {
                    provider: "LightBox",
                    status: *status,
                    body: body.clone(),
                }),
            }
        }
    }

    fn app(fetcher: Arc<StubFetcher>) -> Router {
        router(Arc::new(AppState::new(fetcher)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, json) = get_json(app(StubFetcher::ok(json!({}))), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_risk_returns_flattened_record() {
        let fetcher = StubFetcher::ok(json!({"nris": [{
            "state": "Ontario",
            "socialVulnerability": {"score": 42},
            "wildfire": {
                "events": 3,
                "annualizedFrequency": 0.5,
                "annualLoss": {"total": 1000},
                "hazardTypeRiskIndex": {"score": 7}
            }
        }]}));
        let (status, json) =
            get_json(app(fetcher.clone()), "/api/risk?lat=43.6568&lon=-79.4512").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_object().unwrap().len(), 23);
        assert_eq!(json["state"], "Ontario");
        assert_eq!(json["socialVulnerability"], 42);
        assert_eq!(json["communityResilience"], Value::Null);
        assert_eq!(
            json["wildfire"],
            json!({"events": 3, "annualizedFrequency": 0.5, "annualLoss": 1000, "hazardTypeRiskScore": 7})
        );

        let seen = fetcher.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[GeoPoint::new(43.6568, -79.4512)]);
    }

    #[tokio::test]
    async fn test_risk_empty_document_is_all_null() {
        let (status, json) = get_json(app(StubFetcher::ok(json!({"nris": []}))), "/api/risk?lat=1&lon=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], Value::Null);
        assert_eq!(json["tornado"]["events"], Value::Null);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_with_detail() {
        let fetcher = StubFetcher::status(403, r#"{"message":"Forbidden"}"#);
        let (status, json) = get_json(app(fetcher), "/api/risk?lat=1&lon=2").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["detail"], r#"LightBox HTTP 403: {"message":"Forbidden"}"#);
    }

    #[tokio::test]
    async fn test_missing_coordinate_is_422() {
        let fetcher = StubFetcher::ok(json!({}));
        let (status, json) = get_json(app(fetcher.clone()), "/api/risk?lat=1").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["detail"].as_str().unwrap().contains("lon"));
        assert!(fetcher.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_coordinate_is_422() {
        let (status, _) = get_json(app(StubFetcher::ok(json!({}))), "/api/risk?lat=north&lon=2").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let req = Request::builder()
            .uri("/health")
            .header("origin", "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let resp = app(StubFetcher::ok(json!({}))).oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_run_server_stops_on_cancel() {
        let cancel = CancellationToken::new();
        let state = Arc::new(AppState::new(StubFetcher::ok(json!({}))));
        let handle = tokio::spawn(run_server(state, "127.0.0.1:0", cancel.clone()));
        cancel.cancel();
        handle.await.unwrap().unwrap();
    }
}
