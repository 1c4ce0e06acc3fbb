//! HTTP surface
//!
//! Every scanning endpoint goes through `ThreatService`; the diagnostic
//! endpoints only read state.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use vigil_core::target_ids;
use vigil_scan::ScanError;

use crate::{CacheKey, Served, ServiceError, ThreatService};

pub struct AppState {
    pub service: ThreatService,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: ThreatService) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }
}

// --- Query structs ---

#[derive(Debug, Default, Deserialize)]
pub struct ScanParams {
    days: Option<u32>,
    #[serde(default)]
    force: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForceParams {
    #[serde(default)]
    force: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlushParams {
    key: Option<String>,
}

// --- Response bodies ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServedBody<'a, T: Serialize> {
    success: bool,
    #[serde(flatten)]
    data: &'a T,
    cached: bool,
    cache_age_seconds: i64,
}

impl<'a, T: Serialize> ServedBody<'a, T> {
    fn new(served: &'a Served<Arc<T>>) -> Self {
        Self {
            success: true,
            data: &*served.value,
            cached: served.cached,
            cache_age_seconds: served.cache_age_seconds,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    BadRequest(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::BadRequest(message) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": message })),
                )
                    .into_response();
            }
            ApiError::Service(err) => err,
        };

        let status = match &err {
            ServiceError::UnknownTarget(_)
            | ServiceError::InvalidWindow(_)
            | ServiceError::Scan(ScanError::UnknownTarget(_) | ScanError::InvalidWindow(_)) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::Scan(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &err {
            ServiceError::RateLimited(info) => json!({
                "success": false,
                "error": err.to_string(),
                "rateLimited": true,
                "rateLimit": info,
            }),
            _ => {
                if status.is_server_error() {
                    error!(error = %err, "Request failed");
                }
                json!({ "success": false, "error": err.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

// --- Handlers ---

async fn banner() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vigil",
        "message": "Conflict escalation monitor",
        "version": env!("CARGO_PKG_VERSION"),
        "targets": target_ids(),
        "endpoints": {
            "/threat/{target}?days=N&force=bool": "Threat assessment for one target",
            "/dashboard?days=N&force=bool": "Summary for every target",
            "/notams?force=bool": "Airspace alerts by region",
            "/flights?force=bool": "European flight disruptions",
            "/cache-status": "Cached reports and their age",
            "/rate-limit": "Remaining scan budget",
            "/cache/flush?key=K": "Drop one cached report, or all (POST)",
            "/health": "Health check",
        },
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let now = Utc::now();
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "targets": target_ids(),
        "uptimeSeconds": (now - state.started_at).num_seconds(),
        "timestamp": now,
    }))
}

async fn threat(
    State(state): State<Arc<AppState>>,
    Path(target): Path<String>,
    Query(params): Query<ScanParams>,
) -> Result<Response, ApiError> {
    let served = state.service.threat(&target, params.days, params.force).await?;
    Ok(Json(ServedBody::new(&served)).into_response())
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScanParams>,
) -> Result<Response, ApiError> {
    let rows = state.service.dashboard(params.days, params.force).await?;
    Ok(Json(json!({ "success": true, "targets": rows })).into_response())
}

async fn notams(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForceParams>,
) -> Result<Response, ApiError> {
    let served = state.service.notams(params.force).await?;
    Ok(Json(ServedBody::new(&served)).into_response())
}

async fn flights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForceParams>,
) -> Result<Response, ApiError> {
    let served = state.service.flights(params.force).await?;
    Ok(Json(ServedBody::new(&served)).into_response())
}

async fn cache_status(State(state): State<Arc<AppState>>) -> Response {
    let status = state.service.cache().status();
    Json(json!({ "success": true, "cache": status })).into_response()
}

async fn rate_limit(State(state): State<Arc<AppState>>) -> Response {
    Json(state.service.limiter().info()).into_response()
}

async fn flush(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FlushParams>,
) -> Result<Response, ApiError> {
    let cleared = match params.key.as_deref() {
        Some(raw) => {
            let key: CacheKey = raw.parse().map_err(ApiError::BadRequest)?;
            usize::from(state.service.cache().clear(&key))
        }
        None => state.service.cache().clear_all(),
    };
    Ok(Json(json!({ "success": true, "cleared": cleared })).into_response())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/threat/{target}", get(threat))
        .route("/dashboard", get(dashboard))
        .route("/notams", get(notams))
        .route("/flights", get(flights))
        .route("/cache-status", get(cache_status))
        .route("/rate-limit", get(rate_limit))
        .route("/cache/flush", post(flush))
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
