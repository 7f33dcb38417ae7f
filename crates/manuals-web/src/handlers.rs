//! HTTP handlers for the manuals catalog.
//!
//! Implements:
//! - GET /api/manuals - Walk the Drive folder and return the manuals as JSON
//! - GET / - Search page
//! - GET /health - Health check endpoint

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use manuals_core::{filter_manuals, result_count_label, Manual};
use manuals_gdrive::DriveCatalog;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ApiError, Result};

/// Search page with the client-side filter.
const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Number of records returned in the debug sample.
const DEBUG_SAMPLE_SIZE: usize = 3;

/// Catalog settings resolved from configuration.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub service_key: Option<String>,
    pub folder_id: Option<String>,
    pub mime_type: String,
}

impl CatalogSettings {
    /// Empty values count as missing.
    pub fn new(service_key: Option<String>, folder_id: Option<String>, mime_type: String) -> Self {
        Self {
            service_key: service_key.filter(|v| !v.is_empty()),
            folder_id: folder_id.filter(|v| !v.is_empty()),
            mime_type,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.service_key.is_some() && self.folder_id.is_some()
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<CatalogSettings>,
    pub catalog: Arc<DriveCatalog>,
}

/// Build the application routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/manuals", get(manuals_handler))
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    pub configured: bool,
}

/// GET /health - Health check endpoint.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        configured: state.settings.is_configured(),
    })
}

/// GET / - Search page.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Debug, Default, Deserialize)]
pub struct ManualsQuery {
    /// `1` switches to the diagnostic response.
    pub debug: Option<String>,
    /// Free-text filter applied before responding.
    pub q: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DebugResponse {
    count: usize,
    sample: Vec<Manual>,
    env_present: EnvPresent,
}

#[derive(Serialize)]
struct EnvPresent {
    #[serde(rename = "GOOGLE_SERVICE_KEY")]
    google_service_key: bool,
    #[serde(rename = "GOOGLE_DRIVE_FOLDER_ID")]
    google_drive_folder_id: bool,
}

/// GET /api/manuals - List every manual under the configured folder.
pub async fn manuals_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ManualsQuery>, QueryRejection>,
) -> Result<Response> {
    // An unparseable query string falls back to the plain listing.
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            debug!("Ignoring query string: {}", rejection);
            ManualsQuery::default()
        }
    };

    let settings = &state.settings;
    let (Some(service_key), Some(folder_id)) = (&settings.service_key, &settings.folder_id)
    else {
        return Err(ApiError::MissingConfig);
    };

    let mut manuals = state
        .catalog
        .list_manuals(service_key, folder_id, &settings.mime_type)
        .await?;

    if let Some(q) = query.q.as_deref() {
        manuals = filter_manuals(&manuals, q).into_iter().cloned().collect();
        debug!("Filter {:?} kept {}", q, result_count_label(manuals.len()));
    }

    if query.debug.as_deref() == Some("1") {
        return Ok(Json(DebugResponse {
            count: manuals.len(),
            sample: manuals.into_iter().take(DEBUG_SAMPLE_SIZE).collect(),
            env_present: EnvPresent {
                google_service_key: true,
                google_drive_folder_id: true,
            },
        })
        .into_response());
    }

    info!("Serving {}", result_count_label(manuals.len()));

    let mut response = Json(manuals).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}
