//! HTTP read endpoints for the dashboard.
//!
//! Every handler reads its file(s) fresh on a blocking thread, so there is no
//! shared mutable state between requests. Missing files produce empty results;
//! read or parse failures produce a 500 with a generic message.

pub mod error;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::activity::{self, ActivityPage, ActivityQuery, ActivityType};
use crate::config::DashboardConfig;
use crate::documents::types::{DailySummary, MemorySnapshot, SubAgent, SystemStatus};
use crate::documents::{self, Overview};
use crate::store::{DataStore, StoreError};
pub use error::ApiError;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let store = DataStore::new(config.resolved_data_dir());
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/activity", get(activity_log))
        .route("/api/status", get(status))
        .route("/api/daily", get(daily))
        .route("/api/memory", get(memory))
        .route("/api/agents", get(agents))
        .route("/api/system", get(system))
        .route("/api/overview", get(overview))
        .with_state(state)
}

/// `{ data, timestamp }` envelope used by the document endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
    pub timestamp: String,
}

impl<T> DataResponse<T> {
    fn now(data: T) -> Json<Self> {
        Json(Self {
            data,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryResponse {
    #[serde(flatten)]
    pub snapshot: MemorySnapshot,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub r#type: Option<String>,
    pub channel: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DailyParams {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Run a store read on the blocking pool, mapping any failure to a generic 500.
async fn read_blocking<T, F>(message: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(message, e))?
        .map_err(|e| ApiError::internal(message, e))
}

/// Query-string values are only meaningful when non-empty.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn positive(name: &str, value: Option<String>) -> Result<Option<usize>, ApiError> {
    match present(value) {
        None => Ok(None),
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ApiError::BadRequest(format!(
                "{name} must be a positive integer"
            ))),
        },
    }
}

impl ActivityParams {
    pub fn into_query(self, config: &DashboardConfig) -> Result<ActivityQuery, ApiError> {
        let activity_type = present(self.r#type)
            .map(|t| t.parse::<ActivityType>())
            .transpose()
            .map_err(ApiError::BadRequest)?;
        let page = positive("page", self.page)?.unwrap_or(1);
        let page_size = positive("pageSize", self.page_size)?
            .unwrap_or(config.activity.default_page_size)
            .min(config.activity.max_page_size.max(1));

        Ok(ActivityQuery {
            activity_type,
            channel: present(self.channel),
            search: present(self.search),
            page,
            page_size,
        })
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn activity_log(
    State(state): State<AppState>,
    Query(params): Query<ActivityParams>,
) -> Result<Json<ActivityPage>, ApiError> {
    let query = params.into_query(&state.config)?;
    let store = Arc::clone(&state.store);

    let page = read_blocking("Failed to read activity log", move || {
        activity::load_page(&*store, &query)
    })
    .await?;

    if page.skipped > 0 {
        tracing::warn!(skipped = page.skipped, "activity log contains malformed lines");
    }
    Ok(Json(page))
}

/// A missing status file is reported as `data: null`.
async fn status(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Option<SystemStatus>>>, ApiError> {
    let store = Arc::clone(&state.store);
    let status = read_blocking("Failed to read status", move || documents::load_status(&store)).await?;
    Ok(DataResponse::now(status))
}

async fn daily(
    State(state): State<AppState>,
    Query(params): Query<DailyParams>,
) -> Result<Json<DataResponse<DailySummary>>, ApiError> {
    let date = match present(params.date) {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| ApiError::BadRequest("date must be YYYY-MM-DD".into()))?,
        None => Utc::now().date_naive(),
    };

    let store = Arc::clone(&state.store);
    let summary = read_blocking("Failed to read daily summary", move || {
        documents::load_daily(&store, date)
    })
    .await?;

    match summary {
        Some(summary) => Ok(DataResponse::now(summary)),
        None => Err(ApiError::NotFound(format!("No data for {}", date.format("%Y-%m-%d")))),
    }
}

async fn memory(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MemoryResponse>, ApiError> {
    let store = Arc::clone(&state.store);
    let search = present(params.search);
    let snapshot = read_blocking("Failed to read memory", move || {
        documents::load_memory(&store, search.as_deref())
    })
    .await?;

    Ok(Json(MemoryResponse {
        snapshot,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

async fn agents(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<SubAgent>>>, ApiError> {
    let store = Arc::clone(&state.store);
    let agents = read_blocking("Failed to read agents", move || documents::load_agents(&store)).await?;
    Ok(DataResponse::now(agents))
}

async fn system(State(state): State<AppState>) -> Result<Json<DataResponse<serde_json::Value>>, ApiError> {
    let store = Arc::clone(&state.store);
    let system = read_blocking("Failed to read system data", move || documents::load_system(&store)).await?;
    system
        .map(DataResponse::now)
        .ok_or_else(|| ApiError::NotFound("No system data".into()))
}

async fn overview(State(state): State<AppState>) -> Result<Json<DataResponse<Overview>>, ApiError> {
    let store = Arc::clone(&state.store);
    let recent_limit = state.config.activity.recent_limit;
    let today = Utc::now().date_naive();
    let overview = read_blocking("Failed to read overview", move || {
        documents::load_overview(&store, today, recent_limit)
    })
    .await?;
    Ok(DataResponse::now(overview))
}
