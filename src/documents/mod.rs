//! Loaders for the sibling read-only documents: status, daily summaries,
//! memory files, sub-agents, system info, and the combined overview.
//!
//! Each loader reads one file from the [`DataStore`], optionally filters in
//! memory, and returns it. Absent files map to an empty or `None` result.

pub mod types;

use chrono::NaiveDate;
use serde::Serialize;

use crate::activity::{self, ActivityEntry, ActivityQuery, TypeCount};
use crate::store::{DataStore, StoreError, AGENTS_FILE, MEMORY_FILE, STATUS_FILE, SYSTEM_FILE};
use types::{DailySummary, MemorySnapshot, SubAgent, SystemStatus};

pub fn load_status(store: &DataStore) -> Result<Option<SystemStatus>, StoreError> {
    store.load_json(STATUS_FILE)
}

pub fn load_daily(store: &DataStore, date: NaiveDate) -> Result<Option<DailySummary>, StoreError> {
    store.load_json(&DataStore::daily_path(date))
}

/// Load memory files, keeping only entries whose title, content or tags
/// contain `search` (case-insensitive). An empty search keeps everything.
pub fn load_memory(store: &DataStore, search: Option<&str>) -> Result<MemorySnapshot, StoreError> {
    let mut snapshot: MemorySnapshot = store.load_json(MEMORY_FILE)?.unwrap_or_default();
    if let Some(needle) = search.filter(|s| !s.is_empty()) {
        let needle = needle.to_lowercase();
        snapshot.entries.retain(|e| e.matches(&needle));
    }
    Ok(snapshot)
}

pub fn load_agents(store: &DataStore) -> Result<Vec<SubAgent>, StoreError> {
    Ok(store.load_json(AGENTS_FILE)?.unwrap_or_default())
}

/// `system.json` has no fixed schema and is returned as-is.
pub fn load_system(store: &DataStore) -> Result<Option<serde_json::Value>, StoreError> {
    store.load_json(SYSTEM_FILE)
}

/// Everything the landing page shows in one response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub status: Option<SystemStatus>,
    pub daily: Option<DailySummary>,
    /// Most recent entries, newest first.
    pub recent_activity: Vec<ActivityEntry>,
    /// Breakdown of `recent_activity` by type.
    pub type_distribution: Vec<TypeCount>,
}

pub fn load_overview(
    store: &DataStore,
    today: NaiveDate,
    recent_limit: usize,
) -> Result<Overview, StoreError> {
    let status = load_status(store)?;
    let daily = load_daily(store, today)?;

    let recent = activity::load_page(
        store,
        &ActivityQuery {
            page_size: recent_limit,
            ..Default::default()
        },
    )?;
    let type_distribution = activity::type_distribution(&recent.items);

    Ok(Overview {
        status,
        daily,
        recent_activity: recent.items,
        type_distribution,
    })
}
