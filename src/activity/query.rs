//! Filtering, free-text search and pagination over the activity log.
//!
//! The log is reloaded on every call; nothing is cached between queries.
//! Order is physical append order reversed, so the last line written comes
//! first. Timestamps play no part in ordering.

use serde::Serialize;
use std::collections::HashMap;

use super::types::{ActivityEntry, ActivityType};
use crate::store::{ActivitySource, StoreError};

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Result of parsing a raw log: the entries in append order plus the number of
/// lines that could not be decoded.
#[derive(Debug, Default)]
pub struct ParsedLog {
    pub entries: Vec<ActivityEntry>,
    pub skipped: usize,
}

/// Parse a JSON-Lines activity log.
///
/// Blank lines are ignored. A malformed line (invalid UTF-8, bad JSON, missing
/// field, unknown `type`) is skipped and counted instead of failing the whole
/// log. Callers report the total; each line is only logged at debug.
pub fn parse_log(raw: impl AsRef<[u8]>) -> ParsedLog {
    let mut parsed = ParsedLog::default();
    for (idx, bytes) in raw.as_ref().split(|b| *b == b'\n').enumerate() {
        let line = match std::str::from_utf8(bytes) {
            Ok(line) => line.trim(),
            Err(e) => {
                parsed.skipped += 1;
                tracing::debug!(line = idx + 1, error = %e, "skipping undecodable activity line");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ActivityEntry>(line) {
            Ok(entry) => parsed.entries.push(entry),
            Err(e) => {
                parsed.skipped += 1;
                tracing::debug!(line = idx + 1, error = %e, "skipping malformed activity line");
            }
        }
    }
    parsed
}

/// Filters and page selection for [`query`]. All filters are optional and
/// combine with AND.
#[derive(Debug, Clone)]
pub struct ActivityQuery {
    pub activity_type: Option<ActivityType>,
    pub channel: Option<String>,
    /// Case-insensitive substring matched against summary, type and agent id.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            activity_type: None,
            channel: None,
            search: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ActivityQuery {
    fn matches(&self, entry: &ActivityEntry, needle: Option<&str>) -> bool {
        if let Some(t) = self.activity_type {
            if entry.activity_type != t {
                return false;
            }
        }
        if let Some(ref channel) = self.channel {
            if entry.channel.as_deref() != Some(channel.as_str()) {
                return false;
            }
        }
        match needle {
            Some(needle) => matches_search(entry, needle),
            None => true,
        }
    }
}

/// `needle` must already be lowercase.
fn matches_search(entry: &ActivityEntry, needle: &str) -> bool {
    entry.summary.to_lowercase().contains(needle)
        || entry.activity_type.as_str().contains(needle)
        || entry
            .agent_id
            .as_deref()
            .is_some_and(|id| id.to_lowercase().contains(needle))
}

/// One page of filtered activity, newest first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPage {
    pub items: Vec<ActivityEntry>,
    /// Matching entries before pagination.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_more: bool,
    /// RFC 3339 time the page was produced.
    pub timestamp: String,
    /// Malformed lines dropped while parsing; not part of the JSON body.
    #[serde(skip)]
    pub skipped: usize,
}

/// Run a query against a raw log snapshot. `None` means the log does not
/// exist yet and yields an empty page.
pub fn query(raw: Option<&[u8]>, params: &ActivityQuery) -> ActivityPage {
    let parsed = raw.map(parse_log).unwrap_or_default();
    let skipped = parsed.skipped;
    let mut page = query_entries(parsed.entries, params);
    page.skipped = skipped;

    tracing::debug!(
        total = page.total,
        returned = page.items.len(),
        skipped,
        "activity query"
    );
    page
}

/// Load a fresh snapshot from `source` and query it.
pub fn load_page(
    source: &dyn ActivitySource,
    params: &ActivityQuery,
) -> Result<ActivityPage, StoreError> {
    let raw = source.load_activity()?;
    Ok(query(raw.as_deref(), params))
}

/// Apply ordering, filters and pagination to already-parsed entries in
/// append order.
pub fn query_entries(mut entries: Vec<ActivityEntry>, params: &ActivityQuery) -> ActivityPage {
    let page = params.page.max(1);
    let page_size = params.page_size.max(1);
    let needle = params
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    entries.reverse();
    let filtered: Vec<ActivityEntry> = entries
        .into_iter()
        .filter(|e| params.matches(e, needle.as_deref()))
        .collect();

    let total = filtered.len();
    let offset = (page - 1).saturating_mul(page_size);
    let items: Vec<ActivityEntry> = filtered.into_iter().skip(offset).take(page_size).collect();

    ActivityPage {
        items,
        total,
        page,
        page_size,
        has_more: offset.saturating_add(page_size) < total,
        timestamp: chrono::Utc::now().to_rfc3339(),
        skipped: 0,
    }
}

/// Share of one activity type among a set of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub count: usize,
    /// Whole-number percentage of the input.
    pub pct: u32,
}

/// Count entries per type, most frequent first. Ties keep the order in which
/// the type was first seen.
pub fn type_distribution(entries: &[ActivityEntry]) -> Vec<TypeCount> {
    let mut counts: HashMap<ActivityType, usize> = HashMap::new();
    let mut order: Vec<ActivityType> = Vec::new();
    for entry in entries {
        let count = counts.entry(entry.activity_type).or_insert(0);
        if *count == 0 {
            order.push(entry.activity_type);
        }
        *count += 1;
    }

    let denominator = entries.len().max(1) as f64;
    let mut distribution: Vec<TypeCount> = order
        .into_iter()
        .map(|t| {
            let count = counts[&t];
            TypeCount {
                activity_type: t,
                count,
                pct: (count as f64 / denominator * 100.0).round() as u32,
            }
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count));
    distribution
}
