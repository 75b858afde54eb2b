//! Schemas for the JSON documents the agent writes alongside the activity log.
//!
//! Every field is defaulted so a partially written document still decodes;
//! unknown fields are carried through unchanged.

use serde::{Deserialize, Serialize};

type Extra = serde_json::Map<String, serde_json::Value>;

/// `status.json`: liveness and resource snapshot of the agent process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemStatus {
    /// `healthy`, `degraded`, `offline` or `unknown`.
    pub health: String,
    /// Seconds since the agent started.
    pub uptime: u64,
    pub version: String,
    pub last_heartbeat: Option<String>,
    pub active_channels: Vec<String>,
    pub cpu_percent: f64,
    pub memory_usage_mb: f64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Messages handled during one hour of the day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyActivity {
    pub hour: u8,
    pub messages: u64,
}

/// `daily/<date>.json`: counters for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailySummary {
    pub date: Option<String>,
    pub messages_handled: u64,
    pub tasks_completed: u64,
    pub files_modified: u64,
    pub errors_encountered: u64,
    pub cron_jobs_run: u64,
    pub sub_agents_spawned: u64,
    pub tokens_used: u64,
    pub hourly_activity: Vec<HourlyActivity>,
    pub top_activities: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One memory file tracked by the agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemoryEntry {
    pub filename: String,
    pub title: String,
    /// Markdown body of the file.
    pub content: String,
    pub tags: Vec<String>,
    pub size_bytes: u64,
    pub last_modified: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl MemoryEntry {
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// `memory.json`: the agent's memory files and their aggregate size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemorySnapshot {
    pub entries: Vec<MemoryEntry>,
    pub total_size_bytes: u64,
    pub last_consolidated: Option<String>,
}

/// One entry of `agents.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubAgent {
    pub id: String,
    pub name: String,
    /// `active`, `idle`, `offline`, ...
    pub status: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_decodes_partial_document() {
        let status: SystemStatus =
            serde_json::from_str(r#"{"health":"healthy","uptime":93784,"activeChannels":["telegram"]}"#)
                .unwrap();
        assert_eq!(status.health, "healthy");
        assert_eq!(status.uptime, 93784);
        assert_eq!(status.active_channels, ["telegram"]);
        assert!(status.last_heartbeat.is_none());
        assert_eq!(status.cpu_percent, 0.0);
    }

    #[test]
    fn daily_keeps_unknown_fields() {
        let daily: DailySummary = serde_json::from_str(
            r#"{"messagesHandled":12,"hourlyActivity":[{"hour":9,"messages":4}],"mood":"calm"}"#,
        )
        .unwrap();
        assert_eq!(daily.messages_handled, 12);
        assert_eq!(daily.hourly_activity[0].hour, 9);
        let back = serde_json::to_value(&daily).unwrap();
        assert_eq!(back["mood"], "calm");
        assert_eq!(back["messagesHandled"], 12);
    }

    #[test]
    fn memory_entry_search_is_case_insensitive() {
        let entry = MemoryEntry {
            filename: "agents.md".into(),
            title: "Sub-Agent Roster".into(),
            content: "Keeps track of helpers".into(),
            tags: vec!["Roster".into(), "team".into()],
            ..Default::default()
        };
        assert!(entry.matches("roster"));
        assert!(entry.matches("helpers"));
        assert!(entry.matches("team"));
        assert!(!entry.matches("calendar"));
    }
}
