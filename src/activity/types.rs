//! Activity record definitions.
//!
//! Defines [`ActivityType`] (the category of an event), [`ActivityStatus`]
//! (its outcome) and [`ActivityEntry`] (one line of the activity log).

use serde::{Deserialize, Serialize};

/// Category of an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Message,
    Task,
    Cron,
    Heartbeat,
    Memory,
    Tool,
    Error,
}

impl ActivityType {
    pub const ALL: [ActivityType; 7] = [
        Self::Message,
        Self::Task,
        Self::Cron,
        Self::Heartbeat,
        Self::Memory,
        Self::Tool,
        Self::Error,
    ];

    /// Wire representation, always lowercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Task => "task",
            Self::Cron => "cron",
            Self::Heartbeat => "heartbeat",
            Self::Memory => "memory",
            Self::Tool => "tool",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown activity type: {s}"))
    }
}

/// Outcome of an activity. The writer may emit states beyond the four known
/// ones; those are kept as [`ActivityStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityStatus {
    Success,
    Error,
    Pending,
    Running,
    Other(String),
}

impl ActivityStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ActivityStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "pending" => Self::Pending,
            "running" => Self::Running,
            _ => Self::Other(s),
        }
    }
}

impl From<ActivityStatus> for String {
    fn from(status: ActivityStatus) -> Self {
        match status {
            ActivityStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Opaque unique identifier.
    pub id: String,
    /// ISO 8601 creation time. Not used for ordering.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Communication channel (e.g. `"telegram"`), if any.
    #[serde(default)]
    pub channel: Option<String>,
    pub status: ActivityStatus,
    /// One-line human-readable description.
    pub summary: String,
    /// Sub-agent that produced the entry, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Fields the writer adds beyond the known schema, returned unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
