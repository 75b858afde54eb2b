#![allow(dead_code)]

use mordecai_dashboard::api::{self, AppState};
use mordecai_dashboard::config::DashboardConfig;
use std::path::Path;
use tempfile::TempDir;

/// One activity log line with the given fields.
pub fn activity_line(
    id: &str,
    activity_type: &str,
    channel: Option<&str>,
    summary: &str,
    agent_id: Option<&str>,
) -> String {
    let mut value = serde_json::json!({
        "id": id,
        "timestamp": format!("2026-03-01T10:00:{:02}Z", id.len() % 60),
        "type": activity_type,
        "channel": channel,
        "status": "success",
        "summary": summary,
    });
    if let Some(agent_id) = agent_id {
        value["agentId"] = agent_id.into();
    }
    value.to_string()
}

/// A fresh, empty data directory.
pub fn data_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Write `contents` to `relative` inside `dir`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// Write the activity log from individual lines, newline-terminated.
pub fn write_activity(dir: &Path, lines: &[String]) {
    let mut contents = lines.join("\n");
    contents.push('\n');
    write_file(dir, "activity.jsonl", &contents);
}

/// Config pointing at `dir` with defaults elsewhere.
pub fn config_for(dir: &Path) -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.storage.data_dir = dir.to_string_lossy().into_owned();
    config
}

/// Serve the router for `dir` on an ephemeral port and return its base URL.
pub async fn spawn_app(dir: &Path) -> String {
    let router = api::router(AppState::new(config_for(dir)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// GET `url`, returning the status code and the JSON body.
pub async fn get_json(url: &str) -> (u16, serde_json::Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    let body = response.text().await.unwrap();
    (status, serde_json::from_str(&body).unwrap())
}
