mod helpers;

use helpers::{activity_line, data_dir, get_json, spawn_app, write_activity, write_file};

fn item_ids(body: &serde_json::Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn activity_pages_newest_first() {
    let tmp = data_dir();
    write_activity(
        tmp.path(),
        &[
            activity_line("A", "message", Some("telegram"), "first", None),
            activity_line("B", "task", None, "second", None),
            activity_line("C", "tool", None, "Ran linter", Some("sub-1")),
        ],
    );
    let base = spawn_app(tmp.path()).await;

    let (status, body) = get_json(&format!("{base}/api/activity")).await;
    assert_eq!(status, 200);
    assert_eq!(item_ids(&body), ["C", "B", "A"]);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 25);
    assert_eq!(body["hasMore"], false);
    assert!(body["timestamp"].is_string());

    let (_, body) = get_json(&format!("{base}/api/activity?page=1&pageSize=2")).await;
    assert_eq!(item_ids(&body), ["C", "B"]);
    assert_eq!(body["hasMore"], true);

    let (_, body) = get_json(&format!("{base}/api/activity?page=2&pageSize=2")).await;
    assert_eq!(item_ids(&body), ["A"]);
    assert_eq!(body["hasMore"], false);

    let (status, body) = get_json(&format!("{base}/api/activity?page=99")).await;
    assert_eq!(status, 200);
    assert!(item_ids(&body).is_empty());
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn activity_filters_and_search() {
    let tmp = data_dir();
    write_activity(
        tmp.path(),
        &[
            activity_line("A", "message", Some("telegram"), "first", None),
            activity_line("B", "task", None, "second", None),
            activity_line("C", "tool", None, "Ran linter", Some("sub-1")),
        ],
    );
    let base = spawn_app(tmp.path()).await;

    let (_, body) = get_json(&format!("{base}/api/activity?type=message")).await;
    assert_eq!(item_ids(&body), ["A"]);

    let (_, body) = get_json(&format!("{base}/api/activity?channel=telegram&type=task")).await;
    assert!(item_ids(&body).is_empty());

    for needle in ["linter", "tool", "SUB-1"] {
        let (_, body) = get_json(&format!("{base}/api/activity?search={needle}")).await;
        assert_eq!(item_ids(&body), ["C"], "search={needle}");
    }
    let (_, body) = get_json(&format!("{base}/api/activity?search=compiler")).await;
    assert_eq!(body["total"], 0);

    // empty parameters are ignored
    let (_, body) = get_json(&format!("{base}/api/activity?type=&channel=&search=")).await;
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn activity_items_are_returned_as_stored() {
    let tmp = data_dir();
    write_file(
        tmp.path(),
        "activity.jsonl",
        r#"{"id":"x","timestamp":"2026-03-01T00:00:00Z","type":"cron","channel":"system","status":"retrying","summary":"Nightly backup","tokens":120}"#,
    );
    let base = spawn_app(tmp.path()).await;

    let (_, body) = get_json(&format!("{base}/api/activity")).await;
    let item = &body["items"][0];
    assert_eq!(item["status"], "retrying");
    assert_eq!(item["tokens"], 120);
    assert_eq!(item["channel"], "system");
}

#[tokio::test]
async fn missing_activity_log_is_success() {
    let tmp = data_dir();
    let base = spawn_app(tmp.path()).await;

    let (status, body) = get_json(&format!("{base}/api/activity")).await;
    assert_eq!(status, 200);
    assert_eq!(body["items"], serde_json::json!([]));
    assert_eq!(body["total"], 0);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn invalid_utf8_line_is_skipped_not_server_error() {
    let tmp = data_dir();
    let mut contents = activity_line("A", "task", None, "first", None).into_bytes();
    contents.extend_from_slice(b"\n{\"id\":\"B\",\"summary\":\"caf\xC3");
    std::fs::write(tmp.path().join("activity.jsonl"), contents).unwrap();
    let base = spawn_app(tmp.path()).await;

    let (status, body) = get_json(&format!("{base}/api/activity")).await;
    assert_eq!(status, 200);
    assert_eq!(item_ids(&body), ["A"]);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn unreadable_activity_log_is_server_error() {
    let tmp = data_dir();
    std::fs::create_dir(tmp.path().join("activity.jsonl")).unwrap();
    let base = spawn_app(tmp.path()).await;

    let (status, body) = get_json(&format!("{base}/api/activity")).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to read activity log");
    assert!(body.get("items").is_none());
}

#[tokio::test]
async fn invalid_activity_params_are_rejected() {
    let tmp = data_dir();
    let base = spawn_app(tmp.path()).await;

    for qs in ["page=abc", "page=0", "pageSize=-5", "type=deploy"] {
        let (status, body) = get_json(&format!("{base}/api/activity?{qs}")).await;
        assert_eq!(status, 400, "{qs}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn status_endpoint() {
    let tmp = data_dir();
    let base = spawn_app(tmp.path()).await;

    let (status, body) = get_json(&format!("{base}/api/status")).await;
    assert_eq!(status, 200);
    assert!(body["data"].is_null());

    write_file(
        tmp.path(),
        "status.json",
        r#"{"health":"healthy","uptime":3600,"version":"1.4.2","activeChannels":["telegram","cli"]}"#,
    );
    let (status, body) = get_json(&format!("{base}/api/status")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["health"], "healthy");
    assert_eq!(body["data"]["activeChannels"][1], "cli");

    write_file(tmp.path(), "status.json", "{oops");
    let (status, body) = get_json(&format!("{base}/api/status")).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to read status");
}

#[tokio::test]
async fn daily_endpoint() {
    let tmp = data_dir();
    write_file(
        tmp.path(),
        "daily/2026-03-01.json",
        r#"{"date":"2026-03-01","messagesHandled":42,"topActivities":["Refactored parser"]}"#,
    );
    let base = spawn_app(tmp.path()).await;

    let (status, body) = get_json(&format!("{base}/api/daily?date=2026-03-01")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["messagesHandled"], 42);
    assert_eq!(body["data"]["topActivities"][0], "Refactored parser");

    let (status, body) = get_json(&format!("{base}/api/daily?date=2026-03-02")).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "No data for 2026-03-02");

    let (status, _) = get_json(&format!("{base}/api/daily?date=../status")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn memory_endpoint() {
    let tmp = data_dir();
    let base = spawn_app(tmp.path()).await;

    let (status, body) = get_json(&format!("{base}/api/memory")).await;
    assert_eq!(status, 200);
    assert_eq!(body["entries"], serde_json::json!([]));
    assert_eq!(body["totalSizeBytes"], 0);
    assert!(body["lastConsolidated"].is_null());

    write_file(
        tmp.path(),
        "memory.json",
        r#"{"entries":[
            {"filename":"user.md","title":"User","content":"Prefers Rust","tags":["profile"],"sizeBytes":120,"lastModified":"2026-03-01T00:00:00Z"},
            {"filename":"agents.md","title":"Agents","content":"Roster","tags":["team"],"sizeBytes":80,"lastModified":"2026-03-01T00:00:00Z"}
        ],"totalSizeBytes":200,"lastConsolidated":"2026-02-28T00:00:00Z"}"#,
    );
    let (_, body) = get_json(&format!("{base}/api/memory?search=rust")).await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["filename"], "user.md");
    assert_eq!(body["totalSizeBytes"], 200);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn agents_and_system_endpoints() {
    let tmp = data_dir();
    let base = spawn_app(tmp.path()).await;

    let (status, body) = get_json(&format!("{base}/api/agents")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], serde_json::json!([]));

    let (status, body) = get_json(&format!("{base}/api/system")).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "No system data");

    write_file(
        tmp.path(),
        "agents.json",
        r#"[{"id":"sub-1","name":"researcher","status":"active","task":"summarize"}]"#,
    );
    write_file(tmp.path(), "system.json", r#"{"os":"linux","disks":[{"mount":"/"}]}"#);

    let (_, body) = get_json(&format!("{base}/api/agents")).await;
    assert_eq!(body["data"][0]["name"], "researcher");
    assert_eq!(body["data"][0]["task"], "summarize");

    let (status, body) = get_json(&format!("{base}/api/system")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["disks"][0]["mount"], "/");
}

#[tokio::test]
async fn overview_endpoint() {
    let tmp = data_dir();
    let lines: Vec<String> = (0..20)
        .map(|i| activity_line(&format!("e{i}"), if i % 2 == 0 { "message" } else { "tool" }, None, "x", None))
        .collect();
    write_activity(tmp.path(), &lines);
    let base = spawn_app(tmp.path()).await;

    let (status, body) = get_json(&format!("{base}/api/overview")).await;
    assert_eq!(status, 200);
    let recent = body["data"]["recentActivity"].as_array().unwrap();
    assert_eq!(recent.len(), 14);
    assert_eq!(recent[0]["id"], "e19");
    assert!(body["data"]["status"].is_null());
    assert_eq!(body["data"]["typeDistribution"][0]["count"], 7);
    assert_eq!(body["data"]["typeDistribution"][0]["pct"], 50);
}

#[tokio::test]
async fn health_endpoint() {
    let tmp = data_dir();
    let base = spawn_app(tmp.path()).await;
    let (status, body) = get_json(&format!("{base}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}
