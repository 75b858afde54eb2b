use anyhow::Result;

use mordecai_dashboard::activity::{self, ActivityQuery};
use mordecai_dashboard::config::DashboardConfig;
use mordecai_dashboard::store::{ActivitySource, DataStore, ACTIVITY_FILE};

/// Query the activity log from the terminal.
pub fn activity(config: &DashboardConfig, query: &ActivityQuery, json: bool) -> Result<()> {
    let store = DataStore::new(config.resolved_data_dir());
    let raw = store.load_activity()?;
    let page = activity::query(raw.as_deref(), query);

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if raw.is_none() {
        println!("No activity yet ({} not found).", store.root().join(ACTIVITY_FILE).display());
        return Ok(());
    }

    if page.items.is_empty() {
        println!("No matching activity ({} total).", page.total);
        return Ok(());
    }

    for entry in &page.items {
        let summary = if entry.summary.chars().count() > 80 {
            let cut: String = entry.summary.chars().take(77).collect();
            format!("{cut}...")
        } else {
            entry.summary.clone()
        };
        println!(
            "{:<25} {:<10} {:<8} {:<10} {}",
            entry.timestamp,
            entry.activity_type,
            entry.status,
            entry.channel.as_deref().unwrap_or("-"),
            summary,
        );
    }

    println!();
    println!(
        "Page {} ({} per page): {} of {} matching{}",
        page.page,
        page.page_size,
        page.items.len(),
        page.total,
        if page.has_more { ", more available" } else { "" },
    );
    if page.skipped > 0 {
        eprintln!("warning: {} malformed line(s) skipped", page.skipped);
    }

    Ok(())
}
