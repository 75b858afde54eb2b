//! CLI `doctor` command — inspect the data directory and print a health report.

use anyhow::Result;

use mordecai_dashboard::activity::parse_log;
use mordecai_dashboard::config::DashboardConfig;
use mordecai_dashboard::store::{ActivitySource, DataStore};

/// Check which data files exist and whether the activity log parses.
pub fn doctor(config: &DashboardConfig) -> Result<()> {
    let data_dir = config.resolved_data_dir();

    println!("Mordecai Dashboard Health Report");
    println!("================================");
    println!();
    println!("Data directory:    {}", data_dir.display());

    if !data_dir.is_dir() {
        println!("Status:            not found");
        println!("Endpoints will report empty data until the agent writes here.");
        return Ok(());
    }

    let store = DataStore::new(&data_dir);
    println!();
    println!("Files:");
    for file in store.health() {
        match file.size_bytes {
            Some(size) => println!("  {:<16} {}", file.name, format_bytes(size)),
            None => println!("  {:<16} (missing)", file.name),
        }
    }

    println!();
    match store.load_activity() {
        Ok(Some(raw)) => {
            let parsed = parse_log(&raw);
            println!("Activity log:");
            println!("  Entries:         {}", parsed.entries.len());
            println!("  Malformed lines: {}", parsed.skipped);
            if let Some(last) = parsed.entries.last() {
                println!("  Last entry:      {} ({})", last.timestamp, last.activity_type);
            }
        }
        Ok(None) => println!("Activity log:      not written yet"),
        Err(e) => println!("Activity log:      UNREADABLE ({e})"),
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
