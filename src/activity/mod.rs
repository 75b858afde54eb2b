//! The activity log: record model and query engine.

pub mod query;
pub mod types;

pub use query::{load_page, parse_log, query, type_distribution, ActivityPage, ActivityQuery, ParsedLog, TypeCount};
pub use types::{ActivityEntry, ActivityStatus, ActivityType};
