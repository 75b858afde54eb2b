//! Read-only monitoring dashboard for the Mordecai agent system.
//!
//! The agent process writes its state to a data directory: an append-only
//! activity log (`activity.jsonl`, one JSON object per line) plus a handful of
//! JSON documents. This crate reads those files and serves them over HTTP. It
//! never writes to the data directory.
//!
//! | Endpoint | Source | Missing file |
//! |----------|--------|--------------|
//! | `/api/activity` | `activity.jsonl` | empty page |
//! | `/api/status` | `status.json` | `data: null` |
//! | `/api/daily?date=` | `daily/<date>.json` | 404 |
//! | `/api/memory?search=` | `memory.json` | empty list |
//! | `/api/agents` | `agents.json` | empty list |
//! | `/api/system` | `system.json` | 404 |
//! | `/api/overview` | all of the above | partial nulls |
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`store`] — File access to the data directory
//! - [`activity`] — Activity record model and query engine
//! - [`documents`] — Status, daily, memory, agent and overview loaders
//! - [`api`] — axum router and handlers

pub mod activity;
pub mod api;
pub mod config;
pub mod documents;
pub mod store;
