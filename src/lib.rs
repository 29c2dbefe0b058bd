//! Pool network cleanup CLI.
//!
//! Connects to a XenAPI pool master over JSON-RPC, finds networks whose
//! `other_config` carries the creation tool's marker key, and destroys
//! them after operator confirmation.
//!
//! ## Modules
//! - `cli` — Argument parsing and the cleanup command
//! - `core` — JSON-RPC client, session, pool operations, cleanup flow
//! - `models` — Network records
//! - `util` — Address handling, logging, confirmation prompts

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
