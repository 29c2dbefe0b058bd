//! Utility modules for addressing, logging and prompts.

pub mod address;
pub mod logging;
pub mod prompt;
