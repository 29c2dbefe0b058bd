//! Controller client and cleanup logic.

pub mod cleanup;
pub mod error;
pub mod jsonrpc;
pub mod pool;
pub mod session;
