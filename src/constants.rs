//! Centralized constants for the controller protocol and cleanup defaults.

/// Key the network creation tool sets in a network's `other_config`.
pub const DEFAULT_MARKER_KEY: &str = "missing_sxm_networks";

/// Path of the controller's JSON-RPC endpoint.
pub const JSONRPC_PATH: &str = "jsonrpc";

/// Scheme assumed when the controller address has none.
pub const DEFAULT_SCHEME: &str = "https";

/// API version sent with `session.login_with_password`.
pub const API_VERSION: &str = "1.0";

/// Originator string reported to the controller at login.
pub const ORIGINATOR: &str = "sxm-net-cleanup";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Failure code returned by a pool member; the first parameter is the master address.
pub const HOST_IS_SLAVE: &str = "HOST_IS_SLAVE";

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "SXM_CLEANUP_LOG";
