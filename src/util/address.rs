//! Controller address normalization.

use crate::constants;
use crate::core::error::XapiError;
use url::Url;

/// Turn an operator-supplied address into the controller's JSON-RPC URL.
///
/// A bare host or `host:port` gets the default scheme. An explicit
/// `http://` or `https://` URL keeps its scheme, port and path prefix.
pub fn endpoint_url(address: &str) -> Result<Url, XapiError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(invalid(address, "address is empty"));
    }
    let raw = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("{}://{}", constants::DEFAULT_SCHEME, trimmed)
    };

    let mut url = Url::parse(&raw).map_err(|e| invalid(address, &e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(address, "scheme must be http or https"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(address, "missing host"));
    }

    let base = url.path().trim_end_matches('/').to_string();
    if !base.ends_with(&format!("/{}", constants::JSONRPC_PATH)) {
        url.set_path(&format!("{}/{}", base, constants::JSONRPC_PATH));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Endpoint of the pool master named in a `HOST_IS_SLAVE` failure.
///
/// The master is reached with the scheme and explicit port of the member
/// that redirected us, unless the master address carries its own port.
pub fn master_endpoint(current: &Url, master: &str) -> Result<Url, XapiError> {
    let host = if master.matches(':').count() > 1 && !master.starts_with('[') {
        format!("[{}]", master)
    } else {
        master.to_string()
    };
    let mut url = endpoint_url(&format!("{}://{}", current.scheme(), host))?;
    if url.port().is_none() {
        url.set_port(current.port())
            .map_err(|_| invalid(master, "cannot carry port over"))?;
    }
    Ok(url)
}

fn invalid(address: &str, reason: &str) -> XapiError {
    XapiError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    }
}
