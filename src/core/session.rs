//! Blocking JSON-RPC client and authenticated controller session.

use crate::constants;
use crate::core::error::XapiError;
use crate::core::jsonrpc::{self, Request};
use crate::util::address;
use reqwest::blocking::Client;
use serde_json::Value;
use std::cell::Cell;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// HTTP settings shared by every controller connection.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    /// Accept self-signed or otherwise unverifiable certificates.
    pub accept_invalid_certs: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }
}

/// Unauthenticated JSON-RPC client bound to one endpoint.
pub struct XapiClient {
    http: Client,
    endpoint: Url,
    next_id: Cell<u64>,
}

impl XapiClient {
    pub fn new(endpoint: Url, options: &ClientOptions) -> Result<Self, XapiError> {
        let http = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()?;
        Ok(Self {
            http,
            endpoint,
            next_id: Cell::new(1),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Invoke `method` and return its `result` value.
    pub fn call(&self, method: &str, params: &[Value]) -> Result<Value, XapiError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        debug!(method, id, endpoint = %self.endpoint, "calling controller");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("Accept", "application/json")
            .json(&Request::new(method, params, id))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(XapiError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }
        jsonrpc::decode_response(&body)
    }

    fn login_with_password(&self, username: &str, password: &str) -> Result<String, XapiError> {
        let params = [
            Value::from(username),
            Value::from(password),
            Value::from(constants::API_VERSION),
            Value::from(constants::ORIGINATOR),
        ];
        match self.call("session.login_with_password", &params)? {
            Value::String(handle) if !handle.is_empty() => Ok(handle),
            other => Err(XapiError::Protocol(format!(
                "login returned a non-string session handle: {}",
                other
            ))),
        }
    }
}

/// Authenticated session on the pool master.
///
/// The session is not logged out; the controller reclaims it when it expires.
pub struct Session {
    client: XapiClient,
    handle: String,
}

impl Session {
    /// Log in to `address`, following one `HOST_IS_SLAVE` redirect to the pool master.
    pub fn login(
        address: &str,
        username: &str,
        password: &str,
        options: &ClientOptions,
    ) -> Result<Self, XapiError> {
        let endpoint = address::endpoint_url(address)?;
        let client = XapiClient::new(endpoint, options)?;

        match client.login_with_password(username, password) {
            Ok(handle) => Ok(Self { client, handle }),
            Err(err) => {
                let Some(master) = err.pool_master() else {
                    return Err(err);
                };
                let master_endpoint = address::master_endpoint(client.endpoint(), master)?;
                info!(member = %client.endpoint(), master = %master_endpoint, "host is a pool member, logging in to the master");
                let client = XapiClient::new(master_endpoint, options)?;
                let handle = client.login_with_password(username, password)?;
                Ok(Self { client, handle })
            }
        }
    }

    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }

    /// Invoke `method` with the session handle prepended to `params`.
    pub fn call(&self, method: &str, params: &[Value]) -> Result<Value, XapiError> {
        let mut full = Vec::with_capacity(params.len() + 1);
        full.push(Value::from(self.handle.as_str()));
        full.extend_from_slice(params);
        self.client.call(method, &full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "result": result, "id": 1}))
    }

    fn failure(code: &str, data: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "error": {"code": 1, "message": code, "data": data},
            "id": 1
        }))
    }

    async fn mock_login(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/jsonrpc"))
            .and(body_partial_json(json!({"method": "session.login_with_password"})))
            .respond_with(response)
            .mount(server)
            .await;
    }

    // The blocking client must be created and dropped off the async runtime.
    async fn login(address: String) -> Result<String, XapiError> {
        tokio::task::spawn_blocking(move || {
            let session = Session::login(&address, "root", "secret", &ClientOptions::default())?;
            Ok::<_, XapiError>(session.handle)
        })
        .await
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_returns_session_handle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jsonrpc"))
            .and(body_partial_json(json!({
                "jsonrpc": "2.0",
                "method": "session.login_with_password",
                "params": ["root", "secret", "1.0", "sxm-net-cleanup"]
            })))
            .respond_with(ok(json!("OpaqueRef:session-1")))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(login(server.uri()).await.unwrap(), "OpaqueRef:session-1");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_authentication_failure() {
        let server = MockServer::start().await;
        mock_login(
            &server,
            failure("SESSION_AUTHENTICATION_FAILED", json!(["root", "bad creds"])),
        )
        .await;

        let err = login(server.uri()).await.unwrap_err();
        assert_eq!(err.failure_code(), Some("SESSION_AUTHENTICATION_FAILED"));
        assert!(err.to_string().contains("bad creds"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_follows_pool_master_redirect() {
        let master = MockServer::start().await;
        mock_login(&master, ok(json!("OpaqueRef:master-session"))).await;

        let member = MockServer::start().await;
        let master_addr = master.address().to_string();
        mock_login(&member, failure("HOST_IS_SLAVE", json!([master_addr]))).await;

        assert_eq!(login(member.uri()).await.unwrap(), "OpaqueRef:master-session");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_redirect_only_once() {
        let member = MockServer::start().await;
        let own_addr = member.address().to_string();
        mock_login(&member, failure("HOST_IS_SLAVE", json!([own_addr]))).await;

        let err = login(member.uri()).await.unwrap_err();
        assert_eq!(err.failure_code(), Some("HOST_IS_SLAVE"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_rejects_non_string_handle() {
        let server = MockServer::start().await;
        mock_login(&server, ok(json!({"not": "a handle"}))).await;

        assert!(matches!(login(server.uri()).await, Err(XapiError::Protocol(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        mock_login(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

        match login(server.uri()).await.unwrap_err() {
            XapiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_session_call_prepends_handle() {
        let server = MockServer::start().await;
        mock_login(&server, ok(json!("OpaqueRef:s"))).await;
        Mock::given(method("POST"))
            .and(path("/jsonrpc"))
            .and(body_partial_json(json!({
                "method": "network.get_uuid",
                "params": ["OpaqueRef:s", "OpaqueRef:net"]
            })))
            .respond_with(ok(json!("uuid-1")))
            .expect(1)
            .mount(&server)
            .await;

        let address = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            let session = Session::login(&address, "root", "secret", &ClientOptions::default())?;
            session.call("network.get_uuid", &[json!("OpaqueRef:net")])
        })
        .await
        .unwrap()
        .unwrap();
        assert_eq!(result, json!("uuid-1"));
    }
}
