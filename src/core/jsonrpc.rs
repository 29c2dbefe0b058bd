//! JSON-RPC 2.0 envelopes used by the controller's `/jsonrpc` endpoint.
//!
//! Controller failures arrive as `{"error": {"message": CODE, "data": [params]}}`
//! with HTTP status 200.

use crate::core::error::XapiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct Request<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a [Value],
    id: u64,
}

impl<'a> Request<'a> {
    pub fn new(method: &'a str, params: &'a [Value], id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Value,
}

/// Decode a response body into the call's `result`, or the controller failure.
pub fn decode_response(body: &str) -> Result<Value, XapiError> {
    let mut reply: Map<String, Value> = serde_json::from_str(body)?;

    if let Some(error) = reply.remove("error").filter(|e| !e.is_null()) {
        let error: ErrorObject = serde_json::from_value(error)?;
        if error.message.is_empty() {
            return Err(XapiError::Protocol("error object without a failure code".into()));
        }
        return Err(XapiError::Failure {
            code: error.message,
            params: failure_params(error.data),
        });
    }

    reply
        .remove("result")
        .ok_or_else(|| XapiError::Protocol("response carries neither result nor error".into()))
}

fn failure_params(data: Value) -> Vec<String> {
    match data {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(value_to_string).collect(),
        other => vec![value_to_string(other)],
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
