//! # Client binding for a single backend server
//!
//! This module provides the `McpClient` struct, a thin binding to one backend
//! server. A client is bound to a single server URL at construction and issues
//! the request/response exchange: it POSTs a JSON envelope naming the resource
//! and carrying the caller's parameters, and splits the server's reply into
//! its `data` and `error` parts.
//!
//! Clients are created and cached by the `Dispatcher`; there is rarely a
//! reason to construct one directly.

use log::trace;
use serde_json::{Value, json};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Url parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A client bound to a single backend server URL.
#[derive(Clone, Debug)]
pub struct McpClient {
    server_url: Url,
    http: reqwest::Client,
}

/// The response envelope returned by a backend server.
///
/// A reply carries either a `data` payload, a protocol-reported `error`, or
/// neither. Both fields are kept as the server sent them; interpreting the
/// combination is the caller's business.
#[derive(Clone, Debug, PartialEq)]
pub struct McpResponse {
    /// The result payload, if the server returned one.
    pub data: Option<Value>,
    /// The protocol-reported error, if the server returned one.
    pub error: Option<String>,
}

impl McpClient {
    /// Create a new client bound to the given server URL.
    ///
    /// # Arguments
    ///
    /// * `server_url` - The base URL of the backend server.
    ///
    /// # Returns
    ///
    /// A new client, or an error if the URL does not parse.
    pub fn new(server_url: &str) -> Result<Self, Error> {
        Ok(Self {
            server_url: Url::parse(server_url)?,
            http: reqwest::Client::new(),
        })
    }

    /// The server URL this client is bound to.
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Issue a request for the given resource.
    ///
    /// # Arguments
    ///
    /// * `resource` - The resource name the server should handle.
    /// * `params` - The parameter payload to send along.
    ///
    /// # Returns
    ///
    /// The parsed response envelope, or an error if the exchange failed before
    /// a well-formed envelope came back (connection failure, HTTP error
    /// status, or a body that is not valid JSON).
    pub async fn request(&self, resource: &str, params: &Value) -> Result<McpResponse, Error> {
        trace!(
            "Requesting resource {} from {}",
            resource, self.server_url
        );
        let envelope = json!({
            "resource": resource,
            "params": params,
        });

        let response = self
            .http
            .post(self.server_url.clone())
            .json(&envelope)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        trace!("Response body {} for resource {}", body, resource);

        let value: Value = serde_json::from_str(&body)?;
        Ok(McpResponse::from(value))
    }
}

impl From<Value> for McpResponse {
    fn from(value: Value) -> Self {
        // An absent, null or empty error field all mean "no error".
        let error = value
            .get("error")
            .and_then(|e| match e {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty());
        let data = value.get("data").cloned();
        Self { data, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::setup;
    use serde_json::json;

    #[test]
    fn test_new_rejects_invalid_url() {
        setup();
        assert!(matches!(
            McpClient::new("not a url"),
            Err(Error::UrlParse(_))
        ));
    }

    #[test]
    fn test_response_envelope_success() {
        let response = McpResponse::from(json!({"data": {"temp": 21}}));
        assert_eq!(response.data, Some(json!({"temp": 21})));
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_response_envelope_error() {
        let response = McpResponse::from(json!({"error": "resource not found"}));
        assert_eq!(response.data, None);
        assert_eq!(response.error, Some("resource not found".to_string()));
    }

    #[test]
    fn test_response_envelope_null_and_empty_error_mean_no_error() {
        assert_eq!(McpResponse::from(json!({"error": null})).error, None);
        assert_eq!(McpResponse::from(json!({"error": ""})).error, None);
    }

    #[test]
    fn test_response_envelope_structured_error() {
        let response = McpResponse::from(json!({"error": {"code": 42, "message": "boom"}}));
        assert_eq!(
            response.error,
            Some(r#"{"code":42,"message":"boom"}"#.to_string())
        );
    }

    #[test]
    fn test_response_envelope_null_data_is_kept() {
        let response = McpResponse::from(json!({"data": null}));
        assert_eq!(response.data, Some(Value::Null));
    }

    #[tokio::test]
    async fn test_request_sends_envelope_and_parses_response() {
        setup();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::Json(json!({
                "resource": "weather",
                "params": {"city": "Berlin"},
            })))
            .with_status(200)
            .with_body(r#"{"data": {"temp": 21}}"#)
            .create_async()
            .await;

        let client = McpClient::new(&server.url()).unwrap();
        let response = client
            .request("weather", &json!({"city": "Berlin"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.data, Some(json!({"temp": 21})));
        assert_eq!(response.error, None);
    }

    #[tokio::test]
    async fn test_request_fails_on_http_error_status() {
        setup();
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .create_async()
            .await;

        let client = McpClient::new(&server.url()).unwrap();
        let result = client.request("weather", &json!({})).await;
        assert!(matches!(result, Err(Error::Reqwest(_))));
    }

    #[tokio::test]
    async fn test_request_fails_on_malformed_body() {
        setup();
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = McpClient::new(&server.url()).unwrap();
        let result = client.request("weather", &json!({})).await;
        assert!(matches!(result, Err(Error::Serde(_))));
    }
}
