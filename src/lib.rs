//! A client router for Model Context Protocol resource servers.
//!
//! Resource names are mapped to backend server URLs by a [`ClientConfig`]; the
//! [`Dispatcher`] lazily opens one [`client::McpClient`] per distinct server
//! URL, reuses it for every later call to that server, and collapses any
//! failure — a protocol-reported error as much as a transport failure — into
//! `None` after logging it.
//!
//! ```rust,no_run
//! use mcp_resource_router::Dispatcher;
//! use mcp_resource_router::client_config::ClientConfig;
//! use serde_json::json;
//!
//! # async fn run() {
//! let dispatcher = Dispatcher::new(ClientConfig::default());
//! match dispatcher.call("weather", json!({"city": "Berlin"})).await {
//!     Some(data) => println!("weather: {}", data),
//!     None => eprintln!("call failed, see logs"),
//! }
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use client::{McpClient, McpResponse};
use client_config::ClientConfig;

pub mod client;
pub mod client_config;

/// Different types of errors that can occur when using the router.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Client error: {0}")]
    Client(#[from] client::Error),
    #[error("Client config error: {0}")]
    ClientConfig(#[from] client_config::Error),
}

/// Routes resource calls to the backend server configured for each resource.
///
/// One client is kept per distinct server URL, so resources sharing a server
/// share a client.
pub struct Dispatcher {
    config: ClientConfig,
    clients: RwLock<HashMap<String, Arc<McpClient>>>,
}

impl Dispatcher {
    /// Create a new dispatcher.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the dispatcher.
    ///
    /// # Returns
    ///
    /// A new dispatcher. No clients are opened until the first call.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// The configuration this dispatcher routes with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get or create the client for the given resource's server.
    ///
    /// # Arguments
    ///
    /// * `resource` - The resource name to resolve a client for.
    ///
    /// # Returns
    ///
    /// The cached client for the resource's server URL, creating and caching
    /// it first if this is the first call for that URL.
    pub async fn client_for(&self, resource: &str) -> Result<Arc<McpClient>, Error> {
        let server_url = self.config.server_url_for(resource);

        let clients = self.clients.read().await;
        if let Some(client) = clients.get(server_url) {
            return Ok(client.clone());
        }
        drop(clients);

        let mut clients = self.clients.write().await;
        // Another task may have created the client between the two locks.
        if let Some(client) = clients.get(server_url) {
            return Ok(client.clone());
        }

        info!("Initializing MCP client for {}", server_url);
        let client = Arc::new(McpClient::new(server_url)?);
        clients.insert(server_url.to_string(), client.clone());
        Ok(client)
    }

    /// Make a request to the server handling the given resource.
    ///
    /// # Arguments
    ///
    /// * `resource` - The resource name to call.
    /// * `params` - The parameter payload to send along.
    ///
    /// # Returns
    ///
    /// The response's `data` payload on success, or `None` on any failure.
    /// Failures — a protocol-reported error as much as a transport failure —
    /// are logged and never surfaced to the caller.
    pub async fn call(&self, resource: &str, params: Value) -> Option<Value> {
        let client = match self.client_for(resource).await {
            Ok(client) => client,
            Err(e) => {
                error!("Unexpected MCP error ({}): {}", resource, e);
                return None;
            }
        };

        debug!("Calling MCP resource {} with params {}", resource, params);
        match client.request(resource, &params).await {
            Ok(McpResponse {
                error: Some(err), ..
            }) => {
                error!("MCP error ({}): {}", resource, err);
                None
            }
            Ok(response) => response.data,
            Err(e) => {
                error!("Unexpected MCP error ({}): {}", resource, e);
                None
            }
        }
    }

    /// Make a request and deserialize the `data` payload into `T`.
    ///
    /// # Arguments
    ///
    /// * `resource` - The resource name to call.
    /// * `params` - The parameter payload to send along.
    ///
    /// # Returns
    ///
    /// The deserialized payload, or `None` if the call failed or the payload
    /// did not match `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, resource: &str, params: Value) -> Option<T> {
        let data = self.call(resource, params).await?;
        match serde_json::from_value(data) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(
                    "MCP error ({}): response data did not deserialize: {}",
                    resource, e
                );
                None
            }
        }
    }
}
