//! Configuration management for the resource router.
//!
//! This module provides the `ClientConfig` struct and related functionality for
//! configuring the router. It supports both direct configuration and environment
//! variable-based configuration.
//!
//! # Configuration Sources
//!
//! - **Direct Configuration**: Manually specify all configuration fields
//! - **Environment Variables**: Automatically load configuration from environment variables
//!
//! # Examples
//!
//! ## Direct Configuration
//!
//! ```rust
//! use std::collections::HashMap;
//! use mcp_resource_router::client_config::ClientConfig;
//!
//! let config = ClientConfig {
//!     default_server_url: "http://mcp-server:8000".to_string(),
//!     server_urls: HashMap::from([(
//!         "weather".to_string(),
//!         "http://weather-server:8000".to_string(),
//!     )]),
//! };
//! ```
//!
//! ## Environment Variable Configuration
//!
//! ```rust,no_run
//! use mcp_resource_router::client_config::ClientConfig;
//!
//! // Requires the MCP_SERVER_URL environment variable
//! let config = ClientConfig::from_env()?;
//! # Ok::<(), mcp_resource_router::client_config::Error>(())
//! ```

use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Environment variable is not set: {1}")]
    EnvVar(std::env::VarError, String),
}

/// Configuration settings for the resource router.
///
/// This struct contains all the information needed to route resource calls to
/// their backend servers: a default server URL, plus per-resource overrides for
/// resources that are served elsewhere.
///
/// # Fields
///
/// - `default_server_url`: The server handling every resource without an override
/// - `server_urls`: Per-resource server URL overrides
///
/// # Examples
///
/// ## Minimal Configuration
///
/// ```rust
/// use mcp_resource_router::client_config::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.default_server_url, "http://localhost:8000");
/// ```
///
/// ## Per-Resource Overrides
///
/// ```rust
/// use std::collections::HashMap;
/// use mcp_resource_router::client_config::ClientConfig;
///
/// let config = ClientConfig {
///     default_server_url: "http://localhost:8000".to_string(),
///     server_urls: HashMap::from([
///         ("weather".to_string(), "http://weather:8000".to_string()),
///         ("news".to_string(), "http://news:8000".to_string()),
///     ]),
/// };
/// assert_eq!(config.server_url_for("weather"), "http://weather:8000");
/// assert_eq!(config.server_url_for("stocks"), "http://localhost:8000");
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// The server URL used for every resource without an explicit override.
    ///
    /// This should be the base URL of the backend server, including the
    /// protocol (http/https) and port if necessary.
    /// Example: "http://mcp-server:8000"
    pub default_server_url: String,

    /// Per-resource server URL overrides.
    ///
    /// Maps resource names to the URL of the server handling them. Resources
    /// absent from this map are routed to `default_server_url`.
    pub server_urls: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_server_url: "http://localhost:8000".to_string(),
            server_urls: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration from environment variables.
    ///
    /// `MCP_SERVER_URL` is required and becomes the default server URL.
    /// `MCP_RESOURCE_URLS` is optional and holds per-resource overrides as a
    /// comma-separated list of `resource=url` pairs, for example
    /// `weather=http://weather:8000,news=http://news:8000`. Malformed pairs
    /// are skipped.
    ///
    /// # Returns
    ///
    /// A new configuration instance.
    pub fn from_env() -> Result<Self, Error> {
        let default_server_url = std::env::var("MCP_SERVER_URL")
            .map_err(|e| Error::EnvVar(e, "MCP_SERVER_URL".to_string()))?;
        let server_urls = std::env::var("MCP_RESOURCE_URLS")
            .map(|s| parse_resource_urls(&s))
            .unwrap_or_default();
        Ok(Self {
            default_server_url,
            server_urls,
        })
    }

    /// Resolve the server URL for a given resource.
    ///
    /// # Arguments
    ///
    /// * `resource` - The resource name to resolve.
    ///
    /// # Returns
    ///
    /// The override URL for the resource if one is configured, otherwise the
    /// default server URL.
    pub fn server_url_for(&self, resource: &str) -> &str {
        self.server_urls
            .get(resource)
            .unwrap_or(&self.default_server_url)
    }
}

fn parse_resource_urls(s: &str) -> HashMap<String, String> {
    s.split(',')
        .filter_map(|pair| {
            let (resource, url) = pair.split_once('=')?;
            let resource = resource.trim();
            let url = url.trim();
            if resource.is_empty() || url.is_empty() {
                return None;
            }
            Some((resource.to_string(), url.to_string()))
        })
        .collect()
}
