//! `[serve]` section configuration.
//!
//! Contains HTTP server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "0.0.0.0"       # Network interface (0.0.0.0 = all interfaces)
//! port = 8080                 # HTTP port number
//! reload_template = false     # Re-read the template on every request
//! ```
//!
//! Use `interface = "127.0.0.1"` to restrict the server to localhost.
//!
//! Set `reload_template = true` while editing the template to see changes
//! without restarting (the asset index is never rebuilt while serving).

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `0.0.0.0` (default): all interfaces
    /// - `127.0.0.1`: localhost only
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Re-read the template file on every request.
    pub reload_template: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            reload_template: false,
        }
    }
}
