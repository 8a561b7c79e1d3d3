//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;

const BIND_ADDR_VAR: &str = "ROSTER_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration for creating the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a configuration with an explicit bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read the configuration from the environment.
    ///
    /// `ROSTER_BIND_ADDR` overrides the default of `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the configured address does not parse.
    pub fn from_env() -> std::io::Result<Self> {
        let raw = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let bind_addr = raw
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid {BIND_ADDR_VAR} {raw:?}: {e}")))?;
        Ok(Self { bind_addr })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
