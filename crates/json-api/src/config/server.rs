//! Server Config

use clap::Args;

/// Listener settings for the HTTP server.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Address to listen on
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port`, as accepted by the TCP listener.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
