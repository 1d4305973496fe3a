//! Command-line configuration for the Sift binaries.
//!
//! Every flag has a default, so both binaries run without arguments against a local
//! data-storage service.
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BIND: &str = "tcp://*:5554";
pub const DEFAULT_DOWNSTREAM: &str = "tcp://localhost:5556";
pub const DEFAULT_ADDRESS: &str = "tcp://localhost:5554";

/// Settings for the search server.
#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Endpoint to accept search requests on
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Endpoint of the data-storage service
    #[arg(long, default_value = DEFAULT_DOWNSTREAM)]
    pub downstream: String,

    /// How long to wait for the data-storage service; 0 waits forever
    #[arg(long, default_value_t = 5000)]
    pub downstream_timeout_ms: u64,
}

impl ServerConfig {
    pub fn downstream_timeout(&self) -> Option<Duration> {
        match self.downstream_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

/// Settings for the one-shot client.
#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct ClientConfig {
    /// Endpoint of the search server
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// How long to wait for a reply; 0 waits forever
    #[arg(long, default_value_t = 10000)]
    pub timeout_ms: u64,

    /// Request as a JSON object, e.g. '{"action":"search","table":"users"}'
    pub request: String,
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}
