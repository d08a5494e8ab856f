use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tracing::debug;

use domain::ConnectivityProbe;

/// Connectivity check backed by a bounded TCP connect attempt.
///
/// Each call opens (and immediately drops) a connection to the probe
/// address; the result is never cached, so routing decisions always see
/// the current network state.
pub struct TcpProbe {
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        Self {
            address: format!("{}:{}", host, port),
            timeout,
        }
    }
}

#[async_trait]
impl ConnectivityProbe for TcpProbe {
    async fn is_connected(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.address)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!(address = %self.address, error = %e, "connectivity probe failed");
                false
            }
            Err(_) => {
                debug!(address = %self.address, "connectivity probe timed out");
                false
            }
        }
    }
}
