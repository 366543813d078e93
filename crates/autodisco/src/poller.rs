//! One-shot polling of a configuration endpoint.

use std::time::Duration;

use autodisco_protocol::{ClusterConfig, Trailer};
use tracing::debug;

use crate::config::PollerConfig;
use crate::connection::Session;
use crate::error::DiscoveryError;

/// Fetches cluster state from one configuration endpoint.
///
/// Each [`get`](ConfigPoller::get) opens its own connection and closes it
/// before returning, so pollers share nothing and can run concurrently.
#[derive(Debug, Clone)]
pub struct ConfigPoller {
    config: PollerConfig,
}

impl ConfigPoller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Performs one full exchange: dial, request, decode, close.
    ///
    /// Returns a fully decoded config or an error, never a partial result.
    pub async fn get(&self) -> Result<ClusterConfig, DiscoveryError> {
        let timeout = self.config.effective_timeout();
        let mut session =
            Session::open(&self.config.endpoint, timeout, self.config.trace_wire).await?;

        let result = exchange(&mut session, self.config.trailer).await;
        session.shutdown().await;

        if self.config.trace_wire {
            match &result {
                Ok(config) => debug!(
                    endpoint = %self.config.endpoint,
                    version = config.version,
                    nodes = config.nodes.len(),
                    "poll succeeded"
                ),
                Err(e) => debug!(endpoint = %self.config.endpoint, error = %e, "poll failed"),
            }
        }

        result
    }
}

async fn exchange(session: &mut Session, trailer: Trailer) -> Result<ClusterConfig, DiscoveryError> {
    session.send_request().await?;
    session.read_config(trailer).await
}

/// Polls `endpoint` once. A zero `timeout` means the 1 second default.
pub async fn poll(endpoint: &str, timeout: Duration) -> Result<ClusterConfig, DiscoveryError> {
    ConfigPoller::new(PollerConfig::new(endpoint).with_timeout(timeout))
        .get()
        .await
}

/// Polls `endpoint` with the default timeout and returns one `ip:port`
/// string per node, in the order the endpoint listed them.
pub async fn list_servers(endpoint: &str) -> Result<Vec<String>, DiscoveryError> {
    let config = poll(endpoint, Duration::ZERO).await?;
    Ok(config.endpoints())
}
