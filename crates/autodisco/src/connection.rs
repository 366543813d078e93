//! Async TCP session with a configuration endpoint.
//!
//! Handles the timed dial, sending `config get cluster`, and reading the
//! reply into a buffer until the decoder accepts it.

use std::time::Duration;

use autodisco_protocol::{parse_config_with, ClusterConfig, Trailer, CONFIG_GET_CLUSTER};
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::config::resolve_timeout;
use crate::error::DiscoveryError;

/// A single TCP connection to a configuration endpoint.
///
/// Owns the socket; dropping the session closes it.
pub struct Session {
    stream: TcpStream,
    read_buf: BytesMut,
    timeout: Duration,
    trace_wire: bool,
}

impl Session {
    /// Dials `endpoint` (`host:port`), giving up after `timeout`.
    ///
    /// A zero timeout means [`DEFAULT_TIMEOUT`](crate::DEFAULT_TIMEOUT).
    pub async fn open(
        endpoint: &str,
        timeout: Duration,
        trace_wire: bool,
    ) -> Result<Self, DiscoveryError> {
        if endpoint.is_empty() {
            return Err(DiscoveryError::Connect {
                endpoint: String::new(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty endpoint"),
            });
        }

        let timeout = resolve_timeout(timeout);

        if trace_wire {
            debug!(endpoint, ?timeout, "dialing configuration endpoint");
        }

        let stream = match tokio::time::timeout(timeout, TcpStream::connect(endpoint)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(DiscoveryError::Connect {
                    endpoint: endpoint.to_owned(),
                    source,
                })
            }
            Err(_) => {
                return Err(DiscoveryError::ConnectTimeout {
                    endpoint: endpoint.to_owned(),
                    timeout,
                })
            }
        };

        Ok(Self {
            stream,
            read_buf: BytesMut::with_capacity(4096),
            timeout,
            trace_wire,
        })
    }

    /// Writes the `config get cluster` request and flushes it.
    pub async fn send_request(&mut self) -> Result<(), DiscoveryError> {
        if self.trace_wire {
            debug!(request = ?String::from_utf8_lossy(CONFIG_GET_CLUSTER), "sending request");
        }
        self.stream
            .write_all(CONFIG_GET_CLUSTER)
            .await
            .map_err(DiscoveryError::Transport)?;
        self.stream.flush().await.map_err(DiscoveryError::Transport)
    }

    /// Reads until a complete reply has been decoded.
    ///
    /// The whole reply must arrive within the session timeout, counted from
    /// this call.
    pub async fn read_config(&mut self, trailer: Trailer) -> Result<ClusterConfig, DiscoveryError> {
        let timeout = self.timeout;
        match tokio::time::timeout(timeout, self.read_until_decoded(trailer)).await {
            Ok(result) => result,
            Err(_) => Err(DiscoveryError::ReadTimeout(timeout)),
        }
    }

    async fn read_until_decoded(&mut self, trailer: Trailer) -> Result<ClusterConfig, DiscoveryError> {
        loop {
            // try to decode what we have
            if !self.read_buf.is_empty() {
                if let Some((config, consumed)) = parse_config_with(&self.read_buf, trailer)? {
                    let _ = self.read_buf.split_to(consumed);
                    return Ok(config);
                }
            }

            // read more data from the socket
            let start = self.read_buf.len();
            let n = self
                .stream
                .read_buf(&mut self.read_buf)
                .await
                .map_err(DiscoveryError::Read)?;
            if n == 0 {
                return Err(DiscoveryError::Disconnected);
            }

            if self.trace_wire {
                debug!(
                    bytes = n,
                    chunk = ?String::from_utf8_lossy(&self.read_buf[start..]),
                    "read reply chunk"
                );
            }
        }
    }

    /// Closes the connection.
    pub async fn shutdown(mut self) {
        let _ = self.stream.shutdown().await;
    }
}
