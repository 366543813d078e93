//! Cluster configuration types.
//!
//! A [`ClusterConfig`] is the decoded form of one `config get cluster`
//! reply. Both types are plain values: the decoder builds them and callers
//! consume them, typically by projecting nodes into `ip:port` endpoints.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The request sent to a configuration endpoint.
pub const CONFIG_GET_CLUSTER: &[u8] = b"config get cluster\r\n";

/// Every valid reply starts with this token.
pub const CONFIG_PREFIX: &[u8] = b"CONFIG";

/// The line that terminates a reply.
pub const CONFIG_END: &[u8] = b"END\r\n";

/// A snapshot of cluster membership.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterConfig {
    /// Bumped by the service every time membership changes.
    pub version: u64,

    /// Cache nodes, in the order the endpoint listed them.
    pub nodes: Vec<Node>,
}

/// One cache-serving process in the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// DNS name of the node.
    pub host: String,
    /// Textual IP address.
    pub ip: String,
    /// Always in 1..=65535.
    pub port: u16,
}

impl Node {
    /// Returns the `ip:port` connection target for a memcache client.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

impl ClusterConfig {
    /// Returns one `ip:port` endpoint per node, preserving node order.
    pub fn endpoints(&self) -> Vec<String> {
        self.nodes.iter().map(Node::endpoint).collect()
    }
}
