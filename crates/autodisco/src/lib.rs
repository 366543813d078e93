//! autodisco: member discovery for auto-scaling cache clusters.
//!
//! A managed cache cluster publishes a stable configuration endpoint that
//! answers `config get cluster` with the current node list. This crate
//! polls that endpoint once per call and hands back the nodes, either as a
//! [`ClusterConfig`] or as `ip:port` strings ready for a memcache client.
//!
//! Scheduling repeated polls, retrying, and diffing successive configs are
//! left to the caller. Each poll is independent.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), autodisco::DiscoveryError> {
//! let servers = autodisco::list_servers("mycluster.cfg.use1.cache.amazonaws.com:11211").await?;
//! for server in servers {
//!     println!("{server}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
mod error;
mod poller;

pub use autodisco_protocol::{ClusterConfig, Node, ProtocolError, Trailer};
pub use config::{parse_timeout, PollerConfig, DEFAULT_TIMEOUT};
pub use connection::Session;
pub use error::{DiscoveryError, ErrorKind};
pub use poller::{list_servers, poll, ConfigPoller};
