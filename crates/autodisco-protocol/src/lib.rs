//! autodisco-protocol: wire format for cache-cluster auto-discovery.
//!
//! A configuration endpoint answers `config get cluster` with a short,
//! strictly framed text reply listing the cluster's cache nodes. This
//! crate decodes that reply into a [`ClusterConfig`] and can encode one
//! back into wire bytes.
//!
//! # quick start
//!
//! ```
//! use bytes::BytesMut;
//! use autodisco_protocol::{parse_config, ClusterConfig, Node};
//!
//! let input = b"CONFIG cluster 0 20\r\n3\r\nh|10.0.0.1|11211\n\r\nEND\r\n";
//! let (config, consumed) = parse_config(input).unwrap().unwrap();
//! assert_eq!(consumed, input.len());
//! assert_eq!(config.version, 3);
//! assert_eq!(config.endpoints(), vec!["10.0.0.1:11211"]);
//!
//! let mut buf = BytesMut::new();
//! config.serialize(&mut buf);
//! assert_eq!(&buf[..], &input[..]);
//! ```

pub mod error;
pub mod parse;
mod serialize;
pub mod types;

pub use error::ProtocolError;
pub use parse::{parse_config, parse_config_with, Trailer, MAX_LINE_LEN};
pub use types::{ClusterConfig, Node, CONFIG_END, CONFIG_GET_CLUSTER, CONFIG_PREFIX};
