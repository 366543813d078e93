//! Direct-to-buffer encoding of configuration replies.
//!
//! Produces the exact bytes a configuration endpoint sends for a
//! `config get cluster` request. Integer-to-string conversion uses `itoa`
//! for stack-based formatting.

use bytes::BufMut;
use bytes::BytesMut;

use crate::types::{ClusterConfig, CONFIG_END, CONFIG_PREFIX};

/// Cache key reported in the reply header.
const CLUSTER_KEY: &[u8] = b"cluster";

impl ClusterConfig {
    /// Serializes this config as a full reply into the provided buffer.
    ///
    /// The header's byte length covers the version and node lines, the
    /// same block a memcache `VALUE` length would cover.
    pub fn serialize(&self, dst: &mut BytesMut) {
        let mut body = BytesMut::with_capacity(64 + self.nodes.len() * 64);
        write_u64(self.version, &mut body);
        body.put_slice(b"\r\n");
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                body.put_u8(b' ');
            }
            body.put_slice(node.host.as_bytes());
            body.put_u8(b'|');
            body.put_slice(node.ip.as_bytes());
            body.put_u8(b'|');
            write_u64(node.port as u64, &mut body);
        }
        body.put_u8(b'\n');

        dst.put_slice(CONFIG_PREFIX);
        dst.put_u8(b' ');
        dst.put_slice(CLUSTER_KEY);
        dst.put_slice(b" 0 ");
        write_u64(body.len() as u64, dst);
        dst.put_slice(b"\r\n");
        dst.put_slice(&body);
        dst.put_slice(b"\r\n");
        dst.put_slice(CONFIG_END);
    }
}

fn write_u64(val: u64, dst: &mut BytesMut) {
    let mut buf = itoa::Buffer::new();
    dst.put_slice(buf.format(val).as_bytes());
}
