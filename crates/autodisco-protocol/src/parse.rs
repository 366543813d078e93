//! Single-pass decoder for `config get cluster` replies.
//!
//! Operates on buffered byte slices. The caller reads from the network
//! into a buffer and calls [`parse_config`] again whenever more data
//! arrives; the decoder itself does no I/O.
//!
//! A reply is four framed parts, each line ending in `\n`:
//!
//! ```text
//! CONFIG <key> <flags> <bytelen>\r\n
//! <version>\r\n
//! <host>|<ip>|<port> <host>|<ip>|<port> ...\n
//! \r\n
//! END\r\n
//! ```
//!
//! Any structural deviation is fatal. There is no partial result: a reply
//! either decodes completely or yields an error.

use std::io::Cursor;

use crate::error::ProtocolError;
use crate::types::{ClusterConfig, Node, CONFIG_END, CONFIG_PREFIX};

/// Longest line the decoder will buffer while waiting for a terminator.
/// A node list for a few hundred nodes is well under this.
pub const MAX_LINE_LEN: usize = 1024 * 1024;

/// How the line between the node list and `END` is handled.
///
/// Endpoints emit a stray `\r\n` after the node list. `Strict` always
/// consumes one line there before expecting `END\r\n`. `Lenient` also
/// accepts `END\r\n` directly after the node list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Trailer {
    #[default]
    Strict,
    Lenient,
}

/// Decodes a reply using the [`Trailer::Strict`] framing.
///
/// Returns `Ok(Some((config, consumed)))` once a complete reply was decoded,
/// `Ok(None)` if the buffer doesn't contain enough data yet,
/// or `Err(...)` if the data is malformed.
#[inline]
pub fn parse_config(buf: &[u8]) -> Result<Option<(ClusterConfig, usize)>, ProtocolError> {
    parse_config_with(buf, Trailer::Strict)
}

/// Decodes a reply with an explicit [`Trailer`] mode.
pub fn parse_config_with(
    buf: &[u8],
    trailer: Trailer,
) -> Result<Option<(ClusterConfig, usize)>, ProtocolError> {
    if buf.is_empty() {
        return Ok(None);
    }

    let mut cursor = Cursor::new(buf);

    match try_parse(&mut cursor, trailer) {
        Ok(config) => {
            let consumed = cursor.position() as usize;
            Ok(Some((config, consumed)))
        }
        Err(ProtocolError::Incomplete) => Ok(None),
        Err(e) => Err(e),
    }
}

fn try_parse(cursor: &mut Cursor<&[u8]>, trailer: Trailer) -> Result<ClusterConfig, ProtocolError> {
    // key, flags and byte length are framing only
    let header = read_line(cursor)?;
    if !header.starts_with(CONFIG_PREFIX) {
        return Err(ProtocolError::InvalidHeader {
            actual: lossy(trim_eol(header)),
        });
    }

    let version_line = trim_eol(read_line(cursor)?);
    let version = parse_u64_bytes(version_line)
        .ok_or_else(|| ProtocolError::InvalidVersion(lossy(version_line)))?;

    let nodes = parse_nodes(trim_eol(read_line(cursor)?))?;

    let mut last = read_line(cursor)?;
    if !(trailer == Trailer::Lenient && last == CONFIG_END) {
        // discard the stray line after the node list
        last = read_line(cursor)?;
    }
    if last != CONFIG_END {
        return Err(ProtocolError::InvalidTerminator {
            expected: lossy(CONFIG_END),
            actual: lossy(last),
        });
    }

    Ok(ClusterConfig { version, nodes })
}

/// Splits a node list on single spaces and decodes each descriptor.
fn parse_nodes(line: &[u8]) -> Result<Vec<Node>, ProtocolError> {
    if line.is_empty() {
        return Err(ProtocolError::EmptyNodeList);
    }
    let line = std::str::from_utf8(line).map_err(|_| ProtocolError::InvalidUtf8("node list"))?;
    line.split(' ').map(parse_node).collect()
}

fn parse_node(descriptor: &str) -> Result<Node, ProtocolError> {
    let fields: Vec<&str> = descriptor.split('|').collect();
    let [host, ip, port] = fields.as_slice() else {
        return Err(ProtocolError::InvalidNodeFields {
            descriptor: descriptor.to_owned(),
            fields: fields.len(),
        });
    };

    let port = port
        .parse::<u16>()
        .ok()
        .filter(|&p| p != 0)
        .ok_or_else(|| ProtocolError::InvalidPort {
            descriptor: descriptor.to_owned(),
            port: (*port).to_owned(),
        })?;

    Ok(Node {
        host: (*host).to_owned(),
        ip: (*ip).to_owned(),
        port,
    })
}

// ---------------------------------------------------------------------------
// low-level cursor helpers
// ---------------------------------------------------------------------------

/// Returns the bytes up to and including the next `\n`, and advances the
/// cursor past it.
fn read_line<'a>(cursor: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], ProtocolError> {
    let buf: &'a [u8] = *cursor.get_ref();
    let start = cursor.position() as usize;
    let rest = buf.get(start..).unwrap_or_default();

    match memchr::memchr(b'\n', rest) {
        Some(offset) if offset >= MAX_LINE_LEN => Err(ProtocolError::LineTooLong(MAX_LINE_LEN)),
        Some(offset) => {
            let end = start + offset + 1;
            cursor.set_position(end as u64);
            Ok(&buf[start..end])
        }
        None if rest.len() > MAX_LINE_LEN => Err(ProtocolError::LineTooLong(MAX_LINE_LEN)),
        None => Err(ProtocolError::Incomplete),
    }
}

/// Strips any trailing `\r` and `\n` bytes.
fn trim_eol(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|&b| b != b'\r' && b != b'\n')
        .map_or(0, |i| i + 1);
    &line[..end]
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parses an unsigned decimal integer directly from a byte slice.
/// Signs, whitespace and overflow are all rejected.
fn parse_u64_bytes(buf: &[u8]) -> Option<u64> {
    if buf.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in buf {
        if !b.is_ascii_digit() {
            return None;
        }
        n = n.checked_mul(10)?.checked_add((b - b'0') as u64)?;
    }
    Some(n)
}
