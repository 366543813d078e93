//! Poller configuration.
//!
//! [`PollerConfig`] carries everything a single poll needs. There is no
//! global state: wire tracing is a per-poller option.

use std::time::Duration;

use autodisco_protocol::Trailer;

/// Dial and reply timeout used when none (or zero) is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Settings for polling one configuration endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// `host:port` of the configuration endpoint.
    pub endpoint: String,

    /// Bounds the dial, and separately the wait for the full reply.
    /// Zero means [`DEFAULT_TIMEOUT`].
    pub timeout: Duration,

    /// Framing of the line between the node list and `END`.
    pub trailer: Trailer,

    /// Emit `tracing` debug events for the raw request and reply bytes.
    pub trace_wire: bool,
}

impl PollerConfig {
    /// Creates a config for `endpoint` with default settings.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::ZERO,
            trailer: Trailer::Strict,
            trace_wire: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_trailer(mut self, trailer: Trailer) -> Self {
        self.trailer = trailer;
        self
    }

    pub fn with_wire_tracing(mut self, enabled: bool) -> Self {
        self.trace_wire = enabled;
        self
    }

    /// Returns the timeout to actually use, substituting the default for zero.
    pub fn effective_timeout(&self) -> Duration {
        resolve_timeout(self.timeout)
    }
}

/// Maps a zero timeout to [`DEFAULT_TIMEOUT`].
pub fn resolve_timeout(timeout: Duration) -> Duration {
    if timeout.is_zero() {
        DEFAULT_TIMEOUT
    } else {
        timeout
    }
}

/// Parses a human-readable timeout string into a [`Duration`].
///
/// Supports suffixes: ms (milliseconds), s (seconds), m (minutes).
/// Plain numbers are treated as milliseconds. Case insensitive.
///
/// # Examples
///
/// - "250" → 250ms
/// - "500ms" → 500ms
/// - "2s" → 2s
/// - "1m" → 60s
pub fn parse_timeout(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty timeout string".into());
    }

    let lower = input.to_ascii_lowercase();

    // "ms" must be checked before "s" and "m"
    let (num_str, millis_per_unit) = if let Some(n) = lower.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = lower.strip_suffix('s') {
        (n, 1_000)
    } else if let Some(n) = lower.strip_suffix('m') {
        (n, 60_000)
    } else {
        (lower.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid timeout: '{input}'"))?;

    num.checked_mul(millis_per_unit)
        .map(Duration::from_millis)
        .ok_or_else(|| format!("timeout overflow: '{input}'"))
}
