//! Output formatting for discovered configs.
//!
//! Host names and IPs come straight from the endpoint, so everything is
//! sanitized before it reaches the terminal.

use autodisco::ClusterConfig;
use colored::Colorize;

/// One `ip:port` per line, uncolored so it can be piped.
pub fn format_servers(config: &ClusterConfig) -> String {
    config
        .endpoints()
        .iter()
        .map(|e| sanitize(e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable view with the version and a numbered node list.
///
/// ```text
/// (version) 12
/// 1) hostA 10.82.235.120:11211
/// 2) hostB 10.80.249.27:11211
/// ```
pub fn format_config(config: &ClusterConfig) -> String {
    let mut lines = Vec::with_capacity(config.nodes.len() + 1);
    lines.push(format!(
        "{} {}",
        "(version)".yellow(),
        config.version.to_string().yellow()
    ));
    for (i, node) in config.nodes.iter().enumerate() {
        let num = format!("{})", i + 1);
        lines.push(format!(
            "{num} {} {}",
            sanitize(&node.host).green(),
            sanitize(&node.endpoint()).cyan()
        ));
    }
    lines.join("\n")
}

/// Pretty-printed JSON of the whole config.
pub fn format_json(config: &ClusterConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(config)
}

/// Strips ANSI escape sequences and all other control characters.
fn sanitize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            // skip the ESC and the rest of the ANSI sequence
            if let Some('[') = chars.next() {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else if !ch.is_control() {
            out.push(ch);
        }
    }
    out
}
