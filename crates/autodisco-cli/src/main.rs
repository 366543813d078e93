//! autodisco-cli: one-shot cache-cluster discovery from the command line.
//!
//! Polls a configuration endpoint once and prints the cluster's nodes,
//! either as `ip:port` lines for scripts or as a readable config view.

mod format;

use std::process::ExitCode;
use std::time::Duration;

use autodisco::{parse_timeout, ConfigPoller, ErrorKind, PollerConfig, Trailer};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::debug;

/// Discover the nodes of an auto-scaling cache cluster.
#[derive(Parser)]
#[command(name = "autodisco-cli", version, about)]
struct Args {
    /// Configuration endpoint as host:port.
    #[arg(env = "AUTODISCO_ENDPOINT")]
    endpoint: String,

    /// dial and reply timeout (e.g. "500ms", "2s"). default: 1s
    #[arg(short, long, env = "AUTODISCO_TIMEOUT", value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// accept replies that omit the blank line before END
    #[arg(long)]
    lenient: bool,

    /// log the raw request and reply bytes to stderr
    #[arg(short, long)]
    verbose: bool,

    /// how to print the result
    #[arg(short, long, value_enum, default_value_t = Output::Servers)]
    output: Output,
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    /// one ip:port per line
    Servers,
    /// version and numbered node list
    Config,
    /// pretty-printed JSON
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "autodisco=debug"
    } else {
        "autodisco=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let trailer = if args.lenient {
        Trailer::Lenient
    } else {
        Trailer::Strict
    };
    let config = PollerConfig::new(args.endpoint.clone())
        .with_timeout(args.timeout.unwrap_or(Duration::ZERO))
        .with_trailer(trailer)
        .with_wire_tracing(args.verbose);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", format!("failed to create runtime: {e}").red());
            return ExitCode::FAILURE;
        }
    };

    debug!(endpoint = %config.endpoint, "polling");
    let result = rt.block_on(ConfigPoller::new(config).get());

    let cluster = match result {
        Ok(cluster) => cluster,
        Err(e) => {
            let context = match e.kind() {
                ErrorKind::Connection => "could not connect",
                ErrorKind::Transport => "could not send request",
                ErrorKind::Read => "could not read reply",
                ErrorKind::Decode => "endpoint sent an invalid reply",
            };
            eprintln!("{}", format!("{context}: {e}").red());
            return ExitCode::FAILURE;
        }
    };

    let rendered = match args.output {
        Output::Servers => format::format_servers(&cluster),
        Output::Config => format::format_config(&cluster),
        Output::Json => match format::format_json(&cluster) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("{}", format!("failed to encode json: {e}").red());
                return ExitCode::FAILURE;
            }
        },
    };
    println!("{rendered}");
    ExitCode::SUCCESS
}
