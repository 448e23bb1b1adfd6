//! # Operator Console
//!
//! Line protocol standing in for the tracker front end:
//!
//! ```text
//! announce <infohash-hex> [signature-hex]   → allow | deny <failure reason>
//! scrape [infohash-hex ...]                 → allow
//! metrics                                   → Prometheus text exposition
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use gate_approval::TrackerHook;
use gate_telemetry::ApprovalMetrics;
use gate_types::{AnnounceRequest, InfoHash, ParseError, ScrapeRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Announce(AnnounceRequest),
    Scrape(ScrapeRequest),
    Metrics,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("usage: announce <infohash-hex> [signature-hex]")]
    AnnounceUsage,

    #[error("{0}")]
    InvalidInfoHash(#[from] ParseError),
}

/// Parse one input line. `Ok(None)` for blank or comment lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, ConsoleError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let command = match verb {
        "announce" => {
            let info_hash = parts.next().ok_or(ConsoleError::AnnounceUsage)?;
            let mut request = AnnounceRequest::new(InfoHash::from_hex(info_hash)?);
            if let Some(sig) = parts.next() {
                request = request.with_signature(sig);
            }
            if parts.next().is_some() {
                return Err(ConsoleError::AnnounceUsage);
            }
            Command::Announce(request)
        }
        "scrape" => Command::Scrape(ScrapeRequest {
            info_hashes: parts.map(InfoHash::from_hex).collect::<Result<_, _>>()?,
        }),
        "metrics" => Command::Metrics,
        other => return Err(ConsoleError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Run a command against `hook`, returning the response text.
pub fn execute<H: TrackerHook>(hook: &H, metrics: &ApprovalMetrics, command: &Command) -> String {
    match command {
        Command::Announce(request) => match hook.handle_announce(request) {
            Ok(()) => "allow".to_string(),
            Err(e) => format!("deny {}", e.reason()),
        },
        Command::Scrape(request) => match hook.handle_scrape(request) {
            Ok(()) => "allow".to_string(),
            Err(e) => format!("deny {}", e.reason()),
        },
        Command::Metrics => metrics
            .encode()
            .unwrap_or_else(|e| format!("error {}", e)),
    }
}

/// Parse and execute; `None` for ignored lines.
pub fn handle_line<H: TrackerHook>(hook: &H, metrics: &ApprovalMetrics, line: &str) -> Option<String> {
    match parse_line(line) {
        Ok(Some(command)) => Some(execute(hook, metrics, &command)),
        Ok(None) => None,
        Err(e) => Some(format!("error {}", e)),
    }
}
