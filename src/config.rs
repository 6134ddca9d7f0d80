//! Command-line options and tunable constants.

use clap::{Parser, ValueEnum};

// Network operation timeouts
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;

/// Port used for both the header fetch and the certificate inspection.
pub const HTTPS_PORT: u16 = 443;

/// External DNS lookup tool invoked as `nslookup -type=<KIND> <domain>`.
///
/// The tool inherits its own resolver configuration, which may differ from
/// the resolver used for the A/AAAA lookups.
pub const NSLOOKUP_BIN: &str = "nslookup";

/// Default User-Agent string for HTTP requests.
///
/// Uses a generic Chrome-like string without a specific version number to avoid
/// becoming outdated. Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages and above.
    Info,
    /// Debug messages and above.
    Debug,
    /// Everything.
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored.
    Plain,
    /// One JSON object per line.
    Json,
}

/// Command-line options.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// The domain may be given as a positional argument; when omitted, the binary
/// prompts for it on standard input.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// domain_probe example.com
///
/// # Prompt for the domain interactively
/// domain_probe
///
/// # With a custom HTTP timeout
/// domain_probe example.com --timeout-seconds 5
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "domain_probe",
    about = "Probes a domain for DNS records, HTTP headers, and TLS certificate details."
)]
pub struct Opt {
    /// Domain to probe (prompted on stdin when omitted)
    #[arg(value_parser)]
    pub domain: Option<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Default for Opt {
    fn default() -> Self {
        Opt {
            domain: None,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
