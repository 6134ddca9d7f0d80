//! Error taxonomy for probe components and startup.
//!
//! Every probe component converts its own failures into a [`ProbeError`] and
//! returns it in-band; nothing is raised past the driver. The driver's only
//! failure handling is printing the error text in the matching report section.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure kinds produced by the probe components.
///
/// Each variant carries the human-readable description that the report prints
/// inline. Callers discriminate on the variant; the text is for the operator.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Forward DNS resolution (A or AAAA) failed.
    #[error("DNS resolution failed: {0}")]
    Resolution(String),

    /// The external lookup tool exited non-zero or could not be run.
    #[error("record lookup failed: {0}")]
    ExternalTool(String),

    /// TCP connection could not be established (or timed out).
    #[error("connection failed: {0}")]
    Connection(String),

    /// TLS handshake with the peer failed.
    #[error("TLS handshake failed: {0}")]
    Handshake(String),

    /// The peer responded, but not in a way we could interpret.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A certificate validity timestamp did not match the expected
    /// `<abbrev-month> <day> <HH:MM:SS> <year> <zone>` format.
    #[error("unrecognized certificate timestamp: {0:?}")]
    TimestampParse(String),
}
