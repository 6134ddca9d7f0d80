//! Application initialization and resource setup.
//!
//! Provides the logger, the DNS resolver, the HTTP client, and the rustls
//! crypto provider. All fallible initializers return proper error types.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use hickory_resolver::TokioAsyncResolver;
use log::LevelFilter;
use reqwest::ClientBuilder;
use rustls::crypto::{ring::default_provider, CryptoProvider};

use crate::config::{LogFormat, Opt, DNS_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. The logger reads from the
/// `RUST_LOG` environment variable by default, but the provided `level`
/// parameter overrides it, so `RUST_LOG=debug` works for quick debugging
/// while `--log-level` keeps explicit CLI control.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if logger setup fails (for
/// example when a logger is already installed).
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Info);
    // Suppress hickory warnings about malformed DNS messages; they are
    // expected on truncated responses and handled internally
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("domain_probe", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };
                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}

/// Initializes the crypto provider for TLS operations.
///
/// Must be called before any TLS connections are established.
pub fn init_crypto_provider() {
    // Reinstalling the provider is harmless, so the return value is ignored
    let _ = CryptoProvider::install_default(default_provider());
}

/// Initializes the DNS resolver used for the A/AAAA lookups.
///
/// Uses the default resolver configuration with a query timeout, reduced
/// retry attempts, and search-domain appending disabled.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}

/// Initializes the HTTP client used for the header fetch.
///
/// Configured with the User-Agent and timeout from the options; certificate
/// validation stays at the rustls defaults. Redirects are disabled so a 3xx
/// answer reports its own header block (including `Location`) instead of the
/// redirect target's.
///
/// # Errors
///
/// Returns a `reqwest::Error` wrapped in `InitializationError` if client
/// creation fails.
pub fn init_client(opt: &Opt) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(opt.timeout_seconds))
        .user_agent(opt.user_agent.clone())
        .build()?;
    Ok(client)
}
