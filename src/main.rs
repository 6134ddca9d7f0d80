//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_probe` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading the domain from the operator (argument or stdin prompt)
//! - Writing the rendered report to stdout
//!
//! All probe functionality is implemented in the library crate. Component
//! failures appear inline in the report; once the probe sequence completes
//! the process exits 0 regardless of how many components failed.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use domain_probe::config::Opt;
use domain_probe::initialization::{init_crypto_provider, init_logger_with};
use domain_probe::{render_report, run_probe};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    let log_level = opt.log_level.clone();
    let log_format = opt.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    init_crypto_provider();

    let domain = match opt.domain.clone() {
        Some(domain) => domain,
        None => prompt_for_domain()?,
    };
    let domain = domain.trim().to_string();

    let report = run_probe(&domain, &opt).await?;

    let stdout = io::stdout();
    render_report(&report, &mut stdout.lock()).context("Failed to write report")?;
    Ok(())
}

/// Reads the domain from standard input with an interactive prompt.
fn prompt_for_domain() -> Result<String> {
    print!("Enter the domain to retrieve DNS, header, and SSL certificate information: ");
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read domain from stdin")?;
    Ok(line)
}
