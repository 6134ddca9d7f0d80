//! domain_probe library: single-domain diagnostic probing
//!
//! This library gathers DNS records, HTTPS response headers, and TLS
//! certificate metadata for one domain and renders a plain-text report.
//! Each component converts its own failures into typed [`ProbeError`] values;
//! the driver never short-circuits, so a report is always produced.
//!
//! # Example
//!
//! ```no_run
//! use domain_probe::{config::Opt, render_report, run_probe};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opt = Opt::default();
//! let report = run_probe("example.com", &opt).await?;
//! render_report(&report, &mut std::io::stdout().lock())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod dns;
pub mod error_handling;
pub mod http;
pub mod initialization;
pub mod models;
pub mod nslookup;
pub mod report;
pub mod tls;

// Re-export public API
pub use error_handling::ProbeError;
pub use models::{CertificateReport, DomainReport, RecordKind, RecordSet};
pub use report::render_report;
pub use run::run_probe;

// Internal run module (contains the probe driver)
mod run {
    use anyhow::{Context, Result};

    use crate::config::Opt;
    use crate::initialization::{init_client, init_resolver};
    use crate::models::{DomainReport, RecordKind, RecordSet, EXTERNAL_RECORD_KINDS};
    use crate::{dns, http, nslookup, tls};

    /// Probes a domain and gathers the full report.
    ///
    /// Runs strictly in sequence: the A and AAAA resolver lookups, the five
    /// external record lookups, the header fetch, then the certificate
    /// inspection. Component failures are stored as values in the report and
    /// never abort the sequence.
    ///
    /// # Errors
    ///
    /// Only resource construction (the HTTP client) can fail here; probe
    /// failures are carried inside the returned [`DomainReport`].
    pub async fn run_probe(domain: &str, opt: &Opt) -> Result<DomainReport> {
        let resolver = init_resolver();
        let client = init_client(opt).context("Failed to initialize HTTP client")?;

        log::info!("probing {domain}");

        let mut records = RecordSet::default();
        records.insert(RecordKind::A, dns::resolve_ipv4(domain, &resolver).await);
        records.insert(RecordKind::Aaaa, dns::resolve_ipv6(domain, &resolver).await);
        for kind in EXTERNAL_RECORD_KINDS {
            records.insert(kind, nslookup::lookup(domain, kind).await);
        }
        debug_assert!(records.is_complete());

        let headers = http::fetch_headers(&client, domain).await;
        let certificate = tls::inspect_certificate(domain).await;

        Ok(DomainReport {
            domain: domain.to_string(),
            records,
            headers,
            certificate,
        })
    }
}
