//! Plain-text report rendering.
//!
//! The renderer is a pure function of the [`DomainReport`]: failures were
//! already converted into values by the components, so every section prints
//! either its results or the inline error text.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::models::{CertificateReport, DomainReport};

/// Timestamp format used for the certificate validity fields.
const VALIDITY_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the full report for one domain to the given writer.
pub fn render_report(report: &DomainReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "DNS Information for domain: {}", report.domain)?;
    for (kind, outcome) in report.records.iter() {
        writeln!(out, "{} records:", kind.as_str())?;
        match outcome {
            Ok(lines) => {
                for line in lines {
                    writeln!(out, "{line}")?;
                }
            }
            Err(e) => writeln!(out, "{e}")?,
        }
        writeln!(out)?;
    }

    writeln!(out, "HTTP Headers:")?;
    match &report.headers {
        Ok(headers) => {
            for (name, value) in headers {
                writeln!(out, "{name}: {value}")?;
            }
        }
        Err(e) => writeln!(out, "Error: {e}")?,
    }
    writeln!(out)?;

    writeln!(out, "SSL Certificate Information:")?;
    match &report.certificate {
        Ok(cert) => render_certificate(cert, out)?,
        Err(e) => writeln!(out, "Error: {e}")?,
    }

    Ok(())
}

fn render_certificate(cert: &CertificateReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Subject: {}", format_attributes(&cert.subject))?;
    writeln!(out, "Issuer: {}", format_attributes(&cert.issuer))?;
    writeln!(
        out,
        "Valid From: {}",
        cert.valid_from.format(VALIDITY_DISPLAY_FORMAT)
    )?;
    writeln!(
        out,
        "Valid Until: {}",
        cert.valid_until.format(VALIDITY_DISPLAY_FORMAT)
    )?;
    writeln!(out, "Serial Number: {}", cert.serial_number)?;
    writeln!(out, "Version: {}", cert.version.as_deref().unwrap_or("N/A"))?;
    writeln!(out, "OCSP: {}", cert.ocsp.as_deref().unwrap_or("N/A"))?;
    Ok(())
}

fn format_attributes(attrs: &BTreeMap<String, String>) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::error_handling::ProbeError;
    use crate::models::{RecordKind, RecordSet, EXTERNAL_RECORD_KINDS};

    fn stub_certificate() -> CertificateReport {
        let mut subject = BTreeMap::new();
        subject.insert("commonName".to_string(), "example.test".to_string());
        let mut issuer = BTreeMap::new();
        issuer.insert("commonName".to_string(), "Test CA".to_string());
        CertificateReport {
            subject,
            issuer,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            serial_number: "0123ABCD".to_string(),
            version: Some("3".to_string()),
            ocsp: None,
        }
    }

    #[test]
    fn test_render_full_stub_report() {
        let mut records = RecordSet::default();
        records.insert(
            RecordKind::A,
            Err(ProbeError::Resolution("name does not exist".to_string())),
        );
        records.insert(
            RecordKind::Aaaa,
            Err(ProbeError::Resolution("name does not exist".to_string())),
        );
        for kind in EXTERNAL_RECORD_KINDS {
            records.insert(kind, Ok(vec![format!("{} stub line", kind.as_str())]));
        }

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "text/html".to_string());

        let report = DomainReport {
            domain: "example.test".to_string(),
            records,
            headers: Ok(headers),
            certificate: Ok(stub_certificate()),
        };

        let mut buf = Vec::new();
        render_report(&report, &mut buf).expect("rendering to a Vec cannot fail");
        let text = String::from_utf8(buf).expect("report is UTF-8");

        assert!(text.starts_with("DNS Information for domain: example.test\n"));
        // The two resolver failures show up inline under their headers
        assert!(text.contains("A records:\nDNS resolution failed: name does not exist\n"));
        assert!(text.contains("AAAA records:\nDNS resolution failed: name does not exist\n"));
        // The five external stub lines appear under their own headers
        for kind in EXTERNAL_RECORD_KINDS {
            let section = format!("{} records:\n{} stub line\n", kind.as_str(), kind.as_str());
            assert!(text.contains(&section), "missing section: {section}");
        }
        assert!(text.contains("HTTP Headers:\nContent-Type: text/html\n"));
        assert!(text.contains("Issuer: commonName=Test CA\n"));
        assert!(text.contains("Valid From: 2025-01-01 00:00:00\n"));
        assert!(text.contains("Valid Until: 2030-01-01 00:00:00\n"));
        assert!(text.contains("OCSP: N/A\n"));
    }

    #[test]
    fn test_render_failed_header_and_certificate_sections() {
        let mut records = RecordSet::default();
        records.insert(RecordKind::A, Ok(vec!["93.184.216.34".to_string()]));

        let report = DomainReport {
            domain: "example.test".to_string(),
            records,
            headers: Err(ProbeError::Connection("connection refused".to_string())),
            certificate: Err(ProbeError::Handshake("handshake failure".to_string())),
        };

        let mut buf = Vec::new();
        render_report(&report, &mut buf).expect("rendering to a Vec cannot fail");
        let text = String::from_utf8(buf).expect("report is UTF-8");

        assert!(text.contains("HTTP Headers:\nError: connection failed: connection refused\n"));
        assert!(text
            .contains("SSL Certificate Information:\nError: TLS handshake failed: handshake failure\n"));
    }

    #[test]
    fn test_format_attributes_joins_pairs() {
        let mut attrs = BTreeMap::new();
        attrs.insert("commonName".to_string(), "example.test".to_string());
        attrs.insert("organizationName".to_string(), "Example Org".to_string());
        assert_eq!(
            format_attributes(&attrs),
            "commonName=example.test, organizationName=Example Org"
        );
    }
}
