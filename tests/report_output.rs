//! End-to-end rendering test against stubbed component outcomes.
//!
//! The probe components are exercised by their own unit tests; here the
//! public API is driven the way the binary drives it, with every component
//! outcome stubbed, and the rendered text is checked section by section.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use domain_probe::models::EXTERNAL_RECORD_KINDS;
use domain_probe::{
    render_report, CertificateReport, DomainReport, ProbeError, RecordKind, RecordSet,
};

fn stub_report() -> DomainReport {
    let mut records = RecordSet::default();
    records.insert(
        RecordKind::A,
        Err(ProbeError::Resolution(
            "no record found for example.test".to_string(),
        )),
    );
    records.insert(
        RecordKind::Aaaa,
        Err(ProbeError::Resolution(
            "no record found for example.test".to_string(),
        )),
    );
    for kind in EXTERNAL_RECORD_KINDS {
        records.insert(kind, Ok(vec![format!("stub {} answer", kind.as_str())]));
    }

    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "text/html".to_string());

    let mut issuer = BTreeMap::new();
    issuer.insert("commonName".to_string(), "Test CA".to_string());

    DomainReport {
        domain: "example.test".to_string(),
        records,
        headers: Ok(headers),
        certificate: Ok(CertificateReport {
            subject: BTreeMap::new(),
            issuer,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            serial_number: "ABCDEF".to_string(),
            version: Some("3".to_string()),
            ocsp: None,
        }),
    }
}

#[test]
fn test_stubbed_probe_renders_every_section() {
    let report = stub_report();

    // The record set invariant holds even with the resolver failures stubbed in
    assert!(report.records.is_complete());

    let mut buf = Vec::new();
    render_report(&report, &mut buf).expect("rendering to a Vec cannot fail");
    let text = String::from_utf8(buf).expect("report is UTF-8");

    // Error text under A and AAAA
    assert!(text.contains("A records:\nDNS resolution failed: no record found for example.test"));
    assert!(text.contains("AAAA records:\nDNS resolution failed: no record found for example.test"));

    // The five stub lines under their respective headers
    for kind in EXTERNAL_RECORD_KINDS {
        let section = format!(
            "{} records:\nstub {} answer\n",
            kind.as_str(),
            kind.as_str()
        );
        assert!(text.contains(&section), "missing section: {section}");
    }

    // The single header line and the stubbed issuer
    assert!(text.contains("HTTP Headers:\nContent-Type: text/html\n"));
    assert!(text.contains("Issuer: commonName=Test CA\n"));
}

#[test]
fn test_sections_keep_fixed_order() {
    let report = stub_report();
    let mut buf = Vec::new();
    render_report(&report, &mut buf).expect("rendering to a Vec cannot fail");
    let text = String::from_utf8(buf).expect("report is UTF-8");

    let positions: Vec<usize> = [
        "DNS Information for domain:",
        "A records:",
        "AAAA records:",
        "MX records:",
        "NS records:",
        "TXT records:",
        "SOA records:",
        "CNAME records:",
        "HTTP Headers:",
        "SSL Certificate Information:",
    ]
    .iter()
    .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing: {needle}")))
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "sections out of order");
}
