//! TLS certificate inspection.
//!
//! Connects to the domain's HTTPS port, performs a TLS handshake with default
//! trust validation and the domain as SNI, and decodes the peer's leaf
//! certificate into a [`CertificateReport`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::{GeneralName, ParsedExtension};
use x509_parser::time::ASN1Time;
use x509_parser::x509::X509Name;

use crate::config::{HTTPS_PORT, TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};
use crate::error_handling::ProbeError;
use crate::models::CertificateReport;

/// OID of the OCSP access method in the AuthorityInfoAccess extension.
const OID_AD_OCSP: &str = "1.3.6.1.5.5.7.48.1";

/// Retrieves certificate metadata for a domain.
///
/// Every failure mode (connect, handshake, missing peer certificate, decode,
/// timestamp parse) is returned as a [`ProbeError`] value and any partially
/// extracted fields are discarded; the report is all-or-nothing.
///
/// # Panics
///
/// The process-default rustls crypto provider must be installed first (see
/// [`crate::initialization::init_crypto_provider`]); building the TLS client
/// configuration panics when several provider backends are compiled in and
/// none has been made the default.
pub async fn inspect_certificate(domain: &str) -> Result<CertificateReport, ProbeError> {
    log::debug!("inspecting certificate for {domain}");

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let server_name = ServerName::try_from(domain.to_string())
        .map_err(|e| ProbeError::Handshake(format!("invalid server name {domain:?}: {e}")))?;

    let sock = match tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((domain, HTTPS_PORT)),
    )
    .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => {
            return Err(ProbeError::Connection(format!(
                "failed to connect to {domain}:{HTTPS_PORT}: {e}"
            )));
        }
        Err(_) => {
            return Err(ProbeError::Connection(format!(
                "connect timeout for {domain}:{HTTPS_PORT} ({TCP_CONNECT_TIMEOUT_SECS}s)"
            )));
        }
    };

    let connector = TlsConnector::from(Arc::new(config));
    let tls_stream = match tokio::time::timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return Err(ProbeError::Handshake(format!(
                "TLS handshake failed for {domain}: {e}"
            )));
        }
        Err(_) => {
            return Err(ProbeError::Handshake(format!(
                "TLS handshake timeout for {domain} ({TLS_HANDSHAKE_TIMEOUT_SECS}s)"
            )));
        }
    };

    let (_, session) = tls_stream.get_ref();
    let certs = session
        .peer_certificates()
        .ok_or_else(|| ProbeError::Handshake(format!("no peer certificates from {domain}")))?;
    let cert_der = certs
        .first()
        .ok_or_else(|| ProbeError::Handshake(format!("empty certificate chain from {domain}")))?;

    let (_, cert) = x509_parser::parse_x509_certificate(cert_der.as_ref())
        .map_err(|e| ProbeError::Protocol(format!("certificate decode failed: {e}")))?;

    build_report(&cert)
}

/// Builds the report from a decoded certificate.
fn build_report(cert: &X509Certificate<'_>) -> Result<CertificateReport, ProbeError> {
    let tbs = &cert.tbs_certificate;

    let valid_from = parse_validity_timestamp(&validity_text(&tbs.validity.not_before))?;
    let valid_until = parse_validity_timestamp(&validity_text(&tbs.validity.not_after))?;

    Ok(CertificateReport {
        subject: flatten_name(&tbs.subject),
        issuer: flatten_name(&tbs.issuer),
        valid_from,
        valid_until,
        serial_number: tbs.serial.to_str_radix(16).to_uppercase(),
        version: Some((tbs.version.0 + 1).to_string()),
        ocsp: ocsp_responder(cert),
    })
}

/// Renders an ASN.1 time in the classic textual validity notation,
/// e.g. `Jan  1 00:00:00 2030 GMT`.
fn validity_text(time: &ASN1Time) -> String {
    validity_text_from_unix(time.timestamp())
}

fn validity_text_from_unix(secs: i64) -> String {
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%b %e %H:%M:%S %Y GMT").to_string(),
        // Out-of-range timestamp; the parse step below rejects it
        None => String::new(),
    }
}

/// Parses a validity timestamp in the fixed
/// `<abbrev-month> <day> <HH:MM:SS> <year> <alphabetic-zone>` format.
///
/// Any deviation (wrong field count, non-alphabetic zone, unparseable date)
/// is a [`ProbeError::TimestampParse`], which aborts the whole certificate
/// report rather than producing partial output.
pub(crate) fn parse_validity_timestamp(raw: &str) -> Result<NaiveDateTime, ProbeError> {
    let reject = || ProbeError::TimestampParse(raw.to_string());

    let fields: Vec<&str> = raw.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(reject());
    }
    let (month, day, time, year, zone) = (fields[0], fields[1], fields[2], fields[3], fields[4]);
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(reject());
    }

    let normalized = format!("{month} {day} {time} {year}");
    NaiveDateTime::parse_from_str(&normalized, "%b %d %H:%M:%S %Y").map_err(|_| reject())
}

/// Flattens an X.509 name into a single attribute map.
///
/// Nested RDN structure is collapsed; keys are long attribute names for the
/// common OIDs and dotted-decimal for anything else.
fn flatten_name(name: &X509Name<'_>) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    for attr in name.iter_attributes() {
        let key = attribute_label(&attr.attr_type().to_string());
        let value = match attr.as_str() {
            Ok(s) => s.to_string(),
            Err(_) => format!("{:?}", attr.attr_value().data),
        };
        attrs.insert(key, value);
    }
    attrs
}

/// Maps a directory-attribute OID to its long name.
fn attribute_label(oid: &str) -> String {
    let label = match oid {
        "2.5.4.3" => "commonName",
        "2.5.4.5" => "serialNumber",
        "2.5.4.6" => "countryName",
        "2.5.4.7" => "localityName",
        "2.5.4.8" => "stateOrProvinceName",
        "2.5.4.10" => "organizationName",
        "2.5.4.11" => "organizationalUnitName",
        // Unknown attribute types keep their dotted-decimal OID
        other => other,
    };
    label.to_string()
}

/// Extracts the OCSP responder URL from the AuthorityInfoAccess extension.
fn ocsp_responder(cert: &X509Certificate<'_>) -> Option<String> {
    for ext in cert.extensions() {
        if let ParsedExtension::AuthorityInfoAccess(ref aia) = *ext.parsed_extension() {
            for desc in &aia.accessdescs {
                if desc.access_method.to_string() == OID_AD_OCSP {
                    if let GeneralName::URI(uri) = &desc.access_location {
                        return Some((*uri).to_string());
                    }
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_validity_timestamp_round_trip() {
        let parsed = parse_validity_timestamp("Jan 1 00:00:00 2030 GMT").expect("should parse");
        let expected = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_validity_timestamp_accepts_padded_day() {
        // The textual notation pads single-digit days with an extra space
        let parsed = parse_validity_timestamp("Jun  8 11:59:59 2027 GMT").expect("should parse");
        assert_eq!(parsed.hour(), 11);
        assert_eq!(
            parsed.date(),
            NaiveDate::from_ymd_opt(2027, 6, 8).unwrap()
        );
    }

    #[test]
    fn test_parse_validity_timestamp_rejects_other_formats() {
        for raw in [
            "",
            "2030-01-01 00:00:00",
            "Jan 1 00:00:00 2030",          // missing zone
            "Jan 1 00:00:00 2030 +00:00",   // numeric zone
            "Foo 1 00:00:00 2030 GMT",      // bad month
            "Jan 1 00:00 2030 GMT",         // missing seconds
            "Jan 1 00:00:00 2030 GMT extra",
        ] {
            match parse_validity_timestamp(raw) {
                Err(ProbeError::TimestampParse(text)) => assert_eq!(text, raw),
                other => panic!("{raw:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validity_text_uses_classic_notation() {
        let text = validity_text_from_unix(1_893_456_000); // 2030-01-01T00:00:00Z
        assert_eq!(text, "Jan  1 00:00:00 2030 GMT");
        // And it survives the strict parser
        assert_eq!(
            parse_validity_timestamp(&text).expect("round trip"),
            NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_attribute_label_known_and_unknown_oids() {
        assert_eq!(attribute_label("2.5.4.3"), "commonName");
        assert_eq!(attribute_label("2.5.4.10"), "organizationName");
        assert_eq!(attribute_label("1.2.3.4.5"), "1.2.3.4.5");
    }
}
