//! Report data structures shared between the probe components and the renderer.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;

use crate::error_handling::ProbeError;

/// The DNS record types covered by a probe, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterMacro)]
pub enum RecordKind {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Mail exchange record.
    Mx,
    /// Nameserver record.
    Ns,
    /// Text record.
    Txt,
    /// Start-of-authority record.
    Soa,
    /// Canonical name record.
    Cname,
}

impl RecordKind {
    /// The record-type label as it appears in the report and in the
    /// external tool's `-type=` argument.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Mx => "MX",
            RecordKind::Ns => "NS",
            RecordKind::Txt => "TXT",
            RecordKind::Soa => "SOA",
            RecordKind::Cname => "CNAME",
        }
    }
}

/// The record kinds fetched through the external lookup tool.
pub const EXTERNAL_RECORD_KINDS: [RecordKind; 5] = [
    RecordKind::Mx,
    RecordKind::Ns,
    RecordKind::Txt,
    RecordKind::Soa,
    RecordKind::Cname,
];

/// Outcome of a single record lookup: the record lines, or the failure.
pub type RecordOutcome = Result<Vec<String>, ProbeError>;

/// Ordered collection of per-kind lookup outcomes.
///
/// The driver inserts every kind exactly once, in report order, success or
/// failure alike; after a probe completes [`RecordSet::is_complete`] holds.
#[derive(Debug, Default)]
pub struct RecordSet {
    entries: Vec<(RecordKind, RecordOutcome)>,
}

impl RecordSet {
    /// Appends the outcome for a record kind.
    ///
    /// Each kind carries at most one outcome per probe; inserting a kind
    /// twice is a driver bug.
    pub fn insert(&mut self, kind: RecordKind, outcome: RecordOutcome) {
        debug_assert!(
            self.get(kind).is_none(),
            "duplicate record kind {}",
            kind.as_str()
        );
        self.entries.push((kind, outcome));
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(RecordKind, RecordOutcome)> {
        self.entries.iter()
    }

    /// Returns the outcome for a kind, if present.
    pub fn get(&self, kind: RecordKind) -> Option<&RecordOutcome> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }

    /// True when every [`RecordKind`] has an outcome, errors included.
    pub fn is_complete(&self) -> bool {
        RecordKind::iter().all(|kind| self.get(kind).is_some())
    }
}

/// Metadata extracted from the peer certificate.
#[derive(Debug, Clone)]
pub struct CertificateReport {
    /// Subject attributes, keyed by attribute name (e.g. `commonName`).
    pub subject: BTreeMap<String, String>,
    /// Issuer attributes, keyed by attribute name.
    pub issuer: BTreeMap<String, String>,
    /// Start of the validity period.
    pub valid_from: NaiveDateTime,
    /// End of the validity period.
    pub valid_until: NaiveDateTime,
    /// Serial number as uppercase hex.
    pub serial_number: String,
    /// X.509 version number; rendered as "N/A" when absent.
    pub version: Option<String>,
    /// OCSP responder URL; rendered as "N/A" when absent.
    pub ocsp: Option<String>,
}

/// Everything gathered for one domain in one invocation.
#[derive(Debug)]
pub struct DomainReport {
    /// The domain that was probed.
    pub domain: String,
    /// Per-kind DNS lookup outcomes.
    pub records: RecordSet,
    /// HTTP response headers, or the fetch failure.
    pub headers: Result<BTreeMap<String, String>, ProbeError>,
    /// Certificate metadata, or the inspection failure.
    pub certificate: Result<CertificateReport, ProbeError>,
}
