//! Forward address resolution (A and AAAA) via the configured resolver.

use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::ProbeError;

/// Resolves the IPv4 address for a domain.
///
/// Returns the first resolved address only; a domain with multiple A records
/// still yields a single entry, mirroring a plain forward lookup.
///
/// Resolution failure (including an empty answer) is returned in-band as
/// [`ProbeError::Resolution`] and never raised to the caller.
pub async fn resolve_ipv4(domain: &str, resolver: &TokioAsyncResolver) -> Result<Vec<String>, ProbeError> {
    match resolver.ipv4_lookup(domain).await {
        Ok(lookup) => {
            let first = lookup
                .iter()
                .next()
                .map(ToString::to_string)
                .ok_or_else(|| {
                    ProbeError::Resolution(format!("no IPv4 address found for {domain}"))
                })?;
            Ok(vec![first])
        }
        Err(e) => {
            log::warn!("IPv4 resolution failed for {domain}: {e}");
            Err(ProbeError::Resolution(e.to_string()))
        }
    }
}

/// Resolves all IPv6 addresses for a domain.
///
/// Unlike the IPv4 path this returns every resolved address, since hosts
/// commonly publish several AAAA records. Same error-as-value policy.
pub async fn resolve_ipv6(domain: &str, resolver: &TokioAsyncResolver) -> Result<Vec<String>, ProbeError> {
    match resolver.ipv6_lookup(domain).await {
        Ok(lookup) => Ok(lookup.iter().map(ToString::to_string).collect()),
        Err(e) => {
            log::warn!("IPv6 resolution failed for {domain}: {e}");
            Err(ProbeError::Resolution(e.to_string()))
        }
    }
}
