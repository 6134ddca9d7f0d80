//! External record lookups via the system `nslookup` tool.
//!
//! MX, NS, TXT, SOA, and CNAME records are fetched by spawning
//! `nslookup -type=<KIND> <domain>` and capturing its standard output
//! verbatim. The tool uses whatever DNS server it is configured with, which
//! may differ from the resolver used for the A/AAAA lookups.

use tokio::process::Command;

use crate::config::NSLOOKUP_BIN;
use crate::error_handling::ProbeError;
use crate::models::RecordKind;

/// Looks up records of the given kind through the external tool.
///
/// Returns the tool's stdout split into lines. A non-zero exit or a failure
/// to spawn the tool becomes [`ProbeError::ExternalTool`]; the `Result` is
/// the single source of truth, there is no separate status to consult.
pub async fn lookup(domain: &str, kind: RecordKind) -> Result<Vec<String>, ProbeError> {
    lookup_with(NSLOOKUP_BIN, domain, kind).await
}

/// Same as [`lookup`], with the tool binary injectable for tests.
pub(crate) async fn lookup_with(
    tool: &str,
    domain: &str,
    kind: RecordKind,
) -> Result<Vec<String>, ProbeError> {
    let type_arg = format!("-type={}", kind.as_str());
    log::debug!("running {tool} {type_arg} {domain}");

    let output = Command::new(tool)
        .arg(&type_arg)
        .arg(domain)
        .output()
        .await
        .map_err(|e| ProbeError::ExternalTool(format!("failed to run {tool}: {e}")))?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().map(str::to_string).collect())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            format!("{tool} exited with {}", output.status)
        } else {
            stderr.trim().to_string()
        };
        log::warn!("{} lookup failed for {domain}: {detail}", kind.as_str());
        Err(ProbeError::ExternalTool(detail))
    }
}
