use semver::Version;

use crate::error::{ReportError, Result};

/// Returns whether `version` is greater than or equal to `threshold`.
///
/// An empty `version` means the runtime version is unknown and always sorts
/// below the threshold.
pub fn is_at_least(version: &str, threshold: &str) -> Result<bool> {
    if version.trim().is_empty() {
        return Ok(false);
    }
    let (version, threshold) = (parse(version)?, parse(threshold)?);
    // Build metadata does not take part in precedence.
    Ok((version.major, version.minor, version.patch, &version.pre)
        >= (threshold.major, threshold.minor, threshold.patch, &threshold.pre))
}

fn parse(raw: &str) -> Result<Version> {
    let trimmed = raw.trim();
    let unprefixed = trimmed.strip_prefix('=').unwrap_or(trimmed).trim_start();
    let stripped = unprefixed
        .strip_prefix(['v', 'V'])
        .unwrap_or(unprefixed);

    Version::parse(stripped).map_err(|source| ReportError::InvalidVersion {
        version: raw.to_string(),
        source,
    })
}
