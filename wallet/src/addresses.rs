//! Destination address list loading.
//!
//! One address per line. Surrounding whitespace is trimmed; blank lines and
//! lines starting with `#` are skipped.

use std::collections::HashSet;
use std::path::Path;

use scrambler_types::Destination;

use crate::ScramblerError;

/// Parse an address list.
pub fn parse_addresses(text: &str) -> Vec<Destination> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Destination::from)
        .collect()
}

/// Load the address list at `path`, failing if it holds no addresses.
pub fn load_addresses(path: &Path) -> Result<Vec<Destination>, ScramblerError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScramblerError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let addresses = parse_addresses(&text);
    if addresses.is_empty() {
        return Err(ScramblerError::NoAddresses(path.display().to_string()));
    }

    let mut seen = HashSet::new();
    for address in &addresses {
        if !seen.insert(address) {
            tracing::warn!(%address, "address listed more than once; outputs will collapse");
        }
    }

    tracing::debug!(count = addresses.len(), "loaded destination addresses");
    Ok(addresses)
}
