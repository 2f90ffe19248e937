use crate::constants::LEGACY_DB_VERSION_CEILING;
use anyhow::{Context, Result};
use std::cmp::Ordering;

/// Numeric components of a dotted database version, e.g. `3.0.9` or `3.11`
fn parse_version(version: &str) -> Result<Vec<u32>> {
    version
        .trim()
        .trim_start_matches(['v', 'V'])
        .split('.')
        .map(|part| {
            part.parse::<u32>()
                .with_context(|| format!("Invalid database version '{}'", version))
        })
        .collect()
}

fn compare_versions(left: &[u32], right: &[u32]) -> Ordering {
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Versions older than the ceiling only support the legacy dialect
pub fn is_legacy_version(version: &str) -> Result<bool> {
    let version = parse_version(version)?;
    let ceiling = parse_version(LEGACY_DB_VERSION_CEILING)?;
    Ok(compare_versions(&version, &ceiling) == Ordering::Less)
}
