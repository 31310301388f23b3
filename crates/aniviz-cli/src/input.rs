//! Watch list input loading
//!
//! Accepts either a full list response object (`{"data": [...]}`) or a
//! bare entry array, matching both shapes the catalog API export tooling
//! produces.

use aniviz_common::{normalize_entries, RawListEntry, RawListResponse, Result, WatchRecord};
use std::path::Path;
use tracing::{debug, info};

/// Parses a serialized watch list into its raw entries.
pub fn parse_list(raw: &str) -> Result<Vec<RawListEntry>> {
    if let Ok(response) = serde_json::from_str::<RawListResponse>(raw) {
        debug!("parsed list as response object");
        return Ok(response.data);
    }
    let entries: Vec<RawListEntry> = serde_json::from_str(raw)?;
    debug!("parsed list as bare entry array");
    Ok(entries)
}

/// Reads a watch list file and normalizes it into watch records.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<WatchRecord>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let entries = parse_list(&raw)?;
    let records = normalize_entries(&entries);
    info!(
        path = %path.as_ref().display(),
        entries = entries.len(),
        records = records.len(),
        "loaded watch list"
    );
    Ok(records)
}
