//! Watch-record model and raw-row normalization
//!
//! Raw rows follow the catalog list API shape (`data[].node` with a nested
//! `my_list_status`); list-file exports use the same field vocabulary. The
//! normalizer turns heterogeneous raw rows into typed [`WatchRecord`]s,
//! silently dropping rows that carry no usable identity or status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Date sentinel used by list exports to mean "unknown".
pub const UNKNOWN_DATE_SENTINEL: &str = "0000-00-00";

/// External catalog identity of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogId(pub u64);

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Release format of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaFormat {
    Tv,
    Movie,
    Ova,
    Ona,
    Special,
    TvSpecial,
    Music,
    Pv,
    Unknown,
}

impl MediaFormat {
    /// Map the catalog API format vocabulary to the internal enum.
    ///
    /// Unknown values default to [`MediaFormat::Unknown`] rather than
    /// rejecting the row.
    pub fn from_api(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tv" => Self::Tv,
            "movie" => Self::Movie,
            "ova" => Self::Ova,
            "ona" => Self::Ona,
            "special" => Self::Special,
            "tv_special" => Self::TvSpecial,
            "music" => Self::Music,
            "pv" => Self::Pv,
            _ => Self::Unknown,
        }
    }

    /// Display label used in format distributions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tv => "TV",
            Self::Movie => "Movie",
            Self::Ova => "OVA",
            Self::Ona => "ONA",
            Self::Special => "Special",
            Self::TvSpecial => "TV Special",
            Self::Music => "Music",
            Self::Pv => "PV",
            Self::Unknown => "Unknown",
        }
    }
}

/// User-side watch status of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WatchStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

impl WatchStatus {
    /// Map the catalog API status vocabulary to the internal enum.
    ///
    /// Accepts both the API form (`plan_to_watch`) and the list-export
    /// display form (`Plan to Watch`). There is no default: rows with an
    /// unrecognised status are dropped by the normalizer.
    pub fn from_api(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
            "watching" => Some(Self::Watching),
            "completed" => Some(Self::Completed),
            "on_hold" | "on-hold" => Some(Self::OnHold),
            "dropped" => Some(Self::Dropped),
            "plan_to_watch" => Some(Self::PlanToWatch),
            _ => None,
        }
    }
}

/// One normalized title-tracking entry.
///
/// `genres` starts empty and is written exactly once by the enricher;
/// aggregators only ever receive shared immutable access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchRecord {
    /// External catalog identity
    pub catalog_id: CatalogId,
    /// Title as reported by the source list
    pub title: String,
    /// Total episode count, 0 when unknown
    pub total_episodes: u32,
    /// Episodes the user has watched
    pub watched_episodes: u32,
    /// Release format
    pub format: MediaFormat,
    /// Watch status
    pub status: WatchStatus,
    /// First watch date, if known
    pub start_date: Option<NaiveDate>,
    /// Finish date, if known; `None` for in-progress titles
    pub finish_date: Option<NaiveDate>,
    /// User rating 0-10, 0 meaning unrated
    pub score: u8,
    /// Genres attached by the enricher; empty until enrichment completes
    pub genres: Vec<String>,
}

impl WatchRecord {
    /// Whether the record carries a non-zero user rating.
    pub fn is_rated(&self) -> bool {
        self.score != 0
    }
}

/// Paginated list API response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListResponse {
    /// Raw list rows
    pub data: Vec<RawListEntry>,
}

/// One raw row of a list import or list-sync API page.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListEntry {
    /// Title node; rows without one are dropped
    pub node: Option<RawNode>,
}

/// Title metadata within a raw row.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    /// Catalog id; rows without one are dropped
    pub id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub num_episodes: u32,
    #[serde(default)]
    pub media_type: String,
    /// Per-user list status; rows without one are dropped
    pub my_list_status: Option<RawListStatus>,
}

/// Per-user list status within a raw row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub num_episodes_watched: u32,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub finish_date: Option<String>,
}

/// Parse a list-export date string.
///
/// The `"0000-00-00"` sentinel, empty strings, and unparsable values all
/// map to `None` (sanitize rule; malformed dates are not errors).
fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    if value.is_empty() || value == UNKNOWN_DATE_SENTINEL {
        return None;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            debug!(value, "dropping unparsable date value");
            None
        }
    }
}

/// Normalize raw list rows into [`WatchRecord`]s.
///
/// Rows missing the node, the catalog id, the list status, or carrying an
/// unrecognised status value are dropped silently; incomplete feeds are
/// expected and are not an error.
pub fn normalize_entries(entries: &[RawListEntry]) -> Vec<WatchRecord> {
    let mut records = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(node) = &entry.node else {
            debug!("dropping row without node");
            continue;
        };
        let Some(id) = node.id else {
            debug!(title = %node.title, "dropping row without catalog id");
            continue;
        };
        let Some(list_status) = &node.my_list_status else {
            debug!(id, "dropping row without list status");
            continue;
        };
        let Some(status) = WatchStatus::from_api(&list_status.status) else {
            debug!(id, status = %list_status.status, "dropping row with unknown status");
            continue;
        };

        records.push(WatchRecord {
            catalog_id: CatalogId(id),
            title: node.title.clone(),
            total_episodes: node.num_episodes,
            watched_episodes: list_status.num_episodes_watched,
            format: MediaFormat::from_api(&node.media_type),
            status,
            start_date: parse_date(list_status.start_date.as_deref()),
            finish_date: parse_date(list_status.finish_date.as_deref()),
            score: list_status.score.min(10) as u8,
            genres: Vec::new(),
        });
    }

    debug!(
        input = entries.len(),
        normalized = records.len(),
        "normalized raw list rows"
    );
    records
}
