//! Shared test fixtures for aggregator tests

use aniviz_common::{CatalogId, MediaFormat, WatchRecord, WatchStatus};
use chrono::NaiveDate;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Builder for watch records with sensible test defaults.
pub struct RecordBuilder {
    record: WatchRecord,
}

pub fn record(id: u64) -> RecordBuilder {
    RecordBuilder {
        record: WatchRecord {
            catalog_id: CatalogId(id),
            title: format!("Title {id}"),
            total_episodes: 12,
            watched_episodes: 12,
            format: MediaFormat::Tv,
            status: WatchStatus::Completed,
            start_date: None,
            finish_date: None,
            score: 7,
            genres: Vec::new(),
        },
    }
}

impl RecordBuilder {
    pub fn title(mut self, title: &str) -> Self {
        self.record.title = title.to_string();
        self
    }

    pub fn status(mut self, status: WatchStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn format(mut self, format: MediaFormat) -> Self {
        self.record.format = format;
        self
    }

    pub fn episodes(mut self, watched: u32, total: u32) -> Self {
        self.record.watched_episodes = watched;
        self.record.total_episodes = total;
        self
    }

    pub fn score(mut self, score: u8) -> Self {
        self.record.score = score;
        self
    }

    pub fn start(mut self, s: &str) -> Self {
        self.record.start_date = Some(date(s));
        self
    }

    pub fn finish(mut self, s: &str) -> Self {
        self.record.finish_date = Some(date(s));
        self
    }

    pub fn genres(mut self, genres: &[&str]) -> Self {
        self.record.genres = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn build(self) -> WatchRecord {
        self.record
    }
}
