//! Calendar bucket keys: months and cours
//!
//! Month buckets are keyed by (year, month); cour buckets by (year, season)
//! with season = (month - 1) / 3. Both orders are total on (year, then
//! period) so sorted map iteration yields presentation order. Gregorian
//! proleptic calendar throughout, via chrono.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Key of one calendar-month bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Bucket key of the month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of this month.
    pub fn first_day(&self) -> NaiveDate {
        // month is always 1-12 here, constructed from a valid date or next()
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("valid month key")
    }

    /// Key of the following month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Number of days in this month.
    pub fn days_in_month(&self) -> i64 {
        (self.next().first_day() - self.first_day()).num_days()
    }

    /// Presentation label, e.g. "Jan 2023".
    pub fn label(&self) -> String {
        self.first_day().format("%b %Y").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Three-month academic season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season of a calendar month (1-12).
    pub fn from_month(month: u32) -> Self {
        match (month - 1) / 3 {
            0 => Self::Winter,
            1 => Self::Spring,
            2 => Self::Summer,
            _ => Self::Fall,
        }
    }

    /// Presentation name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }
}

/// Key of one cour (quarter) bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cour {
    pub year: i32,
    pub season: Season,
}

impl Cour {
    /// Bucket key of the cour containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            season: Season::from_month(date.month()),
        }
    }

    /// Presentation label, e.g. "Winter 2023".
    pub fn label(&self) -> String {
        format!("{} {}", self.season.name(), self.year)
    }
}

impl fmt::Display for Cour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_key_ordering_and_next() {
        let dec = MonthKey::from_date(date(2022, 12, 31));
        let jan = MonthKey::from_date(date(2023, 1, 1));
        assert!(dec < jan);
        assert_eq!(dec.next(), jan);
        assert_eq!(jan.label(), "Jan 2023");
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(MonthKey { year: 2024, month: 2 }.days_in_month(), 29);
        assert_eq!(MonthKey { year: 2023, month: 2 }.days_in_month(), 28);
        assert_eq!(MonthKey { year: 2023, month: 1 }.days_in_month(), 31);
    }

    #[test]
    fn seasons_cover_the_year() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Winter);
        assert_eq!(Season::from_month(4), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Fall);
        assert_eq!(Season::from_month(12), Season::Fall);
    }

    #[test]
    fn cour_ordering_is_year_then_season() {
        let fall_22 = Cour::from_date(date(2022, 11, 5));
        let winter_23 = Cour::from_date(date(2023, 2, 5));
        let spring_23 = Cour::from_date(date(2023, 4, 1));
        assert!(fall_22 < winter_23);
        assert!(winter_23 < spring_23);
        assert_eq!(winter_23.label(), "Winter 2023");
    }
}
