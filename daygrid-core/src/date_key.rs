//! Canonical key of one calendar day's event bucket.
//!
//! The textual form is `<year>-<zero based month>-<day>` without padding,
//! so 5 January 2024 is `2024-0-5`. This is the key used in persisted state.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DayGridError, DayGridResult};

/// Identifies a single calendar day. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    year: i32,
    month0: u32,
    day: u32,
}

impl DateKey {
    /// Build a key from a year, zero based month and day of month.
    /// Fails when the components do not name a real calendar day.
    pub fn new(year: i32, month0: u32, day: u32) -> DayGridResult<Self> {
        month0
            .checked_add(1)
            .and_then(|month| NaiveDate::from_ymd_opt(year, month, day))
            .map(Self::from)
            .ok_or_else(|| DayGridError::InvalidDateKey(format!("{year}-{month0}-{day}")))
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month0(&self) -> u32 {
        self.month0
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    pub fn date(&self) -> NaiveDate {
        // Every constructor goes through NaiveDate, so the components are valid.
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, self.day).unwrap_or_default()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey {
            year: date.year(),
            month0: date.month0(),
            day: date.day(),
        }
    }
}

impl From<DateKey> for NaiveDate {
    fn from(key: DateKey) -> Self {
        key.date()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month0, self.day)
    }
}

impl FromStr for DateKey {
    type Err = DayGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DayGridError::InvalidDateKey(s.to_string());

        // Split from the right so a negative year keeps its sign.
        let mut parts = s.rsplitn(3, '-');
        let (Some(day), Some(month0), Some(year)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month0: u32 = month0.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;

        let key = DateKey::new(year, month0, day).map_err(|_| invalid())?;

        // Only the canonical text names a key: no padding, no `+` sign.
        if key.to_string() != s {
            return Err(invalid());
        }

        Ok(key)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_zero_based_month_without_padding() {
        let key = DateKey::from(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(key.to_string(), "2024-0-5");

        let key = DateKey::from(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(key.to_string(), "2023-11-31");
    }

    #[test]
    fn parse_matches_display() {
        let key: DateKey = "2024-1-29".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month0(), 1);
        assert_eq!(key.day(), 29);
        assert_eq!(key.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn parse_rejects_impossible_days() {
        assert!("2023-1-29".parse::<DateKey>().is_err()); // Feb 29 in a non-leap year
        assert!("2024-12-1".parse::<DateKey>().is_err()); // month index 12
        assert!("2024-0-0".parse::<DateKey>().is_err());
        assert!("2024-4294967295-1".parse::<DateKey>().is_err());
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert!("".parse::<DateKey>().is_err());
        assert!("2024-0".parse::<DateKey>().is_err());
        assert!("2024-0-5-1".parse::<DateKey>().is_err());
        assert!("2024-jan-5".parse::<DateKey>().is_err());
        assert!("2024-00-05".parse::<DateKey>().is_err());
        assert!("+2024-0-5".parse::<DateKey>().is_err());
        assert!("02024-0-5".parse::<DateKey>().is_err());
        assert!("2024-0-+5".parse::<DateKey>().is_err());
        assert!(" 2024-0-5".parse::<DateKey>().is_err());
    }

    #[test]
    fn negative_years_round_trip() {
        let key = DateKey::new(-1, 0, 1).unwrap();
        assert_eq!(key.to_string(), "-1-0-1");
        assert_eq!("-1-0-1".parse::<DateKey>().unwrap(), key);
        assert!(key < DateKey::new(0, 0, 1).unwrap());
    }

    #[test]
    fn same_day_same_key() {
        let a = DateKey::from(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let b = DateKey::new(2024, 2, 10).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, DateKey::new(2024, 2, 11).unwrap());
    }

    #[test]
    fn ordering_is_chronological() {
        let jan = DateKey::new(2024, 0, 31).unwrap();
        let feb = DateKey::new(2024, 1, 1).unwrap();
        let dec = DateKey::new(2023, 11, 31).unwrap();
        assert!(dec < jan);
        assert!(jan < feb);
    }

    #[test]
    fn serializes_as_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(DateKey::new(2024, 0, 5).unwrap(), 1);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024-0-5":1}"#);

        let back: std::collections::BTreeMap<DateKey, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
