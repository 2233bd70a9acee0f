//! Month grid: the day cells shown for one month.

use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::date_key::DateKey;

/// One cell of the month grid. Rows start on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Padding before the first day of the month.
    Blank,
    Day {
        date: NaiveDate,
        key: DateKey,
        weekend: bool,
    },
}

impl DayCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayCell::Blank => None,
            DayCell::Day { date, .. } => Some(*date),
        }
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date() == Some(today)
    }
}

/// A month, addressed by year and zero based month index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthGrid {
    year: i32,
    month0: u32,
}

impl MonthGrid {
    /// Any month index is accepted; it rolls into adjacent years.
    /// `MonthGrid::new(2024, 12)` is January 2025, `MonthGrid::new(2024, -1)` is December 2023.
    ///
    /// Months outside chrono's date range clamp to its first or last month.
    pub fn new(year: i32, month0: i64) -> Self {
        let min = i64::from(NaiveDate::MIN.year()) * 12;
        let max = i64::from(NaiveDate::MAX.year()) * 12 + 11;
        let total = (i64::from(year) * 12).saturating_add(month0).clamp(min, max);

        MonthGrid {
            year: total.div_euclid(12) as i32,
            month0: total.rem_euclid(12) as u32,
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        MonthGrid {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month0(&self) -> u32 {
        self.month0
    }

    pub fn next(&self) -> Self {
        Self::new(self.year, i64::from(self.month0) + 1)
    }

    pub fn prev(&self) -> Self {
        Self::new(self.year, i64::from(self.month0) - 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or_default()
    }

    /// Day zero of the next month, i.e. the last day of this one.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Number of blank cells before day 1 (0 = month starts on Sunday).
    pub fn leading_blanks(&self) -> usize {
        self.first_day().weekday().num_days_from_sunday() as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// Leading blanks followed by every day of the month.
    pub fn cells(&self) -> Vec<DayCell> {
        let days = self
            .first_day()
            .iter_days()
            .take(self.days_in_month() as usize)
            .map(|date| DayCell::Day {
                date,
                key: DateKey::from(date),
                weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            });

        std::iter::repeat_n(DayCell::Blank, self.leading_blanks())
            .chain(days)
            .collect()
    }

    /// "March 2024"
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}
