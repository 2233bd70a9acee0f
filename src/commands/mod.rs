pub mod add;
pub mod browse;
pub mod day;
pub mod delete;
pub mod edit;
pub mod month;

use anyhow::Result;
use chrono::{Local, NaiveDate};

/// The local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a command line date: `YYYY-MM-DD`, or a relative date such as
/// `today`, `tomorrow`, `yesterday` or `next friday`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let dt = fuzzydate::parse(input).map_err(|_| {
        anyhow::anyhow!("Could not parse date: \"{}\" (expected YYYY-MM-DD)", input)
    })?;

    Ok(dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
        assert_eq!(parse_date(" 2023-12-31 ").unwrap(), date(2023, 12, 31));
        assert_eq!(parse_date("-0001-01-01").unwrap(), date(-1, 1, 1));
    }

    #[test]
    fn parses_relative_words() {
        let today = today();
        assert_eq!(parse_date("today").unwrap(), today);
        assert_eq!(parse_date("tomorrow").unwrap(), today + Duration::days(1));
        assert_eq!(parse_date("yesterday").unwrap(), today - Duration::days(1));
    }

    #[test]
    fn rejects_invalid_dates() {
        assert!(parse_date("not a date at all xyz").is_err());
    }
}
