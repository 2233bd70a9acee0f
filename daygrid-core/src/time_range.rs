//! Same-day wall-clock intervals and overlap detection.

use std::fmt;

use chrono::NaiveTime;

use crate::event::Event;

/// Half-open `[start, end)` interval of wall-clock time within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        TimeRange { start, end }
    }

    /// Two ranges overlap iff `s1 < e2 && s2 < e1`.
    /// A range ending exactly when another starts does not overlap it.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Find the first event in `events` whose range overlaps `candidate`.
///
/// `skip` is the index of the event being edited, which is left out of the
/// comparison so an event may be moved within its own previous interval.
pub fn find_conflict<'a>(
    events: &'a [Event],
    candidate: &TimeRange,
    skip: Option<usize>,
) -> Option<(usize, &'a Event)> {
    events
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .find(|(_, event)| event.range().overlaps(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange::new(t(start), t(end))
    }

    fn event(title: &str, start: &str, end: &str) -> Event {
        EventDraft::new(title, start, end).validate().unwrap()
    }

    #[test]
    fn overlapping_ranges() {
        assert!(range("09:00", "10:00").overlaps(&range("09:30", "09:45")));
        assert!(range("09:30", "09:45").overlaps(&range("09:00", "10:00")));
        assert!(range("09:00", "10:00").overlaps(&range("09:59", "11:00")));
        assert!(range("09:00", "10:00").overlaps(&range("09:00", "10:00")));
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!range("09:00", "10:00").overlaps(&range("10:00", "11:00")));
        assert!(!range("10:00", "11:00").overlaps(&range("09:00", "10:00")));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!range("09:00", "10:00").overlaps(&range("13:00", "14:00")));
    }

    #[test]
    fn find_conflict_reports_first_overlap() {
        let events = vec![
            event("A", "09:00", "10:00"),
            event("B", "10:00", "11:00"),
        ];

        let (index, found) = find_conflict(&events, &range("09:30", "09:45"), None).unwrap();
        assert_eq!(index, 0);
        assert_eq!(found.title, "A");

        assert!(find_conflict(&events, &range("11:00", "12:00"), None).is_none());
    }

    #[test]
    fn find_conflict_skips_edited_event() {
        let events = vec![
            event("A", "09:00", "10:00"),
            event("B", "10:00", "11:00"),
        ];

        assert!(find_conflict(&events, &range("09:15", "10:00"), Some(0)).is_none());

        let (index, _) = find_conflict(&events, &range("09:15", "10:30"), Some(0)).unwrap();
        assert_eq!(index, 1);
    }
}
