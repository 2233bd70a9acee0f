//! Filtering and ordering of a day's events for display.
//!
//! Nothing here touches the store: every function works on borrowed
//! entries and returns a new list.

use crate::event::Event;

/// An event together with its position in the day's stored list.
///
/// Sorted and filtered views keep the index so edits and deletes still
/// address the right stored event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEntry<'a> {
    pub index: usize,
    pub event: &'a Event,
}

/// Entries for a day's events, in stored order.
pub fn entries(events: &[Event]) -> Vec<DayEntry<'_>> {
    events
        .iter()
        .enumerate()
        .map(|(index, event)| DayEntry { index, event })
        .collect()
}

/// Case-insensitive substring match on title or description.
/// An empty query matches everything.
pub fn matches(event: &Event, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    event.title.to_lowercase().contains(&query) || event.description.to_lowercase().contains(&query)
}

/// Keep the entries matching `query`, in their original order.
pub fn filter<'a>(entries: Vec<DayEntry<'a>>, query: &str) -> Vec<DayEntry<'a>> {
    if query.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|entry| matches(entry.event, query))
        .collect()
}

/// Stable sort by start time; equal start times keep their relative order.
pub fn sort_by_start(entries: &mut [DayEntry<'_>]) {
    entries.sort_by_key(|entry| entry.event.start_time);
}

/// Filtered then sorted view of a day's events.
pub fn day_view<'a>(events: &'a [Event], query: &str) -> Vec<DayEntry<'a>> {
    let mut view = filter(entries(events), query);
    sort_by_start(&mut view);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;

    fn event(title: &str, start: &str, end: &str, description: &str) -> Event {
        EventDraft::new(title, start, end)
            .with_description(description)
            .validate()
            .unwrap()
    }

    fn sample() -> Vec<Event> {
        vec![
            event("Lunch with Ana", "12:00", "13:00", ""),
            event("Standup", "09:00", "09:15", "daily sync"),
            event("Review", "15:00", "16:00", "Quarterly LUNCH budget"),
            event("Early call", "09:00", "09:30", ""),
        ]
    }

    fn titles(entries: &[DayEntry]) -> Vec<String> {
        entries.iter().map(|e| e.event.title.clone()).collect()
    }

    #[test]
    fn empty_query_passes_everything_through_in_order() {
        let events = sample();
        let filtered = filter(entries(&events), "");

        assert_eq!(filtered, entries(&events));
    }

    #[test]
    fn query_matches_title_or_description_case_insensitively() {
        let events = sample();
        let filtered = filter(entries(&events), "lunch");

        assert_eq!(titles(&filtered), vec!["Lunch with Ana", "Review"]);
        assert_eq!(filtered[1].index, 2);
    }

    #[test]
    fn query_without_matches_is_empty() {
        let events = sample();
        assert!(filter(entries(&events), "dentist").is_empty());
    }

    #[test]
    fn sort_is_stable_and_keeps_indices() {
        let events = sample();
        let mut view = entries(&events);
        sort_by_start(&mut view);

        assert_eq!(
            titles(&view),
            vec!["Standup", "Early call", "Lunch with Ana", "Review"]
        );
        assert_eq!(
            view.iter().map(|e| e.index).collect::<Vec<_>>(),
            vec![1, 3, 0, 2]
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let events = sample();
        let mut once = entries(&events);
        sort_by_start(&mut once);

        let mut twice = once.clone();
        sort_by_start(&mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn day_view_filters_then_sorts() {
        let events = sample();
        let view = day_view(&events, "a");

        assert_eq!(titles(&view), vec!["Standup", "Early call", "Lunch with Ana", "Review"]);

        let view = day_view(&events, "sync");
        assert_eq!(titles(&view), vec!["Standup"]);
    }

    #[test]
    fn filtering_leaves_events_untouched() {
        let events = sample();
        let before = events.clone();
        let _ = day_view(&events, "lunch");

        assert_eq!(events, before);
    }
}
