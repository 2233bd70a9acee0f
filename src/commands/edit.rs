use anyhow::{Context, Result};
use chrono::NaiveDate;
use daygrid_core::{DateKey, EventDraft, EventStore, Storage};
use owo_colors::OwoColorize;

/// Fields given on the command line. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct Changes {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.description.is_none()
            && self.color.is_none()
    }

    /// Overlay the changes on a draft of the stored event.
    pub fn apply(self, mut draft: EventDraft) -> EventDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(start) = self.start {
            draft.start_time = start;
        }
        if let Some(end) = self.end {
            draft.end_time = end;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(color) = self.color {
            draft.color = color;
        }
        draft
    }
}

pub fn run<S: Storage>(
    store: &mut EventStore<S>,
    date: NaiveDate,
    index: usize,
    changes: Changes,
) -> Result<()> {
    if changes.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one of --title, --start, --end, --description or --color");
    }

    let key = DateKey::from(date);
    let draft = changes.apply(EventDraft::from(store.event(&key, index)?));

    let event = store
        .update_event(key, index, &draft)
        .with_context(|| format!("Could not update event {} on {}", index, date))?;

    println!(
        "{}",
        format!("  Updated: {} ({}) on {}", event.title, event.time_label(), date).yellow()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use daygrid_core::MemoryStorage;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn unspecified_fields_keep_stored_values() {
        let stored = EventDraft::new("Review", "09:00", "10:00")
            .with_description("PR 12")
            .validate()
            .unwrap();

        let changes = Changes {
            end: Some("10:30".into()),
            ..Changes::default()
        };
        let draft = changes.apply(EventDraft::from(&stored));

        assert_eq!(draft.title, "Review");
        assert_eq!(draft.start_time, "09:00");
        assert_eq!(draft.end_time, "10:30");
        assert_eq!(draft.description, "PR 12");
    }

    #[test]
    fn edit_updates_in_place() {
        let mut store = EventStore::load(MemoryStorage::new());
        let key = DateKey::from(date());
        store.add_event(key, &EventDraft::new("A", "09:00", "10:00")).unwrap();
        store.add_event(key, &EventDraft::new("B", "10:00", "11:00")).unwrap();

        let changes = Changes {
            title: Some("A2".into()),
            ..Changes::default()
        };
        run(&mut store, date(), 0, changes).unwrap();

        let events = store.events(&key);
        assert_eq!(events[0].title, "A2");
        assert_eq!(events[0].time_label(), "09:00 - 10:00");
        assert_eq!(events[1].title, "B");
    }

    #[test]
    fn edit_into_overlap_is_rejected() {
        let mut store = EventStore::load(MemoryStorage::new());
        let key = DateKey::from(date());
        store.add_event(key, &EventDraft::new("A", "09:00", "10:00")).unwrap();
        store.add_event(key, &EventDraft::new("B", "10:00", "11:00")).unwrap();

        let changes = Changes {
            end: Some("10:30".into()),
            ..Changes::default()
        };
        assert!(run(&mut store, date(), 0, changes).is_err());
        assert_eq!(store.events(&key)[0].time_label(), "09:00 - 10:00");
    }

    #[test]
    fn edit_without_changes_is_an_error() {
        let mut store = EventStore::load(MemoryStorage::new());
        assert!(run(&mut store, date(), 0, Changes::default()).is_err());
    }

    #[test]
    fn edit_of_missing_event_is_an_error() {
        let mut store = EventStore::load(MemoryStorage::new());
        let changes = Changes {
            title: Some("x".into()),
            ..Changes::default()
        };
        assert!(run(&mut store, date(), 3, changes).is_err());
    }
}
