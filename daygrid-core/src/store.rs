//! The event store: events per day, kept in sync with storage.
//!
//! The whole mapping is persisted under one key after every successful
//! mutation. Loading never fails; unreadable state becomes an empty store.

use std::collections::BTreeMap;

use crate::date_key::DateKey;
use crate::error::{DayGridError, DayGridResult};
use crate::event::{Event, EventDraft};
use crate::search::{self, DayEntry};
use crate::storage::Storage;
use crate::time_range::find_conflict;

/// Key the mapping is stored under.
pub const STORAGE_KEY: &str = "calendarEvents";

pub type EventMap = BTreeMap<DateKey, Vec<Event>>;

pub struct EventStore<S: Storage> {
    days: EventMap,
    storage: S,
}

impl<S: Storage> EventStore<S> {
    /// Load the persisted mapping from `storage`.
    ///
    /// Missing state yields an empty store. So does state that cannot be
    /// read or parsed; that is logged and otherwise ignored.
    pub fn load(storage: S) -> Self {
        let days = match read_map(&storage) {
            Ok(Some(days)) => {
                log::debug!("Loaded {} days of events", days.len());
                days
            }
            Ok(None) => EventMap::new(),
            Err(e) => {
                log::warn!("Ignoring unreadable persisted events: {}", e);
                EventMap::new()
            }
        };

        EventStore { days, storage }
    }

    /// Serialize the full mapping and write it to storage.
    pub fn save(&mut self) -> DayGridResult<()> {
        let json = serde_json::to_string(&self.days)
            .map_err(|e| DayGridError::Serialization(e.to_string()))?;

        self.storage.set(STORAGE_KEY, &json)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // READS:

    /// A day's events in stored (insertion) order.
    pub fn events(&self, key: &DateKey) -> &[Event] {
        self.days.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn event(&self, key: &DateKey, index: usize) -> DayGridResult<&Event> {
        let events = self.events(key);
        events.get(index).ok_or(DayGridError::Index {
            key: *key,
            index,
            len: events.len(),
        })
    }

    /// A day's events matching `query`, ordered by start time.
    pub fn day(&self, key: &DateKey, query: &str) -> Vec<DayEntry<'_>> {
        search::day_view(self.events(key), query)
    }

    pub fn days(&self) -> &EventMap {
        &self.days
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &Vec<Event>)> {
        self.days.iter()
    }

    pub fn len_days(&self) -> usize {
        self.days.len()
    }

    pub fn len_events(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    // MUTATIONS:

    /// Validate `draft` and append it to the day's list.
    pub fn add_event(&mut self, key: DateKey, draft: &EventDraft) -> DayGridResult<&Event> {
        let event = draft.validate()?;
        check_overlap(self.events(&key), &event, None)?;

        let mut events = self.events(&key).to_vec();
        events.push(event);
        let index = events.len() - 1;

        self.commit(key, events)?;
        log::info!("Added event #{} on {}", index, key);

        self.event(&key, index)
    }

    /// Replace the event at `index`. The replaced event is left out of the
    /// overlap check.
    pub fn update_event(
        &mut self,
        key: DateKey,
        index: usize,
        draft: &EventDraft,
    ) -> DayGridResult<&Event> {
        self.event(&key, index)?;

        let event = draft.validate()?;
        check_overlap(self.events(&key), &event, Some(index))?;

        let mut events = self.events(&key).to_vec();
        events[index] = event;

        self.commit(key, events)?;
        log::info!("Updated event #{} on {}", index, key);

        self.event(&key, index)
    }

    /// Remove the event at `index`, returning it.
    pub fn delete_event(&mut self, key: DateKey, index: usize) -> DayGridResult<Event> {
        let removed = self.event(&key, index)?.clone();

        let mut events = self.events(&key).to_vec();
        events.remove(index);

        self.commit(key, events)?;
        log::info!("Deleted event #{} on {}", index, key);

        Ok(removed)
    }

    /// Install the new list for `key` and persist. On a failed write the
    /// previous list is restored, so memory matches what was last saved.
    fn commit(&mut self, key: DateKey, events: Vec<Event>) -> DayGridResult<()> {
        let previous = if events.is_empty() {
            self.days.remove(&key)
        } else {
            self.days.insert(key, events)
        };

        if let Err(e) = self.save() {
            match previous {
                Some(previous) => self.days.insert(key, previous),
                None => self.days.remove(&key),
            };
            return Err(e);
        }

        Ok(())
    }
}

fn read_map<S: Storage>(storage: &S) -> DayGridResult<Option<EventMap>> {
    let Some(json) = storage.get(STORAGE_KEY)? else {
        return Ok(None);
    };

    let days: EventMap =
        serde_json::from_str(&json).map_err(|e| DayGridError::Serialization(e.to_string()))?;

    Ok(Some(days))
}

fn check_overlap(events: &[Event], event: &Event, skip: Option<usize>) -> DayGridResult<()> {
    match find_conflict(events, &event.range(), skip) {
        Some((index, existing)) => Err(DayGridError::Overlap {
            index,
            title: existing.title.clone(),
        }),
        None => Ok(()),
    }
}
