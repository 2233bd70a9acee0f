use anyhow::Result;
use chrono::NaiveDate;
use daygrid_core::{DateKey, Event, EventStore, Storage};
use serde::Serialize;

use crate::render::render_day;

/// A day's event as printed by `day --json`.
#[derive(Serialize)]
struct JsonEvent<'a> {
    index: usize,
    #[serde(flatten)]
    event: &'a Event,
}

pub fn run<S: Storage>(store: &EventStore<S>, date: NaiveDate, search: &str, json: bool) -> Result<()> {
    let entries = store.day(&DateKey::from(date), search);

    if json {
        let events: Vec<JsonEvent<'_>> = entries
            .iter()
            .map(|entry| JsonEvent {
                index: entry.index,
                event: entry.event,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    println!("{}", render_day(date, &entries));
    Ok(())
}
