use anyhow::{Context, Result};
use chrono::NaiveDate;
use daygrid_core::{DateKey, EventStore, Storage};
use owo_colors::OwoColorize;

pub fn run<S: Storage>(store: &mut EventStore<S>, date: NaiveDate, index: usize) -> Result<()> {
    let removed = store
        .delete_event(DateKey::from(date), index)
        .with_context(|| format!("Could not delete event {} on {}", index, date))?;

    println!(
        "{}",
        format!("  Deleted: {} ({}) on {}", removed.title, removed.time_label(), date).red()
    );

    Ok(())
}
