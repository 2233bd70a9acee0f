use anyhow::{Context, Result};
use chrono::NaiveDate;
use daygrid_core::config::DayGridConfig;
use daygrid_core::{DateKey, EventDraft, EventStore, Storage};
use owo_colors::OwoColorize;

/// Build the draft for a new event. The config's default color fills in a
/// missing `--color`.
pub fn draft(
    config: &DayGridConfig,
    title: String,
    start: String,
    end: String,
    description: Option<String>,
    color: Option<String>,
) -> EventDraft {
    EventDraft::new(&title, &start, &end)
        .with_description(description.as_deref().unwrap_or_default())
        .with_color(color.as_deref().unwrap_or(&config.default_color))
}

pub fn run<S: Storage>(store: &mut EventStore<S>, date: NaiveDate, draft: &EventDraft) -> Result<()> {
    let event = store
        .add_event(DateKey::from(date), draft)
        .with_context(|| format!("Could not add \"{}\" on {}", draft.title.trim(), date))?;

    println!(
        "{}",
        format!("  Added: {} ({}) on {}", event.title, event.time_label(), date).green()
    );

    Ok(())
}
