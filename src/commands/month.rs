use anyhow::Result;
use chrono::Datelike;
use daygrid_core::config::DayGridConfig;
use daygrid_core::widget::{CalendarWidget, Message};
use daygrid_core::{EventStore, MonthGrid, Storage};
use owo_colors::OwoColorize;

use crate::render::render_month;

pub fn run<S: Storage>(
    store: EventStore<S>,
    config: &DayGridConfig,
    year: Option<i32>,
    month: Option<u32>,
    search: Option<String>,
) -> Result<()> {
    let today = super::today();
    let mut widget = CalendarWidget::new(store, today)
        .with_preview_limit(config.preview_limit)
        .with_default_color(&config.default_color);

    if year.is_some() || month.is_some() {
        let year = year.unwrap_or(today.year());
        let month = month.unwrap_or(today.month());
        widget.update(Message::ShowMonth(MonthGrid::new(year, i64::from(month) - 1)))?;
    }

    if let Some(query) = search {
        widget.update(Message::Search(query))?;
    }

    let cells = widget.month_view();
    println!("{}", render_month(&widget.grid().title(), &cells));

    let total: usize = cells.iter().map(|cell| cell.count).sum();
    let label = match (total, widget.search().is_empty()) {
        (0, true) => "No events this month".to_string(),
        (1, true) => "1 event this month".to_string(),
        (n, true) => format!("{} events this month", n),
        (n, false) => format!("{} matching \"{}\"", n, widget.search()),
    };
    println!();
    println!("{}", label.dimmed());

    Ok(())
}
