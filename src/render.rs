//! Terminal rendering for daygrid types.
//!
//! Extension traits and helpers that turn core types into colored text with
//! owo_colors. Cells are padded as plain text first and styled afterwards so
//! escape codes never count towards column widths.

use chrono::{Datelike, NaiveDate};
use daygrid_core::event::Event;
use daygrid_core::grid::DayCell;
use daygrid_core::search::DayEntry;
use daygrid_core::widget::CellSummary;
use owo_colors::OwoColorize;

/// Width of one month grid column, including the separating space.
const CELL_WIDTH: usize = 14;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!(
            "{} {} {}",
            swatch(self),
            self.time_label().dimmed(),
            self.title.bold()
        );
        if !self.description.is_empty() {
            line.push_str(&format!("\n      {}", self.description.dimmed()));
        }
        line
    }
}

impl Render for DayEntry<'_> {
    fn render(&self) -> String {
        format!("{} {}", format!("[{}]", self.index).dimmed(), self.event.render())
    }
}

/// A colored block in the event's color.
fn swatch(event: &Event) -> String {
    match event.color.rgb() {
        Some((r, g, b)) => "  ".on_truecolor(r, g, b).to_string(),
        None => "  ".to_string(),
    }
}

/// Event title on its own color, with a readable foreground.
fn label(event: &Event, width: usize) -> String {
    let text = fit(&event.title, width);
    match event.color.rgb() {
        Some((r, g, b)) => {
            let (fr, fg, fb) = event.color.foreground();
            text.truecolor(fr, fg, fb).on_truecolor(r, g, b).to_string()
        }
        None => text,
    }
}

/// Truncate to `width` characters (with an ellipsis) or pad to exactly `width`.
pub fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{text:<width$}");
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

fn day_number(summary: &CellSummary<'_>, width: usize) -> String {
    let DayCell::Day { date, weekend, .. } = summary.cell else {
        return " ".repeat(width);
    };

    let text = fit(&date.day().to_string(), width);
    if summary.selected {
        text.reversed().to_string()
    } else if summary.today {
        text.cyan().bold().to_string()
    } else if weekend {
        text.dimmed().to_string()
    } else {
        text
    }
}

/// One text line of a cell: the day number, a preview, the "+N more" line,
/// or padding.
fn cell_line(summary: &CellSummary<'_>, line: usize, width: usize) -> String {
    if line == 0 {
        return day_number(summary, width);
    }

    let slot = line - 1;
    if let Some(event) = summary.preview.get(slot) {
        return label(event, width);
    }
    if slot == summary.preview.len() && summary.more() > 0 {
        return fit(&format!("+{} more", summary.more()), width)
            .dimmed()
            .to_string();
    }
    " ".repeat(width)
}

fn cell_height(summary: &CellSummary<'_>) -> usize {
    1 + summary.preview.len() + usize::from(summary.more() > 0)
}

/// Render a month as a Sunday-first grid, one block of lines per week.
pub fn render_month(title: &str, cells: &[CellSummary<'_>]) -> String {
    let width = CELL_WIDTH - 1;
    let mut lines = Vec::new();

    lines.push(format!("{:^total$}", title, total = CELL_WIDTH * 7).bold().to_string());
    lines.push(
        WEEKDAYS
            .iter()
            .map(|day| fit(day, width).dimmed().to_string())
            .collect::<Vec<_>>()
            .join(" "),
    );

    for week in cells.chunks(7) {
        let height = week.iter().map(cell_height).max().unwrap_or(1);
        for line in 0..height {
            let row: Vec<String> = week.iter().map(|cell| cell_line(cell, line, width)).collect();
            lines.push(row.join(" ").trim_end().to_string());
        }
    }

    lines.join("\n")
}

/// Render the events of a day, headed by the date.
pub fn render_day(date: NaiveDate, entries: &[DayEntry<'_>]) -> String {
    let mut lines = vec![date.format("%A, %B %-d %Y").to_string().bold().to_string()];

    if entries.is_empty() {
        lines.push(format!("  {}", "No events".dimmed()));
    }
    for entry in entries {
        lines.push(format!("  {}", entry.render()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use daygrid_core::event::EventDraft;
    use daygrid_core::grid::MonthGrid;
    use daygrid_core::search;

    fn event(title: &str, start: &str, end: &str) -> Event {
        EventDraft::new(title, start, end).validate().unwrap()
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 3), "abc");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn day_lists_store_indices_in_start_order() {
        let events = vec![event("Late", "15:00", "16:00"), event("Early", "08:00", "09:00")];
        let entries = search::day_view(&events, "");
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let out = render_day(date, &entries);

        assert!(out.contains("Friday, March 15 2024"));
        let early = out.find("Early").unwrap();
        let late = out.find("Late").unwrap();
        assert!(early < late);
        assert!(out.contains("[1]"));
    }

    #[test]
    fn empty_day_says_so() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(render_day(date, &[]).contains("No events"));
    }

    #[test]
    fn month_shows_previews_and_overflow() {
        let a = event("Standup", "09:00", "09:15");
        let b = event("Lunch", "12:00", "13:00");
        let grid = MonthGrid::new(2024, 2);
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let cells: Vec<CellSummary<'_>> = grid
            .cells()
            .into_iter()
            .map(|cell| {
                let busy = cell.date() == Some(today);
                CellSummary {
                    cell,
                    today: busy,
                    selected: false,
                    count: if busy { 3 } else { 0 },
                    preview: if busy { vec![&a, &b] } else { Vec::new() },
                }
            })
            .collect();

        let out = render_month(&grid.title(), &cells);

        assert!(out.contains("March 2024"));
        assert!(out.contains("Sun"));
        assert!(out.contains("Standup"));
        assert!(out.contains("Lunch"));
        assert!(out.contains("+1 more"));
        assert!(out.contains("31"));
    }
}
