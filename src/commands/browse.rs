use anyhow::Result;
use daygrid_core::config::DayGridConfig;
use daygrid_core::widget::{CalendarWidget, Field, Message};
use daygrid_core::{EventStore, Storage};
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

use crate::render::{render_day, render_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    PrevMonth,
    NextMonth,
    Today,
    SelectDay,
    Search,
    AddEvent,
    EditEvent,
    DeleteEvent,
    ResumeDraft,
    DiscardDraft,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::PrevMonth => "Previous month",
            Action::NextMonth => "Next month",
            Action::Today => "Today",
            Action::SelectDay => "Select a day",
            Action::Search => "Search",
            Action::AddEvent => "Add event",
            Action::EditEvent => "Edit event",
            Action::DeleteEvent => "Delete event",
            Action::ResumeDraft => "Resume draft",
            Action::DiscardDraft => "Discard draft",
            Action::Quit => "Quit",
        }
    }
}

const FIELDS: [(Field, &str); 5] = [
    (Field::Title, "  Title"),
    (Field::StartTime, "  Start (HH:MM)"),
    (Field::EndTime, "  End (HH:MM)"),
    (Field::Description, "  Description"),
    (Field::Color, "  Color (#rrggbb)"),
];

pub fn run<S: Storage>(store: EventStore<S>, config: &DayGridConfig) -> Result<()> {
    let mut widget = CalendarWidget::new(store, super::today())
        .with_preview_limit(config.preview_limit)
        .with_default_color(&config.default_color);

    loop {
        show(&widget);

        let actions = available_actions(&widget);
        let labels: Vec<&str> = actions.iter().map(|action| action.label()).collect();
        let selection = Select::new()
            .with_prompt("  What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        let action = actions[selection];
        if action == Action::Quit {
            break;
        }

        // Rejected changes are reported and the session carries on.
        if let Err(e) = perform(&mut widget, action) {
            eprintln!("  {}", e.to_string().red());
        }
    }

    Ok(())
}

fn show<S: Storage>(widget: &CalendarWidget<S>) {
    println!();
    println!("{}", render_month(&widget.grid().title(), &widget.month_view()));

    if !widget.search().is_empty() {
        println!("{}", format!("  Searching for \"{}\"", widget.search()).dimmed());
    }

    if let Some(date) = widget.selected() {
        println!();
        println!("{}", render_day(date, &widget.selected_day()));
    }
    println!();
}

fn available_actions<S: Storage>(widget: &CalendarWidget<S>) -> Vec<Action> {
    let mut actions = vec![
        Action::PrevMonth,
        Action::NextMonth,
        Action::Today,
        Action::SelectDay,
        Action::Search,
    ];

    if widget.selected().is_some() {
        actions.push(Action::AddEvent);
        if !widget.selected_day().is_empty() {
            actions.push(Action::EditEvent);
            actions.push(Action::DeleteEvent);
        }
    }

    // A draft with content survives a rejected submit.
    if widget
        .editor()
        .is_some_and(|editor| editor.editing.is_some() || !editor.draft.title.is_empty())
    {
        actions.push(Action::ResumeDraft);
        actions.push(Action::DiscardDraft);
    }

    actions.push(Action::Quit);
    actions
}

fn perform<S: Storage>(widget: &mut CalendarWidget<S>, action: Action) -> Result<()> {
    match action {
        Action::PrevMonth => widget.update(Message::MonthPrev)?,
        Action::NextMonth => widget.update(Message::MonthNext)?,
        Action::Today => widget.update(Message::Today)?,
        Action::SelectDay => {
            let default = widget.selected().unwrap_or(widget.today());
            let input: String = Input::new()
                .with_prompt("  Day (YYYY-MM-DD)")
                .default(default.format("%Y-%m-%d").to_string())
                .interact_text()?;
            let date = super::parse_date(&input)?;
            widget.update(Message::SelectDate(date))?;
        }
        Action::Search => {
            let query: String = Input::new()
                .with_prompt("  Search (empty clears)")
                .with_initial_text(widget.search())
                .allow_empty(true)
                .interact_text()?;
            widget.update(Message::Search(query.trim().to_string()))?;
        }
        Action::AddEvent => {
            if let Some(date) = widget.selected() {
                // Reselecting opens a blank editor for the day.
                widget.update(Message::SelectDate(date))?;
            }
            fill_and_submit(widget)?;
        }
        Action::EditEvent => {
            let index = pick_event(widget, "  Edit which event?")?;
            widget.update(Message::EditEvent(index))?;
            fill_and_submit(widget)?;
        }
        Action::DeleteEvent => {
            let index = pick_event(widget, "  Delete which event?")?;
            let confirmed = Confirm::new()
                .with_prompt("  Delete this event?")
                .default(false)
                .interact()?;
            if confirmed {
                widget.update(Message::DeleteEvent(index))?;
            }
        }
        Action::ResumeDraft => fill_and_submit(widget)?,
        Action::DiscardDraft => widget.update(Message::CancelEdit)?,
        Action::Quit => {}
    }

    Ok(())
}

/// Let the user choose one of the selected day's events; returns its store index.
fn pick_event<S: Storage>(widget: &CalendarWidget<S>, prompt: &str) -> Result<usize> {
    let entries = widget.selected_day();
    let items: Vec<String> = entries
        .iter()
        .map(|entry| format!("{} {}", entry.event.time_label(), entry.event.title))
        .collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(entries[selection].index)
}

/// Prompt for every editor field, prefilled with the current draft, then submit.
fn fill_and_submit<S: Storage>(widget: &mut CalendarWidget<S>) -> Result<()> {
    for (field, prompt) in FIELDS {
        let current = match widget.editor() {
            Some(editor) => draft_value(&editor.draft, field).to_string(),
            None => String::new(),
        };

        let value: String = Input::new()
            .with_prompt(prompt)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;
        widget.update(Message::SetField(field, value))?;
    }

    let editing = widget.editor().and_then(|editor| editor.editing);
    widget.update(Message::Submit)?;

    let verb = if editing.is_some() { "Updated" } else { "Added" };
    if let Some(date) = widget.selected() {
        log::debug!("{} event on {}; day now has {} events", verb, date, widget.selected_day().len());
    }
    println!("{}", format!("  {} event", verb).green());

    Ok(())
}

fn draft_value(draft: &daygrid_core::EventDraft, field: Field) -> &str {
    match field {
        Field::Title => &draft.title,
        Field::StartTime => &draft.start_time,
        Field::EndTime => &draft.end_time,
        Field::Description => &draft.description,
        Field::Color => &draft.color,
    }
}
