//! Calendar widget state.
//!
//! `CalendarWidget` is the headless state of the planner: which month is on
//! screen, which day is selected, what the editor holds and what the search
//! box says. It owns the event store and changes only through `update`.

use chrono::NaiveDate;

use crate::date_key::DateKey;
use crate::error::{DayGridError, DayGridResult};
use crate::event::{Event, EventDraft};
use crate::grid::{DayCell, MonthGrid};
use crate::search::{self, DayEntry};
use crate::storage::Storage;
use crate::store::EventStore;

/// Editor form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    StartTime,
    EndTime,
    Description,
    Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    MonthPrev,
    MonthNext,
    /// Jump back to the month containing today.
    Today,
    ShowMonth(MonthGrid),
    SelectDate(NaiveDate),
    /// Load the selected day's event at this store index into the editor.
    EditEvent(usize),
    DeleteEvent(usize),
    SetField(Field, String),
    Submit,
    CancelEdit,
    Search(String),
}

/// The open event editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub draft: EventDraft,
    /// Store index of the event being edited; `None` when adding.
    pub editing: Option<usize>,
}

/// What the month view shows for one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSummary<'a> {
    pub cell: DayCell,
    pub today: bool,
    pub selected: bool,
    /// Events matching the search, for this day.
    pub count: usize,
    /// The first few matching events by start time.
    pub preview: Vec<&'a Event>,
}

impl CellSummary<'_> {
    /// Matching events not shown in the preview.
    pub fn more(&self) -> usize {
        self.count.saturating_sub(self.preview.len())
    }
}

pub struct CalendarWidget<S: Storage> {
    store: EventStore<S>,
    grid: MonthGrid,
    today: NaiveDate,
    selected: Option<NaiveDate>,
    editor: Option<Editor>,
    search: String,
    preview_limit: usize,
    default_color: String,
}

impl<S: Storage> CalendarWidget<S> {
    pub fn new(store: EventStore<S>, today: NaiveDate) -> Self {
        CalendarWidget {
            store,
            grid: MonthGrid::containing(today),
            today,
            selected: None,
            editor: None,
            search: String::new(),
            preview_limit: 2,
            default_color: crate::event::DEFAULT_COLOR.to_string(),
        }
    }

    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    pub fn with_default_color(mut self, color: &str) -> Self {
        self.default_color = color.to_string();
        self
    }

    pub fn store(&self) -> &EventStore<S> {
        &self.store
    }

    pub const fn grid(&self) -> MonthGrid {
        self.grid
    }

    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    pub const fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn update(&mut self, message: Message) -> DayGridResult<()> {
        match message {
            Message::MonthPrev => {
                self.grid = self.grid.prev();
            }
            Message::MonthNext => {
                self.grid = self.grid.next();
            }
            Message::Today => {
                self.grid = MonthGrid::containing(self.today);
            }
            Message::ShowMonth(grid) => {
                self.grid = grid;
            }
            Message::SelectDate(date) => {
                if !self.grid.contains(date) {
                    self.grid = MonthGrid::containing(date);
                }
                self.selected = Some(date);
                self.editor = Some(self.blank_editor());
            }
            Message::EditEvent(index) => {
                let key = self.selected_key()?;
                let event = self.store.event(&key, index)?;

                self.editor = Some(Editor {
                    draft: EventDraft::from(event),
                    editing: Some(index),
                });
            }
            Message::DeleteEvent(index) => {
                let key = self.selected_key()?;
                self.store.delete_event(key, index)?;

                let blank = self.blank_editor();
                if let Some(editor) = &mut self.editor {
                    match editor.editing {
                        Some(editing) if editing == index => *editor = blank,
                        Some(editing) if editing > index => editor.editing = Some(editing - 1),
                        _ => {}
                    }
                }
            }
            Message::SetField(field, value) => {
                let editor = self.editor.as_mut().ok_or(DayGridError::EditorClosed)?;
                let slot = match field {
                    Field::Title => &mut editor.draft.title,
                    Field::StartTime => &mut editor.draft.start_time,
                    Field::EndTime => &mut editor.draft.end_time,
                    Field::Description => &mut editor.draft.description,
                    Field::Color => &mut editor.draft.color,
                };
                *slot = value;
            }
            Message::Submit => {
                let key = self.selected_key()?;
                let editor = self.editor.as_ref().ok_or(DayGridError::EditorClosed)?;

                match editor.editing {
                    Some(index) => self.store.update_event(key, index, &editor.draft)?,
                    None => self.store.add_event(key, &editor.draft)?,
                };

                self.editor = None;
            }
            Message::CancelEdit => {
                self.editor = None;
            }
            Message::Search(query) => {
                self.search = query;
            }
        }

        Ok(())
    }

    /// Cells of the displayed month with their search-filtered events.
    pub fn month_view(&self) -> Vec<CellSummary<'_>> {
        self.grid
            .cells()
            .into_iter()
            .map(|cell| {
                let (count, preview) = match cell {
                    DayCell::Blank => (0, Vec::new()),
                    DayCell::Day { key, .. } => {
                        let view = self.store.day(&key, &self.search);
                        let preview = view
                            .iter()
                            .take(self.preview_limit)
                            .map(|entry| entry.event)
                            .collect();
                        (view.len(), preview)
                    }
                };

                CellSummary {
                    cell,
                    today: cell.is_today(self.today),
                    selected: cell.date().is_some() && cell.date() == self.selected,
                    count,
                    preview,
                }
            })
            .collect()
    }

    /// All events of the selected day by start time. The search box does not
    /// apply here.
    pub fn selected_day(&self) -> Vec<DayEntry<'_>> {
        match self.selected {
            Some(date) => search::day_view(self.store.events(&DateKey::from(date)), ""),
            None => Vec::new(),
        }
    }

    fn selected_key(&self) -> DayGridResult<DateKey> {
        self.selected
            .map(DateKey::from)
            .ok_or(DayGridError::NoDaySelected)
    }

    fn blank_editor(&self) -> Editor {
        Editor {
            draft: EventDraft::default().with_color(&self.default_color),
            editing: None,
        }
    }
}
