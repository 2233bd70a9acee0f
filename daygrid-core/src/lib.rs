//! Core types for the daygrid day planner.
//!
//! This crate holds everything that is not terminal output:
//! - `grid` builds the day cells of a month
//! - `event` and `time_range` describe events and validate them
//! - `store` keeps events per day and persists them through a `Storage`
//! - `search` filters and orders a day's events for display
//! - `widget` is the message-driven calendar state the CLI drives

pub mod config;
pub mod date_key;
pub mod error;
pub mod event;
pub mod grid;
pub mod search;
pub mod storage;
pub mod store;
pub mod time_range;
pub mod widget;

pub use date_key::DateKey;
pub use error::{DayGridError, DayGridResult};
pub use event::{Color, Event, EventDraft};
pub use grid::{DayCell, MonthGrid};
pub use search::DayEntry;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::EventStore;
pub use time_range::TimeRange;
