//! Event types.
//!
//! `Event` is what the store keeps and persists. `EventDraft` is the raw
//! editor form; it only becomes an `Event` through `EventDraft::validate`.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{DayGridError, DayGridResult};
use crate::time_range::TimeRange;

pub const DEFAULT_COLOR: &str = "#3b82f6";

/// A single event on one day. Identity is its position in the day's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Color,
}

impl Event {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// "09:00 - 10:00"
    pub fn time_label(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// Hex color of an event, `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Default for Color {
    fn default() -> Self {
        Color(DEFAULT_COLOR.to_string())
    }
}

impl Color {
    /// Parse a `#rrggbb` color. The leading `#` is optional on input.
    pub fn parse(s: &str) -> DayGridResult<Self> {
        let hex = s.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DayGridError::Validation(format!(
                "color '{}' is not a #rrggbb hex color",
                s
            )));
        }

        Ok(Color(format!("#{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components. None for colors that did not come
    /// through `parse`, e.g. hand-edited persisted state.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }

        Some((
            u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
            u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
            u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
        ))
    }

    /// Black or white, whichever reads better on this color (W3C relative luminance).
    pub fn foreground(&self) -> (u8, u8, u8) {
        let Some((r, g, b)) = self.rgb() else {
            return (0, 0, 0);
        };

        let linear = [r, g, b].map(|c| {
            let c = f32::from(c) / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        });

        if linear[0].mul_add(0.2126, linear[1].mul_add(0.7152, linear[2] * 0.0722)) > 0.179 {
            (0, 0, 0)
        } else {
            (255, 255, 255)
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editor form contents, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub color: String,
}

impl Default for EventDraft {
    fn default() -> Self {
        EventDraft {
            title: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            description: String::new(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            start_time: event.start_time.format("%H:%M").to_string(),
            end_time: event.end_time.format("%H:%M").to_string(),
            description: event.description.clone(),
            color: event.color.to_string(),
        }
    }
}

impl EventDraft {
    pub fn new(title: &str, start_time: &str, end_time: &str) -> Self {
        EventDraft {
            title: title.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    /// Check required fields and formats, producing the event to store.
    ///
    /// Overlap with other events is not checked here; that needs the day's
    /// list and is done by the store.
    pub fn validate(&self) -> DayGridResult<Event> {
        let title = self.title.trim();
        let start = self.start_time.trim();
        let end = self.end_time.trim();

        let missing: Vec<&str> = [("title", title), ("start time", start), ("end time", end)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect();

        if !missing.is_empty() {
            return Err(DayGridError::Validation(format!(
                "missing required {}: {}",
                if missing.len() == 1 { "field" } else { "fields" },
                missing.join(", ")
            )));
        }

        let start_time = parse_time(start)?;
        let end_time = parse_time(end)?;

        if end_time <= start_time {
            return Err(DayGridError::Validation(format!(
                "end time {} must be after start time {}",
                end, start
            )));
        }

        let color = match self.color.trim() {
            "" => Color::default(),
            c => Color::parse(c)?,
        };

        Ok(Event {
            title: title.to_string(),
            start_time,
            end_time,
            description: self.description.trim().to_string(),
            color,
        })
    }
}

/// Parse "HH:MM" (24-hour). "HH:MM:SS" is accepted too, with the seconds
/// dropped so the value matches what is persisted.
pub fn parse_time(s: &str) -> DayGridResult<NaiveTime> {
    let time = NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| DayGridError::Validation(format!("invalid time '{}'. Expected HH:MM", s)))?;

    Ok(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
}

/// Serde adapter storing a `NaiveTime` as "HH:MM".
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time(&s).map_err(serde::de::Error::custom)
    }
}
