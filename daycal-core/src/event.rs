//! Calendar event types.
//!
//! An [`Event`] is one entry on one calendar day. Events carry no date of their
//! own: the day they belong to is the day file (or day directory) they live in.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DaycalError, DaycalResult, ParseError};

/// Keyword used for the all-day sentinel in the line format.
pub const ALL_DAY: &str = "all-day";

const TIME_FORMAT: &str = "%H:%M";

/// A wall-clock time of day with minute precision.
///
/// The text is kept as written so that a hand-edited value that is not a real
/// time (`25:99`) still survives a load/save cycle of the line format.
/// Values built through [`ClockTime::parse`] are always valid `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockTime(String);

impl ClockTime {
    /// Parse a time of day, normalizing it to zero-padded `HH:MM`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let time = NaiveTime::parse_from_str(s, TIME_FORMAT)
            .map_err(|_| ParseError::InvalidTime(s.to_string()))?;
        Ok(Self::from_naive(time))
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        ClockTime(time.format(TIME_FORMAT).to_string())
    }

    /// Keep the text verbatim. Used by the line decoder.
    pub(crate) fn raw(s: &str) -> Self {
        ClockTime(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The parsed time, or `None` when the text is not a valid time of day.
    pub fn to_naive(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.0, TIME_FORMAT).ok()
    }

    /// `HHMM` form used in event filenames.
    pub fn compact(&self) -> String {
        match self.to_naive() {
            Some(time) => time.format("%H%M").to_string(),
            None => self.0.replace(':', ""),
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// When an event starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStart {
    /// No specific time, spans the whole day.
    AllDay,
    At(ClockTime),
}

impl EventStart {
    pub fn clock(&self) -> Option<&ClockTime> {
        match self {
            EventStart::AllDay => None,
            EventStart::At(time) => Some(time),
        }
    }
}

impl fmt::Display for EventStart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventStart::AllDay => f.write_str(ALL_DAY),
            EventStart::At(time) => write!(f, "{}", time),
        }
    }
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub start: EventStart,
    /// Display-only end time. Absent for all-day events.
    pub end: Option<ClockTime>,
    /// Never empty.
    pub title: String,
    /// Free-form labels, in the order they were written.
    pub categories: Vec<String>,
    /// Only persisted by the per-event-file layout.
    pub description: Option<String>,
}

impl Event {
    /// A timed event. Fails when the title is blank.
    pub fn timed(
        start: ClockTime,
        end: Option<ClockTime>,
        title: impl Into<String>,
    ) -> Result<Self, ParseError> {
        Ok(Event {
            start: EventStart::At(start),
            end,
            title: non_empty_title(title.into())?,
            categories: Vec::new(),
            description: None,
        })
    }

    /// An all-day event. Fails when the title is blank.
    pub fn all_day(title: impl Into<String>) -> Result<Self, ParseError> {
        Ok(Event {
            start: EventStart::AllDay,
            end: None,
            title: non_empty_title(title.into())?,
            categories: Vec::new(),
            description: None,
        })
    }

    /// Replace the categories. Labels are trimmed and blank ones dropped.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.categories = categories
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into().trim().to_string();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    pub fn is_all_day(&self) -> bool {
        self.start == EventStart::AllDay
    }

    /// Parsed start time. `None` for all-day events and unparsable starts.
    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start.clock().and_then(ClockTime::to_naive)
    }

    /// Whether two events refer to the same entry for delete/update purposes.
    /// Categories and description are not part of identity.
    pub fn same_identity(&self, other: &Event) -> bool {
        self.start == other.start && self.end == other.end && self.title == other.title
    }

    /// Check the event can be written without corrupting either storage format.
    pub fn validate(&self) -> DaycalResult<()> {
        if self.title.trim().is_empty() {
            return Err(DaycalError::InvalidState("event has no title".into()));
        }
        if self.is_all_day() && self.end.is_some() {
            return Err(DaycalError::InvalidState(format!(
                "all-day event '{}' has an end time",
                self.title
            )));
        }
        if has_line_break(&self.title) {
            return Err(DaycalError::InvalidState(format!(
                "title '{}' spans several lines",
                self.title.escape_debug()
            )));
        }

        let times = self.start.clock().into_iter().chain(self.end.as_ref());
        for time in times {
            if time.as_str().is_empty() || time.as_str().contains(char::is_whitespace) {
                return Err(DaycalError::InvalidState(format!(
                    "malformed time '{}' in '{}'",
                    time, self.title
                )));
            }
        }

        for category in &self.categories {
            if category.trim().is_empty()
                || category.contains([',', '['])
                || has_line_break(category)
            {
                return Err(DaycalError::InvalidState(format!(
                    "category '{}' cannot be stored",
                    category.escape_debug()
                )));
            }
        }

        if self.description.as_deref().is_some_and(has_line_break) {
            return Err(DaycalError::InvalidState(format!(
                "description of '{}' spans several lines",
                self.title
            )));
        }

        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&crate::codec::encode_line(self))
    }
}

fn non_empty_title(title: String) -> Result<String, ParseError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ParseError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}
