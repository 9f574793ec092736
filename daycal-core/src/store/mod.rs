//! Day stores: the only code that touches calendar files.
//!
//! Everything lives under `<calendar_dir>/days/`, keyed by ISO date. Two
//! layouts exist:
//!
//! - [`LineStore`]: one plain-text file per day, one event per line.
//! - [`DirStore`]: one directory per day, one file per event.
//!
//! Stores keep no state between calls. Every operation re-reads the disk and
//! applies the canonical ordering before returning or writing events.

mod event_dir;
mod line_file;
mod null;

pub use event_dir::{DirStore, MAX_COLLISION_SUFFIX, StoredEvent};
pub use line_file::LineStore;
pub use null::NullStore;

use chrono::NaiveDate;

use crate::config::{DaycalConfig, StoreLayout};
use crate::error::{DaycalError, DaycalResult};
use crate::event::Event;
use crate::order::sort_events;

/// Name of the directory holding the per-day entries.
pub const DAYS_DIR: &str = "days";

/// Persistence for the events of single calendar days.
pub trait DayStore: Send + Sync {
    /// Events of a day in canonical order. A day with nothing stored is empty,
    /// not an error.
    fn load(&self, date: NaiveDate) -> DaycalResult<Vec<Event>>;

    /// Replace every event of a day. An empty list removes the day.
    fn save_all(&self, date: NaiveDate, events: &[Event]) -> DaycalResult<()>;

    /// Add one event to a day.
    fn save_one(&self, date: NaiveDate, event: &Event) -> DaycalResult<()>;

    /// Remove the first event with the same start, end and title.
    fn delete_one(&self, date: NaiveDate, event: &Event) -> DaycalResult<()>;

    /// Replace the first event with the same start, end and title as `old`.
    fn update_one(&self, date: NaiveDate, old: &Event, new: &Event) -> DaycalResult<()>;

    /// Days in `from..=to` that have events, with their events.
    fn load_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DaycalResult<Vec<(NaiveDate, Vec<Event>)>> {
        let mut days = Vec::new();
        for date in from.iter_days().take_while(|d| *d <= to) {
            let events = self.load(date)?;
            if !events.is_empty() {
                days.push((date, events));
            }
        }
        Ok(days)
    }

    /// Dates in `from..=to` that have at least one event.
    fn dates_with_events(&self, from: NaiveDate, to: NaiveDate) -> DaycalResult<Vec<NaiveDate>> {
        Ok(self
            .load_range(from, to)?
            .into_iter()
            .map(|(date, _)| date)
            .collect())
    }

    /// Remove the event at `index` in the day's canonical order and return it.
    fn delete_at(&self, date: NaiveDate, index: usize) -> DaycalResult<Event> {
        let events = self.load(date)?;
        let event = events
            .get(index)
            .cloned()
            .ok_or(DaycalError::InvalidIndex {
                index,
                len: events.len(),
            })?;
        self.delete_one(date, &event)?;
        Ok(event)
    }
}

/// Open the store selected by the configuration.
///
/// Without a usable calendar directory (no home directory) this degrades to a
/// [`NullStore`]: days read as empty and writes fail.
pub fn open(config: &DaycalConfig) -> Box<dyn DayStore> {
    let Some(root) = config.data_path() else {
        log::warn!("Could not resolve the calendar directory, events will not be saved");
        return Box::new(NullStore);
    };

    match config.layout {
        StoreLayout::Lines => Box::new(LineStore::new(root)),
        StoreLayout::EventFiles => Box::new(DirStore::new(root)),
    }
}

/// ISO date used as the file or directory name of a day.
pub fn day_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Validate and sort events before they are written.
fn prepare(events: &[Event]) -> DaycalResult<Vec<Event>> {
    for event in events {
        event.validate()?;
    }
    let mut events = events.to_vec();
    sort_events(&mut events);
    Ok(events)
}
