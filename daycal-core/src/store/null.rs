//! Store used when there is nowhere to persist events.

use chrono::NaiveDate;

use super::DayStore;
use crate::error::{DaycalError, DaycalResult};
use crate::event::Event;

/// Reads every day as empty and refuses writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl DayStore for NullStore {
    fn load(&self, _date: NaiveDate) -> DaycalResult<Vec<Event>> {
        Ok(Vec::new())
    }

    fn save_all(&self, _date: NaiveDate, _events: &[Event]) -> DaycalResult<()> {
        Err(DaycalError::StorageUnavailable)
    }

    fn save_one(&self, _date: NaiveDate, _event: &Event) -> DaycalResult<()> {
        Err(DaycalError::StorageUnavailable)
    }

    fn delete_one(&self, _date: NaiveDate, _event: &Event) -> DaycalResult<()> {
        Err(DaycalError::StorageUnavailable)
    }

    fn update_one(&self, _date: NaiveDate, _old: &Event, _new: &Event) -> DaycalResult<()> {
        Err(DaycalError::StorageUnavailable)
    }
}
