//! One directory per day, one file per event.
//!
//! ```text
//! days/2025-08-20/
//!     allday-Holiday
//!     0900-1000-Standup
//!     1400-Dentist
//!     1400-Dentist_2
//! ```

mod create;
mod delete;
mod list;
mod swap;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::{DAYS_DIR, DayStore, day_name, prepare};
use crate::error::{DaycalError, DaycalResult};
use crate::event::Event;
use crate::order::sort_events;

pub use create::MAX_COLLISION_SUFFIX;

/// An event together with the file it was read from.
#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub path: PathBuf,
    pub event: Event,
}

/// Day directories of event files under `<root>/days/<YYYY-MM-DD>/`.
#[derive(Debug, Clone)]
pub struct DirStore {
    days_dir: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirStore {
            days_dir: root.into().join(DAYS_DIR),
        }
    }

    pub fn days_dir(&self) -> &Path {
        &self.days_dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.days_dir.join(day_name(date))
    }

    /// Events of a day together with their files, in filename order.
    pub fn stored_events(&self, date: NaiveDate) -> DaycalResult<Vec<StoredEvent>> {
        swap::recover(&self.days_dir, &day_name(date))?;
        list::list(&self.path_for(date))
    }
}

/// Filenames carry `HHMM`, so times must be real times of day here.
fn check_filename_times(event: &Event) -> DaycalResult<()> {
    for time in event.start.clock().into_iter().chain(event.end.as_ref()) {
        if time.to_naive().is_none() {
            return Err(DaycalError::InvalidState(format!(
                "'{}' is not a time of day (in '{}')",
                time, event.title
            )));
        }
    }
    Ok(())
}

impl DayStore for DirStore {
    fn load(&self, date: NaiveDate) -> DaycalResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .stored_events(date)?
            .into_iter()
            .map(|stored| stored.event)
            .collect();
        sort_events(&mut events);
        Ok(events)
    }

    fn save_all(&self, date: NaiveDate, events: &[Event]) -> DaycalResult<()> {
        let events = prepare(events)?;
        for event in &events {
            check_filename_times(event)?;
        }

        let day = day_name(date);
        swap::recover(&self.days_dir, &day)?;

        log::debug!("Replacing {} with {} events", day, events.len());
        swap::replace_day(&self.days_dir, &day, &events)
    }

    fn save_one(&self, date: NaiveDate, event: &Event) -> DaycalResult<()> {
        event.validate()?;
        check_filename_times(event)?;

        swap::recover(&self.days_dir, &day_name(date))?;
        let dir = self.path_for(date);
        fs::create_dir_all(&dir)?;

        let path = create::create(&dir, event)?;
        log::debug!("Created {}", path.display());
        Ok(())
    }

    fn delete_one(&self, date: NaiveDate, event: &Event) -> DaycalResult<()> {
        swap::recover(&self.days_dir, &day_name(date))?;
        delete::delete(&self.path_for(date), event)?;
        Ok(())
    }

    /// Delete then re-create. If the new event cannot be written the deleted
    /// one is written back as it was stored, best effort.
    fn update_one(&self, date: NaiveDate, old: &Event, new: &Event) -> DaycalResult<()> {
        new.validate()?;
        check_filename_times(new)?;

        swap::recover(&self.days_dir, &day_name(date))?;
        let removed = delete::delete(&self.path_for(date), old)?;

        if let Err(e) = self.save_one(date, new) {
            if let Err(rollback) = self.save_one(date, &removed.event) {
                log::warn!(
                    "Could not restore '{}' after failed update: {}",
                    removed.event,
                    rollback
                );
            }
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ClockTime;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    fn timed(start: &str, end: Option<&str>, title: &str) -> Event {
        Event::timed(
            ClockTime::parse(start).unwrap(),
            end.map(|e| ClockTime::parse(e).unwrap()),
            title,
        )
        .unwrap()
    }

    #[test]
    fn test_missing_directory_is_empty_day() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        assert!(store.load(day()).unwrap().is_empty());
    }

    #[test]
    fn test_collisions_produce_distinct_files() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let first = timed("14:00", None, "Dentist").with_description("checkup");
        let second = timed("14:00", None, "Dentist").with_description("cleaning");
        store.save_one(day(), &first).unwrap();
        store.save_one(day(), &second).unwrap();

        let stored = store.stored_events(day()).unwrap();
        let names: Vec<_> = stored
            .iter()
            .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["1400-Dentist", "1400-Dentist_2"]);

        let events = store.load(day()).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.title == "Dentist"));
        let mut descriptions: Vec<_> = events.iter().filter_map(|e| e.description.clone()).collect();
        descriptions.sort();
        assert_eq!(descriptions, vec!["checkup", "cleaning"]);
    }

    #[test]
    fn test_long_multibyte_title_fits_a_filename() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let event = timed("09:00", Some("10:00"), &"会".repeat(100));
        store.save_one(day(), &event).unwrap();
        store.save_one(day(), &event).unwrap();

        // The body keeps the full title
        assert_eq!(store.load(day()).unwrap(), vec![event.clone(), event]);
    }

    #[test]
    fn test_load_skips_foreign_and_hidden_entries() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        store.save_one(day(), &timed("09:00", None, "Standup")).unwrap();

        let dir = store.path_for(day());
        fs::write(dir.join("notes.txt"), "not an event").unwrap();
        fs::write(dir.join(".tmpXYZ"), "title:Half written\n").unwrap();
        fs::create_dir(dir.join("1000-Nested")).unwrap();

        let events = store.load(day()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Standup");
    }

    #[test]
    fn test_delete_last_event_removes_directory() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let standup = timed("09:00", Some("10:00"), "Standup");
        store.save_one(day(), &standup).unwrap();

        store.delete_one(day(), &standup).unwrap();
        assert!(!store.path_for(day()).exists());
        assert!(store.load(day()).unwrap().is_empty());

        let err = store.delete_one(day(), &standup).unwrap_err();
        assert!(matches!(err, DaycalError::NotFound(_)));
    }

    #[test]
    fn test_update_renames_file() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let old = timed("09:00", None, "Standup").with_categories(["work"]);
        store.save_one(day(), &old).unwrap();

        let new = timed("09:30", Some("09:45"), "Standup").with_categories(["work"]);
        store.update_one(day(), &old, &new).unwrap();

        assert!(store.path_for(day()).join("0930-0945-Standup").is_file());
        assert_eq!(store.load(day()).unwrap(), vec![new]);
    }

    #[test]
    fn test_update_rejects_invalid_event_before_deleting() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let old = timed("09:00", None, "Standup");
        store.save_one(day(), &old).unwrap();

        let mut new = old.clone();
        new.end = Some(ClockTime::raw("later"));
        assert!(matches!(
            store.update_one(day(), &old, &new),
            Err(DaycalError::InvalidState(_))
        ));
        assert_eq!(store.load(day()).unwrap(), vec![old]);
    }

    #[test]
    fn test_failed_update_restores_stored_event() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let standup = timed("09:00", None, "Standup")
            .with_categories(["work"])
            .with_description("keep me");
        store.save_one(day(), &standup).unwrap();

        // Every name the new event could take is already used
        let dir = store.path_for(day());
        let retro = timed("10:00", None, "Retro");
        let body = crate::codec::encode_body(&retro);
        fs::write(dir.join("1000-Retro"), &body).unwrap();
        for n in 2..=MAX_COLLISION_SUFFIX {
            fs::write(dir.join(format!("1000-Retro_{}", n)), &body).unwrap();
        }

        let lookup = timed("09:00", None, "Standup");
        let err = store.update_one(day(), &lookup, &retro).unwrap_err();
        assert!(matches!(err, DaycalError::TooManyCollisions(_)));

        let restored: Vec<_> = store
            .load(day())
            .unwrap()
            .into_iter()
            .filter(|e| e.title == "Standup")
            .collect();
        assert_eq!(restored, vec![standup]);
    }

    #[test]
    fn test_save_all_replaces_day() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        store.save_one(day(), &timed("07:00", None, "Gone")).unwrap();

        let events = vec![
            timed("14:00", None, "Dentist"),
            Event::all_day("Holiday").unwrap().with_categories(["personal"]),
        ];
        store.save_all(day(), &events).unwrap();

        let loaded = store.load(day()).unwrap();
        let titles: Vec<_> = loaded.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Holiday", "Dentist"]);

        let hidden = fs::read_dir(store.days_dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with('.'))
            .count();
        assert_eq!(hidden, 0);

        store.save_all(day(), &[]).unwrap();
        assert!(!store.path_for(day()).exists());
    }
}
