//! One plain-text file per day.
//!
//! ```text
//! # days/2025-08-20
//! all-day Holiday [personal]
//! 09:00-10:00 Standup [work]
//! 14:00 Dentist
//! ```

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use super::{DAYS_DIR, DayStore, day_name, prepare};
use crate::codec::{decode_line, encode_line};
use crate::error::{DaycalError, DaycalResult};
use crate::event::Event;
use crate::order::sort_events;

/// Day files of lines under `<root>/days/<YYYY-MM-DD>`.
#[derive(Debug, Clone)]
pub struct LineStore {
    days_dir: PathBuf,
}

impl LineStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LineStore {
            days_dir: root.into().join(DAYS_DIR),
        }
    }

    pub fn days_dir(&self) -> &Path {
        &self.days_dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.days_dir.join(day_name(date))
    }

    /// Write through a sibling temporary file renamed over the day file, so
    /// the day file is never seen half written. The temporary file is removed
    /// on any failure.
    fn write_atomic(&self, date: NaiveDate, events: &[Event]) -> DaycalResult<()> {
        fs::create_dir_all(&self.days_dir)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{}.", day_name(date)))
            .suffix(".tmp")
            .tempfile_in(&self.days_dir)?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            for event in events {
                writeln!(writer, "{}", encode_line(event))?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        persist(tmp, &self.path_for(date))
    }
}

fn persist(tmp: NamedTempFile, path: &Path) -> DaycalResult<()> {
    tmp.persist(path).map_err(|e| DaycalError::Io(e.error))?;
    Ok(())
}

impl DayStore for LineStore {
    fn load(&self, date: NaiveDate) -> DaycalResult<Vec<Event>> {
        let path = self.path_for(date);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut events = Vec::new();
        for (idx, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = match String::from_utf8(line?) {
                Ok(line) => line,
                Err(_) => {
                    log::warn!("{}:{}: skipping line: not valid UTF-8", path.display(), idx + 1);
                    continue;
                }
            };
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match decode_line(line) {
                Ok(event) => events.push(event),
                Err(e) => log::warn!("{}:{}: skipping line: {}", path.display(), idx + 1, e),
            }
        }

        sort_events(&mut events);
        Ok(events)
    }

    fn save_all(&self, date: NaiveDate, events: &[Event]) -> DaycalResult<()> {
        let events = prepare(events)?;

        if events.is_empty() {
            log::debug!("Removing day file for {}", date);
            return match fs::remove_file(self.path_for(date)) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }

        log::debug!("Writing {} events for {}", events.len(), date);
        self.write_atomic(date, &events)
    }

    fn save_one(&self, date: NaiveDate, event: &Event) -> DaycalResult<()> {
        let mut events = self.load(date)?;
        events.push(event.clone());
        self.save_all(date, &events)
    }

    fn delete_one(&self, date: NaiveDate, event: &Event) -> DaycalResult<()> {
        let mut events = self.load(date)?;
        let idx = position_of(&events, event)?;
        events.remove(idx);
        self.save_all(date, &events)
    }

    fn update_one(&self, date: NaiveDate, old: &Event, new: &Event) -> DaycalResult<()> {
        let mut events = self.load(date)?;
        let idx = position_of(&events, old)?;
        events[idx] = new.clone();
        self.save_all(date, &events)
    }
}

fn position_of(events: &[Event], target: &Event) -> DaycalResult<usize> {
    events
        .iter()
        .position(|e| e.same_identity(target))
        .ok_or_else(|| DaycalError::NotFound(target.to_string()))
}
