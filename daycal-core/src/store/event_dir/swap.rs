//! Whole-day replacement for the per-event layout.
//!
//! A day is rebuilt in `days/.<date>.staging`, then swapped in: the live
//! directory is renamed to `days/.<date>.prev`, staging is renamed into place
//! and the previous directory removed. At every point either the old or the
//! new day is complete on disk; [`recover`] finishes or rolls back a swap that
//! was interrupted.

use super::create::create;
use crate::error::DaycalResult;
use crate::event::Event;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn staging_path(days_dir: &Path, day: &str) -> PathBuf {
    days_dir.join(format!(".{}.staging", day))
}

fn previous_path(days_dir: &Path, day: &str) -> PathBuf {
    days_dir.join(format!(".{}.prev", day))
}

/// Replace the whole day directory with one file per event.
pub fn replace_day(days_dir: &Path, day: &str, events: &[Event]) -> DaycalResult<()> {
    let live = days_dir.join(day);

    if events.is_empty() {
        return match fs::remove_dir_all(&live) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        };
    }

    let staging = staging_path(days_dir, day);
    remove_dir_if_exists(&staging)?;
    fs::create_dir_all(&staging)?;

    if let Err(e) = events.iter().try_for_each(|event| create(&staging, event).map(drop)) {
        if let Err(cleanup) = fs::remove_dir_all(&staging) {
            log::warn!("Could not remove {}: {}", staging.display(), cleanup);
        }
        return Err(e);
    }

    let previous = previous_path(days_dir, day);
    let had_live = live.exists();
    if had_live {
        fs::rename(&live, &previous)?;
    }

    if let Err(e) = fs::rename(&staging, &live) {
        if had_live {
            fs::rename(&previous, &live)?;
        }
        return Err(e.into());
    }

    if had_live {
        fs::remove_dir_all(&previous)?;
    }
    Ok(())
}

/// Repair whatever an interrupted [`replace_day`] left behind.
pub fn recover(days_dir: &Path, day: &str) -> io::Result<()> {
    let live = days_dir.join(day);
    let previous = previous_path(days_dir, day);

    if previous.exists() {
        if live.exists() {
            fs::remove_dir_all(&previous)?;
        } else {
            log::warn!("Restoring {} from an interrupted save", live.display());
            fs::rename(&previous, &live)?;
        }
    }

    remove_dir_if_exists(&staging_path(days_dir, day))
}

fn remove_dir_if_exists(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_replace_day_swaps_contents() {
        let tmp = TempDir::new().unwrap();
        let days = tmp.path();
        replace_day(days, "2025-08-20", &[Event::all_day("Old").unwrap()]).unwrap();
        replace_day(days, "2025-08-20", &[Event::all_day("New").unwrap()]).unwrap();

        assert_eq!(names(days), vec!["2025-08-20"]);
        assert_eq!(names(&days.join("2025-08-20")), vec!["allday-New"]);
    }

    #[test]
    fn test_recover_restores_previous_when_live_missing() {
        let tmp = TempDir::new().unwrap();
        let days = tmp.path();
        let previous = previous_path(days, "2025-08-20");
        fs::create_dir_all(&previous).unwrap();
        fs::write(previous.join("allday-Kept"), "title:Kept\n").unwrap();
        fs::create_dir_all(staging_path(days, "2025-08-20")).unwrap();

        recover(days, "2025-08-20").unwrap();

        assert_eq!(names(days), vec!["2025-08-20"]);
        assert_eq!(names(&days.join("2025-08-20")), vec!["allday-Kept"]);
    }

    #[test]
    fn test_recover_discards_previous_when_swap_finished() {
        let tmp = TempDir::new().unwrap();
        let days = tmp.path();
        fs::create_dir_all(days.join("2025-08-20")).unwrap();
        fs::create_dir_all(previous_path(days, "2025-08-20")).unwrap();

        recover(days, "2025-08-20").unwrap();

        assert_eq!(names(days), vec!["2025-08-20"]);
    }
}
