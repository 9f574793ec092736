//! Delete event files from a day directory.

use super::StoredEvent;
use super::list::list;
use crate::error::{DaycalError, DaycalResult};
use crate::event::Event;
use std::path::Path;

/// Delete the first event file (by filename) whose event has the same start,
/// end and title as `target`, returning what was stored in it. The day
/// directory goes away with its last file.
pub fn delete(dir: &Path, target: &Event) -> DaycalResult<StoredEvent> {
    let stored = list(dir)?
        .into_iter()
        .find(|s| s.event.same_identity(target))
        .ok_or_else(|| DaycalError::NotFound(target.to_string()))?;

    std::fs::remove_file(&stored.path)?;

    if std::fs::read_dir(dir)?.next().is_none() {
        std::fs::remove_dir(dir)?;
    }

    Ok(stored)
}
