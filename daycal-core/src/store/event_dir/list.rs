//! List event files of a day directory.

use super::StoredEvent;
use crate::codec::decode_filename_and_body;
use crate::error::DaycalResult;
use std::io;
use std::path::Path;

/// List every decodable event file in a day directory, ordered by filename.
///
/// A missing directory is an empty day. Hidden entries (temporary files) and
/// sub-directories are ignored; files that fail to read or decode are skipped
/// with a warning.
pub fn list(dir: &Path) -> DaycalResult<Vec<StoredEvent>> {
    let mut events = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(events),
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("Skipping {}: filename is not UTF-8", path.display());
            continue;
        };
        if name.starts_with('.') || !entry.file_type()?.is_file() {
            continue;
        }

        let body = match std::fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        match decode_filename_and_body(&name, &body) {
            Ok(event) => events.push(StoredEvent { path, event }),
            Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
        }
    }

    events.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(events)
}
