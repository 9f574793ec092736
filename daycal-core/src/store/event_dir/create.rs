//! Create event files in a day directory.

use crate::codec::{encode_body, encode_filename};
use crate::error::{DaycalError, DaycalResult};
use crate::event::Event;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Highest numeric suffix tried before giving up on a filename.
pub const MAX_COLLISION_SUFFIX: u32 = 100;

/// Create a new event file in the day directory and return its path.
///
/// The body is written to a hidden temporary file first, then published under
/// the first free name among `name`, `name_2`, `name_3`, ... with a rename that
/// refuses to overwrite. Checking for a free name and claiming it is one
/// filesystem operation.
pub fn create(dir: &Path, event: &Event) -> DaycalResult<PathBuf> {
    let base = encode_filename(event);

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(encode_body(event).as_bytes())?;
    tmp.as_file().sync_all()?;

    let candidates = std::iter::once(base.clone())
        .chain((2..=MAX_COLLISION_SUFFIX).map(|n| format!("{}_{}", base, n)));

    for name in candidates {
        let path = dir.join(&name);
        match tmp.persist_noclobber(&path) {
            Ok(_) => return Ok(path),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => tmp = e.file,
            Err(e) => return Err(e.error.into()),
        }
    }

    Err(DaycalError::TooManyCollisions(base))
}
