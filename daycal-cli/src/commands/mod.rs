pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod parse;
pub mod reschedule;

use anyhow::{Result, bail};

/// Convert a 1-based number shown by `daycal list` into an index.
pub fn list_index(number: usize) -> Result<usize> {
    if number == 0 {
        bail!("Event numbers start at 1");
    }
    Ok(number - 1)
}
