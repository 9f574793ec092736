use anyhow::{Context, Result};
use chrono::NaiveDate;
use daycal_core::config::DaycalConfig;
use daycal_core::store;
use owo_colors::OwoColorize;

use super::list_index;
use crate::render::event_line;

pub fn run(config: &DaycalConfig, date: NaiveDate, number: usize) -> Result<()> {
    let store = store::open(config);

    let removed = store
        .delete_at(date, list_index(number)?)
        .with_context(|| format!("Failed to delete event {} on {}", number, date))?;

    println!("{} {}  {}", "Deleted".red(), date, event_line(&removed, config));
    Ok(())
}
