use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use daycal_core::config::DaycalConfig;
use daycal_core::{ClockTime, EventStart, store};
use owo_colors::OwoColorize;

use super::list_index;
use crate::render::event_line;

pub fn run(
    config: &DaycalConfig,
    date: NaiveDate,
    number: usize,
    start: &str,
    end: Option<&str>,
) -> Result<()> {
    let store = store::open(config);
    let events = store.load(date)?;

    let Some(old) = events.get(list_index(number)?) else {
        bail!("No event {} on {} ({} events)", number, date, events.len());
    };

    let mut new = old.clone();
    new.start = EventStart::At(ClockTime::parse(start)?);
    new.end = end.map(ClockTime::parse).transpose()?;

    store
        .update_one(date, old, &new)
        .with_context(|| format!("Failed to move '{}' on {}", old.title, date))?;

    println!("{} {}  {}", "Moved".yellow(), date, event_line(&new, config));
    Ok(())
}
