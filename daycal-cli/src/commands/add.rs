use anyhow::{Context, Result};
use chrono::NaiveDate;
use daycal_core::config::DaycalConfig;
use daycal_core::{ClockTime, Event, store};
use owo_colors::OwoColorize;

use crate::render::event_line;

/// Event fields as given on the command line. No start means all-day.
pub struct NewEvent {
    pub date: NaiveDate,
    pub title: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub categories: Vec<String>,
    pub description: Option<String>,
}

pub fn run(config: &DaycalConfig, new: NewEvent) -> Result<()> {
    let event = match &new.start {
        Some(start) => {
            let start = ClockTime::parse(start)?;
            let end = new.end.as_deref().map(ClockTime::parse).transpose()?;
            Event::timed(start, end, new.title)?
        }
        None => Event::all_day(new.title)?,
    };

    let mut event = event.with_categories(&new.categories);
    if let Some(description) = new.description {
        event = event.with_description(description);
    }

    let store = store::open(config);
    store
        .save_one(new.date, &event)
        .with_context(|| format!("Failed to add '{}' on {}", event.title, new.date))?;

    println!("{} {}  {}", "Added".green(), new.date, event_line(&event, config));
    Ok(())
}
