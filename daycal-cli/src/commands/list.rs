use anyhow::{Context, Result, anyhow};
use chrono::{Duration, NaiveDate};
use daycal_core::config::DaycalConfig;
use daycal_core::store;
use owo_colors::OwoColorize;

use crate::render::{date_label, event_line};

pub fn run(config: &DaycalConfig, from: NaiveDate, days: u32) -> Result<()> {
    let store = store::open(config);
    let to = last_day(from, days)?;

    let days = store
        .load_range(from, to)
        .with_context(|| format!("Failed to load events from {} to {}", from, to))?;

    if days.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, (date, events)) in days.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", date_label(*date).bold(), date.to_string().dimmed());

        for (n, event) in events.iter().enumerate() {
            println!("  {:>2}. {}", n + 1, event_line(event, config));
        }
    }

    Ok(())
}

/// Last day of a span of `days` days starting at `from`.
fn last_day(from: NaiveDate, days: u32) -> Result<NaiveDate> {
    from.checked_add_signed(Duration::days(i64::from(days.max(1)) - 1))
        .ok_or_else(|| anyhow!("{} days from {} is past the last supported date", days, from))
}
