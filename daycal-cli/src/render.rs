//! Terminal rendering for daycal types.
//!
//! Extension trait and helpers that add colored output to daycal-core types
//! using owo_colors.

use chrono::{Local, NaiveDate};
use daycal_core::config::DaycalConfig;
use daycal_core::{Event, EventStart};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    /// Time column, e.g. `  all-day`, `09:00-10:00`, `      14:00`
    fn render(&self) -> String {
        let time = match (&self.start, &self.end) {
            (EventStart::AllDay, _) => "all-day".to_string(),
            (EventStart::At(start), Some(end)) => format!("{}-{}", start, end),
            (EventStart::At(start), None) => start.to_string(),
        };
        format!("{:>11}", time)
    }
}

/// One event line: time, title, colored categories and a dimmed description.
pub fn event_line(event: &Event, config: &DaycalConfig) -> String {
    let mut line = format!("{} {}", event.render().dimmed(), event.title);

    for category in &event.categories {
        let tag = format!("[{}]", category);
        let tag = match hex_rgb(config.category_color(category)) {
            Some((r, g, b)) => tag.truecolor(r, g, b).to_string(),
            None => tag,
        };
        line.push(' ');
        line.push_str(&tag);
    }

    if let Some(description) = &event.description {
        line.push_str(&format!(" {}", format!("- {}", description).dimmed()));
    }

    line
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Aug 20")
pub fn date_label(date: NaiveDate) -> String {
    let today = Local::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// `#rrggbb` to its components.
fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
