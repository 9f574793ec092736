use anyhow::{Result, bail};
use chrono::{Duration, Local, NaiveDate};

/// Parse a day given on the command line.
/// Accepts `today`, `tomorrow`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    parse_date_relative_to(input, today)
}

fn parse_date_relative_to(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(today + Duration::days(1)),
        "yesterday" => Ok(today - Duration::days(1)),
        other => match NaiveDate::parse_from_str(other, "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(_) => bail!("Invalid date '{}'. Expected YYYY-MM-DD, today, tomorrow or yesterday", input),
        },
    }
}
