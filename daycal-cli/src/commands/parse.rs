use anyhow::{Result, bail};
use daycal_core::codec::{decode_line, encode_filename, encode_line};
use owo_colors::OwoColorize;

pub fn run(line: &str) -> Result<()> {
    let event = match decode_line(line) {
        Ok(event) => event,
        Err(e) => bail!("Could not parse {:?}: {}", line, e),
    };

    let end = event.end.as_ref().map(|e| e.to_string()).unwrap_or_default();

    println!("  Start:      {}", event.start);
    println!("  End:        {}", end);
    println!("  Title:      {}", event.title);
    println!("  Categories: {}", event.categories.join(", "));
    println!("  All-day:    {}", event.is_all_day());
    if event.start_time().is_none() && !event.is_all_day() {
        println!("  {}", "Start is not a time of day, sorts after timed events".yellow());
    }
    println!("  Line:       {}", encode_line(&event));
    println!("  Filename:   {}", encode_filename(&event));

    Ok(())
}
