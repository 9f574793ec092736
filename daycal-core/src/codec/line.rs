//! The line format: `<time> <title>[ [cat1,cat2]]`.

use crate::error::ParseError;
use crate::event::{ALL_DAY, ClockTime, Event, EventStart};

/// Decode one line of a day file.
///
/// Formats:
/// - `09:00-10:00 Team standup [work,important]`
/// - `14:00 Quick check [health]`
/// - `all-day Vacation [personal]`
///
/// Times are kept as written; whether they are real times of day only
/// matters to ordering.
pub fn decode_line(line: &str) -> Result<Event, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyLine);
    }

    if let Some(rest) = line.strip_prefix(ALL_DAY)
        && rest.starts_with(char::is_whitespace)
    {
        let (title, categories) = split_title_and_categories(rest)?;
        return Ok(Event {
            start: EventStart::AllDay,
            end: None,
            title,
            categories,
            description: None,
        });
    }

    let (time_part, remainder) = line
        .split_once(char::is_whitespace)
        .ok_or(ParseError::MissingBody)?;
    let (start, end) = parse_time_spec(time_part)?;
    let (title, categories) = split_title_and_categories(remainder)?;

    Ok(Event {
        start: EventStart::At(start),
        end,
        title,
        categories,
        description: None,
    })
}

/// Encode an event as a day file line. The description is not part of the
/// line format.
pub fn encode_line(event: &Event) -> String {
    let time_part = match (&event.start, &event.end) {
        (EventStart::AllDay, _) => ALL_DAY.to_string(),
        (EventStart::At(start), Some(end)) => format!("{}-{}", start, end),
        (EventStart::At(start), None) => start.to_string(),
    };

    let mut line = format!("{} {}", time_part, event.title);

    if !event.categories.is_empty() {
        line.push_str(&format!(" [{}]", event.categories.join(",")));
    } else if trailing_brackets(&event.title).is_some() {
        // Otherwise the title's own brackets would be read back as categories
        line.push_str(" []");
    }

    line
}

/// `HH:MM-HH:MM` or `HH:MM`.
fn parse_time_spec(spec: &str) -> Result<(ClockTime, Option<ClockTime>), ParseError> {
    match spec.split_once('-') {
        None => Ok((ClockTime::raw(spec), None)),
        Some((start, end)) => {
            if start.is_empty() || end.is_empty() || end.contains('-') {
                return Err(ParseError::InvalidTime(spec.to_string()));
            }
            Ok((ClockTime::raw(start), Some(ClockTime::raw(end))))
        }
    }
}

fn split_title_and_categories(text: &str) -> Result<(String, Vec<String>), ParseError> {
    let text = text.trim();

    let (title, categories) = match trailing_brackets(text) {
        Some((title, inner)) => (title.trim(), split_categories(inner)),
        None => (text, Vec::new()),
    };

    if title.is_empty() {
        return Err(ParseError::EmptyTitle);
    }

    Ok((title.to_string(), categories))
}

/// Split `Title [a,b]` at the last `[` of a bracket pair closing the text.
fn trailing_brackets(text: &str) -> Option<(&str, &str)> {
    let open = text.strip_suffix(']')?;
    let idx = open.rfind('[')?;
    Some((&open[..idx], &open[idx + 1..]))
}

fn split_categories(inner: &str) -> Vec<String> {
    inner
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn test_decode_time_range_with_categories() {
        let event = decode_line("09:00-10:00 Team standup [work,important]").unwrap();
        assert_eq!(event.start, EventStart::At(time("09:00")));
        assert_eq!(event.end, Some(time("10:00")));
        assert_eq!(event.title, "Team standup");
        assert_eq!(event.categories, vec!["work", "important"]);
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_decode_single_time() {
        let event = decode_line("14:00 Quick dentist check [health]").unwrap();
        assert_eq!(event.start, EventStart::At(time("14:00")));
        assert_eq!(event.end, None);
        assert_eq!(event.title, "Quick dentist check");
    }

    #[test]
    fn test_decode_all_day_without_categories() {
        let event = decode_line("  all-day Birthday  ").unwrap();
        assert!(event.is_all_day());
        assert_eq!(event.end, None);
        assert_eq!(event.title, "Birthday");
        assert!(event.categories.is_empty());
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode_line("   "), Err(ParseError::EmptyLine));
        assert_eq!(decode_line("09:00"), Err(ParseError::MissingBody));
        assert_eq!(decode_line("all-day"), Err(ParseError::MissingBody));
        assert_eq!(decode_line("09:00 [work]"), Err(ParseError::EmptyTitle));
        assert_eq!(
            decode_line("09:00-10:00-11:00 Too many"),
            Err(ParseError::InvalidTime("09:00-10:00-11:00".to_string()))
        );
        assert_eq!(
            decode_line("09:00- Dangling"),
            Err(ParseError::InvalidTime("09:00-".to_string()))
        );
    }

    #[test]
    fn test_decode_keeps_unparsable_time_text() {
        // Only ordering cares whether a time is real
        let event = decode_line("invalid format").unwrap();
        assert_eq!(event.start, EventStart::At(ClockTime::raw("invalid")));
        assert_eq!(event.start_time(), None);
        assert_eq!(event.title, "format");
    }

    #[test]
    fn test_decode_uses_last_bracket_pair() {
        let event = decode_line("10:00 Review [draft] notes [work, ,writing]").unwrap();
        assert_eq!(event.title, "Review [draft] notes");
        assert_eq!(event.categories, vec!["work", "writing"]);
    }

    #[test]
    fn test_decode_brackets_not_at_end_stay_in_title() {
        let event = decode_line("10:00 Read [draft] notes").unwrap();
        assert_eq!(event.title, "Read [draft] notes");
        assert!(event.categories.is_empty());
    }

    #[test]
    fn test_encode_forms() {
        let standup = Event::timed(time("09:00"), Some(time("10:00")), "Standup")
            .unwrap()
            .with_categories(["work"]);
        assert_eq!(encode_line(&standup), "09:00-10:00 Standup [work]");

        let dentist = Event::timed(time("14:00"), None, "Dentist").unwrap();
        assert_eq!(encode_line(&dentist), "14:00 Dentist");

        let holiday = Event::all_day("Holiday")
            .unwrap()
            .with_categories(["personal", "family"]);
        assert_eq!(encode_line(&holiday), "all-day Holiday [personal,family]");
    }

    #[test]
    fn test_encode_protects_bracketed_title() {
        let event = Event::timed(time("11:00"), None, "Fix [bug]").unwrap();
        let line = encode_line(&event);
        assert_eq!(line, "11:00 Fix [bug] []");

        let decoded = decode_line(&line).unwrap();
        assert_eq!(decoded.title, "Fix [bug]");
        assert!(decoded.categories.is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let lines = [
            "09:00-10:00 Team standup [work]",
            "10:30-11:30 Client meeting [work,important]",
            "12:00-13:00 Lunch with Sarah [personal]",
            "18:00-19:00 Gym session [health]",
            "all-day Project deadline [work,important]",
            "15:30-16:00 Code review",
            "all-day Birthday",
        ];

        for line in lines {
            let event = decode_line(line).unwrap();
            let again = decode_line(&encode_line(&event)).unwrap();

            assert_eq!(again.start, event.start, "start of {line}");
            assert_eq!(again.end, event.end, "end of {line}");
            assert_eq!(again.title, event.title, "title of {line}");
            assert_eq!(
                again.categories.iter().collect::<BTreeSet<_>>(),
                event.categories.iter().collect::<BTreeSet<_>>(),
                "categories of {line}"
            );
        }
    }
}
