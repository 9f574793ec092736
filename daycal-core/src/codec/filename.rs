//! The per-event-file format.
//!
//! Filenames: `allday-<Title>`, `<HHMM>-<Title>` or `<HHMM>-<HHMM>-<Title>`,
//! with spaces turned into underscores. Bodies are `key:value` lines:
//!
//! ```text
//! title:Team standup
//! category:work,important
//! description:Daily sync
//! ```
//!
//! The `title` line is authoritative when present, since sanitizing a title
//! for the filesystem loses characters.

use crate::error::ParseError;
use crate::event::{ClockTime, Event, EventStart};

const ALL_DAY_PREFIX: &str = "allday-";
const UNTITLED: &str = "untitled";
const MAX_TITLE_CHARS: usize = 100;
/// Leaves room for `HHMM-HHMM-` and `_100` under the usual 255-byte name limit.
const MAX_TITLE_BYTES: usize = 200;

/// Make a title safe to use as part of a filename.
pub fn sanitize_title(title: &str) -> String {
    let chars = title
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '/' | '\\' | ':' => Some('-'),
            '?' | '*' | '"' | '<' | '>' | '|' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .take(MAX_TITLE_CHARS);

    let mut safe = String::new();
    for c in chars {
        if safe.len() + c.len_utf8() > MAX_TITLE_BYTES {
            break;
        }
        safe.push(c);
    }

    if safe.is_empty() {
        UNTITLED.to_string()
    } else {
        safe
    }
}

/// Base filename for an event, without any collision suffix.
pub fn encode_filename(event: &Event) -> String {
    let title = sanitize_title(&event.title);

    match (&event.start, &event.end) {
        (EventStart::AllDay, _) => format!("{}{}", ALL_DAY_PREFIX, title),
        (EventStart::At(start), Some(end)) => {
            format!("{}-{}-{}", start.compact(), end.compact(), title)
        }
        (EventStart::At(start), None) => format!("{}-{}", start.compact(), title),
    }
}

/// Body written next to the filename.
pub fn encode_body(event: &Event) -> String {
    format!(
        "title:{}\ncategory:{}\ndescription:{}\n",
        event.title,
        event.categories.join(","),
        event.description.as_deref().unwrap_or_default()
    )
}

/// Rebuild an event from its filename and body.
pub fn decode_filename_and_body(filename: &str, body: &str) -> Result<Event, ParseError> {
    let invalid = || ParseError::InvalidFilename(filename.to_string());
    let fields = BodyFields::parse(body);

    let (start, end, file_title) = if let Some(rest) = filename.strip_prefix(ALL_DAY_PREFIX) {
        (EventStart::AllDay, None, rest)
    } else {
        let (start, rest) = filename.split_once('-').ok_or_else(invalid)?;
        let start = compact_time(start).ok_or_else(invalid)?;

        match rest.split_once('-') {
            Some((end, title)) if !title.is_empty() && compact_time(end).is_some() => {
                (EventStart::At(start), compact_time(end), title)
            }
            _ => (EventStart::At(start), None, rest),
        }
    };

    let title = match fields.title {
        Some(title) => title.to_string(),
        None => file_title.replace('_', " ").trim().to_string(),
    };
    if title.is_empty() {
        return Err(invalid());
    }

    Ok(Event {
        start,
        end,
        title,
        categories: fields.categories,
        description: fields.description,
    })
}

/// `HHMM` back to `HH:MM`. Only the shape is checked here.
fn compact_time(s: &str) -> Option<ClockTime> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(ClockTime::raw(&format!("{}:{}", &s[..2], &s[2..])))
}

#[derive(Default)]
struct BodyFields<'a> {
    title: Option<&'a str>,
    categories: Vec<String>,
    description: Option<String>,
}

impl<'a> BodyFields<'a> {
    fn parse(body: &'a str) -> Self {
        let mut fields = BodyFields::default();

        for line in body.lines() {
            let Some((key, value)) = line.trim().split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "title" if !value.is_empty() => fields.title = Some(value),
                "category" => {
                    fields.categories = value
                        .split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "description" if !value.is_empty() => {
                    fields.description = Some(value.to_string());
                }
                _ => {}
            }
        }

        fields
    }
}
