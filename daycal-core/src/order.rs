//! Canonical ordering of the events of a day.
//!
//! Stores apply [`sort_events`] before returning events and before writing
//! them, so file contents and read results always agree.
//!
//! 1. All-day events first, by title.
//! 2. Timed events by start time, then end time (no end first), then title.
//! 3. Timed events whose start is not a real time of day last, by raw start
//!    text, then title.

use std::cmp::Ordering;

use chrono::NaiveTime;

use crate::event::{Event, EventStart};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    AllDay,
    Timed,
    Unparsed,
}

fn bucket(event: &Event) -> Bucket {
    match &event.start {
        EventStart::AllDay => Bucket::AllDay,
        EventStart::At(time) if time.to_naive().is_some() => Bucket::Timed,
        EventStart::At(_) => Bucket::Unparsed,
    }
}

fn end_key(event: &Event) -> (bool, Option<NaiveTime>, &str) {
    match &event.end {
        None => (false, None, ""),
        Some(end) => (true, end.to_naive(), end.as_str()),
    }
}

/// Total order over the events of one day.
pub fn compare(a: &Event, b: &Event) -> Ordering {
    let (bucket_a, bucket_b) = (bucket(a), bucket(b));
    if bucket_a != bucket_b {
        return bucket_a.cmp(&bucket_b);
    }

    match bucket_a {
        Bucket::AllDay => a.title.cmp(&b.title),
        Bucket::Timed => a
            .start_time()
            .cmp(&b.start_time())
            .then_with(|| end_key(a).cmp(&end_key(b)))
            .then_with(|| a.title.cmp(&b.title)),
        Bucket::Unparsed => {
            let raw = |e: &Event| e.start.clock().map(|t| t.as_str().to_string());
            raw(a)
                .cmp(&raw(b))
                .then_with(|| a.title.cmp(&b.title))
        }
    }
}

/// Sort events in place. Stable, so fully equal events keep their order.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(compare);
}
