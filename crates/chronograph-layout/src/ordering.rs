//! Deterministic event ordering for stacking and list output.
//!
//! The chain is start ascending, then end ascending, then title compared
//! case-insensitively. Sorting goes through [`sort_events`], which is stable,
//! so events equal under the chain keep their input order.

use std::cmp::Ordering;

use crate::event::Event;

/// Total order over events: `start`, then `end`, then case-folded title.
pub fn compare(a: &Event, b: &Event) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| a.end.cmp(&b.end))
        .then_with(|| compare_titles(&a.title, &b.title))
}

/// Case-insensitive comparison using full Unicode lowercase folding.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Stable sort of owned events.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(compare);
}

/// Stable sort of borrowed events.
pub fn sort_event_refs(events: &mut [&Event]) {
    events.sort_by(|a, b| compare(a, b));
}
