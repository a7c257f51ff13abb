// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Human- and machine-readable views of an [`EventLog`].
//!
//! The text form follows the console transcript of a playground run:
//!
//! ```text
//!     0ms  --- 1 ---
//!     0ms  start #1
//!   100ms  [sub 1] #1.0@100ms
//!   200ms  [sub 1] completed
//!   200ms  dispose #1
//! ```

use sharesim_core::{EventLog, VirtualTime};

/// Interleaves lifecycle markers and deliveries in the order they happened.
#[must_use]
pub fn lines(log: &EventLog) -> Vec<(VirtualTime, String)> {
    let mut markers = log.markers().iter().peekable();
    let mut out = Vec::with_capacity(log.len() + log.markers().len());

    for (position, event) in log.events().iter().enumerate() {
        while let Some(marker) = markers.next_if(|marker| marker.position <= position) {
            out.push((marker.time, marker.to_string()));
        }
        out.push((event.time, event.to_string()));
    }
    out.extend(markers.map(|marker| (marker.time, marker.to_string())));
    out
}

/// Renders the log as one line per entry, prefixed with its virtual time.
///
/// Identical logs render to identical text.
#[must_use]
pub fn text(log: &EventLog) -> String {
    lines(log)
        .into_iter()
        .map(|(time, line)| format!("{:>7}  {line}\n", time.to_string()))
        .collect()
}

/// Renders the log as pretty-printed JSON.
///
/// # Errors
///
/// Returns the serializer's error, which does not occur for well-formed logs.
pub fn json(log: &EventLog) -> serde_json::Result<String> {
    serde_json::to_string_pretty(log)
}
