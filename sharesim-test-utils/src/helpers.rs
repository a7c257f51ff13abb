// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharesim_core::{is_chronological, EmittedValue, EventLog, SubscriberId, VirtualTime};

/// Values delivered to `subscriber`, in delivery order.
#[must_use]
pub fn values_for(log: &EventLog, subscriber: SubscriberId) -> Vec<EmittedValue> {
    log.values_for(subscriber).copied().collect()
}

/// Times at which `subscriber` received each of its values.
#[must_use]
pub fn delivery_times(log: &EventLog, subscriber: SubscriberId) -> Vec<u64> {
    log.events_for(subscriber)
        .filter(|event| event.kind.value().is_some())
        .map(|event| event.time.as_millis())
        .collect()
}

/// Times at which `subscriber` received a completion signal.
#[must_use]
pub fn completion_times(log: &EventLog, subscriber: SubscriberId) -> Vec<VirtualTime> {
    log.events_for(subscriber)
        .filter(|event| event.kind.is_completed())
        .map(|event| event.time)
        .collect()
}

/// Panics if `subscriber` received anything at all.
pub fn assert_no_events_for(log: &EventLog, subscriber: SubscriberId) {
    let received: Vec<String> = log.events_for(subscriber).map(ToString::to_string).collect();
    assert!(
        received.is_empty(),
        "Unexpected deliveries to {subscriber}, expected none: {received:?}"
    );
}

/// Panics if events or markers of the log go backwards in time.
pub fn assert_chronological(log: &EventLog) {
    assert!(is_chronological(log.events()), "events out of order: {log:?}");
    assert!(is_chronological(log.markers()), "markers out of order: {log:?}");
}
