// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The result of a simulation run.
//!
//! An [`EventLog`] holds three views of the same run:
//!
//! - **events**: every delivery to a subscriber, in chronological order
//! - **markers**: lifecycle milestones (attach, detach, activation start, teardown),
//!   each anchored to the position in `events` at which it happened
//! - **activations**: one [`ActivationRecord`] per producer activation
//!
//! Two logs built from identical inputs compare equal.

use crate::event::{ActivationId, EmittedValue, Event};
use crate::has_timestamp::HasTimestamp;
use crate::subscription::SubscriberId;
use crate::time::VirtualTime;
use core::fmt;
use serde::{Deserialize, Serialize};

/// How a producer activation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFate {
    /// Completed and was torn down (`while-connected`).
    Completed,
    /// Torn down early because its last subscriber detached (`while-connected`).
    Unsubscribed,
    /// Completed and was kept for replay (`forever`).
    Retained,
    /// Never completed; still subscribed when the run finished (hot producers).
    Running,
}

/// The lifetime of one producer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivationRecord {
    pub id: ActivationId,
    pub started_at: VirtualTime,
    pub ended_at: VirtualTime,
    pub fate: ActivationFate,
}

/// A lifecycle milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Attached(SubscriberId),
    Detached(SubscriberId),
    Activated(ActivationId),
    TornDown(ActivationId),
}

/// A lifecycle milestone, positioned relative to the delivered events.
///
/// `position` is the number of events already delivered when the milestone
/// happened, so a renderer can interleave markers and events exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    pub position: usize,
    pub time: VirtualTime,
    pub kind: MarkerKind,
}

impl HasTimestamp for Marker {
    fn timestamp(&self) -> VirtualTime {
        self.time
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MarkerKind::Attached(id) => write!(f, "--- {} ---", id.0),
            MarkerKind::Detached(id) => write!(f, "--- {} detached ---", id.0),
            MarkerKind::Activated(id) => write!(f, "start {id}"),
            MarkerKind::TornDown(id) => write!(f, "dispose {id}"),
        }
    }
}

/// Chronologically ordered record of a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
    markers: Vec<Marker>,
    activations: Vec<ActivationRecord>,
}

impl EventLog {
    #[must_use]
    pub const fn from_parts(
        events: Vec<Event>,
        markers: Vec<Marker>,
        activations: Vec<ActivationRecord>,
    ) -> Self {
        Self {
            events,
            markers,
            activations,
        }
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn activations(&self) -> &[ActivationRecord] {
        &self.activations
    }

    /// Number of times the cold producer was started.
    #[must_use]
    pub fn activation_count(&self) -> usize {
        self.activations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Events delivered to one subscriber, in order.
    pub fn events_for(&self, subscriber: SubscriberId) -> impl Iterator<Item = &Event> + '_ {
        self.events
            .iter()
            .filter(move |event| event.subscriber == subscriber)
    }

    /// Values delivered to one subscriber, in order.
    pub fn values_for(&self, subscriber: SubscriberId) -> impl Iterator<Item = &EmittedValue> + '_ {
        self.events_for(subscriber)
            .filter_map(|event| event.kind.value())
    }

    /// The time the subscriber received its completion, if it did.
    #[must_use]
    pub fn completion_for(&self, subscriber: SubscriberId) -> Option<VirtualTime> {
        self.events_for(subscriber)
            .find(|event| event.kind.is_completed())
            .map(|event| event.time)
    }

    /// Every subscriber that appears in an attach marker, in attach order.
    #[must_use]
    pub fn subscribers(&self) -> Vec<SubscriberId> {
        self.markers
            .iter()
            .filter_map(|marker| match marker.kind {
                MarkerKind::Attached(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}
