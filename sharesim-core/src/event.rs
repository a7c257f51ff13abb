// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::has_timestamp::HasTimestamp;
use crate::subscription::SubscriberId;
use crate::time::VirtualTime;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifies one activation of the cold producer. Activations are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationId(pub u32);

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A value produced by one activation.
///
/// Two subscribers holding equal `EmittedValue`s observed the same physical
/// emission, whenever each of them received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmittedValue {
    pub activation: ActivationId,
    /// Position of the value in the producer's emission list.
    pub index: usize,
    pub emitted_at: VirtualTime,
}

impl fmt::Display for EmittedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}@{}", self.activation, self.index, self.emitted_at)
    }
}

/// What a subscriber received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Value(EmittedValue),
    Completed,
}

impl EventKind {
    #[must_use]
    pub const fn value(&self) -> Option<&EmittedValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::Completed => None,
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Where a delivery came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// Pushed by the producer as it fired.
    Live,
    /// Handed over synchronously from the replay buffer on attach.
    Replayed,
}

/// One delivery to one subscriber at one virtual time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub subscriber: SubscriberId,
    pub kind: EventKind,
    pub delivery: Delivery,
    pub time: VirtualTime,
}

impl Event {
    #[must_use]
    pub const fn live(subscriber: SubscriberId, kind: EventKind, time: VirtualTime) -> Self {
        Self {
            subscriber,
            kind,
            delivery: Delivery::Live,
            time,
        }
    }

    #[must_use]
    pub const fn replayed(subscriber: SubscriberId, kind: EventKind, time: VirtualTime) -> Self {
        Self {
            subscriber,
            kind,
            delivery: Delivery::Replayed,
            time,
        }
    }
}

impl HasTimestamp for Event {
    fn timestamp(&self) -> VirtualTime {
        self.time
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.subscriber)?;
        match self.kind {
            EventKind::Value(value) => write!(f, "{value}")?,
            EventKind::Completed => f.write_str("completed")?,
        }
        if self.delivery == Delivery::Replayed {
            f.write_str(" (replayed)")?;
        }
        Ok(())
    }
}
