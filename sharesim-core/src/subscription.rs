// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::time::VirtualTime;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifies one subscriber within a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(pub u32);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub {}", self.0)
    }
}

/// A subscriber attaching to the shared source at a given virtual time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub subscriber: SubscriberId,
    pub attach_at: VirtualTime,
}

impl Subscription {
    #[must_use]
    pub const fn new(subscriber: u32, attach_at_millis: u64) -> Self {
        Self {
            subscriber: SubscriberId(subscriber),
            attach_at: VirtualTime::from_millis(attach_at_millis),
        }
    }

    /// Numbers subscribers 1, 2, ... in the order of the given attach times.
    pub fn numbered(attach_times: impl IntoIterator<Item = u64>) -> Vec<Self> {
        attach_times
            .into_iter()
            .zip(1..)
            .map(|(at, id)| Self::new(id, at))
            .collect()
    }
}
