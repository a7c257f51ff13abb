// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::producer::ProducerSpec;
use crate::subscription::Subscription;

/// A two-subscriber timeline against a single-value producer, in milliseconds.
///
/// The three presets cover every ordering of the second attach relative to the
/// producer's emission and completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    pub name: String,
    pub next_at: u64,
    pub completed_at: u64,
    pub subscriptions: Vec<u64>,
}

impl Timing {
    /// sub1 -> next -> completed -> sub2
    #[must_use]
    pub fn sub1_next_completed_sub2() -> Self {
        Self {
            name: "sub1 -> next -> completed -> sub2".to_string(),
            next_at: 100,
            completed_at: 200,
            subscriptions: vec![0, 300],
        }
    }

    /// sub1 -> next -> sub2 -> completed
    #[must_use]
    pub fn sub1_next_sub2_completed() -> Self {
        Self {
            name: "sub1 -> next -> sub2 -> completed".to_string(),
            next_at: 100,
            completed_at: 300,
            subscriptions: vec![0, 200],
        }
    }

    /// sub1 -> sub2 -> next -> completed
    #[must_use]
    pub fn sub1_sub2_next_completed() -> Self {
        Self {
            name: "sub1 -> sub2 -> next -> completed".to_string(),
            next_at: 200,
            completed_at: 300,
            subscriptions: vec![0, 100],
        }
    }

    #[must_use]
    pub fn presets() -> [Self; 3] {
        [
            Self::sub1_next_completed_sub2(),
            Self::sub1_next_sub2_completed(),
            Self::sub1_sub2_next_completed(),
        ]
    }

    #[must_use]
    pub fn producer(&self) -> ProducerSpec {
        ProducerSpec::single(self.next_at, self.completed_at)
    }

    /// Subscribers numbered from 1 in attach order.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        Subscription::numbered(self.subscriptions.iter().copied())
    }
}
