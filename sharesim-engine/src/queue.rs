// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharesim_core::{ActivationId, VirtualTime};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// What a producer activation does when a scheduled entry fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    Emit { index: usize },
    Complete,
}

/// A producer signal waiting for its virtual time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scheduled {
    pub(crate) at: VirtualTime,
    pub(crate) activation: ActivationId,
    pub(crate) signal: Signal,
    seq: u64,
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Ties on time fall back to scheduling order.
impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .cmp(&other.at)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Pending producer signals, earliest first.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    entries: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl EventQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, at: VirtualTime, activation: ActivationId, signal: Signal) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Reverse(Scheduled {
            at,
            activation,
            signal,
            seq,
        }));
    }

    /// Pops the earliest entry scheduled strictly before `limit`.
    pub(crate) fn pop_before(&mut self, limit: VirtualTime) -> Option<Scheduled> {
        self.pop_if(|at| at < limit)
    }

    pub(crate) fn pop(&mut self) -> Option<Scheduled> {
        self.entries.pop().map(|Reverse(entry)| entry)
    }

    /// Drops every pending signal of a torn-down activation.
    pub(crate) fn cancel(&mut self, activation: ActivationId) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|Reverse(entry)| entry.activation != activation);
        before - self.entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn pop_if(&mut self, due: impl FnOnce(VirtualTime) -> bool) -> Option<Scheduled> {
        match self.entries.peek() {
            Some(Reverse(entry)) if due(entry.at) => self.pop(),
            _ => None,
        }
    }
}
