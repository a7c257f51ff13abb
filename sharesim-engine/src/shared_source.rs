// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Incremental shared-source simulation.
//!
//! A [`SharedSource`] multicasts one cold producer to subscribers that attach and
//! detach on a virtual clock. The producer is activated lazily by the first
//! subscriber, its signals are fanned out to everyone attached when they fire, and
//! the [`SharePolicy`] decides what late subscribers get and when the activation is
//! discarded:
//!
//! | Policy | Late subscriber while active | Attach after completion |
//! |--------|------------------------------|-------------------------|
//! | `replay: 0, while-connected` | future events only | fresh activation |
//! | `replay: 1, while-connected` | latest value, then future events | fresh activation |
//! | `replay: 0, forever` | future events only | nothing |
//! | `replay: 1, forever` | latest value, then future events | latest value and completion |
//!
//! A hot producer is not restarted by an activation: the activation only sees the
//! pushes from its start time on, and a subscriber arriving after a while-connected
//! teardown starts a new activation on the same absolute timeline.
//!
//! ## Ordering
//!
//! Calls must not move the clock backwards. A subscriber attaching or detaching at
//! time `t` does so before any producer signal scheduled at `t` fires, so a newcomer
//! at `t` receives those signals after the subscribers already attached.
//!
//! ## Example
//!
//! ```
//! use sharesim_core::{ProducerSpec, Replay, Scope, SharePolicy, SubscriberId, VirtualTime};
//! use sharesim_engine::SharedSource;
//!
//! let policy = SharePolicy::new(Replay::Latest, Scope::WhileConnected);
//! let mut source = SharedSource::new(ProducerSpec::single(100, 300), policy).unwrap();
//!
//! source.attach(SubscriberId(1), VirtualTime::from_millis(0)).unwrap();
//! source.attach(SubscriberId(2), VirtualTime::from_millis(200)).unwrap();
//! let log = source.finish();
//!
//! // subscriber 2 got the buffered value on attach, then both completed at 300ms
//! assert_eq!(log.values_for(SubscriberId(2)).count(), 1);
//! assert_eq!(log.completion_for(SubscriberId(2)), Some(VirtualTime::from_millis(300)));
//! assert_eq!(log.activation_count(), 1);
//! ```

use crate::queue::{EventQueue, Scheduled, Signal};
use sharesim_core::{
    ActivationFate, ActivationId, ActivationRecord, EmittedValue, Event, EventKind, EventLog,
    Marker, MarkerKind, ProducerSpec, Scope, SharePolicy, SubscriberId, VirtualTime,
};
use sharesim_error::{Result, ShareError};
use std::collections::HashSet;

/// Emission times by index, then the completion time if any.
type Timeline = (Vec<(usize, VirtualTime)>, Option<VirtualTime>);

/// Holds the most recent value of an activation for late subscribers.
#[derive(Debug, Default)]
struct ReplayBuffer {
    latest: Option<EmittedValue>,
}

/// One run of the cold producer.
#[derive(Debug)]
struct Activation {
    id: ActivationId,
    started_at: VirtualTime,
    completed_at: Option<VirtualTime>,
    buffer: Option<ReplayBuffer>,
}

impl Activation {
    fn buffered(&self) -> Option<EmittedValue> {
        self.buffer.as_ref().and_then(|buffer| buffer.latest)
    }
}

/// A cold producer shared among subscribers under a [`SharePolicy`].
///
/// See the [module-level documentation](crate::shared_source) for semantics.
#[derive(Debug)]
pub struct SharedSource {
    producer: ProducerSpec,
    policy: SharePolicy,
    now: VirtualTime,
    last_attach: Option<VirtualTime>,
    seen: HashSet<SubscriberId>,
    detached: HashSet<SubscriberId>,
    attached: Vec<SubscriberId>,
    activation: Option<Activation>,
    next_activation: u32,
    queue: EventQueue,
    events: Vec<Event>,
    markers: Vec<Marker>,
    records: Vec<ActivationRecord>,
}

impl SharedSource {
    /// Creates an idle shared source. Nothing runs until the first attach.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidSchedule`] if the producer's timeline is malformed.
    pub fn new(producer: ProducerSpec, policy: SharePolicy) -> Result<Self> {
        producer.validate()?;
        Ok(Self {
            producer,
            policy,
            now: VirtualTime::ZERO,
            last_attach: None,
            seen: HashSet::new(),
            detached: HashSet::new(),
            attached: Vec::new(),
            activation: None,
            next_activation: 1,
            queue: EventQueue::new(),
            events: Vec::new(),
            markers: Vec::new(),
            records: Vec::new(),
        })
    }

    #[must_use]
    pub const fn policy(&self) -> SharePolicy {
        self.policy
    }

    /// Current position of the virtual clock.
    #[must_use]
    pub const fn now(&self) -> VirtualTime {
        self.now
    }

    /// Subscribers currently in the live-delivery set, in attach order.
    #[must_use]
    pub fn attached(&self) -> &[SubscriberId] {
        &self.attached
    }

    /// Returns `true` while a producer activation is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.activation
            .as_ref()
            .is_some_and(|activation| activation.completed_at.is_none())
    }

    /// Number of producer signals still waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Attaches a subscriber at `at`.
    ///
    /// Producer signals scheduled strictly before `at` fire first.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidSchedule`] if `at` is earlier than the clock or
    /// not strictly after the previous attach, or if the subscriber id was already
    /// used in this run. The source is left untouched on error.
    pub fn attach(&mut self, subscriber: SubscriberId, at: VirtualTime) -> Result<()> {
        self.check_clock(at)?;
        if let Some(previous) = self.last_attach {
            if at <= previous {
                return Err(ShareError::invalid_schedule(format!(
                    "attach of {subscriber} at {at} does not follow the previous attach at {previous}"
                )));
            }
        }
        if self.seen.contains(&subscriber) {
            return Err(ShareError::invalid_schedule(format!(
                "{subscriber} attached more than once"
            )));
        }
        // A fresh activation may be needed once earlier signals have fired.
        self.timeline(at)?;

        self.run_before(at);
        self.now = at;
        self.last_attach = Some(at);
        self.seen.insert(subscriber);
        self.mark(MarkerKind::Attached(subscriber));
        debug!("{subscriber} attaches at {at}");

        match &self.activation {
            None => {
                self.attached.push(subscriber);
                self.activate(at)?;
            }
            Some(activation) if activation.completed_at.is_some() => {
                // Only a retained `forever` activation survives completion.
                if let Some(buffer) = &activation.buffer {
                    if let Some(value) = buffer.latest {
                        self.events
                            .push(Event::replayed(subscriber, EventKind::Value(value), at));
                    }
                    self.events
                        .push(Event::replayed(subscriber, EventKind::Completed, at));
                }
            }
            Some(activation) => {
                let replay = activation.buffered();
                self.attached.push(subscriber);
                if let Some(value) = replay {
                    self.events
                        .push(Event::replayed(subscriber, EventKind::Value(value), at));
                }
            }
        }
        Ok(())
    }

    /// Detaches a subscriber at `at`, removing it from the live-delivery set.
    ///
    /// If it was the last subscriber of a running `while-connected` activation, the
    /// activation is torn down immediately: pending signals are cancelled and the
    /// replay buffer is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidSchedule`] if `at` is earlier than the clock, and
    /// [`ShareError::UnknownSubscriber`] if the subscriber never attached or already
    /// detached.
    pub fn detach(&mut self, subscriber: SubscriberId, at: VirtualTime) -> Result<()> {
        self.check_clock(at)?;
        if !self.seen.contains(&subscriber) || self.detached.contains(&subscriber) {
            return Err(ShareError::unknown_subscriber(subscriber.0));
        }

        self.run_before(at);
        self.now = at;
        self.detached.insert(subscriber);
        self.attached.retain(|id| *id != subscriber);
        self.mark(MarkerKind::Detached(subscriber));
        debug!("{subscriber} detaches at {at}");

        if self.attached.is_empty()
            && self.policy.scope() == Scope::WhileConnected
            && self.is_active()
        {
            self.tear_down(at, ActivationFate::Unsubscribed);
        }
        Ok(())
    }

    /// Moves the clock to `at`, firing every producer signal scheduled strictly
    /// before it.
    ///
    /// Signals due exactly at `at` stay pending, so an attach or detach at `at`
    /// still happens before them.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidSchedule`] if `at` is earlier than the clock.
    pub fn advance_to(&mut self, at: VirtualTime) -> Result<()> {
        self.check_clock(at)?;
        self.run_before(at);
        self.now = at;
        Ok(())
    }

    /// Runs every remaining producer signal and returns the log of the run.
    #[must_use]
    pub fn finish(mut self) -> EventLog {
        while let Some(entry) = self.queue.pop() {
            self.fire(entry);
        }
        if let Some(activation) = self.activation.take() {
            let (ended_at, fate) = match activation.completed_at {
                Some(completed_at) => (completed_at, ActivationFate::Retained),
                None => (self.now, ActivationFate::Running),
            };
            self.records.push(ActivationRecord {
                id: activation.id,
                started_at: activation.started_at,
                ended_at,
                fate,
            });
        }
        EventLog::from_parts(self.events, self.markers, self.records)
    }

    fn check_clock(&self, at: VirtualTime) -> Result<()> {
        if at < self.now {
            return Err(ShareError::invalid_schedule(format!(
                "time {at} is earlier than the simulation clock at {}",
                self.now
            )));
        }
        Ok(())
    }

    fn run_before(&mut self, at: VirtualTime) {
        while let Some(entry) = self.queue.pop_before(at) {
            self.fire(entry);
        }
    }

    fn activate(&mut self, at: VirtualTime) -> Result<()> {
        let id = ActivationId(self.next_activation);
        let (emit_at, complete_at) = self.timeline(at)?;

        self.next_activation += 1;
        for (index, time) in emit_at {
            self.queue.push(time, id, Signal::Emit { index });
        }
        if let Some(complete_at) = complete_at {
            self.queue.push(complete_at, id, Signal::Complete);
        }

        self.activation = Some(Activation {
            id,
            started_at: at,
            completed_at: None,
            buffer: self.policy.buffers().then(ReplayBuffer::default),
        });
        self.mark(MarkerKind::Activated(id));
        debug!("activation {id} starts at {at}");
        Ok(())
    }

    /// Absolute emission and completion times for an activation starting at `at`.
    ///
    /// A hot producer only contributes pushes from `at` on, and one that already
    /// completed completes the new activation immediately.
    fn timeline(&self, at: VirtualTime) -> Result<Timeline> {
        let emissions = self.producer.emissions().iter().copied().enumerate();
        let complete_after = self.producer.complete_after();

        if self.producer.is_hot() {
            let emit_at = emissions
                .map(|(index, time)| (index, VirtualTime::from_millis(time)))
                .filter(|(_, time)| *time >= at)
                .collect();
            let complete_at = complete_after.map(|time| VirtualTime::from_millis(time).max(at));
            return Ok((emit_at, complete_at));
        }

        let emit_at = emissions
            .map(|(index, delay)| offset(at, delay).map(|time| (index, time)))
            .collect::<Result<_>>()?;
        let complete_at = complete_after.map(|delay| offset(at, delay)).transpose()?;
        Ok((emit_at, complete_at))
    }

    fn fire(&mut self, entry: Scheduled) {
        self.now = entry.at;
        let Some(activation) = self.activation.as_mut() else {
            return;
        };
        if activation.id != entry.activation {
            return;
        }

        match entry.signal {
            Signal::Emit { index } => {
                let value = EmittedValue {
                    activation: activation.id,
                    index,
                    emitted_at: entry.at,
                };
                if let Some(buffer) = activation.buffer.as_mut() {
                    buffer.latest = Some(value);
                }
                for subscriber in &self.attached {
                    self.events
                        .push(Event::live(*subscriber, EventKind::Value(value), entry.at));
                }
            }
            Signal::Complete => {
                activation.completed_at = Some(entry.at);
                for subscriber in self.attached.drain(..) {
                    self.events
                        .push(Event::live(subscriber, EventKind::Completed, entry.at));
                }
                debug!("activation {} completes at {}", entry.activation, entry.at);
                if self.policy.scope() == Scope::WhileConnected {
                    self.tear_down(entry.at, ActivationFate::Completed);
                }
            }
        }
    }

    fn tear_down(&mut self, at: VirtualTime, fate: ActivationFate) {
        let Some(activation) = self.activation.take() else {
            return;
        };
        let cancelled = self.queue.cancel(activation.id);
        self.records.push(ActivationRecord {
            id: activation.id,
            started_at: activation.started_at,
            ended_at: at,
            fate,
        });
        self.mark(MarkerKind::TornDown(activation.id));
        debug!(
            "activation {} torn down at {at} ({cancelled} pending signals dropped)",
            activation.id
        );
    }

    fn mark(&mut self, kind: MarkerKind) {
        self.markers.push(Marker {
            position: self.events.len(),
            time: self.now,
            kind,
        });
    }
}

fn offset(at: VirtualTime, delay: u64) -> Result<VirtualTime> {
    at.checked_add(delay).ok_or_else(|| {
        ShareError::invalid_schedule(format!("producer offset +{delay}ms overflows from {at}"))
    })
}
