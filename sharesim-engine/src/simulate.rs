// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::shared_source::SharedSource;
use sharesim_core::{EventLog, ProducerSpec, SharePolicy, SubscriberId, Subscription, VirtualTime};
use sharesim_error::{Result, ShareError};
use std::collections::HashSet;

/// One command of a scripted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Attach {
        subscriber: SubscriberId,
        at: VirtualTime,
    },
    Detach {
        subscriber: SubscriberId,
        at: VirtualTime,
    },
}

impl Step {
    #[must_use]
    pub const fn attach(subscriber: u32, at_millis: u64) -> Self {
        Self::Attach {
            subscriber: SubscriberId(subscriber),
            at: VirtualTime::from_millis(at_millis),
        }
    }

    #[must_use]
    pub const fn detach(subscriber: u32, at_millis: u64) -> Self {
        Self::Detach {
            subscriber: SubscriberId(subscriber),
            at: VirtualTime::from_millis(at_millis),
        }
    }

    #[must_use]
    pub const fn at(&self) -> VirtualTime {
        match self {
            Self::Attach { at, .. } | Self::Detach { at, .. } => *at,
        }
    }
}

impl From<Subscription> for Step {
    fn from(subscription: Subscription) -> Self {
        Self::Attach {
            subscriber: subscription.subscriber,
            at: subscription.attach_at,
        }
    }
}

/// Simulates a cold producer shared under `policy` among `subscriptions`.
///
/// Subscriptions are processed in attach order and every producer signal is run to
/// the end, so the returned log holds all deliveries of the run in chronological
/// order. Identical inputs always produce identical logs.
///
/// # Errors
///
/// Returns [`ShareError::InvalidSchedule`] if attach times are not strictly
/// increasing, a subscriber id repeats, or the producer's timeline is malformed.
/// Validation happens before anything is scheduled, so no partial log exists.
///
/// # Examples
///
/// ```
/// use sharesim_core::{ProducerSpec, Replay, Scope, SharePolicy, SubscriberId, Subscription};
/// use sharesim_engine::simulate;
///
/// let policy = SharePolicy::new(Replay::Latest, Scope::Forever);
/// let log = simulate(
///     &ProducerSpec::single(100, 200),
///     policy,
///     &[Subscription::new(1, 0), Subscription::new(2, 300)],
/// )
/// .unwrap();
///
/// // the late subscriber is served from the retained activation
/// assert_eq!(log.activation_count(), 1);
/// assert_eq!(log.values_for(SubscriberId(2)).count(), 1);
/// ```
pub fn simulate(
    producer: &ProducerSpec,
    policy: SharePolicy,
    subscriptions: &[Subscription],
) -> Result<EventLog> {
    let steps: Vec<Step> = subscriptions.iter().copied().map(Step::from).collect();
    simulate_script(producer, policy, &steps)
}

/// Runs an ordered list of attach and detach commands against a shared source.
///
/// # Errors
///
/// Returns [`ShareError::InvalidSchedule`] if steps go backwards in time, attach
/// times are not strictly increasing, or a subscriber attaches twice, and
/// [`ShareError::UnknownSubscriber`] if a detach names a subscriber that is not
/// attached at that point. The whole script is checked before it runs.
pub fn simulate_script(
    producer: &ProducerSpec,
    policy: SharePolicy,
    steps: &[Step],
) -> Result<EventLog> {
    if let Err(error) = validate_steps(steps).and_then(|()| producer.validate()) {
        warn!("rejecting simulation under {policy}: {error}");
        return Err(error);
    }

    let mut source = SharedSource::new(producer.clone(), policy)?;
    for step in steps {
        match *step {
            Step::Attach { subscriber, at } => source.attach(subscriber, at)?,
            Step::Detach { subscriber, at } => source.detach(subscriber, at)?,
        }
    }
    Ok(source.finish())
}

fn validate_steps(steps: &[Step]) -> Result<()> {
    let mut clock = VirtualTime::ZERO;
    let mut last_attach: Option<VirtualTime> = None;
    let mut attached = HashSet::new();
    let mut seen = HashSet::new();

    for (position, step) in steps.iter().enumerate() {
        let at = step.at();
        if let Step::Attach { subscriber, .. } = *step {
            if let Some(previous) = last_attach.filter(|previous| at <= *previous) {
                return Err(ShareError::invalid_schedule(format!(
                    "attach of {subscriber} at {at} does not follow the previous attach at {previous}"
                )));
            }
        }
        if at < clock {
            return Err(ShareError::invalid_schedule(format!(
                "step {position} at {at} goes back in time from {clock}"
            )));
        }
        clock = at;

        match *step {
            Step::Attach { subscriber, .. } => {
                if !seen.insert(subscriber) {
                    return Err(ShareError::invalid_schedule(format!(
                        "{subscriber} attached more than once"
                    )));
                }
                attached.insert(subscriber);
                last_attach = Some(at);
            }
            Step::Detach { subscriber, .. } => {
                if !attached.remove(&subscriber) {
                    return Err(ShareError::unknown_subscriber(subscriber.0));
                }
            }
        }
    }
    Ok(())
}
