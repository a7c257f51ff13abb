// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};
use sharesim_error::{Result, ShareError};

/// Whether a producer's timeline restarts with every activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    /// Offsets are relative to the activation; each activation replays the timeline.
    #[default]
    Cold,
    /// Times are absolute; an activation only sees what is pushed while it is subscribed.
    Hot,
}

impl Temperature {
    #[must_use]
    pub const fn is_cold(&self) -> bool {
        matches!(self, Self::Cold)
    }
}

/// A producer described by its timeline.
///
/// For a cold producer all offsets are milliseconds relative to the moment the
/// producer is activated, i.e. the attach time of the subscriber that started it.
/// Values are emitted at each offset in `emissions`, then the producer completes
/// after `complete_after`.
///
/// A hot producer pushes at absolute times whether or not anyone listens, like a
/// subject fed from outside. It may never complete.
///
/// ```
/// use sharesim_core::ProducerSpec;
///
/// // emits once after 100ms, completes after 200ms
/// let producer = ProducerSpec::single(100, 200);
/// assert!(producer.validate().is_ok());
///
/// // synchronous finite source: two values, then completion, all at activation time
/// let of_1_2 = ProducerSpec::sequence([0, 0], 0);
/// assert_eq!(of_1_2.emissions(), &[0, 0]);
///
/// // subject pushed at 100ms and 300ms, never completed
/// let subject = ProducerSpec::hot([100, 300], None);
/// assert!(subject.is_hot());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProducerSpec {
    #[serde(default, skip_serializing_if = "Temperature::is_cold")]
    temperature: Temperature,
    emissions: Vec<u64>,
    #[serde(default)]
    complete_after: Option<u64>,
}

impl ProducerSpec {
    /// A producer that emits one value at `emit_time` and completes at `complete_time`.
    #[must_use]
    pub fn single(emit_time: u64, complete_time: u64) -> Self {
        Self::sequence([emit_time], complete_time)
    }

    /// A producer that emits one value per offset, then completes.
    pub fn sequence(emissions: impl IntoIterator<Item = u64>, complete_time: u64) -> Self {
        Self {
            temperature: Temperature::Cold,
            emissions: emissions.into_iter().collect(),
            complete_after: Some(complete_time),
        }
    }

    /// A hot producer pushing at absolute `push_times`, completing at `complete_at` if given.
    pub fn hot(push_times: impl IntoIterator<Item = u64>, complete_at: Option<u64>) -> Self {
        Self {
            temperature: Temperature::Hot,
            emissions: push_times.into_iter().collect(),
            complete_after: complete_at,
        }
    }

    #[must_use]
    pub const fn temperature(&self) -> Temperature {
        self.temperature
    }

    #[must_use]
    pub const fn is_hot(&self) -> bool {
        matches!(self.temperature, Temperature::Hot)
    }

    #[must_use]
    pub fn emissions(&self) -> &[u64] {
        &self.emissions
    }

    /// Completion offset for a cold producer, absolute completion time for a hot one.
    #[must_use]
    pub const fn complete_after(&self) -> Option<u64> {
        self.complete_after
    }

    /// Checks that emissions are ordered, none falls after completion, and a cold
    /// producer completes.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidSchedule`] describing the first offending offset.
    pub fn validate(&self) -> Result<()> {
        if self.temperature.is_cold() && self.complete_after.is_none() {
            return Err(ShareError::invalid_schedule(
                "cold producer has no completion time",
            ));
        }

        let mut previous = 0;
        for (index, &offset) in self.emissions.iter().enumerate() {
            if offset < previous {
                return Err(ShareError::invalid_schedule(format!(
                    "producer emission #{index} at +{offset}ms precedes the previous one at +{previous}ms"
                )));
            }
            if let Some(complete) = self.complete_after.filter(|complete| offset > *complete) {
                return Err(ShareError::invalid_schedule(format!(
                    "producer emission #{index} at +{offset}ms falls after completion at +{complete}ms"
                )));
            }
            previous = offset;
        }
        Ok(())
    }
}
