// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The policy × timing matrix.
//!
//! Every supported [`SharePolicy`] is run against every [`Timing`] preset, and the
//! second subscriber's experience is classified relative to the first one:
//!
//! | | sub1 → next → completed → sub2 | sub1 → next → sub2 → completed | sub1 → sub2 → next → completed |
//! |---|---|---|---|
//! | `replay: 0, while-connected` | not shared (fresh) | not shared (missed) | live-shared |
//! | `replay: 1, while-connected` | not shared (fresh) | cache-shared | live-shared |
//! | `replay: 0, forever` | not shared (missed) | not shared (missed) | live-shared |
//! | `replay: 1, forever` | cache-shared | cache-shared | live-shared |

use core::fmt;
use sharesim_core::{Delivery, EventLog, SharePolicy, SubscriberId, Timing};
use sharesim_engine::simulate;
use sharesim_error::Result;

/// How a later subscriber's observation relates to an earlier one's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sharing {
    /// Both received the same emission at the same moment.
    LiveShared,
    /// The later subscriber received the same emission from the replay buffer.
    CacheShared,
    /// The later subscriber received a different activation's emission.
    Fresh,
    /// The later subscriber received no value at all.
    Missed,
}

impl Sharing {
    #[must_use]
    pub const fn is_shared(self) -> bool {
        matches!(self, Self::LiveShared | Self::CacheShared)
    }
}

impl fmt::Display for Sharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LiveShared => "live-shared",
            Self::CacheShared => "cache-shared",
            Self::Fresh => "not shared (fresh)",
            Self::Missed => "not shared (missed)",
        })
    }
}

/// Classifies what `later` saw of the emission that `earlier` saw.
#[must_use]
pub fn classify(log: &EventLog, earlier: SubscriberId, later: SubscriberId) -> Sharing {
    let Some(first_of_later) = log
        .events_for(later)
        .find_map(|event| event.kind.value().map(|value| (*value, event.delivery)))
    else {
        return Sharing::Missed;
    };

    let (value, delivery) = first_of_later;
    if !log.values_for(earlier).any(|seen| *seen == value) {
        return Sharing::Fresh;
    }
    match delivery {
        Delivery::Live => Sharing::LiveShared,
        Delivery::Replayed => Sharing::CacheShared,
    }
}

/// One cell of the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub policy: SharePolicy,
    pub timing: Timing,
    pub sharing: Sharing,
    pub log: EventLog,
}

/// Runs one policy against one timing and classifies subscriber 2 against subscriber 1.
///
/// # Errors
///
/// Propagates simulation errors for malformed timings.
pub fn run_cell(policy: SharePolicy, timing: &Timing) -> Result<MatrixRow> {
    let log = simulate(&timing.producer(), policy, &timing.subscriptions())?;
    let sharing = classify(&log, SubscriberId(1), SubscriberId(2));
    Ok(MatrixRow {
        policy,
        timing: timing.clone(),
        sharing,
        log,
    })
}

/// Runs every supported policy against every timing preset, policy-major.
///
/// # Errors
///
/// Propagates simulation errors; the presets themselves are well formed.
pub fn run_matrix() -> Result<Vec<MatrixRow>> {
    let timings = Timing::presets();
    SharePolicy::all()
        .into_iter()
        .flat_map(|policy| timings.iter().map(move |timing| (policy, timing)))
        .map(|(policy, timing)| run_cell(policy, timing))
        .collect()
}

/// Formats the classification of each row as an aligned table.
#[must_use]
pub fn summary(rows: &[MatrixRow]) -> String {
    let policy_width = rows
        .iter()
        .map(|row| row.policy.to_string().len())
        .max()
        .unwrap_or(0);
    let timing_width = rows
        .iter()
        .map(|row| row.timing.name.len())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|row| {
            format!(
                "{:<policy_width$}  {:<timing_width$}  {}\n",
                row.policy.to_string(),
                row.timing.name,
                row.sharing
            )
        })
        .collect()
}
