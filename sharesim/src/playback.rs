// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Real-time playback of a simulated log on tokio timers.
//!
//! Each entry is released at `start + pace * virtual_millis`, so a pace of one
//! millisecond reproduces the simulated timeline and shorter paces fast-forward it.
//!
//! ```rust
//! use futures::StreamExt;
//! use sharesim::{playback, render, simulate, ProducerSpec, Replay, Scope, SharePolicy, Subscription};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> sharesim::Result<()> {
//! let policy = SharePolicy::new(Replay::Latest, Scope::Forever);
//! let log = simulate(&ProducerSpec::single(100, 200), policy, &Subscription::numbered([0, 300]))?;
//!
//! let lines: Vec<_> = playback::paced(render::lines(&log), Duration::from_millis(1))
//!     .collect()
//!     .await;
//! assert_eq!(lines.len(), render::lines(&log).len());
//! # Ok(())
//! # }
//! ```

use futures::{Stream, StreamExt};
use sharesim_core::{EventLog, VirtualTime};
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

use crate::render;

/// Releases timestamped entries no earlier than their virtual time scaled by `pace`.
///
/// The clock starts when the stream is first polled. Entries whose deadline
/// cannot be represented are released immediately.
pub fn paced<T>(
    entries: impl IntoIterator<Item = (VirtualTime, T)>,
    pace: Duration,
) -> impl Stream<Item = (VirtualTime, T)> {
    let mut start = None;
    futures::stream::iter(entries).then(move |(time, entry)| {
        let origin = *start.get_or_insert_with(Instant::now);
        async move {
            if let Some(deadline) = deadline(origin, time, pace) {
                sleep_until(deadline).await;
            }
            (time, entry)
        }
    })
}

fn deadline(origin: Instant, time: VirtualTime, pace: Duration) -> Option<Instant> {
    let ticks = u32::try_from(time.as_millis()).ok()?;
    origin.checked_add(pace.checked_mul(ticks)?)
}

/// Plays the rendered lines of `log`, handing each one to `sink` when it is due.
///
/// Returns the number of lines played.
pub async fn play<F>(log: &EventLog, pace: Duration, mut sink: F) -> usize
where
    F: FnMut(VirtualTime, &str),
{
    let mut stream = std::pin::pin!(paced(render::lines(log), pace));

    let mut played = 0;
    while let Some((time, line)) = stream.next().await {
        sink(time, &line);
        played += 1;
    }
    played
}
