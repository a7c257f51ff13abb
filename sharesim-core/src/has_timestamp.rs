// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::time::VirtualTime;

/// A trait for log entries that carry a position on the virtual clock.
///
/// Both delivered [`Event`](crate::Event)s and lifecycle [`Marker`](crate::Marker)s
/// implement it, so ordering checks work uniformly over either.
///
/// # Examples
///
/// ```
/// use sharesim_core::{HasTimestamp, VirtualTime};
///
/// struct Tick(u64);
///
/// impl HasTimestamp for Tick {
///     fn timestamp(&self) -> VirtualTime {
///         VirtualTime::from_millis(self.0)
///     }
/// }
///
/// assert_eq!(Tick(5).timestamp().as_millis(), 5);
/// ```
pub trait HasTimestamp {
    /// Returns the virtual time at which this entry happened.
    fn timestamp(&self) -> VirtualTime;
}

/// Returns `true` if the entries never go backwards in time.
pub fn is_chronological<T: HasTimestamp>(entries: &[T]) -> bool {
    entries
        .windows(2)
        .all(|pair| pair[0].timestamp() <= pair[1].timestamp())
}
