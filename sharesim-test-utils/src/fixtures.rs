// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharesim_core::{Replay, Scope, SharePolicy, SubscriberId, VirtualTime};

pub const SUB1: SubscriberId = SubscriberId(1);
pub const SUB2: SubscriberId = SubscriberId(2);
pub const SUB3: SubscriberId = SubscriberId(3);

#[must_use]
pub const fn at(millis: u64) -> VirtualTime {
    VirtualTime::from_millis(millis)
}

/// `share(replay: n, scope: while-connected)` for n in {0, 1}.
///
/// # Panics
///
/// Panics if `replay` is not 0 or 1.
#[must_use]
pub fn while_connected(replay: u32) -> SharePolicy {
    SharePolicy::new(replay_of(replay), Scope::WhileConnected)
}

/// `share(replay: n, scope: forever)` for n in {0, 1}.
///
/// # Panics
///
/// Panics if `replay` is not 0 or 1.
#[must_use]
pub fn forever(replay: u32) -> SharePolicy {
    SharePolicy::new(replay_of(replay), Scope::Forever)
}

fn replay_of(replay: u32) -> Replay {
    match replay {
        0 => Replay::None,
        1 => Replay::Latest,
        other => panic!("fixture replay must be 0 or 1, got {other}"),
    }
}
