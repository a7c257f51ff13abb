// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sharing policies.
//!
//! A [`SharePolicy`] combines how many past values a late subscriber gets
//! ([`Replay`]) with how long the shared producer activation lives ([`Scope`]).
//! Only the four combinations of `replay` 0 or 1 with `while-connected` or
//! `forever` are supported; anything else is rejected with
//! [`ShareError::UnsupportedPolicy`] when the policy is built.
//!
//! ```
//! use sharesim_core::{Replay, Scope, SharePolicy};
//!
//! let policy = SharePolicy::parse(1, "forever").unwrap();
//! assert_eq!(policy, SharePolicy::new(Replay::Latest, Scope::Forever));
//! assert!(SharePolicy::parse(2, "forever").is_err());
//! assert!(SharePolicy::parse(0, "sometimes").is_err());
//! ```

use core::fmt;
use serde::{Deserialize, Serialize};
use sharesim_error::{Result, ShareError};

/// How many already emitted values a newly attaching subscriber receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Replay {
    /// Late subscribers only see future events (`replay: 0`).
    None,
    /// Late subscribers first receive the most recent value (`replay: 1`).
    Latest,
}

impl Replay {
    /// Converts a raw replay count, rejecting anything but 0 and 1.
    pub fn from_count(count: u32, scope: &str) -> Result<Self> {
        match count {
            0 => Ok(Self::None),
            1 => Ok(Self::Latest),
            other => Err(ShareError::unsupported_policy(other, scope)),
        }
    }

    #[must_use]
    pub const fn count(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Latest => 1,
        }
    }
}

/// How long a shared producer activation is kept alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Torn down on completion or when the last subscriber detaches.
    WhileConnected,
    /// Kept for the whole run once activated; never reactivated.
    Forever,
}

impl Scope {
    /// Looks up a scope by its textual name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "while-connected" => Some(Self::WhileConnected),
            "forever" => Some(Self::Forever),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WhileConnected => "while-connected",
            Self::Forever => "forever",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable sharing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSharePolicy", into = "RawSharePolicy")]
pub struct SharePolicy {
    replay: Replay,
    scope: Scope,
}

impl SharePolicy {
    #[must_use]
    pub const fn new(replay: Replay, scope: Scope) -> Self {
        Self { replay, scope }
    }

    /// Builds a policy from raw caller values.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::UnsupportedPolicy`] if `replay` is not 0 or 1, or if
    /// `scope` is neither `"while-connected"` nor `"forever"`.
    pub fn parse(replay: u32, scope: &str) -> Result<Self> {
        let parsed_scope =
            Scope::from_name(scope).ok_or_else(|| ShareError::unsupported_policy(replay, scope))?;
        let parsed_replay = Replay::from_count(replay, scope)?;
        Ok(Self::new(parsed_replay, parsed_scope))
    }

    /// Every supported policy, in the order the scenario matrix reports them.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::new(Replay::None, Scope::WhileConnected),
            Self::new(Replay::Latest, Scope::WhileConnected),
            Self::new(Replay::None, Scope::Forever),
            Self::new(Replay::Latest, Scope::Forever),
        ]
    }

    #[must_use]
    pub const fn replay(self) -> Replay {
        self.replay
    }

    #[must_use]
    pub const fn scope(self) -> Scope {
        self.scope
    }

    /// Returns `true` if this policy keeps a replay buffer.
    #[must_use]
    pub const fn buffers(self) -> bool {
        matches!(self.replay, Replay::Latest)
    }
}

impl fmt::Display for SharePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "share(replay: {}, scope: {})", self.replay.count(), self.scope)
    }
}

#[derive(Serialize, Deserialize)]
struct RawSharePolicy {
    replay: u32,
    scope: String,
}

impl TryFrom<RawSharePolicy> for SharePolicy {
    type Error = ShareError;

    fn try_from(raw: RawSharePolicy) -> Result<Self> {
        Self::parse(raw.replay, &raw.scope)
    }
}

impl From<SharePolicy> for RawSharePolicy {
    fn from(policy: SharePolicy) -> Self {
        Self {
            replay: policy.replay.count(),
            scope: policy.scope.name().to_string(),
        }
    }
}
