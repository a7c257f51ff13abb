// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Error types for the sharesim simulator
//!
//! Every fallible sharesim operation reports a [`ShareError`]. All variants describe
//! caller-input problems detected before a simulation schedules its first event, so a
//! failed call never yields a partial event log.
//!
//! # Examples
//!
//! ```
//! use sharesim_error::{Result, ShareError};
//!
//! fn check_replay(replay: u32) -> Result<()> {
//!     if replay > 1 {
//!         return Err(ShareError::unsupported_policy(replay, "forever"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_replay(2).is_err());
//! ```

/// Root error type for all sharesim operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    /// The subscription or producer timeline is malformed
    ///
    /// Raised for attach times that are not strictly increasing, duplicate
    /// subscriber ids, calls that move the virtual clock backwards, and producers
    /// whose emissions are out of order or fall after their completion.
    #[error("Invalid schedule: {context}")]
    InvalidSchedule {
        /// Description of the offending timeline entry
        context: String,
    },

    /// The sharing policy lies outside the supported matrix
    ///
    /// Only `replay` 0 or 1 combined with `while-connected` or `forever` scope
    /// is simulated.
    #[error("Unsupported share policy: replay={replay}, scope={scope}")]
    UnsupportedPolicy {
        /// Requested replay count
        replay: u32,
        /// Requested scope, as given by the caller
        scope: String,
    },

    /// A detach referred to a subscriber that is not currently attached
    #[error("Unknown subscriber: {id}")]
    UnknownSubscriber {
        /// The subscriber id that was not found
        id: u32,
    },

    /// A scenario description could not be loaded
    #[error("Scenario error: {context}")]
    Scenario {
        /// What went wrong while reading or decoding the scenario
        context: String,
    },
}

impl ShareError {
    /// Create an invalid schedule error with the given context
    pub fn invalid_schedule(context: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            context: context.into(),
        }
    }

    /// Create an unsupported policy error
    pub fn unsupported_policy(replay: u32, scope: impl Into<String>) -> Self {
        Self::UnsupportedPolicy {
            replay,
            scope: scope.into(),
        }
    }

    /// Create an unknown subscriber error
    #[must_use]
    pub const fn unknown_subscriber(id: u32) -> Self {
        Self::UnknownSubscriber { id }
    }

    /// Create a scenario loading error
    pub fn scenario(context: impl Into<String>) -> Self {
        Self::Scenario {
            context: context.into(),
        }
    }

    /// Check whether the error was caused by the caller's schedule or policy
    ///
    /// Scenario errors stem from external input files instead.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSchedule { .. }
                | Self::UnsupportedPolicy { .. }
                | Self::UnknownSubscriber { .. }
        )
    }
}

/// Specialized Result type for sharesim operations
///
/// # Examples
///
/// ```
/// use sharesim_error::Result;
///
/// fn activations() -> Result<usize> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ShareError>;

/// Helper trait for turning foreign errors into [`ShareError::Scenario`] with context
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(ShareError::Scenario)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(ShareError::Scenario)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ShareError::scenario(format!("{}: {e}", context.into())))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ShareError::scenario(format!("{}: {e}", f())))
    }
}
