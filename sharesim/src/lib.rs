// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Sharesim
//!
//! A deterministic simulator for sharing one cold producer among several subscribers.
//!
//! ## Overview
//!
//! Given a producer that emits on a fixed schedule after it is started, a
//! [`SharePolicy`] (`replay` of 0 or 1, scope `while-connected` or `forever`) and
//! a set of subscriber attach times, [`simulate`] reports exactly what every
//! subscriber observes and when. The output answers the usual question about a
//! shared source: does a late subscriber see the same emission, a cached copy, a
//! fresh one, or nothing?
//!
//! ## Quick Start
//!
//! ```rust
//! use sharesim::{simulate, ProducerSpec, Replay, Scope, SharePolicy, Subscription};
//!
//! # fn main() -> sharesim::Result<()> {
//! let policy = SharePolicy::new(Replay::Latest, Scope::WhileConnected);
//! let log = simulate(
//!     &ProducerSpec::single(100, 300),
//!     policy,
//!     &Subscription::numbered([0, 200]),
//! )?;
//!
//! print!("{}", sharesim::render::text(&log));
//! # Ok(())
//! # }
//! ```
//!
//! [`matrix::run_matrix`] runs every policy against the three canonical timings,
//! and the `share-matrix` binary prints the result.

pub mod matrix;
#[cfg(feature = "runtime-tokio")]
pub mod playback;
pub mod render;
pub mod scenario;

// Re-export core types
pub use sharesim_core::{
    ActivationFate, ActivationId, ActivationRecord, Delivery, EmittedValue, Event, EventKind,
    EventLog, HasTimestamp, Marker, MarkerKind, ProducerSpec, Replay, Scope, SharePolicy,
    SubscriberId, Subscription, Temperature, Timing, VirtualTime,
};
pub use sharesim_error::{Result, ResultExt, ShareError};

// Re-export the engine
pub use sharesim_engine::{simulate, simulate_script, SharedSource, Step};

pub use matrix::{MatrixRow, Sharing};
pub use scenario::Scenario;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{simulate, ProducerSpec, Replay, Scope, SharePolicy, Subscription};
    pub use sharesim_core::EventLog;
}
