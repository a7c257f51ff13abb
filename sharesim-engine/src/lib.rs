// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Discrete-event simulation of `share(replay:scope:)` multicasting.
//!
//! Use [`simulate`] for a one-shot run over a list of subscriptions, or drive a
//! [`SharedSource`] directly to interleave attaches, detaches and clock advances.
#[macro_use]
mod logging;
mod queue;
pub mod shared_source;
mod simulate;

pub use self::shared_source::SharedSource;
pub use self::simulate::{simulate, simulate_script, Step};
