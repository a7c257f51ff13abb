// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the sharesim simulator.
//!
//! - `fixtures` - ready-made policies, times and subscriber ids
//! - `helpers` - assertions and accessors over an [`EventLog`](sharesim_core::EventLog)

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod fixtures;
pub mod helpers;

pub use fixtures::{at, forever, while_connected, SUB1, SUB2, SUB3};
pub use helpers::{
    assert_chronological, assert_no_events_for, completion_times, delivery_times, values_for,
};
