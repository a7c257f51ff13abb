// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types for the sharesim multicast-sharing simulator.
//!
//! A simulation takes a cold [`ProducerSpec`], a [`SharePolicy`] and a list of
//! [`Subscription`]s, and produces an [`EventLog`] describing what every subscriber
//! observed on the virtual clock.
pub mod event;
pub mod event_log;
pub mod has_timestamp;
pub mod policy;
pub mod producer;
pub mod subscription;
pub mod time;
pub mod timing;

pub use self::event::{ActivationId, Delivery, EmittedValue, Event, EventKind};
pub use self::event_log::{ActivationFate, ActivationRecord, EventLog, Marker, MarkerKind};
pub use self::has_timestamp::{is_chronological, HasTimestamp};
pub use self::policy::{Replay, Scope, SharePolicy};
pub use self::producer::{ProducerSpec, Temperature};
pub use self::subscription::{SubscriberId, Subscription};
pub use self::time::VirtualTime;
pub use self::timing::Timing;
pub use sharesim_error::{Result, ShareError};
