// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! JSON-described simulation runs.
//!
//! ```json
//! {
//!   "name": "late joiner",
//!   "producer": { "emissions": [100], "complete_after": 300 },
//!   "policy": { "replay": 1, "scope": "while-connected" },
//!   "subscriptions": [0, 200],
//!   "detaches": [{ "subscriber": 1, "at": 250 }]
//! }
//! ```
//!
//! Subscribers are numbered from 1 in the order of `subscriptions`. A producer
//! marked `"temperature": "hot"` pushes at absolute times and may omit
//! `complete_after`.

use serde::{Deserialize, Serialize};
use sharesim_core::{EventLog, ProducerSpec, SharePolicy, Subscription, Timing};
use sharesim_engine::{simulate_script, Step};
use sharesim_error::{Result, ResultExt, ShareError};
use std::path::Path;

/// A scheduled unsubscription inside a [`Scenario`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detach {
    pub subscriber: u32,
    pub at: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub producer: ProducerSpec,
    pub policy: SharePolicy,
    /// Attach times in milliseconds, one per subscriber.
    pub subscriptions: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detaches: Vec<Detach>,
}

/// On-disk shape of a scenario, with the policy still unchecked.
#[derive(Deserialize)]
struct ScenarioFile {
    name: String,
    producer: ProducerSpec,
    policy: PolicyFile,
    subscriptions: Vec<u64>,
    #[serde(default)]
    detaches: Vec<Detach>,
}

#[derive(Deserialize)]
struct PolicyFile {
    replay: u32,
    scope: String,
}

impl TryFrom<ScenarioFile> for Scenario {
    type Error = ShareError;

    fn try_from(file: ScenarioFile) -> Result<Self> {
        Ok(Self {
            name: file.name,
            producer: file.producer,
            policy: SharePolicy::parse(file.policy.replay, &file.policy.scope)?,
            subscriptions: file.subscriptions,
            detaches: file.detaches,
        })
    }
}

impl Scenario {
    /// Builds the scenario a matrix cell runs.
    #[must_use]
    pub fn from_timing(policy: SharePolicy, timing: &Timing) -> Self {
        Self {
            name: format!("{policy} / {}", timing.name),
            producer: timing.producer(),
            policy,
            subscriptions: timing.subscriptions.clone(),
            detaches: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ShareError::Scenario`] for malformed JSON and
    /// [`ShareError::UnsupportedPolicy`] for a policy outside the supported matrix.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ScenarioFile = serde_json::from_str(json).context("Invalid scenario")?;
        Self::try_from(file)
    }

    /// # Errors
    ///
    /// Fails if the file cannot be read or does not hold a valid scenario.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read scenario {}", path.display()))?;
        Self::from_json(&json)
    }

    /// # Errors
    ///
    /// See [`ResultExt`]; serialization of a scenario does not fail in practice.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Cannot serialize scenario")
    }

    /// Merges attaches and detaches into one script.
    ///
    /// Attaches keep their declared order. Each detach is placed before the
    /// first attach that happens strictly later, so at equal times attaches
    /// come first.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        let mut detaches: Vec<Step> = self
            .detaches
            .iter()
            .map(|detach| Step::detach(detach.subscriber, detach.at))
            .collect();
        detaches.sort_by_key(Step::at);
        let mut detaches = detaches.into_iter().peekable();

        let mut steps = Vec::with_capacity(self.subscriptions.len() + self.detaches.len());
        for attach in Subscription::numbered(self.subscriptions.iter().copied()) {
            while let Some(detach) = detaches.next_if(|detach| detach.at() < attach.attach_at) {
                steps.push(detach);
            }
            steps.push(Step::from(attach));
        }
        steps.extend(detaches);
        steps
    }

    /// # Errors
    ///
    /// Propagates schedule and policy errors from the simulation.
    pub fn run(&self) -> Result<EventLog> {
        simulate_script(&self.producer, self.policy, &self.steps())
    }
}
