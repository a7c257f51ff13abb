// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharesim_core::{Replay, Scope, ShareError, SharePolicy};

#[test]
fn test_parse_accepts_the_supported_matrix() -> anyhow::Result<()> {
    assert_eq!(
        SharePolicy::parse(0, "while-connected")?,
        SharePolicy::new(Replay::None, Scope::WhileConnected)
    );
    assert_eq!(
        SharePolicy::parse(1, "while-connected")?,
        SharePolicy::new(Replay::Latest, Scope::WhileConnected)
    );
    assert_eq!(
        SharePolicy::parse(0, "forever")?,
        SharePolicy::new(Replay::None, Scope::Forever)
    );
    assert_eq!(
        SharePolicy::parse(1, "forever")?,
        SharePolicy::new(Replay::Latest, Scope::Forever)
    );

    Ok(())
}

#[test]
fn test_parse_rejects_replay_beyond_one() {
    assert_eq!(
        SharePolicy::parse(2, "forever"),
        Err(ShareError::unsupported_policy(2, "forever"))
    );
}

#[test]
fn test_parse_rejects_unknown_scope() {
    assert_eq!(
        SharePolicy::parse(1, "whileConnected"),
        Err(ShareError::unsupported_policy(1, "whileConnected"))
    );
}

#[test]
fn test_all_lists_each_policy_once() {
    let all = SharePolicy::all();

    assert_eq!(all.len(), 4);
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_only_replaying_policies_buffer() {
    assert!(SharePolicy::new(Replay::Latest, Scope::Forever).buffers());
    assert!(!SharePolicy::new(Replay::None, Scope::WhileConnected).buffers());
}

#[test]
fn test_policy_display_mirrors_operator_call() {
    let policy = SharePolicy::new(Replay::Latest, Scope::WhileConnected);

    assert_eq!(
        policy.to_string(),
        "share(replay: 1, scope: while-connected)"
    );
}

#[test]
fn test_policy_serializes_as_raw_values() -> anyhow::Result<()> {
    // Arrange
    let policy = SharePolicy::new(Replay::None, Scope::Forever);

    // Act
    let json = serde_json::to_string(&policy)?;

    // Assert
    assert_eq!(json, r#"{"replay":0,"scope":"forever"}"#);
    assert_eq!(serde_json::from_str::<SharePolicy>(&json)?, policy);

    Ok(())
}

#[test]
fn test_deserializing_unsupported_policy_fails() {
    let result = serde_json::from_str::<SharePolicy>(r#"{"replay":3,"scope":"forever"}"#);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Unsupported share policy"));
}
