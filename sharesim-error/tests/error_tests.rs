// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharesim_error::{Result, ResultExt, ShareError};

#[test]
fn test_error_display() {
    let err = ShareError::invalid_schedule("attach time 100 does not follow 200");
    assert_eq!(
        err.to_string(),
        "Invalid schedule: attach time 100 does not follow 200"
    );

    let err = ShareError::unsupported_policy(2, "forever");
    assert_eq!(
        err.to_string(),
        "Unsupported share policy: replay=2, scope=forever"
    );

    let err = ShareError::unknown_subscriber(7);
    assert_eq!(err.to_string(), "Unknown subscriber: 7");
}

#[test]
fn test_error_constructors() {
    assert!(matches!(
        ShareError::invalid_schedule("x"),
        ShareError::InvalidSchedule { .. }
    ));
    assert!(matches!(
        ShareError::unsupported_policy(3, "eventually"),
        ShareError::UnsupportedPolicy { replay: 3, ref scope } if scope == "eventually"
    ));
    assert!(matches!(
        ShareError::scenario("bad file"),
        ShareError::Scenario { .. }
    ));
}

#[test]
fn test_is_caller_error() {
    assert!(ShareError::invalid_schedule("x").is_caller_error());
    assert!(ShareError::unsupported_policy(2, "forever").is_caller_error());
    assert!(ShareError::unknown_subscriber(1).is_caller_error());
    assert!(!ShareError::scenario("x").is_caller_error());
}

#[test]
fn test_result_context_wraps_foreign_errors() {
    // Arrange
    let parsed: std::result::Result<u32, _> = serde_json::from_str::<u32>("not json");

    // Act
    let err = parsed.context("reading scenario").unwrap_err();

    // Assert
    assert!(matches!(err, ShareError::Scenario { .. }));
    assert!(err.to_string().starts_with("Scenario error: reading scenario: "));
}

#[test]
fn test_result_with_context_is_lazy() {
    let ok: std::result::Result<u32, std::io::Error> = Ok(5);
    let result: Result<u32> = ok.with_context(|| panic!("must not be evaluated"));
    assert_eq!(result, Ok(5));

    let failed: std::result::Result<u32, std::io::Error> = Err(std::io::Error::other("boom"));
    let err = failed
        .with_context(|| format!("loading {}", "matrix.json"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Scenario error: loading matrix.json: boom");
}

#[test]
fn test_errors_compare_by_content() {
    assert_eq!(
        ShareError::invalid_schedule("same"),
        ShareError::invalid_schedule("same")
    );
    assert_ne!(
        ShareError::unknown_subscriber(1),
        ShareError::unknown_subscriber(2)
    );
}
