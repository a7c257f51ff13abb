// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharesim_core::{ProducerSpec, ShareError, Subscription};
use sharesim_engine::{simulate, simulate_script, Step};
use sharesim_test_utils::{forever, while_connected};

#[test]
fn test_equal_attach_times_are_rejected() {
    // Arrange
    let subscriptions = [Subscription::new(1, 100), Subscription::new(2, 100)];

    // Act
    let result = simulate(&ProducerSpec::single(100, 200), while_connected(0), &subscriptions);

    // Assert
    assert!(matches!(result, Err(ShareError::InvalidSchedule { .. })));
}

#[test]
fn test_decreasing_attach_times_are_rejected() {
    let subscriptions = [
        Subscription::new(1, 0),
        Subscription::new(2, 300),
        Subscription::new(3, 200),
    ];

    let result = simulate(&ProducerSpec::single(100, 200), forever(1), &subscriptions);

    assert!(matches!(
        result,
        Err(ShareError::InvalidSchedule { ref context }) if context.contains("sub 3")
    ));
}

#[test]
fn test_duplicate_subscriber_ids_are_rejected() {
    let subscriptions = [Subscription::new(1, 0), Subscription::new(1, 100)];

    let result = simulate(&ProducerSpec::single(100, 200), forever(0), &subscriptions);

    assert!(matches!(result, Err(ShareError::InvalidSchedule { .. })));
}

#[test]
fn test_producer_emitting_after_completion_is_rejected() {
    let result = simulate(
        &ProducerSpec::single(300, 200),
        while_connected(1),
        &[Subscription::new(1, 0)],
    );

    assert!(matches!(result, Err(ShareError::InvalidSchedule { .. })));
}

#[test]
fn test_producer_with_unordered_emissions_is_rejected() {
    let result = simulate(
        &ProducerSpec::sequence([50, 10], 100),
        while_connected(0),
        &[Subscription::new(1, 0)],
    );

    assert!(matches!(result, Err(ShareError::InvalidSchedule { .. })));
}

#[test]
fn test_producer_offsets_overflowing_the_clock_are_rejected() {
    let result = simulate(
        &ProducerSpec::single(10, 100),
        forever(0),
        &[Subscription::new(1, u64::MAX - 50)],
    );

    assert!(matches!(result, Err(ShareError::InvalidSchedule { .. })));
}

#[test]
fn test_detaching_an_unknown_subscriber_is_rejected() {
    let steps = [Step::attach(1, 0), Step::detach(2, 50)];

    let result = simulate_script(&ProducerSpec::single(100, 200), while_connected(0), &steps);

    assert_eq!(result, Err(ShareError::unknown_subscriber(2)));
}

#[test]
fn test_detaching_twice_is_rejected() {
    let steps = [Step::attach(1, 0), Step::detach(1, 50), Step::detach(1, 60)];

    let result = simulate_script(&ProducerSpec::single(100, 200), forever(0), &steps);

    assert_eq!(result, Err(ShareError::unknown_subscriber(1)));
}

#[test]
fn test_script_going_back_in_time_is_rejected() {
    let steps = [Step::attach(1, 100), Step::detach(1, 50)];

    let result = simulate_script(&ProducerSpec::single(100, 200), forever(0), &steps);

    assert!(matches!(result, Err(ShareError::InvalidSchedule { .. })));
}
