// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharesim_core::{
    ActivationFate, ActivationId, Delivery, EventKind, MarkerKind, ProducerSpec, ShareError,
};
use sharesim_engine::{simulate_script, SharedSource, Step};
use sharesim_test_utils::{
    assert_chronological, assert_no_events_for, at, completion_times, delivery_times, forever,
    values_for, while_connected, SUB1, SUB2, SUB3,
};

#[test]
fn test_shared_source_is_idle_until_first_attach() -> anyhow::Result<()> {
    // Arrange
    let mut source = SharedSource::new(ProducerSpec::single(100, 200), while_connected(0))?;

    // Act
    source.advance_to(at(1_000))?;

    // Assert
    assert!(!source.is_active());
    assert_eq!(source.pending(), 0);
    assert_eq!(source.finish().activation_count(), 0);

    Ok(())
}

#[test]
fn test_attach_activates_and_schedules_producer_signals() -> anyhow::Result<()> {
    // Arrange
    let mut source = SharedSource::new(ProducerSpec::single(100, 200), forever(1))?;

    // Act
    source.attach(SUB1, at(50))?;

    // Assert - one emission plus completion, relative to the attach time
    assert!(source.is_active());
    assert_eq!(source.pending(), 2);
    assert_eq!(source.attached(), &[SUB1]);

    source.advance_to(at(151))?;
    assert_eq!(source.pending(), 1);

    source.advance_to(at(251))?;
    assert!(!source.is_active());
    assert!(source.attached().is_empty());

    let log = source.finish();
    assert_eq!(delivery_times(&log, SUB1), vec![150]);
    assert_eq!(completion_times(&log, SUB1), vec![at(250)]);

    Ok(())
}

#[test]
fn test_newcomer_at_emission_time_is_served_after_existing_subscribers() -> anyhow::Result<()> {
    // Arrange
    let mut source = SharedSource::new(ProducerSpec::single(100, 300), while_connected(0))?;

    // Act - sub2 attaches exactly when the value is emitted
    source.attach(SUB1, at(0))?;
    source.attach(SUB2, at(100))?;
    let log = source.finish();

    // Assert
    let deliveries: Vec<_> = log
        .events()
        .iter()
        .filter(|event| event.time == at(100))
        .map(|event| (event.subscriber, event.delivery))
        .collect();
    assert_eq!(
        deliveries,
        vec![(SUB1, Delivery::Live), (SUB2, Delivery::Live)]
    );

    Ok(())
}

#[test]
fn test_advancing_to_an_emission_time_leaves_it_for_a_newcomer_at_that_time() -> anyhow::Result<()> {
    // Arrange
    let mut source = SharedSource::new(ProducerSpec::single(100, 300), while_connected(0))?;
    source.attach(SUB1, at(0))?;

    // Act - the clock reaches the emission instant before sub2 attaches there
    source.advance_to(at(100))?;
    let pending = source.pending();
    source.attach(SUB2, at(100))?;
    let log = source.finish();

    // Assert
    assert_eq!(pending, 2);
    assert_eq!(delivery_times(&log, SUB1), vec![100]);
    assert_eq!(delivery_times(&log, SUB2), vec![100]);
    assert_eq!(values_for(&log, SUB2), values_for(&log, SUB1));

    Ok(())
}

#[test]
fn test_newcomer_at_completion_time_receives_replay_then_completion() -> anyhow::Result<()> {
    // Arrange
    let mut source = SharedSource::new(ProducerSpec::single(100, 300), while_connected(1))?;

    // Act
    source.attach(SUB1, at(0))?;
    source.attach(SUB2, at(300))?;
    let log = source.finish();

    // Assert - still connected at 300ms, so no fresh activation
    assert_eq!(values_for(&log, SUB2), values_for(&log, SUB1));
    assert_eq!(completion_times(&log, SUB2), vec![at(300)]);
    assert_eq!(log.activation_count(), 1);

    Ok(())
}

#[test]
fn test_detaching_last_subscriber_tears_down_while_connected_activation() -> anyhow::Result<()> {
    // Arrange
    let mut source = SharedSource::new(ProducerSpec::single(100, 300), while_connected(1))?;
    source.attach(SUB1, at(0))?;

    // Act
    source.detach(SUB1, at(50))?;

    // Assert - pending signals are cancelled right away
    assert!(!source.is_active());
    assert_eq!(source.pending(), 0);

    source.attach(SUB2, at(60))?;
    let log = source.finish();

    assert_no_events_for(&log, SUB1);
    assert_eq!(delivery_times(&log, SUB2), vec![160]);
    assert_eq!(completion_times(&log, SUB2), vec![at(360)]);

    let records = log.activations();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].fate, ActivationFate::Unsubscribed);
    assert_eq!(records[0].ended_at, at(50));
    assert_eq!(records[1].fate, ActivationFate::Completed);
    assert_eq!(records[1].started_at, at(60));

    Ok(())
}

#[test]
fn test_detaching_one_of_several_subscribers_keeps_activation_running() -> anyhow::Result<()> {
    // Arrange
    let steps = [
        Step::attach(1, 0),
        Step::attach(2, 10),
        Step::detach(1, 50),
    ];

    // Act
    let log = simulate_script(&ProducerSpec::single(100, 200), while_connected(0), &steps)?;

    // Assert
    assert_no_events_for(&log, SUB1);
    assert_eq!(delivery_times(&log, SUB2), vec![100]);
    assert_eq!(log.activation_count(), 1);

    Ok(())
}

#[test]
fn test_detaching_everyone_under_forever_keeps_activation_alive() -> anyhow::Result<()> {
    // Arrange
    let steps = [Step::attach(1, 0), Step::detach(1, 50), Step::attach(2, 60)];

    // Act
    let log = simulate_script(&ProducerSpec::single(100, 300), forever(0), &steps)?;

    // Assert - sub2 joins the first activation instead of starting a new one
    assert_no_events_for(&log, SUB1);
    let sub2 = values_for(&log, SUB2);
    assert_eq!(sub2.len(), 1);
    assert_eq!(sub2[0].activation, ActivationId(1));
    assert_eq!(sub2[0].emitted_at, at(100));
    assert_eq!(log.activation_count(), 1);
    assert_eq!(log.activations()[0].fate, ActivationFate::Retained);

    Ok(())
}

#[test]
fn test_buffer_keeps_only_the_latest_value() -> anyhow::Result<()> {
    // Arrange
    let producer = ProducerSpec::sequence([10, 20, 30], 100);

    // Act
    let log = simulate_script(
        &producer,
        while_connected(1),
        &[Step::attach(1, 0), Step::attach(2, 50)],
    )?;

    // Assert
    let replayed: Vec<_> = log
        .events_for(SUB2)
        .filter(|event| event.delivery == Delivery::Replayed)
        .collect();
    assert_eq!(replayed.len(), 1);
    assert!(matches!(replayed[0].kind, EventKind::Value(value) if value.index == 2));

    Ok(())
}

#[test]
fn test_markers_follow_the_lifecycle() -> anyhow::Result<()> {
    // Arrange
    let steps = [Step::attach(1, 0), Step::attach(2, 300)];

    // Act
    let log = simulate_script(&ProducerSpec::single(100, 200), while_connected(0), &steps)?;

    // Assert
    let kinds: Vec<_> = log.markers().iter().map(|marker| marker.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MarkerKind::Attached(SUB1),
            MarkerKind::Activated(ActivationId(1)),
            MarkerKind::TornDown(ActivationId(1)),
            MarkerKind::Attached(SUB2),
            MarkerKind::Activated(ActivationId(2)),
            MarkerKind::TornDown(ActivationId(2)),
        ]
    );
    assert_eq!(log.markers()[2].position, 2);
    assert_eq!(log.subscribers(), vec![SUB1, SUB2]);
    assert_chronological(&log);

    Ok(())
}

#[test]
fn test_rejected_attach_leaves_source_untouched() -> anyhow::Result<()> {
    // Arrange
    let mut source = SharedSource::new(ProducerSpec::single(100, 200), forever(1))?;
    source.attach(SUB1, at(100))?;

    // Act
    let result = source.attach(SUB2, at(100));

    // Assert
    assert!(matches!(result, Err(ShareError::InvalidSchedule { .. })));
    assert_eq!(source.attached(), &[SUB1]);

    source.attach(SUB2, at(150))?;
    source.attach(SUB3, at(400))?;
    let log = source.finish();
    assert_eq!(log.subscribers(), vec![SUB1, SUB2, SUB3]);

    Ok(())
}

#[test]
fn test_clock_cannot_move_backwards() -> anyhow::Result<()> {
    // Arrange
    let mut source = SharedSource::new(ProducerSpec::single(100, 200), forever(0))?;
    source.advance_to(at(500))?;

    // Act & Assert
    assert!(matches!(
        source.advance_to(at(400)),
        Err(ShareError::InvalidSchedule { .. })
    ));
    assert!(matches!(
        source.attach(SUB1, at(499)),
        Err(ShareError::InvalidSchedule { .. })
    ));
    assert_eq!(source.now(), at(500));

    Ok(())
}

#[test]
fn test_detach_of_unknown_subscriber_fails() -> anyhow::Result<()> {
    let mut source = SharedSource::new(ProducerSpec::single(100, 200), while_connected(0))?;

    assert_eq!(
        source.detach(SUB1, at(0)),
        Err(ShareError::unknown_subscriber(1))
    );

    Ok(())
}

#[test]
fn test_invalid_producer_is_rejected_on_construction() {
    let result = SharedSource::new(ProducerSpec::single(250, 200), forever(1));

    assert!(matches!(result, Err(ShareError::InvalidSchedule { .. })));
}
