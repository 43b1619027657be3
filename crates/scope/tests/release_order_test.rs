//! Release ordering and absent-slot handling

mod common;

use common::{factory, EventLog, RecordingResource, SlotKind};
use tryscope_core::{BlockState, Outcome};
use tryscope_scope::{run_scoped, ScopedBlock};

#[test]
fn test_releases_in_reverse_acquisition_order() {
    let releases = EventLog::new();

    let (outcome, report) = ScopedBlock::new("abc")
        .acquire(|| Ok(RecordingResource::new("A", &releases)))
        .acquire(|| Ok(RecordingResource::new("B", &releases)))
        .acquire(|| Ok(RecordingResource::new("C", &releases)))
        .run_with_report(|_| Ok(()));

    assert!(outcome.is_completed());
    assert_eq!(releases.entries(), ["C", "B", "A"]);
    assert_eq!(report.release_order(), ["C", "B", "A"]);
    assert_eq!(report.state(), BlockState::Done);
}

#[test]
fn test_absent_slot_is_skipped_silently() {
    let releases = EventLog::new();

    let (outcome, report) = ScopedBlock::new("absent")
        .acquire(|| Ok(RecordingResource::new("MyResource", &releases)))
        .acquire_optional(|| Ok(None::<RecordingResource>))
        .acquire(|| Ok(RecordingResource::new("AnotherResource", &releases)))
        .run_with_report(|_| Ok(()));

    assert!(outcome.is_completed());
    assert_eq!(releases.entries(), ["AnotherResource", "MyResource"]);
    assert_eq!(report.skipped().len(), 1);
    assert_eq!(report.skipped()[0].index, 1);
    assert!(report.skipped()[0].is_absent());
}

#[test]
fn test_absent_at_every_position() {
    for position in 0..3 {
        let constructed = EventLog::new();
        let releases = EventLog::new();
        let factories = (0..3)
            .map(|i| {
                let kind = if i == position {
                    SlotKind::Absent
                } else {
                    SlotKind::Healthy
                };
                factory(&format!("R{i}"), kind, &constructed, &releases)
            })
            .collect();

        let outcome = run_scoped(factories, |_| Ok(()));

        assert!(outcome.is_completed(), "absent at {position} failed the block");
        let expected: Vec<String> = (0..3)
            .rev()
            .filter(|i| *i != position)
            .map(|i| format!("R{i}"))
            .collect();
        assert_eq!(releases.entries(), expected);
    }
}

#[test]
fn test_explicit_absent_slot() {
    let releases = EventLog::new();

    let outcome = ScopedBlock::new("explicit")
        .absent()
        .acquire(|| Ok(RecordingResource::new("only", &releases)))
        .absent()
        .run(|scope| {
            assert_eq!(scope.len(), 3);
            assert!(!scope.is_present(0));
            assert!(scope.is_present(1));
            Ok(())
        });

    assert!(outcome.is_completed());
    assert_eq!(releases.entries(), ["only"]);
}

#[test]
fn test_body_sees_every_resource_live() {
    let releases = EventLog::new();

    let outcome = ScopedBlock::new("live")
        .acquire(|| Ok(RecordingResource::new("first", &releases)))
        .acquire(|| Ok(RecordingResource::new("second", &releases)))
        .run(|scope| {
            let first = scope.get::<RecordingResource>(0)?.touch().to_string();
            let second = scope.get_mut::<RecordingResource>(1)?.touch().to_string();
            Ok(format!("{first}+{second}"))
        });

    // Nothing is released until the body has returned.
    assert_eq!(outcome.into_result().unwrap(), "first+second");
    assert_eq!(releases.entries(), ["second", "first"]);
}

#[test]
fn test_factory_can_build_on_earlier_resource() {
    let releases = EventLog::new();

    let outcome = ScopedBlock::new("layered")
        .acquire(|| Ok(RecordingResource::new("file", &releases)))
        .acquire_with(|scope| {
            let inner = scope.get::<RecordingResource>(0)?.touch().to_string();
            Ok(RecordingResource::new(&format!("buffer({inner})"), &releases))
        })
        .run(|_| Ok(()));

    assert!(outcome.is_completed());
    assert_eq!(releases.entries(), ["buffer(file)", "file"]);
}

#[test]
fn test_deferred_actions_run_in_reverse_registration_order() {
    let releases = EventLog::new();
    let first = releases.clone();
    let second = releases.clone();

    let outcome = ScopedBlock::new("deferred")
        .defer("first", move || {
            first.record("first");
            Ok(())
        })
        .acquire(|| Ok(RecordingResource::new("resource", &releases)))
        .defer("second", move || {
            second.record("second");
            Ok(())
        })
        .run(|_| Ok(()));

    assert!(outcome.is_completed());
    assert_eq!(releases.entries(), ["second", "resource", "first"]);
}

#[test]
fn test_cancelled_deferred_is_released_without_running() {
    let releases = EventLog::new();
    let log = releases.clone();

    let (outcome, report) = ScopedBlock::new("cancel")
        .defer("rollback", move || {
            log.record("rollback");
            Ok(())
        })
        .run_with_report(|scope| {
            scope.get_mut::<tryscope_scope::Deferred>(0)?.cancel();
            Ok(())
        });

    assert!(outcome.is_completed());
    assert!(releases.is_empty());
    assert_eq!(report.release_order(), ["rollback"]);
}

#[test]
fn test_my_resource_null_another_resource_scenario() {
    let constructed = EventLog::new();
    let releases = EventLog::new();
    let factories = vec![
        factory("MyResource", SlotKind::Healthy, &constructed, &releases),
        factory("null", SlotKind::Absent, &constructed, &releases),
        factory("AnotherResource", SlotKind::Healthy, &constructed, &releases),
    ];

    let outcome = run_scoped(factories, |_| Ok(()));

    assert!(matches!(outcome, Outcome::Completed(())));
    assert_eq!(constructed.entries(), ["MyResource", "null", "AnotherResource"]);
    assert_eq!(releases.entries(), ["AnotherResource", "MyResource"]);
}

#[test]
fn test_buffered_writer_flushes_on_release() {
    use std::fs::File;
    use std::io::{BufWriter, Write};

    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("buffered.txt");

    let outcome = ScopedBlock::new("buffered")
        .acquire(|| Ok(BufWriter::new(File::create(&path)?)))
        .run(|scope| {
            let writer = scope.get_mut::<BufWriter<File>>(0)?;
            writer.write_all(b"held in the buffer")?;
            Ok(std::fs::read_to_string(&path)?)
        });

    // Nothing reached the file until the block released the writer
    assert_eq!(outcome.into_result().unwrap(), "");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "held in the buffer"
    );
}

#[test]
fn test_nested_blocks_release_only_their_own_resources() {
    let releases = EventLog::new();

    let (outcome, outer_report) = ScopedBlock::new("outer")
        .acquire(|| Ok(RecordingResource::new("outer", &releases)))
        .run_with_report(|outer| {
            let (inner_outcome, inner_report) = ScopedBlock::new("inner")
                .acquire(|| Ok(RecordingResource::new("inner", &releases)))
                .run_with_report(|inner| {
                    assert!(outer.is_present(0));
                    assert!(inner.is_present(0));
                    Ok(())
                });
            assert!(inner_outcome.is_completed());
            assert_eq!(inner_report.release_order(), ["inner"]);
            assert!(outer.is_present(0));
            Ok(())
        });

    assert!(outcome.is_completed());
    assert_eq!(outer_report.release_order(), ["outer"]);
    assert_eq!(releases.entries(), ["inner", "outer"]);
}
