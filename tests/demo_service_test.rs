//! Tests for DemoService

use std::io::Write;

use dispatch_demo::application::services::{reference_sequence, Binding, DemoService, Step};
use dispatch_demo::application::{ApplicationError, Operation};
use dispatch_demo::domain::{DomainError, TypeTag, PARENT_METHOD1};
use dispatch_demo::util::testing::{init_test_setup, OutputCapture};

const EXPECTED_SEQUENCE: [&str; 12] = [
    "Parent method1",
    "Parent method2",
    "Child method1",
    "Parent method2",
    "Child method2",
    "Child method1",
    "Parent method2",
    "Child method1",
    "Parent method2",
    "Child method1",
    "Parent method2",
    "Child method2",
];

#[test]
fn given_reference_sequence_when_running_then_prints_one_line_per_call() {
    // Arrange
    init_test_setup();
    let service = DemoService::new(false);
    let mut out = OutputCapture::new();

    // Act
    let report = service.run(&mut out).unwrap();

    // Assert
    assert_eq!(out.lines(), EXPECTED_SEQUENCE);
    assert_eq!(report.steps, 5);
    assert_eq!(report.lines, 12);
}

#[test]
fn given_check_mode_when_running_reference_sequence_then_all_lines_match() {
    init_test_setup();
    let service = DemoService::new(true);
    let mut out = OutputCapture::new();

    let report = service.run(&mut out).unwrap();

    assert_eq!(report.lines, EXPECTED_SEQUENCE.len());
    assert_eq!(out.lines(), EXPECTED_SEQUENCE);
}

#[test]
fn given_step_callback_when_running_then_called_once_per_step_in_order() {
    init_test_setup();
    let service = DemoService::new(false);
    let mut out = OutputCapture::new();
    let mut labels = Vec::new();

    service
        .run_with(&mut out, |step, _| {
            labels.push(step.label);
            Ok(())
        })
        .unwrap();

    assert_eq!(labels, vec!["parent", "child", "parent2", "parent3", "child3"]);
}

#[test]
fn given_step_callback_writing_to_sink_when_running_then_text_precedes_step_lines() {
    init_test_setup();
    let service = DemoService::new(false);
    let mut out = OutputCapture::new();

    service
        .run_with(&mut out, |step, sink| writeln!(sink, "# {}", step.label))
        .unwrap();

    let lines = out.lines();
    assert_eq!(lines.len(), 17);
    assert_eq!(lines[0], "# parent");
    assert_eq!(lines[1], "Parent method1");
    assert_eq!(lines[3], "# child");
    assert_eq!(lines[16], "Child method2");
}

#[test]
fn given_wrong_expectation_when_checking_then_stops_before_writing() {
    // Arrange: a Parent reference to a Child, expecting the base method1
    init_test_setup();
    let steps = vec![Step {
        label: "poly",
        declared: TypeTag::Parent,
        dynamic: TypeTag::Child,
        binding: Binding::NewAsParent,
        calls: vec![(Operation::Method1, PARENT_METHOD1)],
    }];
    let service = DemoService::with_steps(steps, true);
    let mut out = OutputCapture::new();

    // Act
    let err = service.run(&mut out).unwrap_err();

    // Assert
    match err {
        ApplicationError::UnexpectedOutput {
            step,
            expected,
            actual,
        } => {
            assert_eq!(step, "poly.method1");
            assert_eq!(expected, "Parent method1");
            assert_eq!(actual, "Child method1");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(out.text().is_empty());
}

#[test]
fn given_wrong_expectation_without_check_when_running_then_prints_actual_line() {
    init_test_setup();
    let steps = vec![Step {
        label: "poly",
        declared: TypeTag::Parent,
        dynamic: TypeTag::Child,
        binding: Binding::NewAsParent,
        calls: vec![(Operation::Method1, PARENT_METHOD1)],
    }];
    let service = DemoService::with_steps(steps, false);
    let mut out = OutputCapture::new();

    service.run(&mut out).unwrap();

    assert_eq!(out.text(), "Child method1");
}

#[test]
fn given_narrowing_of_parent_instance_when_running_then_fails_with_downcast_error() {
    init_test_setup();
    let steps = vec![Step {
        label: "bad",
        declared: TypeTag::Child,
        dynamic: TypeTag::Parent,
        binding: Binding::Narrowed,
        calls: vec![(Operation::Method1, PARENT_METHOD1)],
    }];
    let service = DemoService::with_steps(steps, false);
    let mut out = OutputCapture::new();

    let err = service.run(&mut out).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidDowncast {
            from: TypeTag::Parent,
            to: TypeTag::Child
        })
    ));
    assert!(out.text().is_empty());
}

#[test]
fn given_reference_sequence_then_never_narrows_a_parent_instance() {
    for step in reference_sequence() {
        if step.binding == Binding::Narrowed {
            assert_eq!(step.dynamic, TypeTag::Child);
        }
    }
}
