use std::sync::Arc;

use callmock::*;

use crate::Collecting;

fn recorded_history() -> MockFunction<(i32, &'static str), ()> {
    let f = MockFunction::<(i32, &'static str), ()>::new().named("f");
    for _ in 0..2 {
        f.call((&1, &"foo"));
    }
    for _ in 0..9 {
        f.call((&7, &"bar"));
    }
    f.call((&7, &"foo"));
    f
}

#[test]
fn counts_over_the_whole_history() {
    let f = recorded_history();

    assert!(f.check_called().exactly(12).evaluate().passed());
    assert!(f.check_called().at_least(12).evaluate().passed());
    assert!(f.check_called().at_most(12).evaluate().passed());
    assert!(!f.check_called().exactly(11).evaluate().passed());
}

#[test]
fn with_filters_before_counting() {
    let f = recorded_history();

    assert!(f.check_called().with((7, "bar")).exactly(9).evaluate().passed());
    assert!(f.check_called().exactly(9).with((7, "bar")).evaluate().passed());
    assert!(f.check_called().with((7, "foo")).once().evaluate().passed());
    assert!(f.check_called().with((1, "foo")).between(1, 2).evaluate().passed());
    assert!(!f.check_called().with((1, "foo")).between(3, 4).evaluate().passed());
}

#[test]
fn never_applies_after_filters_and_ends_the_chain() {
    let f = recorded_history();

    assert!(f.check_called().never().with((99, "zzz")).evaluate().passed());
    assert!(f
        .check_called()
        .with((99, "zzz"))
        .never()
        .at_least(1)
        .evaluate()
        .passed());
    assert!(!f.check_called().never().evaluate().passed());
}

#[test]
fn failure_names_expected_and_actual_counts() {
    let f = recorded_history();
    let verdict = f.check_called().with((7, "bar")).exactly(3).evaluate();

    assert!(!verdict.passed());
    assert_eq!(
        "f: check_called().with((7, \"bar\")).exactly(3): expected exactly 3 calls, but 9 calls matched",
        verdict.message()
    );
}

#[test]
fn unmatched_pattern_lists_recorded_calls() {
    let f = recorded_history();
    let verdict = f.check_called().with((7, "baz")).once().evaluate();

    assert!(!verdict.passed());
    assert!(
        verdict.message().starts_with(
            "f: check_called().with((7, \"baz\")).exactly(1): expected exactly 1 call, but no calls matched"
        ),
        "{}",
        verdict.message()
    );
    assert!(verdict.message().contains("Recorded calls:"));
    assert!(verdict.message().contains("#0 (1, \"foo\")"));
}

#[test]
fn assertions_are_idempotent() {
    let f = recorded_history();

    let first = f.check_called().at_least(1).evaluate();
    let second = f.check_called().at_least(1).evaluate();
    assert_eq!(first, second);

    let first = f.check_called().with((0, "none")).at_least(1).evaluate();
    let second = f.check_called().with((0, "none")).at_least(1).evaluate();
    assert_eq!(first, second);
    assert!(!first.passed());
}

#[test]
fn assertions_see_the_history_at_creation() {
    let f = MockFunction::<(), ()>::new();
    f.call(());

    let assertion = f.check_called().exactly(1);
    f.call(());

    assert!(assertion.evaluate().passed());
    assert_eq!(2, f.call_count());
}

#[test]
fn outcomes_go_to_the_reporter() {
    let reporter = Collecting::new();
    let f = recorded_history();

    f.check_called()
        .with((7, "bar"))
        .exactly(9)
        .reporter(reporter.clone());
    f.check_called()
        .with((7, "bar"))
        .exactly(3)
        .reporter(reporter.clone());

    let outcomes = reporter.outcomes();
    assert_eq!(2, outcomes.len());
    assert!(outcomes[0].passed);
    assert!(!outcomes[1].passed);
    assert_eq!(Severity::Check, outcomes[1].severity);
    assert_eq!(file!(), outcomes[1].location.file);
    assert_eq!(2, reporter.checkpoints().len());
}

#[test]
fn evaluation_happens_once() {
    let reporter = Collecting::new();
    let f = recorded_history();

    let verdict = f
        .check_called()
        .exactly(12)
        .reporter(reporter.clone())
        .evaluate();

    assert!(verdict.passed());
    assert_eq!(1, reporter.outcomes().len());
}

#[test]
fn checkpoint_precedes_the_outcome() {
    let reporter = Collecting::new();
    let f = recorded_history();

    let assertion = f.check_called().at_least(1).reporter(reporter.clone());
    assert!(reporter.checkpoints().is_empty());

    assertion.evaluate();
    assert_eq!(1, reporter.checkpoints().len());
    assert_eq!(reporter.checkpoints()[0], reporter.last().location);
}

#[test]
fn explicit_location_names_the_function() {
    let reporter = Collecting::new();
    let f = recorded_history();

    f.check(location!()).exactly(12).reporter(reporter.clone());

    let location = reporter.last().location;
    assert!(
        location
            .function
            .unwrap()
            .ends_with("explicit_location_names_the_function"),
        "{location}"
    );
    assert_eq!(file!(), location.file);
}

#[test]
fn require_passes_quietly() {
    let reporter = Collecting::new();
    let f = recorded_history();

    f.require_called()
        .with((1, "foo"))
        .exactly(2)
        .reporter(reporter.clone());

    let outcome = reporter.last();
    assert!(outcome.passed);
    assert_eq!(Severity::Require, outcome.severity);
}

#[test]
#[should_panic(
    expected = "Assertion failed: f: check_called().with((7, \"bar\")).exactly(3): expected exactly 3 calls, but 9 calls matched"
)]
fn require_panics_on_failure() {
    let f = recorded_history();
    f.require_called().with((7, "bar")).exactly(3);
}

#[test]
fn require_reports_before_panicking() {
    let reporter = Collecting::new();
    let f = recorded_history();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        f.require(location!())
            .never()
            .reporter(reporter.clone() as Arc<dyn Reporter>)
            .evaluate()
    }));

    assert!(result.is_err());
    let outcome = reporter.last();
    assert!(!outcome.passed);
    assert_eq!(Severity::Require, outcome.severity);
}

#[test]
fn placeholders_count_and_match_owned_patterns() {
    struct Connection(u32);

    let f = mock_function!(fn(Connection, i32));
    let connection = Connection(5);
    f.call((&connection, &1));
    f.call((&connection, &1));

    assert_eq!(5, connection.0);
    assert_eq!(f.at(0), f.at(1));
    assert!(f.check_called().exactly(2).evaluate().passed());
    assert!(f
        .check_called()
        .with((Connection(0), 1))
        .exactly(2)
        .evaluate()
        .passed());
    assert!(f
        .check_called()
        .with((Connection(0), 2))
        .never()
        .evaluate()
        .passed());
}
