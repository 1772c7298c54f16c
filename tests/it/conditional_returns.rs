use callmock::*;

fn lookup() -> MockFunction<(i32, String), i32> {
    MockFunction::new().named("lookup")
}

fn call(f: &MockFunction<(i32, String), i32>, a: i32, b: &str) -> i32 {
    f.call((&a, &b.to_string()))
}

#[test]
fn first_matching_conditional_wins_over_default() {
    let f = lookup();
    f.returns(0);
    f.when((1, "x".to_string())).returns(1);
    f.when((2, "y".to_string())).returns(2);

    assert_eq!(1, call(&f, 1, "x"));
    assert_eq!(2, call(&f, 2, "y"));
    assert_eq!(0, call(&f, 3, "z"));
}

#[test]
fn registration_order_decides_between_overlapping_conditionals() {
    let f = lookup();
    f.returns(0);
    f.when_fn(|(a, _)| a.value() == Some(&7)).returns(1);
    f.when((7, "bar".to_string())).returns(2);

    assert_eq!(1, call(&f, 7, "bar"));
    assert_eq!(1, call(&f, 7, "foo"));
    assert_eq!(0, call(&f, 8, "bar"));
}

#[test]
fn conditionals_do_not_touch_the_default() {
    let f = lookup();
    f.when((1, "x".to_string())).returns(1);

    assert_eq!(1, call(&f, 1, "x"));
    assert!(matches!(
        f.try_call((&2, &"x".to_string())),
        Err(MockError::NoReturnConfigured { .. })
    ));

    f.returns(9);
    assert_eq!(1, call(&f, 1, "x"));
    assert_eq!(9, call(&f, 2, "x"));
}

#[test]
fn conditional_action_and_panic() {
    let f = lookup();
    f.returns(0);
    f.when((1, "x".to_string())).action(|| 40 + 2);
    f.when((2, "x".to_string())).panics("two is not allowed");

    assert_eq!(42, call(&f, 1, "x"));
    let error = f.try_call((&2, &"x".to_string())).unwrap_err();
    assert_eq!(
        "lookup(2, \"x\"): Explicit panic: two is not allowed",
        error.to_string()
    );
}

#[test]
fn calls_are_recorded_even_when_the_answer_fails() {
    let f = lookup();
    f.panics("always");

    assert!(f.try_call((&1, &"x".to_string())).is_err());
    assert_eq!(1, f.call_count());
}

#[test]
fn clear_returns_removes_conditionals() {
    let f = lookup();
    f.when((1, "x".to_string())).returns(1);
    f.clear_returns();
    f.returns(0);

    assert_eq!(0, call(&f, 1, "x"));
}
