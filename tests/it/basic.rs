use callmock::*;

#[test]
fn zero_argument_calls_are_recorded() {
    let tick = MockFunction::<(), ()>::new();

    assert!(!tick.has_calls());
    tick.call(());
    tick.call(());

    assert!(tick.has_calls());
    assert_eq!(2, tick.call_count());
    assert_eq!(tick.at(0), tick.at(1));
}

#[test]
fn identical_calls_produce_equal_captures() {
    let f = MockFunction::<(i32, String), ()>::new();
    let foo = "foo".to_string();

    f.call((&1, &foo));
    f.call((&1, &foo));

    assert_eq!(f.at(0), f.at(1));
    assert!(f
        .check_called()
        .with((1, "foo".to_string()))
        .exactly(2)
        .evaluate()
        .passed());
}

#[test]
fn history_is_kept_in_call_order() {
    let f = MockFunction::<(u32,), ()>::new();
    for i in 0..5 {
        f.call((&i,));
    }

    let recorded: Vec<u32> = f
        .iter()
        .map(|(arg,)| *arg.value().unwrap())
        .collect();
    assert_eq!(vec![0, 1, 2, 3, 4], recorded);

    let mut via_ref = vec![];
    for (arg,) in &f {
        via_ref.push(arg.into_value().unwrap());
    }
    assert_eq!(recorded, via_ref);
    assert_eq!(5, f.history().len());
}

#[test]
fn get_is_the_non_panicking_at() {
    let f = MockFunction::<(u8,), ()>::new();
    f.call((&3,));

    assert!(f.get(0).is_some());
    assert!(f.get(1).is_none());
}

#[test]
#[should_panic(expected = "mock_function: call index 1 out of range, 1 calls recorded")]
fn at_panics_out_of_range() {
    let f = MockFunction::<(u8,), ()>::new();
    f.call((&3,));
    f.at(1);
}

#[test]
fn returns_fixed_value() {
    let f = MockFunction::<(i32,), String>::new();
    f.returns("fixed");

    assert_eq!("fixed", f.call((&1,)));
    assert_eq!("fixed", f.call((&2,)));
}

#[test]
fn action_is_evaluated_each_call() {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    let counter = Arc::new(AtomicI32::new(0));
    let f = MockFunction::<(), i32>::new();
    f.action({
        let counter = counter.clone();
        move || counter.fetch_add(1, Ordering::SeqCst)
    });

    assert_eq!(0, f.call(()));
    assert_eq!(1, f.call(()));
    assert_eq!(2, counter.load(Ordering::SeqCst));
}

#[test]
fn latest_default_wins() {
    let f = MockFunction::<(), i32>::new();
    f.returns(1);
    f.action(|| 2);

    assert_eq!(2, f.call(()));
}

#[test]
fn clear_captures_keeps_returns() {
    let f = MockFunction::<(), i32>::new();
    f.returns(5);
    f.call(());

    f.clear_captures();

    assert_eq!(0, f.call_count());
    assert_eq!(5, f.call(()));
}

#[test]
fn clear_returns_keeps_history() {
    let f = MockFunction::<(i32,), i32>::new();
    f.returns(5);
    f.call((&1,));

    f.clear_returns();

    assert_eq!(1, f.call_count());
    assert!(matches!(
        f.try_call((&2,)),
        Err(MockError::NoReturnConfigured { .. })
    ));
    assert_eq!(2, f.call_count());
}

#[test]
fn clear_returns_reverts_unit_to_no_op() {
    let f = MockFunction::<(), ()>::new();
    f.panics("configured");
    f.clear_returns();

    f.call(());
}

#[test]
fn clear_resets_everything() {
    let f = MockFunction::<(), i32>::new();
    f.returns(5);
    f.call(());

    f.clear();

    assert_eq!(0, f.call_count());
    assert!(f.try_call(()).is_err());
}

#[test]
fn answers_may_call_back_into_the_mock() {
    use std::rc::Rc;

    let f = Rc::new(MockFunction::<(), usize>::new());
    f.action({
        let f = Rc::downgrade(&f);
        move || f.upgrade().map_or(0, |f| f.call_count())
    });

    assert_eq!(1, f.call(()));
    assert_eq!(2, f.call(()));
}

#[test]
fn single_threaded_types_can_be_arguments_and_answers() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let f = MockFunction::<(Rc<i32>,), Rc<i32>>::new();
    let fallback = Rc::new(0);
    let answer = Rc::new(10);
    f.returns(fallback.clone());
    f.when((Rc::new(1),)).returns(answer.clone());

    assert!(Rc::ptr_eq(&answer, &f.call((&Rc::new(1),))));
    assert!(Rc::ptr_eq(&fallback, &f.call((&Rc::new(2),))));
    assert!(f.check_called().with((Rc::new(1),)).once().evaluate().passed());

    let seen = Rc::new(RefCell::new(vec![]));
    let g = MockFunction::<(RefCell<u8>,), ()>::new();
    g.when_fn({
        let seen = seen.clone();
        move |(arg,)| {
            seen.borrow_mut().push(*arg.value().unwrap().borrow());
            false
        }
    })
    .panics("never chosen");

    g.call((&RefCell::new(3),));
    assert_eq!(vec![3], *seen.borrow());
}

#[test]
fn named_mocks_appear_in_messages() {
    let f = MockFunction::<(i32,), i32>::new().named("lookup");
    assert_eq!("lookup", f.name());

    let error = f.try_call((&4,)).unwrap_err();
    assert!(
        error.to_string().starts_with("lookup(4): No return value configured."),
        "{error}"
    );
}
