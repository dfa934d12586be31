use crate::fixture::{greeter, worker};
use proxymock::it;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_custom_predicate_setup() {
    let mock = greeter();
    mock.setup(|g| g.greet(it::is(|a: &i32| *a == 7)))
        .unwrap()
        .returns("hi".to_string());

    assert_eq!(mock.object().greet(7), "hi");
    assert_eq!(mock.object().greet(8), "");
}

#[test]
fn test_first_registered_match_wins() {
    let mock = worker();
    mock.setup(|w| w.do_something_stringy(it::is(|a: &i32| *a > 0)))
        .unwrap()
        .returns("positive".to_string());
    mock.setup(|w| w.do_something_stringy(it::is_any()))
        .unwrap()
        .returns("anything".to_string());
    mock.setup(|w| w.do_something_stringy(5))
        .unwrap()
        .returns("five".to_string());

    assert_eq!(mock.object().do_something_stringy(5), "positive");
    assert_eq!(mock.object().do_something_stringy(-5), "anything");
}

#[test]
fn test_setups_chain_across_members() {
    let mock = worker();
    mock.setup(|w| w.do_something(1, "one", true))
        .unwrap()
        .returns(-23)
        .setup(|w| w.do_something_stringy(it::is_any()))
        .unwrap()
        .returns("Goodbye".to_string())
        .setup(|w| w.find("key"))
        .unwrap()
        .returns(Some("value".to_string()))
        .setup(|w| w.is_ready())
        .unwrap()
        .returns(true);

    let worker = mock.object();
    assert_eq!(worker.do_something(1, "one".to_string(), true), -23);
    assert_eq!(worker.do_something(1, "one".to_string(), false), 0);
    assert_eq!(worker.do_something_stringy(42), "Goodbye");
    assert_eq!(worker.find("key".to_string()), Some("value".to_string()));
    assert_eq!(worker.find("other".to_string()), None);
    assert!(worker.is_ready());
}

#[test]
fn test_mixed_matchers_in_one_call() {
    let mock = worker();
    mock.setup(|w| {
        w.do_something(
            it::is_any(),
            it::is(|b: &String| b.starts_with("Param")),
            false,
        )
    })
    .unwrap()
    .returns(99);

    let worker = mock.object();
    assert_eq!(worker.do_something(3, "Param: 3".to_string(), false), 99);
    assert_eq!(worker.do_something(3, "Param: 3".to_string(), true), 0);
    assert_eq!(worker.do_something(3, "Hello".to_string(), false), 0);
}

#[test]
fn test_property_reads_can_be_configured() {
    let mock = worker();
    mock.setup(|w| w.height())
        .unwrap()
        .returns(180)
        .setup(|w| w.label())
        .unwrap()
        .returns("tall".to_string());

    assert_eq!(mock.object().height(), 180);
    assert_eq!(mock.object().label(), "tall");
}

#[test]
fn test_returns_with_computes_from_arguments() {
    let mock = worker();
    mock.setup(|w| w.do_something(it::is_any(), it::is_any(), it::is_any()))
        .unwrap()
        .returns_with(|args| {
            let a = args.get::<i32>(0).copied().unwrap_or_default();
            let b = args.get::<String>(1).map_or(0, |b| b.len() as i32);
            a + b
        });

    assert_eq!(mock.object().do_something(10, "four".to_string(), true), 14);
}

#[test]
fn test_producers_run_per_call() {
    let mock = greeter();
    let produced = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&produced);
    mock.setup(|g| g.greet(it::is_any()))
        .unwrap()
        .returns_with(move |_| format!("call {}", counter.fetch_add(1, Ordering::SeqCst)));

    assert_eq!(mock.object().greet(1), "call 0");
    assert_eq!(mock.object().greet(1), "call 1");
    assert_eq!(produced.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shared_handle_sees_setups() {
    let mock = greeter();
    let shared = mock.shared();
    mock.setup(|g| g.greet(1))
        .unwrap()
        .returns("late setup".to_string());

    assert_eq!(shared.greet(1), "late setup");
}
