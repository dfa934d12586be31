use crate::fixture::{calculator, worker};
use proxymock::it;

#[test]
fn test_add_scenario() {
    let mock = calculator();
    let calc = mock.object();
    calc.add(0, "x".to_string(), true);
    calc.add(1, "y".to_string(), false);
    calc.add(2, "z".to_string(), true);

    assert_eq!(
        mock.call_count(|c| c.add(it::is_any(), it::is_any(), true))
            .unwrap(),
        2
    );

    let params = mock
        .call_parameters(|c| c.add(it::is_any(), it::is_any(), it::is_any()), 1)
        .unwrap();
    assert_eq!(params.len(), 3);
    assert_eq!(params.get::<i32>(0), Some(&1));
    assert_eq!(params.get::<String>(1).map(String::as_str), Some("y"));
    assert_eq!(params.get::<bool>(2), Some(&false));
}

#[test]
fn test_call_parameters_follow_recording_order() {
    let mock = worker();
    for i in 0..6 {
        mock.object().do_something_stringy(i);
    }

    for (k, expected) in [1, 3, 5].into_iter().enumerate() {
        let params = mock
            .call_parameters(|w| w.do_something_stringy(it::is(|a: &i32| *a % 2 == 1)), k)
            .unwrap();
        assert_eq!(params.get::<i32>(0), Some(&expected));
    }
}

#[test]
fn test_call_count_with_literals_and_predicates() {
    let mock = worker();
    let worker = mock.object();
    worker.do_something(1, "Hello".to_string(), true);
    worker.do_something(1, "World".to_string(), true);
    worker.do_something(2, "Hello".to_string(), false);

    assert_eq!(
        mock.call_count(|w| w.do_something(1, it::is_any(), it::is_any()))
            .unwrap(),
        2
    );
    assert_eq!(
        mock.call_count(|w| w.do_something(it::is_any(), "Hello", it::is_any()))
            .unwrap(),
        2
    );
    assert_eq!(
        mock.call_count(|w| w.do_something(1, "Hello", true)).unwrap(),
        1
    );
    assert_eq!(
        mock.call_count(|w| w.do_something(3, it::is_any(), it::is_any()))
            .unwrap(),
        0
    );
}

#[test]
fn test_members_with_same_arguments_are_counted_separately() {
    let mock = worker();
    mock.object().do_something_stringy(1);
    mock.object().notify("1".to_string());
    mock.object().height();

    assert_eq!(
        mock.call_count(|w| w.do_something_stringy(it::is_any()))
            .unwrap(),
        1
    );
    assert_eq!(mock.call_count(|w| w.notify(it::is_any())).unwrap(), 1);
    assert_eq!(mock.call_count(|w| w.height()).unwrap(), 1);
    assert_eq!(mock.call_count(|w| w.label()).unwrap(), 0);
}

#[test]
fn test_calls_are_recorded_even_when_a_setup_answers() {
    let mock = worker();
    mock.setup(|w| w.is_ready()).unwrap().returns(true);
    mock.object().is_ready();
    mock.object().is_ready();

    assert_eq!(mock.call_count(|w| w.is_ready()).unwrap(), 2);
}
