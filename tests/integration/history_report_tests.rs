use crate::fixture::worker;
use proxymock::{HistoryReport, MemberKind};

#[test]
fn test_history_report_round_trip() {
    let mock = worker();
    mock.object().do_something(3, "three".to_string(), true);
    mock.object().set_height(12);
    mock.object().label();

    let report = mock.report();
    assert_eq!(report.contract, "Worker");
    assert_eq!(report.calls.len(), 3);
    assert_eq!(
        report.calls[0].arguments,
        vec!["3".to_string(), "\"three\"".to_string(), "true".to_string()]
    );
    assert_eq!(report.filter("height", Some(MemberKind::Setter)).len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("worker-history.json");
    report.write_json(&path).unwrap();

    let loaded = HistoryReport::load_json(&path).unwrap();
    assert_eq!(loaded, report);
}

#[test]
fn test_history_keeps_invocation_order() {
    let mock = worker();
    mock.object().notify("a".to_string());
    mock.object().height();
    mock.object().notify("b".to_string());

    let members: Vec<_> = mock
        .history()
        .iter()
        .map(|record| (record.sequence, record.member.name()))
        .collect();
    assert_eq!(members, vec![(0, "notify"), (1, "height"), (2, "notify")]);
}
