use anyhow::anyhow;

use super::HistoryProvider;
use super::HistoryStatus;
use crate::domain::models::Action;
use crate::domain::models::Field;
use crate::domain::models::HistoryEntry;
use crate::domain::services::FormulaComposer;

fn entries() -> Vec<HistoryEntry> {
    return vec![
        HistoryEntry::new("(A∧B)→C", "C"),
        HistoryEntry::new("p∨q", "p"),
    ];
}

#[test]
fn it_requests_history_exactly_once() {
    let mut history = HistoryProvider::default();

    match history.start(Some("token123")) {
        Some(Action::HistoryRequest(token)) => assert_eq!(token, "token123"),
        _ => panic!("Expected a history request"),
    }
    assert_eq!(history.status(), HistoryStatus::Loading);

    assert!(history.start(Some("token123")).is_none());
}

#[test]
fn it_does_not_request_without_a_token() {
    let mut history = HistoryProvider::default();

    assert!(history.start(None).is_none());
    assert_eq!(history.status(), HistoryStatus::NotRequested);
}

#[test]
fn it_keeps_server_order() {
    let mut history = HistoryProvider::default();
    history.start(Some("token"));
    history.handle_response(Ok(entries()));

    assert_eq!(history.status(), HistoryStatus::Loaded);
    assert_eq!(history.entries(), entries().as_slice());
}

#[test]
fn it_stays_empty_on_failure() {
    let mut history = HistoryProvider::default();
    history.start(Some("token"));
    history.handle_response(Err(anyhow!("connection refused")));

    assert_eq!(history.status(), HistoryStatus::Failed);
    assert!(history.entries().is_empty());
}

#[test]
fn it_replaces_the_draft_on_select() {
    let mut history = HistoryProvider::default();
    history.handle_response(Ok(entries()));

    let mut composer = FormulaComposer::default();
    composer.set_premise("¬(A∨B∨C∨D)");
    composer.set_conclusion("E→F");
    composer.record_focus(Field::Conclusion, 1, 3);

    assert!(history.select(1, &mut composer));
    assert_eq!(composer.premise(), "p∨q");
    assert_eq!(composer.conclusion(), "p");
    assert_eq!(composer.cursor(), (1, 1));
}

#[test]
fn it_ignores_out_of_range_selections() {
    let mut history = HistoryProvider::default();
    history.handle_response(Ok(entries()));

    let mut composer = FormulaComposer::default();
    composer.set_premise("A");

    assert!(!history.select(2, &mut composer));
    assert_eq!(composer.premise(), "A");
}
