//! Property tests for the coordinator's stack/history protocol

use history_modals::{
    HistoryPayload, ModalCoordinator, ModalRequest, NavigationHistory, SessionHistory,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Op {
    Open(String),
    Close(String),
    Back,
}

fn modal_id() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => modal_id().prop_map(Op::Open),
        1 => modal_id().prop_map(Op::Close),
        2 => Just(Op::Back),
    ]
}

/// Plain Vec model of the expected stack
fn apply(model: &mut Vec<String>, op: &Op) {
    match op {
        Op::Open(id) => model.push(id.clone()),
        Op::Close(id) => model.retain(|m| m != id),
        Op::Back => {
            model.pop();
        }
    }
}

fn run(coordinator: &ModalCoordinator, op: &Op) {
    match op {
        Op::Open(id) => coordinator.open_modal(id.as_str()),
        Op::Close(id) => coordinator.close_modal(id),
        Op::Back => coordinator.navigate_back(&HistoryPayload::empty()),
    }
}

fn ids(coordinator: &ModalCoordinator) -> Vec<String> {
    coordinator
        .active_modals()
        .iter()
        .map(|m| m.id.clone())
        .collect()
}

proptest! {
    #[test]
    fn distinct_opens_keep_call_order(count in 0usize..16) {
        let coordinator = ModalCoordinator::headless();
        let expected: Vec<String> = (0..count).map(|i| format!("modal-{i}")).collect();
        for id in &expected {
            coordinator.open_modal(id.as_str());
        }
        prop_assert_eq!(ids(&coordinator), expected);
    }

    #[test]
    fn stack_matches_model(ops in prop::collection::vec(op(), 0..40)) {
        let coordinator = ModalCoordinator::headless();
        let mut model = Vec::new();
        for op in &ops {
            run(&coordinator, op);
            apply(&mut model, op);
            prop_assert_eq!(ids(&coordinator), model.clone());
        }
    }

    #[test]
    fn checker_is_none_after_close(ops in prop::collection::vec(op(), 0..30), id in modal_id()) {
        let coordinator = ModalCoordinator::headless();
        for op in &ops {
            run(&coordinator, op);
        }
        coordinator.close_modal(&id);
        prop_assert!(coordinator.open_modal_checker(&id).is_none());

        // Closing again changes nothing.
        let before = ids(&coordinator);
        coordinator.close_modal(&id);
        prop_assert_eq!(ids(&coordinator), before);
    }

    #[test]
    fn checker_finds_first_open(ops in prop::collection::vec(op(), 0..30), id in modal_id()) {
        let coordinator = ModalCoordinator::headless();
        let mut model = Vec::new();
        for op in &ops {
            run(&coordinator, op);
            apply(&mut model, op);
        }
        let found = coordinator.open_modal_checker(&id).map(|m| m.id);
        let expected = model.iter().find(|m| **m == id).cloned();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn back_removes_exactly_the_top(ops in prop::collection::vec(op(), 0..30)) {
        let coordinator = ModalCoordinator::headless();
        for op in &ops {
            run(&coordinator, op);
        }
        let mut expected = ids(&coordinator);
        expected.pop();

        coordinator.navigate_back(&HistoryPayload::modal("ignored", Default::default()));
        prop_assert_eq!(ids(&coordinator), expected);
    }

    #[test]
    fn session_history_matches_headless(ops in prop::collection::vec(op(), 0..40)) {
        let history = Rc::new(SessionHistory::new());
        let with_history = ModalCoordinator::new(history.clone());
        let headless = ModalCoordinator::headless();

        for op in &ops {
            match op {
                // Drive back through the host when it has somewhere to go.
                Op::Back if history.can_go_back() => {
                    history.back();
                }
                other => run(&with_history, other),
            }
            run(&headless, op);
            prop_assert_eq!(ids(&with_history), ids(&headless));
        }
    }

    #[test]
    fn depth_never_exceeds_entries_behind_cursor(ops in prop::collection::vec(op(), 0..40)) {
        let history = Rc::new(SessionHistory::new());
        let coordinator = ModalCoordinator::new(history.clone());

        for op in &ops {
            match op {
                Op::Open(id) => coordinator.open_modal(ModalRequest::new(id.as_str())),
                Op::Close(id) => coordinator.close_modal(id),
                Op::Back => {
                    history.back();
                }
            }
            // Entry 0 is the page itself; every modal needs one synthetic
            // entry at or behind the cursor.
            prop_assert!(coordinator.depth() <= history.cursor());
        }
    }
}

#[test]
fn scenario_open_two_then_back_three_times() {
    let history = Rc::new(SessionHistory::new());
    let coordinator = ModalCoordinator::new(history.clone());

    coordinator.open_modal("A");
    coordinator.open_modal("B");
    assert_eq!(ids(&coordinator), vec!["A", "B"]);

    history.back();
    assert_eq!(ids(&coordinator), vec!["A"]);
    history.back();
    assert!(ids(&coordinator).is_empty());

    // The host has nowhere left to go; deliver the signal directly.
    coordinator.navigate_back(&HistoryPayload::empty());
    assert!(ids(&coordinator).is_empty());
}

#[test]
fn scenario_duplicate_ids_close_together() {
    let coordinator = ModalCoordinator::headless();
    coordinator.open_modal("A");
    coordinator.open_modal("A");
    assert_eq!(coordinator.depth(), 2);

    coordinator.close_modal("A");
    assert_eq!(coordinator.depth(), 0);
}

#[test]
fn scenario_open_with_data_from_json() {
    let coordinator = ModalCoordinator::headless();
    let request = ModalRequest::from_json(serde_json::json!({ "modalId": "A", "x": 1 })).unwrap();
    coordinator.open_modal(request);

    let found = coordinator.open_modal_checker("A").unwrap();
    assert_eq!(found.data.get("x"), Some(&serde_json::json!(1)));

    coordinator.close_modal("A");
    assert!(coordinator.open_modal_checker("A").is_none());
}

#[test]
fn history_provider_sees_one_push_per_open() {
    let history = Rc::new(SessionHistory::new());
    let coordinator = ModalCoordinator::new(history.clone());
    for id in ["a", "b", "a"] {
        coordinator.open_modal(id);
    }
    assert_eq!(history.len(), 4);
    assert!(history.is_available());
}
