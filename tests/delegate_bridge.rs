mod common;

use common::{
    CounterAction, CounterDelegate, CounterFeature, CounterState, ModuleFeature, ModuleState,
};
use composable_ribs::{extract_case, ActionObservingReducer, ActionRelay, LifecycleInteractor, Store};
use parking_lot::Mutex;
use std::sync::Arc;

#[test]
fn test_relay_wired_interactor_observes_delegate_case() {
    let relay = ActionRelay::new();
    let store = Store::new(
        CounterState::default(),
        ActionObservingReducer::relaying(CounterFeature, relay.clone()),
    );
    let interactor = LifecycleInteractor::with_relay(store, relay);

    let observed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&observed);
    let token = interactor.observe_action(extract_case!(CounterAction::Delegate), move |event| {
        sink.lock().push(event);
    });
    assert!(token.is_some());

    interactor.store().send(CounterAction::IncrementTapped);
    if let Some(token) = token {
        interactor.remove_action_observer(token);
    }
    interactor.store().send(CounterAction::IncrementTapped);

    assert_eq!(*observed.lock(), vec![CounterDelegate::Incremented(1)]);
}

#[test]
fn test_from_reducer_wires_action_observation() {
    let interactor = LifecycleInteractor::from_reducer(CounterState::default(), CounterFeature);

    let observed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&observed);
    let token = interactor.observe_delegate_events(move |event| sink.lock().push(event));
    assert!(token.is_some());

    interactor.store().send(CounterAction::IncrementTapped);
    interactor.store().send(CounterAction::CloseTapped);

    assert_eq!(
        *observed.lock(),
        vec![CounterDelegate::Incremented(1), CounterDelegate::CloseRequested]
    );
}

#[test]
fn test_interactor_without_relay_observes_nothing() {
    let store = Store::new(ModuleState::default(), ModuleFeature);
    let interactor = LifecycleInteractor::new(store);

    let token = interactor.observe_actions(|_| panic!("observed without a relay"));
    interactor.store().send(common::ModuleAction::Noop);

    assert!(token.is_none());
}

#[test]
fn test_observer_removal_is_idempotent() {
    let interactor = LifecycleInteractor::from_reducer(CounterState::default(), CounterFeature);
    let token = interactor
        .observe_actions(|_| {})
        .expect("relay-backed interactor returns a token");

    interactor.remove_action_observer(token);
    interactor.remove_action_observer(token);
    interactor.store().send(CounterAction::IncrementTapped);
}
