mod common;

use common::{
    make_module_interactor, wait_until, CancellationProbe, ModuleAction, ModuleFeature,
    ModuleState,
};
use composable_ribs::{
    Interactable, LifecycleAction, LifecycleConfig, LifecycleError, LifecycleInteractor,
    ManagedTask,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_single_deactivate_cancels_three_managed_tasks() {
    let interactor = make_module_interactor(0);
    let probe = CancellationProbe::new();

    interactor.activate();
    for _ in 0..3 {
        interactor.manage(probe.spawn());
    }
    assert_eq!(interactor.managed_task_count(), 3);

    interactor.deactivate();

    assert_eq!(interactor.managed_task_count(), 0);
    assert!(wait_until(Duration::from_secs(2), || probe.cancelled_count() == 3).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_explicitly_cancelled_tasks_are_not_cancelled_again_on_deactivate() {
    let interactor = make_module_interactor(0);
    let probe = CancellationProbe::new();
    interactor.activate();

    let early: Vec<ManagedTask> = (0..2).map(|_| probe.spawn()).collect();
    for task in &early {
        interactor.manage(task.clone());
    }
    interactor.cancel_managed_tasks();
    assert_eq!(interactor.managed_task_count(), 0);
    assert!(early.iter().all(ManagedTask::is_cancelled));

    let late = probe.spawn();
    interactor.manage(late.clone());
    assert_eq!(interactor.managed_task_count(), 1);

    interactor.deactivate();

    assert_eq!(interactor.managed_task_count(), 0);
    assert!(wait_until(Duration::from_secs(2), || probe.cancelled_count() == 3).await);
    // Every handle was already cancelled exactly once by the interactor.
    for task in early.iter().chain(std::iter::once(&late)) {
        assert!(!task.cancel());
    }
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(probe.cancelled_count(), 3);
}

#[test]
fn test_every_lifecycle_call_bumps_its_counter() {
    let interactor = make_module_interactor(0);
    let calls = [true, true, false, true, false, false, false, true];

    let (mut activations, mut deactivations) = (0, 0);
    for activate in calls {
        if activate {
            interactor.activate();
            activations += 1;
        } else {
            interactor.deactivate();
            deactivations += 1;
        }
        let state = interactor.store().state();
        assert_eq!(state.activations, activations);
        assert_eq!(state.deactivations, deactivations);
        assert_eq!(state.is_active, activate);
    }
}

#[test]
fn test_lifecycle_events_reach_reducer_in_call_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let interactor = LifecycleInteractor::from_reducer(
        ModuleState::default(),
        composable_ribs::ActionObservingReducer::new(ModuleFeature, move |action| {
            if let ModuleAction::Lifecycle(event) = action {
                sink.lock().push(*event);
            }
        }),
    );

    interactor.deactivate();
    interactor.activate();
    interactor.deactivate();
    interactor.deactivate();

    assert_eq!(
        *seen.lock(),
        vec![
            LifecycleAction::WillResignActive,
            LifecycleAction::DidBecomeActive,
            LifecycleAction::WillResignActive,
            LifecycleAction::WillResignActive,
        ]
    );
    assert!(!interactor.store().state().is_active);
}

#[test]
fn test_cancel_managed_tasks_with_none_registered() {
    let interactor = make_module_interactor(0);
    interactor.cancel_managed_tasks();
    interactor.deactivate();
    assert_eq!(interactor.managed_task_count(), 0);
}

#[test]
fn test_manage_returns_same_handle() {
    let interactor = make_module_interactor(0);
    let task = ManagedTask::new();
    let returned = interactor.manage(task.clone());
    assert_eq!(returned.id(), task.id());

    interactor.deactivate();
    assert!(task.is_cancelled());
}

#[test]
fn test_finished_tasks_are_pruned_on_next_manage() {
    let interactor = make_module_interactor(0);
    let done = interactor.manage(ManagedTask::new());
    done.mark_finished();

    interactor.manage(ManagedTask::new());

    assert_eq!(interactor.managed_task_count(), 1);
    assert!(!done.is_cancelled());
}

#[tokio::test]
async fn test_spawn_managed_task_stops_on_deactivate() {
    let interactor = make_module_interactor(0);
    let ticks = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&ticks);

    interactor.activate();
    let task = interactor.spawn_managed(move |token| async move {
        while !token.is_cancelled() {
            *counter.lock() += 1;
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    interactor.deactivate();

    assert!(wait_until(Duration::from_secs(1), || task.is_finished()).await);
    assert!(*ticks.lock() > 0);
}

#[tokio::test]
async fn test_drain_timeout_reports_remaining_tasks() {
    let interactor = make_module_interactor(0);
    let probe = CancellationProbe::new();
    interactor.manage(probe.spawn());
    interactor.manage(ManagedTask::new());

    let config = LifecycleConfig {
        drain_timeout_ms: 50,
        drain_poll_interval_ms: 10,
    };
    let err = interactor
        .deactivate_and_drain(&config)
        .await
        .expect_err("detached handle never finishes");

    assert_eq!(
        err,
        LifecycleError::DrainTimeout {
            remaining: 1,
            timeout_ms: 50
        }
    );
    assert!(err.to_string().contains("1 managed task(s)"));
}
