// Unit tests for the state actor and the in-flight guard

use crate::state::{AppState, ShellView, StateCommand};

/// **VALUE**: Verifies updates are visible as soon as `update` returns.
///
/// **WHY THIS MATTERS**: The shell prints the view right after a command. If the
/// actor applied commands lazily, `:show` would show stale input.
#[tokio::test]
async fn given_update_when_awaited_then_view_reflects_it() {
    let state = AppState::new();

    state
        .update(StateCommand::SetInput("Ala ma kota".to_string()))
        .await
        .unwrap();
    state
        .update(StateCommand::SetResult("Ala ma kota.".to_string()))
        .await
        .unwrap();

    let view = state.view().await;
    assert_eq!(view.input, "Ala ma kota");
    assert_eq!(view.result.as_deref(), Some("Ala ma kota."));
}

#[tokio::test]
async fn given_previous_result_when_submission_begins_then_result_and_notice_discarded() {
    let state = AppState::new();
    state.update(StateCommand::SetInput("x".into())).await.unwrap();
    state.update(StateCommand::SetResult("y".into())).await.unwrap();
    state.update(StateCommand::SetNotice("old".into())).await.unwrap();

    state.update(StateCommand::BeginSubmission).await.unwrap();

    let view = state.view().await;
    assert_eq!(view.input, "x", "Input is kept for resubmission");
    assert!(view.result.is_none());
    assert!(view.notice.is_none());
}

#[tokio::test]
async fn given_populated_view_when_cleared_then_default() {
    let state = AppState::new();
    state.update(StateCommand::SetInput("x".into())).await.unwrap();
    state.update(StateCommand::SetNotice("n".into())).await.unwrap();

    state.update(StateCommand::Clear).await.unwrap();

    assert_eq!(state.view().await, ShellView::default());
}

/// **VALUE**: Verifies only one correction slot can be held at a time.
///
/// **BUG THIS CATCHES**: Would catch a check-then-set race (load + store) letting
/// two submissions in.
#[test]
fn given_slot_held_when_claiming_again_then_refused_until_released() {
    let state = AppState::new();
    assert!(!state.is_busy());

    let guard = state.try_begin_correction().expect("first claim succeeds");
    assert!(state.is_busy());
    assert!(state.try_begin_correction().is_none(), "second claim refused");

    // Clones share the flag
    assert!(state.clone().try_begin_correction().is_none());

    drop(guard);
    assert!(!state.is_busy(), "Indicator cleared when the guard drops");
    assert!(state.try_begin_correction().is_some());
}

/// **VALUE**: Verifies concurrent writers don't deadlock the actor.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_concurrent_updates_when_executed_then_all_complete() {
    let state = AppState::new();

    let mut handles = Vec::new();
    for i in 0..20 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state.update(StateCommand::SetInput(format!("text {i}"))).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert!(state.view().await.input.starts_with("text "));
}
