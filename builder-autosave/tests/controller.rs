//! Timing tests for the auto-save controller.
//!
//! All tests run on a paused Tokio clock, so debounce and backoff delays
//! are observed exactly without real waiting.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use builder_autosave::{
    attach_store, saver_fn, AutoSaveConfig, AutoSaveController, AutoSaveHandle, FlushOutcome,
    SaveError, SaveResult, SaveStatus, Saver,
};
use builder_core::{CanvasStore, ComponentNode, ComponentType};
use futures::FutureExt;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};

#[derive(Debug, Clone)]
enum Outcome {
    Ok,
    Fail,
    Reject(u16),
}

/// Scripted saver that records every call with its offset from test start.
#[derive(Clone)]
struct Recorder {
    start: Instant,
    latency: Duration,
    fail_always: bool,
    script: Arc<Mutex<VecDeque<Outcome>>>,
    calls: Arc<Mutex<Vec<(Duration, String)>>>,
    completed: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            latency: Duration::ZERO,
            fail_always: false,
            script: Arc::default(),
            calls: Arc::default(),
            completed: Arc::default(),
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn failing(mut self) -> Self {
        self.fail_always = true;
        self
    }

    fn with_script(self, outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        self.script.lock().unwrap().extend(outcomes);
        self
    }

    fn saver(&self) -> impl Saver<String> {
        let rec = self.clone();
        saver_fn(move |snapshot: String, _cancel| {
            let rec = rec.clone();
            async move {
                rec.calls
                    .lock()
                    .unwrap()
                    .push((rec.start.elapsed(), snapshot.clone()));
                if !rec.latency.is_zero() {
                    sleep(rec.latency).await;
                }
                let outcome = if rec.fail_always {
                    Outcome::Fail
                } else {
                    rec.script.lock().unwrap().pop_front().unwrap_or(Outcome::Ok)
                };
                match outcome {
                    Outcome::Ok => {
                        rec.completed.lock().unwrap().push(snapshot);
                        Ok(())
                    }
                    Outcome::Fail => Err(SaveError::Failed("backend unavailable".into())),
                    Outcome::Reject(status) => Err(SaveError::Rejected {
                        status,
                        body: "nope".into(),
                    }),
                }
            }
            .boxed()
        })
    }

    fn snapshots(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, s)| s.clone()).collect()
    }

    fn offsets_ms(&self) -> Vec<u128> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(at, _)| at.as_millis())
            .collect()
    }

    fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
struct HookLog {
    statuses: Arc<Mutex<Vec<SaveStatus>>>,
    starts: Arc<AtomicUsize>,
    successes: Arc<AtomicUsize>,
    errors: Arc<AtomicUsize>,
}

impl HookLog {
    fn statuses(&self) -> Vec<SaveStatus> {
        self.statuses.lock().unwrap().clone()
    }
}

fn spawn_with(rec: &Recorder, config: AutoSaveConfig, log: &HookLog) -> AutoSaveHandle<String> {
    let statuses = Arc::clone(&log.statuses);
    let starts = Arc::clone(&log.starts);
    let successes = Arc::clone(&log.successes);
    let errors = Arc::clone(&log.errors);
    AutoSaveController::new(rec.saver(), String::new())
        .with_config(config)
        .on_status_change(move |status| statuses.lock().unwrap().push(status))
        .on_save_start(move || {
            starts.fetch_add(1, Ordering::SeqCst);
        })
        .on_save_success(move |_| {
            successes.fetch_add(1, Ordering::SeqCst);
        })
        .on_save_error(move |_| {
            errors.fetch_add(1, Ordering::SeqCst);
        })
        .spawn()
}

fn spawn(rec: &Recorder) -> AutoSaveHandle<String> {
    spawn_with(rec, AutoSaveConfig::default(), &HookLog::default())
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ===========================================================================
// Debounce
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn rapid_changes_coalesce_into_one_save() {
    let rec = Recorder::new();
    let handle = spawn(&rec);

    for text in ["a", "ab", "abc"] {
        handle.notify_change(text.to_string()).unwrap();
        sleep(ms(300)).await;
    }
    sleep(ms(1500)).await;

    assert_eq!(rec.snapshots(), vec!["abc"]);
    assert_eq!(rec.offsets_ms(), vec![1600]);

    let state = handle.state();
    assert_eq!(state.status, SaveStatus::Saved);
    assert_eq!(state.save_count, 1);
    assert!(state.last_saved_at.is_some());
    assert!(!state.has_unsaved_changes);

    sleep(ms(3000)).await;
    assert_eq!(handle.status(), SaveStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn reverting_to_saved_snapshot_skips_save() {
    let rec = Recorder::new();
    let handle = spawn(&rec);

    handle.notify_change(String::new()).unwrap();
    handle.notify_change("draft".into()).unwrap();
    sleep(ms(100)).await;
    assert!(handle.state().has_unsaved_changes);
    handle.notify_change(String::new()).unwrap();
    sleep(ms(5000)).await;

    assert!(rec.snapshots().is_empty());
    let state = handle.state();
    assert_eq!(state.status, SaveStatus::Idle);
    assert!(!state.has_unsaved_changes);
}

#[tokio::test(start_paused = true)]
async fn change_after_save_schedules_another() {
    let rec = Recorder::new();
    let handle = spawn(&rec);

    handle.notify_change("one".into()).unwrap();
    sleep(ms(1500)).await;
    handle.notify_change("two".into()).unwrap();
    sleep(ms(1500)).await;

    assert_eq!(rec.snapshots(), vec!["one", "two"]);
    assert_eq!(rec.offsets_ms(), vec![1000, 2500]);
    assert_eq!(handle.state().save_count, 2);
}

// ===========================================================================
// Retry and backoff
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn failures_back_off_exponentially_then_give_up() {
    let rec = Recorder::new().failing();
    let log = HookLog::default();
    let handle = spawn_with(&rec, AutoSaveConfig::default(), &log);

    handle.notify_change("x".into()).unwrap();

    sleep(ms(1500)).await;
    let state = handle.state();
    assert_eq!(state.status, SaveStatus::Retrying);
    assert_eq!(state.retry_count, 1);
    assert_eq!(state.error.as_deref(), Some("save failed: backend unavailable"));

    sleep(ms(1000)).await;
    assert_eq!(handle.state().retry_count, 2);

    sleep(ms(20_000)).await;
    assert_eq!(rec.offsets_ms(), vec![1000, 2000, 4000, 8000]);
    assert_eq!(rec.snapshots(), vec!["x"; 4]);

    let state = handle.state();
    assert_eq!(state.status, SaveStatus::Error);
    assert_eq!(state.retry_count, 0);
    assert!(state.error.is_some());
    assert!(state.has_unsaved_changes);
    assert_eq!(log.errors.load(Ordering::SeqCst), 1);
    assert_eq!(log.starts.load(Ordering::SeqCst), 1);
    assert_eq!(
        log.statuses(),
        vec![
            SaveStatus::Saving,
            SaveStatus::Retrying,
            SaveStatus::Saving,
            SaveStatus::Retrying,
            SaveStatus::Saving,
            SaveStatus::Retrying,
            SaveStatus::Saving,
            SaveStatus::Error,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn retry_recovers_and_resets_counter() {
    let rec = Recorder::new().with_script([Outcome::Fail, Outcome::Fail, Outcome::Ok]);
    let log = HookLog::default();
    let handle = spawn_with(&rec, AutoSaveConfig::default(), &log);

    handle.notify_change("x".into()).unwrap();
    sleep(ms(5000)).await;

    assert_eq!(rec.offsets_ms(), vec![1000, 2000, 4000]);
    let state = handle.state();
    assert_eq!(state.status, SaveStatus::Saved);
    assert_eq!(state.retry_count, 0);
    assert_eq!(state.error, None);
    assert_eq!(state.save_count, 1);
    assert_eq!(log.successes.load(Ordering::SeqCst), 1);
    assert_eq!(log.errors.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn permanent_rejection_is_not_retried() {
    let rec = Recorder::new().with_script([Outcome::Reject(404)]);
    let log = HookLog::default();
    let handle = spawn_with(&rec, AutoSaveConfig::default(), &log);

    handle.notify_change("x".into()).unwrap();
    sleep(ms(10_000)).await;

    assert_eq!(rec.offsets_ms(), vec![1000]);
    assert_eq!(handle.status(), SaveStatus::Error);
    assert_eq!(log.errors.load(Ordering::SeqCst), 1);
}

// ===========================================================================
// Cancellation
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn newer_change_supersedes_in_flight_save() {
    let rec = Recorder::new().with_latency(ms(5000));
    let log = HookLog::default();
    let handle = spawn_with(&rec, AutoSaveConfig::default(), &log);

    handle.notify_change("a".into()).unwrap();
    sleep(ms(2000)).await;
    handle.notify_change("b".into()).unwrap();
    sleep(ms(10_000)).await;

    assert_eq!(rec.snapshots(), vec!["a", "b"]);
    assert_eq!(rec.completed(), vec!["b"]);
    assert_eq!(log.successes.load(Ordering::SeqCst), 1);
    assert_eq!(log.errors.load(Ordering::SeqCst), 0);
    assert_eq!(handle.state().save_count, 1);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_in_flight_save() {
    let rec = Recorder::new().with_latency(ms(5000));
    let handle = spawn(&rec);

    handle.notify_change("a".into()).unwrap();
    sleep(ms(1500)).await;
    handle.shutdown().await;
    sleep(ms(10_000)).await;

    assert_eq!(rec.snapshots(), vec!["a"]);
    assert!(rec.completed().is_empty());
    assert!(matches!(
        handle.notify_change("b".into()),
        Err(SaveError::Stopped)
    ));
    assert_eq!(handle.flush().await, FlushOutcome::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn revert_during_in_flight_save_persists_reverted_snapshot() {
    let rec = Recorder::new().with_latency(ms(5000));
    let handle = spawn(&rec);

    handle.notify_change("b".into()).unwrap();
    sleep(ms(1100)).await;
    handle.notify_change(String::new()).unwrap();
    sleep(ms(20_000)).await;

    assert_eq!(rec.snapshots(), vec!["b", ""]);
    assert_eq!(rec.offsets_ms(), vec![1000, 2100]);
    assert_eq!(rec.completed().last().map(String::as_str), Some(""));
    let state = handle.state();
    assert!(!state.has_unsaved_changes);
    assert_eq!(state.save_count, 1);
}

#[tokio::test(start_paused = true)]
async fn flush_after_revert_replaces_in_flight_save() {
    let rec = Recorder::new().with_latency(ms(500));
    let handle = spawn(&rec);

    handle.notify_change("b".into()).unwrap();
    sleep(ms(1100)).await;
    handle.notify_change(String::new()).unwrap();
    assert_eq!(handle.flush().await, FlushOutcome::Saved);

    assert_eq!(rec.snapshots(), vec!["b", ""]);
    assert_eq!(rec.completed(), vec![""]);
    assert!(!handle.state().has_unsaved_changes);
}

// ===========================================================================
// Connectivity
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn offline_changes_save_once_on_reconnect() {
    let rec = Recorder::new();
    let handle = spawn(&rec);

    handle.set_online(false).unwrap();
    handle.notify_change("a".into()).unwrap();
    handle.notify_change("b".into()).unwrap();
    sleep(ms(5000)).await;

    assert!(rec.snapshots().is_empty());
    let state = handle.state();
    assert_eq!(state.status, SaveStatus::Offline);
    assert!(!state.is_online);
    assert!(state.has_unsaved_changes);

    handle.set_online(true).unwrap();
    sleep(ms(10)).await;

    assert_eq!(rec.snapshots(), vec!["b"]);
    assert_eq!(rec.offsets_ms(), vec![5000]);
    assert_eq!(handle.status(), SaveStatus::Saved);
}

#[tokio::test(start_paused = true)]
async fn going_offline_cancels_in_flight_save() {
    let rec = Recorder::new().with_latency(ms(2000));
    let log = HookLog::default();
    let handle = spawn_with(&rec, AutoSaveConfig::default(), &log);

    handle.notify_change("a".into()).unwrap();
    sleep(ms(1500)).await;
    handle.set_online(false).unwrap();
    sleep(ms(10_000)).await;

    assert!(rec.completed().is_empty());
    assert_eq!(handle.status(), SaveStatus::Offline);
    assert_eq!(log.errors.load(Ordering::SeqCst), 0);

    handle.set_online(true).unwrap();
    sleep(ms(3000)).await;
    assert_eq!(rec.completed(), vec!["a"]);
}

#[tokio::test(start_paused = true)]
async fn reconnect_without_changes_returns_to_idle() {
    let rec = Recorder::new();
    let handle = spawn(&rec);

    handle.set_online(false).unwrap();
    sleep(ms(10)).await;
    handle.set_online(true).unwrap();
    sleep(ms(5000)).await;

    assert!(rec.snapshots().is_empty());
    assert_eq!(handle.status(), SaveStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn follows_connectivity_signal() {
    let rec = Recorder::new();
    let handle = spawn(&rec);
    let (online_tx, online_rx) = watch::channel(true);
    let _forwarder = handle.follow_connectivity(online_rx);

    online_tx.send(false).unwrap();
    sleep(ms(10)).await;
    assert_eq!(handle.status(), SaveStatus::Offline);

    online_tx.send(true).unwrap();
    sleep(ms(10)).await;
    assert_eq!(handle.status(), SaveStatus::Idle);
    assert!(handle.state().is_online);
}

// ===========================================================================
// Manual control
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn save_now_bypasses_debounce_and_unchanged_check() {
    let rec = Recorder::new();
    let handle = spawn(&rec);

    handle.save_now().unwrap();
    sleep(ms(10)).await;

    assert_eq!(rec.snapshots(), vec![""]);
    assert_eq!(rec.offsets_ms(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn save_now_then_flush_pushes_unchanged_baseline() {
    let rec = Recorder::new();
    let handle = spawn(&rec);

    handle.save_now().unwrap();
    assert_eq!(handle.flush().await, FlushOutcome::Saved);
    assert_eq!(rec.completed(), vec![""]);
}

#[tokio::test(start_paused = true)]
async fn flush_saves_pending_change_immediately() {
    let rec = Recorder::new();
    let handle = spawn(&rec);

    handle.notify_change("a".into()).unwrap();
    assert_eq!(handle.flush().await, FlushOutcome::Saved);
    assert_eq!(rec.offsets_ms(), vec![0]);

    assert_eq!(handle.flush().await, FlushOutcome::NothingToSave);
    sleep(ms(5000)).await;
    assert_eq!(rec.snapshots(), vec!["a"]);
}

#[tokio::test(start_paused = true)]
async fn flush_reports_exhausted_retries() {
    let rec = Recorder::new().failing();
    let config = AutoSaveConfig::default()
        .with_max_retries(1)
        .with_retry_delay_ms(100);
    let handle = spawn_with(&rec, config, &HookLog::default());

    handle.notify_change("a".into()).unwrap();
    let outcome = handle.flush().await;

    assert_eq!(
        outcome,
        FlushOutcome::Failed("save failed: backend unavailable".into())
    );
    assert_eq!(rec.offsets_ms(), vec![0, 100]);
}

#[tokio::test(start_paused = true)]
async fn disabled_controller_tracks_but_never_saves() {
    let rec = Recorder::new();
    let config = AutoSaveConfig::default().with_enabled(false);
    let handle = spawn_with(&rec, config, &HookLog::default());

    handle.notify_change("a".into()).unwrap();
    handle.save_now().unwrap();
    sleep(ms(5000)).await;

    assert!(rec.snapshots().is_empty());
    assert!(handle.state().has_unsaved_changes);
    assert_eq!(handle.flush().await, FlushOutcome::Disabled);

    handle.set_enabled(true).unwrap();
    sleep(ms(1500)).await;
    assert_eq!(rec.snapshots(), vec!["a"]);
}

#[tokio::test(start_paused = true)]
async fn mark_saved_resets_baseline() {
    let rec = Recorder::new();
    let handle = spawn(&rec);

    handle.notify_change("loaded".into()).unwrap();
    sleep(ms(100)).await;
    handle.mark_saved("loaded".into()).unwrap();
    sleep(ms(5000)).await;

    assert!(rec.snapshots().is_empty());
    assert!(!handle.state().has_unsaved_changes);
}

// ===========================================================================
// Store bridge
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn store_mutations_reach_the_saver() {
    let saved: Arc<Mutex<Vec<Vec<ComponentNode>>>> = Arc::default();
    let sink = Arc::clone(&saved);
    let saver = saver_fn(move |snapshot: Vec<ComponentNode>, _cancel| {
        let sink = Arc::clone(&sink);
        async move {
            sink.lock().unwrap().push(snapshot);
            SaveResult::Ok(())
        }
        .boxed()
    });

    let mut store = CanvasStore::new();
    let handle = AutoSaveController::new(saver, store.components().to_vec()).spawn();
    attach_store(&mut store, &handle);

    store.add_component(ComponentType::Section, None).unwrap();
    store.add_component(ComponentType::Text, None).unwrap();
    sleep(ms(1500)).await;

    {
        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].as_slice(), store.components());
    }

    // Selection alone is not a content change.
    store.select_component(None);
    sleep(ms(1500)).await;
    assert_eq!(saved.lock().unwrap().len(), 1);

    // Hydrating from the server must not echo the page back.
    store
        .load_components(vec![ComponentNode::new(ComponentType::Card)])
        .unwrap();
    sleep(ms(5000)).await;
    assert_eq!(saved.lock().unwrap().len(), 1);

    store.undo();
    sleep(ms(1500)).await;
    assert_eq!(saved.lock().unwrap().len(), 1);
    assert_eq!(handle.state().save_count, 1);
}
