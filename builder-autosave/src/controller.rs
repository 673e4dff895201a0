//! The auto-save actor.
//!
//! One task owns all mutable state and reacts to commands, attempt
//! results and three timers (debounce, retry, saved-display). Handles
//! talk to it over an unbounded channel and observe it through a
//! `watch` channel.
//!
//! ```text
//!             change          debounce
//!   idle ──────────────▶ (pending) ─────────▶ saving ──ok──▶ saved ──▶ idle
//!                                               │  ▲
//!                                          fail │  │ retry timer
//!                                               ▼  │
//!                                             retrying ──exhausted──▶ error
//!
//!   any ──offline──▶ offline ──online + dirty──▶ saving
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;

use builder_core::now_millis;

use crate::cancel::CancellationToken;
use crate::config::AutoSaveConfig;
use crate::error::{SaveError, SaveResult};
use crate::saver::Saver;
use crate::status::{AutoSaveState, FlushOutcome, SaveStatus};

type StartHook = Box<dyn Fn() + Send + Sync>;
type SuccessHook = Box<dyn Fn(u64) + Send + Sync>;
type ErrorHook = Box<dyn Fn(&SaveError) + Send + Sync>;
type StatusHook = Box<dyn Fn(SaveStatus) + Send + Sync>;

#[derive(Default)]
struct Hooks {
    on_save_start: Option<StartHook>,
    on_save_success: Option<SuccessHook>,
    on_save_error: Option<ErrorHook>,
    on_status_change: Option<StatusHook>,
}

enum Command<T> {
    Change(T),
    SaveNow,
    SetOnline(bool),
    SetEnabled(bool),
    MarkSaved(T),
    Flush(oneshot::Sender<FlushOutcome>),
    Shutdown(oneshot::Sender<()>),
}

/// Builder for an auto-save actor over snapshots of type `T`.
///
/// ```no_run
/// # async fn demo() {
/// use builder_autosave::{saver_fn, AutoSaveConfig, AutoSaveController, SaveResult};
/// use futures::FutureExt;
///
/// let saver = saver_fn(|text: String, _cancel| async move {
///     println!("{text}");
///     SaveResult::Ok(())
/// }.boxed());
///
/// let handle = AutoSaveController::new(saver, String::new())
///     .with_config(AutoSaveConfig::default().with_debounce_ms(500))
///     .on_save_success(|at| println!("saved at {at}"))
///     .spawn();
///
/// handle.notify_change("hello".to_string()).ok();
/// handle.flush().await;
/// # }
/// ```
pub struct AutoSaveController<T> {
    saver: Arc<dyn Saver<T>>,
    initial: T,
    config: AutoSaveConfig,
    hooks: Hooks,
}

impl<T> std::fmt::Debug for AutoSaveController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoSaveController")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T> AutoSaveController<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Create a controller. `initial` counts as already saved.
    #[must_use]
    pub fn new<S>(saver: S, initial: T) -> Self
    where
        S: Saver<T> + 'static,
    {
        Self {
            saver: Arc::new(saver),
            initial,
            config: AutoSaveConfig::default(),
            hooks: Hooks::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AutoSaveConfig) -> Self {
        self.config = config;
        self
    }

    /// Called when a save sequence starts.
    #[must_use]
    pub fn on_save_start<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hooks.on_save_start = Some(Box::new(hook));
        self
    }

    /// Called with the save time (ms since epoch) after a successful save.
    #[must_use]
    pub fn on_save_success<F>(mut self, hook: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.hooks.on_save_success = Some(Box::new(hook));
        self
    }

    /// Called once when a save sequence gives up.
    #[must_use]
    pub fn on_save_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SaveError) + Send + Sync + 'static,
    {
        self.hooks.on_save_error = Some(Box::new(hook));
        self
    }

    /// Called on every status transition.
    #[must_use]
    pub fn on_status_change<F>(mut self, hook: F) -> Self
    where
        F: Fn(SaveStatus) + Send + Sync + 'static,
    {
        self.hooks.on_status_change = Some(Box::new(hook));
        self
    }

    /// Start the actor on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(self) -> AutoSaveHandle<T> {
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(AutoSaveState::new(self.config.enabled));

        tracing::info!(
            debounce_ms = self.config.debounce_ms,
            max_retries = self.config.max_retries,
            retry_delay_ms = self.config.retry_delay_ms,
            enabled = self.config.enabled,
            "Auto-save controller started"
        );

        let actor = Actor {
            saver: self.saver,
            enabled: self.config.enabled,
            config: self.config,
            hooks: self.hooks,
            commands,
            done_tx,
            done_rx,
            state_tx,
            latest: self.initial.clone(),
            last_saved: Some(self.initial),
            online: true,
            generation: 0,
            task: None,
            debounce_at: None,
            retry_at: None,
            saved_reset_at: None,
            flush_waiters: Vec::new(),
        };
        tokio::spawn(actor.run());

        AutoSaveHandle {
            commands: commands_tx,
            state: state_rx,
        }
    }
}

/// Cheap, cloneable handle to a running auto-save actor.
///
/// Command methods return [`SaveError::Stopped`] once the actor has shut
/// down.
pub struct AutoSaveHandle<T> {
    commands: mpsc::UnboundedSender<Command<T>>,
    state: watch::Receiver<AutoSaveState>,
}

impl<T> Clone for AutoSaveHandle<T> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T> std::fmt::Debug for AutoSaveHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoSaveHandle")
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl<T> AutoSaveHandle<T>
where
    T: Send + 'static,
{
    fn send(&self, command: Command<T>) -> Result<(), SaveError> {
        self.commands.send(command).map_err(|_| SaveError::Stopped)
    }

    /// Report the latest snapshot. Restarts the debounce timer when it
    /// differs from the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Stopped`] if the actor is gone.
    pub fn notify_change(&self, snapshot: T) -> Result<(), SaveError> {
        self.send(Command::Change(snapshot))
    }

    /// Save the latest snapshot immediately, bypassing the debounce and the
    /// unchanged check.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Stopped`] if the actor is gone.
    pub fn save_now(&self) -> Result<(), SaveError> {
        self.send(Command::SaveNow)
    }

    /// Report connectivity. Going offline cancels in-flight work; coming
    /// back online saves queued changes.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Stopped`] if the actor is gone.
    pub fn set_online(&self, online: bool) -> Result<(), SaveError> {
        self.send(Command::SetOnline(online))
    }

    /// Enable or disable saving. Disabled controllers keep tracking
    /// changes but never save.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Stopped`] if the actor is gone.
    pub fn set_enabled(&self, enabled: bool) -> Result<(), SaveError> {
        self.send(Command::SetEnabled(enabled))
    }

    /// Treat `snapshot` as persisted without saving it, e.g. after loading
    /// a page from the server.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Stopped`] if the actor is gone.
    pub fn mark_saved(&self, snapshot: T) -> Result<(), SaveError> {
        self.send(Command::MarkSaved(snapshot))
    }

    /// Save pending changes now and wait until the attempt settles,
    /// including retries.
    pub async fn flush(&self) -> FlushOutcome {
        let (tx, rx) = oneshot::channel();
        if self.send(Command::Flush(tx)).is_err() {
            return FlushOutcome::Cancelled;
        }
        rx.await.unwrap_or(FlushOutcome::Cancelled)
    }

    /// Stop the actor, cancelling any in-flight attempt.
    pub async fn shutdown(&self) {
        let (tx, rx) = oneshot::channel();
        if self.send(Command::Shutdown(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> AutoSaveState {
        self.state.borrow().clone()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SaveStatus {
        self.state.borrow().status
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AutoSaveState> {
        self.state.clone()
    }

    /// Forward a connectivity signal into [`set_online`](Self::set_online)
    /// until either side goes away.
    #[must_use = "dropping the handle detaches the forwarding task"]
    pub fn follow_connectivity(
        &self,
        mut online: watch::Receiver<bool>,
    ) -> tokio::task::JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            loop {
                let value = *online.borrow_and_update();
                if handle.set_online(value).is_err() {
                    break;
                }
                if online.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}

struct SaveTask<T> {
    generation: u64,
    attempt: u32,
    snapshot: T,
    cancel: CancellationToken,
    running: bool,
}

struct Actor<T> {
    saver: Arc<dyn Saver<T>>,
    config: AutoSaveConfig,
    hooks: Hooks,
    commands: mpsc::UnboundedReceiver<Command<T>>,
    done_tx: mpsc::UnboundedSender<(u64, SaveResult)>,
    done_rx: mpsc::UnboundedReceiver<(u64, SaveResult)>,
    state_tx: watch::Sender<AutoSaveState>,
    latest: T,
    last_saved: Option<T>,
    online: bool,
    enabled: bool,
    generation: u64,
    task: Option<SaveTask<T>>,
    debounce_at: Option<Instant>,
    retry_at: Option<Instant>,
    saved_reset_at: Option<Instant>,
    flush_waiters: Vec<oneshot::Sender<FlushOutcome>>,
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl<T> Actor<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    async fn run(mut self) {
        loop {
            let debounce_at = self.debounce_at;
            let retry_at = self.retry_at;
            let saved_reset_at = self.saved_reset_at;

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown(reply)) => {
                        self.stop();
                        let _ = reply.send(());
                        break;
                    }
                    Some(command) => self.handle(command),
                    None => {
                        self.stop();
                        break;
                    }
                },
                Some((generation, result)) = self.done_rx.recv() => {
                    self.on_attempt_done(generation, result);
                }
                () = sleep_until_opt(debounce_at) => {
                    self.debounce_at = None;
                    self.on_debounce();
                }
                () = sleep_until_opt(retry_at) => {
                    self.retry_at = None;
                    self.on_retry();
                }
                () = sleep_until_opt(saved_reset_at) => {
                    self.saved_reset_at = None;
                    if self.state_tx.borrow().status == SaveStatus::Saved {
                        self.publish(|state| state.status = SaveStatus::Idle);
                    }
                }
            }
        }
        tracing::info!("Auto-save controller stopped");
    }

    fn handle(&mut self, command: Command<T>) {
        match command {
            Command::Change(snapshot) => self.on_change(snapshot),
            Command::SaveNow => self.on_save_now(),
            Command::SetOnline(online) => self.on_set_online(online),
            Command::SetEnabled(enabled) => self.on_set_enabled(enabled),
            Command::MarkSaved(snapshot) => self.on_mark_saved(snapshot),
            Command::Flush(reply) => self.on_flush(reply),
            // Handled in `run`.
            Command::Shutdown(reply) => {
                let _ = reply.send(());
            }
        }
    }

    fn is_dirty(&self) -> bool {
        self.last_saved.as_ref() != Some(&self.latest)
    }

    fn can_save(&self) -> bool {
        self.online && self.enabled
    }

    fn on_change(&mut self, snapshot: T) {
        if snapshot == self.latest {
            return;
        }
        self.latest = snapshot;
        self.publish(|_| {});
        if self.can_save() {
            self.debounce_at = Some(Instant::now() + self.config.debounce());
        }
    }

    fn on_debounce(&mut self) {
        if !self.can_save() {
            return;
        }
        let in_flight_is_latest = self.task.as_ref().map(|task| task.snapshot == self.latest);
        match in_flight_is_latest {
            Some(true) => {}
            // A stale snapshot is in flight: replace it, even when the editor
            // is back at the last saved state.
            Some(false) => self.start_sequence(),
            None if self.is_dirty() => self.start_sequence(),
            None => tracing::debug!("Snapshot unchanged since last save, skipping"),
        }
    }

    fn on_save_now(&mut self) {
        if !self.can_save() {
            tracing::debug!(
                online = self.online,
                enabled = self.enabled,
                "Save requested while saving is unavailable"
            );
            return;
        }
        self.debounce_at = None;
        self.start_sequence();
    }

    fn on_set_online(&mut self, online: bool) {
        if online == self.online {
            return;
        }
        self.online = online;
        if online {
            let resume = self.enabled && self.is_dirty();
            tracing::info!(resume, "Back online");
            self.publish(|state| {
                state.is_online = true;
                if !resume {
                    state.status = SaveStatus::Idle;
                }
            });
            if resume {
                self.start_sequence();
            }
        } else {
            tracing::warn!("Went offline, queuing changes");
            self.cancel_task();
            self.debounce_at = None;
            self.saved_reset_at = None;
            self.publish(|state| {
                state.is_online = false;
                state.status = SaveStatus::Offline;
            });
            self.resolve_flush(&FlushOutcome::Offline);
        }
    }

    fn on_set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            if self.online && self.is_dirty() {
                self.debounce_at = Some(Instant::now() + self.config.debounce());
            }
            self.publish(|state| state.enabled = true);
        } else {
            self.cancel_task();
            self.debounce_at = None;
            let online = self.online;
            self.publish(|state| {
                state.enabled = false;
                if online {
                    state.status = SaveStatus::Idle;
                }
            });
            self.resolve_flush(&FlushOutcome::Disabled);
        }
    }

    fn on_mark_saved(&mut self, snapshot: T) {
        self.cancel_task();
        self.debounce_at = None;
        self.latest = snapshot.clone();
        self.last_saved = Some(snapshot);
        let online = self.online;
        self.publish(|state| {
            state.retry_count = 0;
            state.error = None;
            if online {
                state.status = SaveStatus::Idle;
            }
        });
        self.resolve_flush(&FlushOutcome::NothingToSave);
    }

    fn on_flush(&mut self, reply: oneshot::Sender<FlushOutcome>) {
        if !self.enabled {
            let _ = reply.send(FlushOutcome::Disabled);
            return;
        }
        if !self.online {
            let _ = reply.send(FlushOutcome::Offline);
            return;
        }
        let covered = self
            .task
            .as_ref()
            .is_some_and(|task| task.snapshot == self.latest);
        if covered {
            self.flush_waiters.push(reply);
        } else if self.is_dirty() || self.task.is_some() {
            self.debounce_at = None;
            self.flush_waiters.push(reply);
            self.start_sequence();
        } else {
            let _ = reply.send(FlushOutcome::NothingToSave);
        }
    }

    fn start_sequence(&mut self) {
        self.cancel_task();
        self.generation += 1;
        self.saved_reset_at = None;
        self.task = Some(SaveTask {
            generation: self.generation,
            attempt: 1,
            snapshot: self.latest.clone(),
            cancel: CancellationToken::new(),
            running: false,
        });
        self.publish(|state| {
            state.status = SaveStatus::Saving;
            state.retry_count = 0;
        });
        if let Some(hook) = &self.hooks.on_save_start {
            hook();
        }
        self.spawn_attempt();
    }

    fn spawn_attempt(&mut self) {
        let Some(task) = self.task.as_mut() else {
            return;
        };
        task.running = true;

        let saver = Arc::clone(&self.saver);
        let snapshot = task.snapshot.clone();
        let cancel = task.cancel.clone();
        let generation = task.generation;
        let done = self.done_tx.clone();
        tracing::debug!(generation, attempt = task.attempt, "Starting save attempt");

        tokio::spawn(async move {
            let result = tokio::select! {
                result = saver.save(snapshot, cancel.clone()) => result,
                () = cancel.cancelled() => Err(SaveError::Cancelled),
            };
            let _ = done.send((generation, result));
        });
    }

    fn on_retry(&mut self) {
        if !self.can_save() {
            return;
        }
        if self.task.as_ref().is_some_and(|task| !task.running) {
            self.publish(|state| state.status = SaveStatus::Saving);
            self.spawn_attempt();
        }
    }

    fn on_attempt_done(&mut self, generation: u64, result: SaveResult) {
        let Some(task) = self.task.as_mut() else {
            tracing::debug!(generation, "Ignoring result of cancelled save");
            return;
        };
        if task.generation != generation || !task.running {
            tracing::debug!(generation, "Ignoring stale save result");
            return;
        }
        task.running = false;

        match result {
            Ok(()) => {
                let snapshot = task.snapshot.clone();
                self.task = None;
                self.last_saved = Some(snapshot);
                let saved_at = now_millis();
                self.publish(|state| {
                    state.status = SaveStatus::Saved;
                    state.last_saved_at = Some(saved_at);
                    state.retry_count = 0;
                    state.error = None;
                    state.save_count += 1;
                });
                tracing::info!(
                    generation,
                    save_count = self.state_tx.borrow().save_count,
                    "Page saved"
                );
                if let Some(hook) = &self.hooks.on_save_success {
                    hook(saved_at);
                }
                self.saved_reset_at = Some(Instant::now() + self.config.saved_display());
                if self.is_dirty() && self.debounce_at.is_none() && self.can_save() {
                    self.debounce_at = Some(Instant::now() + self.config.debounce());
                }
                self.resolve_flush(&FlushOutcome::Saved);
            }
            Err(err) if err.is_retryable() && task.attempt <= self.config.max_retries => {
                let attempt = task.attempt;
                task.attempt += 1;
                let delay = self.config.delay_for_attempt(attempt);
                tracing::warn!(
                    attempt,
                    max_retries = self.config.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "Save failed, retrying"
                );
                let message = err.to_string();
                self.publish(|state| {
                    state.status = SaveStatus::Retrying;
                    state.retry_count = attempt;
                    state.error = Some(message);
                });
                self.retry_at = Some(Instant::now() + delay);
            }
            Err(err) => {
                let attempts = task.attempt;
                self.task = None;
                tracing::error!(attempts, error = %err, "Save failed, giving up");
                let message = err.to_string();
                self.publish(|state| {
                    state.status = SaveStatus::Error;
                    state.retry_count = 0;
                    state.error = Some(message.clone());
                });
                if let Some(hook) = &self.hooks.on_save_error {
                    hook(&err);
                }
                self.resolve_flush(&FlushOutcome::Failed(message));
            }
        }
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            tracing::debug!(generation = task.generation, "Cancelling save");
            task.cancel.cancel();
        }
        self.retry_at = None;
    }

    fn stop(&mut self) {
        self.cancel_task();
        self.debounce_at = None;
        self.saved_reset_at = None;
        self.resolve_flush(&FlushOutcome::Cancelled);
    }

    fn resolve_flush(&mut self, outcome: &FlushOutcome) {
        for waiter in self.flush_waiters.drain(..) {
            let _ = waiter.send(outcome.clone());
        }
    }

    fn publish(&self, update: impl FnOnce(&mut AutoSaveState)) {
        let dirty = self.is_dirty();
        let mut changed = None;
        self.state_tx.send_modify(|state| {
            let before = state.status;
            update(state);
            state.has_unsaved_changes = dirty;
            if state.status != before {
                changed = Some(state.status);
            }
        });
        if let Some(status) = changed {
            tracing::debug!(%status, "Auto-save status changed");
            if let Some(hook) = &self.hooks.on_status_change {
                hook(status);
            }
        }
    }
}
