use crate::error::KorektorError;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use tokio::sync::{Mutex, RwLock, mpsc, oneshot};

const COMMAND_CHANNEL_CAPACITY: usize = 100;

/// Commands that mutate the shell view.
///
/// All mutations go through the state actor so that input overrides from the
/// deep-link listener and results from a finished correction are applied in
/// the order they were sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateCommand {
    /// Replace the input text (typed, pasted, or delivered by a deep link)
    SetInput(String),

    /// A new submission started: the previous result and notice are discarded
    BeginSubmission,

    /// Store the latest successful correction
    SetResult(String),

    /// Show a short notice to the user
    SetNotice(String),

    /// Reset input, result and notice
    Clear,
}

/// What the shell renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellView {
    pub input: String,
    /// Last successful correction, if any.
    pub result: Option<String>,
    pub notice: Option<String>,
}

struct Envelope {
    command: StateCommand,
    applied: oneshot::Sender<()>,
}

/// Shell state manager.
///
/// Uses an actor pattern: mutations are `StateCommand` messages processed
/// sequentially by a dedicated task, and `update` returns once the command
/// has been applied. Reads go straight to the `RwLock`.
///
/// The in-flight flag lives outside the actor so that claiming it is a single
/// atomic step.
#[derive(Clone)]
pub struct AppState {
    command_tx: Arc<Mutex<Option<mpsc::Sender<Envelope>>>>,
    view: Arc<RwLock<ShellView>>,
    actor_init: Arc<Mutex<bool>>,
    in_flight: Arc<AtomicBool>,
}

impl AppState {
    /// Create a new state manager.
    ///
    /// The actor is lazily spawned on first use within an async context.
    pub fn new() -> Self {
        Self {
            command_tx: Arc::new(Mutex::new(None)),
            view: Arc::new(RwLock::new(ShellView::default())),
            actor_init: Arc::new(Mutex::new(false)),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Apply a state command and wait until the actor has processed it.
    ///
    /// # Errors
    ///
    /// Returns [`KorektorError::Korektor`] if the state actor has died.
    pub async fn update(&self, command: StateCommand) -> Result<(), KorektorError> {
        self.ensure_actor().await;

        let (applied, done) = oneshot::channel();
        let tx_guard = self.command_tx.lock().await;
        let tx = tx_guard
            .as_ref()
            .ok_or_else(|| KorektorError::korektor("State actor not initialized"))?;

        tx.send(Envelope { command, applied })
            .await
            .map_err(|e| KorektorError::korektor(format!("State actor died: {e}")))?;
        drop(tx_guard);

        done.await
            .map_err(|_| KorektorError::korektor("State actor dropped the command"))
    }

    /// Snapshot of the current view.
    pub async fn view(&self) -> ShellView {
        self.view.read().await.clone()
    }

    pub async fn input(&self) -> String {
        self.view.read().await.input.clone()
    }

    /// Claim the single correction slot.
    ///
    /// Returns `None` if a correction is already in flight. The slot is
    /// released when the returned guard is dropped, on every exit path.
    pub fn try_begin_correction(&self) -> Option<InFlightGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlightGuard {
                flag: Arc::clone(&self.in_flight),
            })
    }

    /// The progress indicator.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    async fn ensure_actor(&self) {
        let mut init_guard = self.actor_init.lock().await;
        if !*init_guard {
            let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

            // Store tx before spawning
            let mut tx_guard = self.command_tx.lock().await;
            *tx_guard = Some(tx);
            drop(tx_guard);

            tokio::spawn(state_actor(rx, Arc::clone(&self.view)));
            *init_guard = true;
            info!("State actor spawned");
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks a correction as in flight until dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        debug!("Correction slot released");
    }
}

/// The state actor task. Owns all writes to the view.
async fn state_actor(mut command_rx: mpsc::Receiver<Envelope>, view: Arc<RwLock<ShellView>>) {
    info!("State actor started");

    while let Some(Envelope { command, applied }) = command_rx.recv().await {
        let mut view_write = view.write().await;

        match command {
            StateCommand::SetInput(input) => {
                debug!("Input replaced ({} chars)", input.chars().count());
                view_write.input = input;
            }
            StateCommand::BeginSubmission => {
                view_write.result = None;
                view_write.notice = None;
            }
            StateCommand::SetResult(result) => {
                debug!("Result stored ({} chars)", result.chars().count());
                view_write.result = Some(result);
                view_write.notice = None;
            }
            StateCommand::SetNotice(notice) => {
                view_write.notice = Some(notice);
            }
            StateCommand::Clear => {
                *view_write = ShellView::default();
            }
        }

        drop(view_write);
        if applied.send(()).is_err() {
            debug!("State update caller went away before acknowledgement");
        }
    }

    warn!("State actor stopped - this should not happen during normal operation");
}
