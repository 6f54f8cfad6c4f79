//! Concurrent card fetches.
//!
//! Each task fetches one document, sanitizes it, waits its configured delay
//! and publishes the card into the shared slot. Tasks run independently on
//! the tokio runtime: they never wait on each other and nothing orders their
//! publishes. A failed fetch ends that task only.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{CardError, FetchError};
use crate::types::RawRecord;

use super::slot::SharedCardSlot;
use super::store::CardStore;

/// One document to fetch and publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub label: String,
    pub document: String,
    /// Wait between sanitizing and publishing.
    pub delay: Duration,
}

impl FetchTask {
    pub fn new(label: impl Into<String>, document: impl Into<String>, delay: Duration) -> Self {
        Self {
            label: label.into(),
            document: document.into(),
            delay,
        }
    }
}

/// Lifecycle of a single fetch task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Fetching,
    Sanitizing,
    Delaying,
    Publishing,
    Done,
    Failed(FetchError),
    Cancelled,
    /// The task panicked; carries the join error text.
    Panicked(String),
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Done | TaskState::Failed(_) | TaskState::Cancelled | TaskState::Panicked(_)
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Idle => write!(f, "idle"),
            TaskState::Fetching => write!(f, "fetching"),
            TaskState::Sanitizing => write!(f, "sanitizing"),
            TaskState::Delaying => write!(f, "delaying"),
            TaskState::Publishing => write!(f, "publishing"),
            TaskState::Done => write!(f, "done"),
            TaskState::Failed(e) => write!(f, "failed: {}", e),
            TaskState::Cancelled => write!(f, "cancelled"),
            TaskState::Panicked(e) => write!(f, "panicked: {}", e),
        }
    }
}

/// Final outcome of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub label: String,
    pub document: String,
    pub state: TaskState,
    /// Whether the slot accepted this task's card.
    pub published: bool,
}

impl TaskReport {
    /// The task's failure as a crate error, if it failed.
    pub fn error(&self) -> Option<CardError> {
        match &self.state {
            TaskState::Failed(source) => Some(CardError::Fetch {
                label: self.label.clone(),
                source: source.clone(),
            }),
            _ => None,
        }
    }
}

/// Launches fetch tasks against a store and publishes into a slot.
#[derive(Clone)]
pub struct FetchOrchestrator {
    store: Arc<dyn CardStore>,
    slot: Arc<SharedCardSlot>,
    timeout: Option<Duration>,
}

impl FetchOrchestrator {
    pub fn new(store: Arc<dyn CardStore>, slot: Arc<SharedCardSlot>) -> Self {
        Self {
            store,
            slot,
            timeout: None,
        }
    }

    /// Fail fetches that take longer than `timeout`. Unset by default.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn slot(&self) -> &Arc<SharedCardSlot> {
        &self.slot
    }

    /// Spawn every task. Must be called from within a tokio runtime.
    pub fn launch(&self, tasks: impl IntoIterator<Item = FetchTask>) -> FetchRun {
        let (cancel, _) = watch::channel(false);

        let tasks = tasks
            .into_iter()
            .map(|task| {
                let tracker = Arc::new(TaskTracker {
                    label: task.label.clone(),
                    document: task.document.clone(),
                    state: Mutex::new(TaskState::Idle),
                    published: Mutex::new(false),
                });

                let job = TaskJob {
                    store: Arc::clone(&self.store),
                    slot: Arc::clone(&self.slot),
                    timeout: self.timeout,
                    sequence: self.slot.next_sequence(),
                    task,
                    tracker: Arc::clone(&tracker),
                    cancel: cancel.subscribe(),
                };

                let handle = tokio::spawn(job.run());
                (tracker, handle)
            })
            .collect();

        FetchRun { tasks, cancel }
    }
}

impl fmt::Debug for FetchOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOrchestrator")
            .field("slot", &self.slot)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Handle on a set of launched tasks.
///
/// Dropping the handle leaves the tasks running.
#[derive(Debug)]
pub struct FetchRun {
    tasks: Vec<(Arc<TaskTracker>, JoinHandle<()>)>,
    cancel: watch::Sender<bool>,
}

impl FetchRun {
    /// Current state of every task, in launch order.
    pub fn states(&self) -> Vec<(String, TaskState)> {
        self.tasks
            .iter()
            .map(|(tracker, _)| (tracker.label.clone(), tracker.state.lock().clone()))
            .collect()
    }

    /// Ask every task to stop at its next suspension point. Cancelled tasks
    /// never publish.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// Wait for every task to finish.
    pub async fn join(self) -> Vec<TaskReport> {
        let mut reports = Vec::with_capacity(self.tasks.len());

        for (tracker, handle) in self.tasks {
            if let Err(e) = handle.await {
                let aborted = if e.is_panic() {
                    error!(task = %tracker.label, error = %e, "fetch task panicked");
                    TaskState::Panicked(e.to_string())
                } else {
                    warn!(task = %tracker.label, error = %e, "fetch task aborted");
                    TaskState::Cancelled
                };

                let mut state = tracker.state.lock();
                if !state.is_terminal() {
                    *state = aborted;
                }
            }

            reports.push(tracker.report());
        }

        reports
    }
}

#[derive(Debug)]
struct TaskTracker {
    label: String,
    document: String,
    state: Mutex<TaskState>,
    published: Mutex<bool>,
}

impl TaskTracker {
    fn set(&self, state: TaskState) {
        debug!(task = %self.label, %state, "task state");
        *self.state.lock() = state;
    }

    fn report(&self) -> TaskReport {
        TaskReport {
            label: self.label.clone(),
            document: self.document.clone(),
            state: self.state.lock().clone(),
            published: *self.published.lock(),
        }
    }
}

struct TaskJob {
    store: Arc<dyn CardStore>,
    slot: Arc<SharedCardSlot>,
    timeout: Option<Duration>,
    sequence: u64,
    task: FetchTask,
    tracker: Arc<TaskTracker>,
    cancel: watch::Receiver<bool>,
}

impl TaskJob {
    async fn run(mut self) {
        let label = self.task.label.as_str();
        let document = self.task.document.as_str();

        info!(task = label, document, "retrieving card");
        self.tracker.set(TaskState::Fetching);

        let fetched = tokio::select! {
            biased;
            _ = cancelled(&mut self.cancel) => {
                self.tracker.set(TaskState::Cancelled);
                return;
            }
            fetched = fetch(self.store.as_ref(), document, self.timeout) => fetched,
        };

        let raw = match fetched {
            Ok(raw) => raw,
            Err(e) => {
                warn!(task = label, document, error = %e, "card fetch failed");
                self.tracker.set(TaskState::Failed(e));
                return;
            }
        };
        info!(task = label, document, "card retrieved");

        self.tracker.set(TaskState::Sanitizing);
        let card = raw.sanitize();

        self.tracker.set(TaskState::Delaying);
        let delay_ms = self.task.delay.as_millis() as u64;
        debug!(task = label, delay_ms, "holding card before publish");

        tokio::select! {
            biased;
            _ = cancelled(&mut self.cancel) => {
                self.tracker.set(TaskState::Cancelled);
                return;
            }
            _ = tokio::time::sleep(self.task.delay) => {}
        }

        if *self.cancel.borrow() {
            self.tracker.set(TaskState::Cancelled);
            return;
        }

        self.tracker.set(TaskState::Publishing);
        let accepted = self.slot.publish(card, self.sequence);
        *self.tracker.published.lock() = accepted;

        if accepted {
            info!(task = label, document, version = self.slot.version(), "card published");
        } else {
            info!(task = label, document, "stale card discarded");
        }
        self.tracker.set(TaskState::Done);
    }
}

async fn fetch(
    store: &dyn CardStore,
    document: &str,
    timeout: Option<Duration>,
) -> Result<RawRecord, FetchError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, store.fetch(document))
            .await
            .unwrap_or_else(|_| Err(FetchError::Timeout(limit.as_millis() as u64))),
        None => store.fetch(document).await,
    }
}

/// Resolves once cancellation is requested. Never resolves if the run handle
/// is dropped without cancelling.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::store::MemoryStore;
    use crate::types::CardRecord;
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    fn card(name: &str) -> CardRecord {
        CardRecord {
            name: name.to_string(),
            card_type: "Criatura".to_string(),
            description: "Vuela.\\nPrisa.".to_string(),
            color: "R".to_string(),
            ..CardRecord::default()
        }
    }

    fn orchestrator(store: MemoryStore) -> FetchOrchestrator {
        let slot = Arc::new(SharedCardSlot::new(CardRecord::sample()));
        FetchOrchestrator::new(Arc::new(store), slot)
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_in_delay_order_not_launch_order() {
        let store = MemoryStore::new().with("E001", card("Trench")).with("CCH001", card("Sarkhan"));
        let orchestrator = orchestrator(store);
        let mut feed = orchestrator.slot().subscribe();
        let start = Instant::now();

        let run = orchestrator.launch([
            FetchTask::new("Trench", "E001", Duration::from_secs(20)),
            FetchTask::new("Sarkhan", "CCH001", Duration::from_secs(5)),
        ]);

        let first = feed.changed().await.unwrap();
        assert_eq!(first.record.name, "Sarkhan");
        assert!(start.elapsed() >= Duration::from_secs(5));
        assert!(start.elapsed() < Duration::from_secs(20));

        let second = feed.changed().await.unwrap();
        assert_eq!(second.record.name, "Trench");
        assert_eq!(second.version, 2);
        assert!(start.elapsed() >= Duration::from_secs(20));

        let reports = run.join().await;
        assert!(reports.iter().all(|r| r.state == TaskState::Done && r.published));
        assert_eq!(orchestrator.slot().current().name, "Trench");
    }

    #[tokio::test(start_paused = true)]
    async fn test_published_card_is_sanitized() {
        let orchestrator = orchestrator(MemoryStore::new().with("RE001", card("Glider")));

        let run = orchestrator.launch([FetchTask::new("Glider", "RE001", Duration::from_secs(10))]);
        run.join().await;

        assert_eq!(orchestrator.slot().current().description, "Vuela.\nPrisa.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_is_isolated() {
        let mut store = MemoryStore::new().with("CHH", card("Prodigy"));
        store.fail("RE001", FetchError::Transport("unavailable".to_string()));
        let orchestrator = orchestrator(store);

        let run = orchestrator.launch([
            FetchTask::new("Glider", "RE001", Duration::from_secs(1)),
            FetchTask::new("Missing", "NOPE", Duration::from_secs(1)),
            FetchTask::new("Prodigy", "CHH", Duration::from_secs(15)),
        ]);
        let reports = run.join().await;

        assert_eq!(
            reports[0].state,
            TaskState::Failed(FetchError::Transport("unavailable".to_string()))
        );
        assert_eq!(
            reports[1].state,
            TaskState::Failed(FetchError::NotFound("NOPE".to_string()))
        );
        assert!(!reports[0].published && !reports[1].published);
        assert!(matches!(reports[1].error(), Some(CardError::Fetch { .. })));

        assert_eq!(reports[2].state, TaskState::Done);
        assert_eq!(orchestrator.slot().version(), 1);
        assert_eq!(orchestrator.slot().current().name, "Prodigy");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_leaves_slot_untouched() {
        let orchestrator = orchestrator(MemoryStore::new());

        let reports = orchestrator
            .launch([FetchTask::new("Sarkhan", "CCH001", Duration::ZERO)])
            .join()
            .await;

        assert!(matches!(reports[0].state, TaskState::Failed(_)));
        assert_eq!(orchestrator.slot().version(), 0);
        assert_eq!(*orchestrator.slot().current(), CardRecord::sample());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_delay_prevents_publish() {
        let orchestrator = orchestrator(MemoryStore::new().with("E001", card("Trench")));

        let run = orchestrator.launch([FetchTask::new("Trench", "E001", Duration::from_secs(20))]);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(run.states()[0].1, TaskState::Delaying);

        run.cancel();
        let reports = run.join().await;

        assert_eq!(reports[0].state, TaskState::Cancelled);
        assert!(!reports[0].published);
        assert_eq!(orchestrator.slot().version(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_fetch() {
        let mut store = MemoryStore::new().with("CHH", card("Prodigy"));
        store.set_latency("CHH", Duration::from_secs(30));
        let orchestrator = orchestrator(store);

        let run = orchestrator.launch([FetchTask::new("Prodigy", "CHH", Duration::ZERO)]);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(run.states()[0].1, TaskState::Fetching);

        run.cancel();
        let reports = run.join().await;

        assert_eq!(reports[0].state, TaskState::Cancelled);
        assert_eq!(orchestrator.slot().version(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fails_task() {
        let mut store = MemoryStore::new().with("CHH", card("Prodigy"));
        store.set_latency("CHH", Duration::from_secs(30));
        let orchestrator = orchestrator(store).with_timeout(Some(Duration::from_secs(2)));

        let reports = orchestrator
            .launch([FetchTask::new("Prodigy", "CHH", Duration::ZERO)])
            .join()
            .await;

        assert_eq!(reports[0].state, TaskState::Failed(FetchError::Timeout(2000)));
        assert_eq!(orchestrator.slot().version(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reject_stale_keeps_fresher_card() {
        use crate::fetch::slot::PublishPolicy;

        let store = MemoryStore::new().with("E001", card("Trench")).with("CCH001", card("Sarkhan"));
        let slot = Arc::new(SharedCardSlot::with_policy(
            CardRecord::sample(),
            PublishPolicy::RejectStale,
        ));
        let orchestrator = FetchOrchestrator::new(Arc::new(store), slot);

        let reports = orchestrator
            .launch([
                FetchTask::new("Trench", "E001", Duration::from_secs(20)),
                FetchTask::new("Sarkhan", "CCH001", Duration::from_secs(5)),
            ])
            .join()
            .await;

        assert!(!reports[0].published);
        assert!(reports[1].published);
        assert_eq!(reports[0].state, TaskState::Done);
        assert_eq!(orchestrator.slot().current().name, "Sarkhan");
    }

    struct PanickingStore;

    #[async_trait::async_trait]
    impl CardStore for PanickingStore {
        async fn fetch(&self, document: &str) -> Result<RawRecord, FetchError> {
            panic!("store exploded on {}", document);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_task_is_reported_distinctly() {
        let slot = Arc::new(SharedCardSlot::new(CardRecord::sample()));
        let orchestrator = FetchOrchestrator::new(Arc::new(PanickingStore), slot);

        let reports = orchestrator
            .launch([FetchTask::new("Glider", "RE001", Duration::ZERO)])
            .join()
            .await;

        assert!(matches!(reports[0].state, TaskState::Panicked(_)));
        assert!(reports[0].state.is_terminal());
        assert!(!reports[0].published);
        assert_eq!(orchestrator.slot().version(), 0);
    }
}
