//! Job poller
//!
//! Polls the analysis service for one job until it reaches a terminal status
//! or the caller stops it. Each started job runs in its own task which owns
//! the job view exclusively; readers get a [`PollerHandle`].
//!
//! Fetches are serialized: the next tick is scheduled only after the previous
//! fetch has returned, so at most one request is ever in flight and responses
//! cannot arrive out of order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use udaq_core::domain::job::{Job, JobId};
use udaq_core::domain::view::JobView;
use udaq_core::normalize::normalize_job;
use uuid::Uuid;

use crate::config::TrackerConfig;
use crate::error::PollError;
use crate::repository::JobRepository;

/// Lifecycle of a poller instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// Nothing started yet
    Idle,
    /// Ticks are being scheduled
    Polling,
    /// A terminal status was observed; the last snapshot is final
    Terminal,
    /// Stopped by the caller before reaching a terminal status
    Cancelled,
}

/// Starts pollers for job ids
///
/// An un-started `JobPoller` is the idle state; every [`JobPoller::start`] call
/// creates an independent instance.
#[derive(Clone)]
pub struct JobPoller {
    repository: Arc<dyn JobRepository>,
    poll_interval: Duration,
}

impl JobPoller {
    /// Creates a new job poller
    pub fn new(repository: Arc<dyn JobRepository>, config: &TrackerConfig) -> Self {
        Self::with_interval(repository, config.poll_interval)
    }

    pub fn with_interval(repository: Arc<dyn JobRepository>, poll_interval: Duration) -> Self {
        Self {
            repository,
            poll_interval,
        }
    }

    /// Starts polling `job_id` on the current tokio runtime
    ///
    /// The first fetch is issued immediately.
    pub fn start(&self, job_id: JobId) -> PollerHandle {
        let instance = Uuid::new_v4();
        let (view, _) = watch::channel(JobView::default());
        let view = Arc::new(view);
        let cancel = CancellationToken::new();
        let fetches = Arc::new(AtomicU64::new(0));

        let task = PollTask {
            job_id: job_id.clone(),
            repository: Arc::clone(&self.repository),
            poll_interval: self.poll_interval,
            view: Arc::clone(&view),
            cancel: cancel.clone(),
            fetches: Arc::clone(&fetches),
        };

        let span = info_span!("poller", %instance, %job_id);
        let task = tokio::spawn(task.run().instrument(span));

        PollerHandle {
            job_id,
            instance,
            view,
            cancel,
            fetches,
            task: Some(task),
        }
    }
}

/// Read access to a running poller, plus cancellation
///
/// Dropping the handle stops the poller.
pub struct PollerHandle {
    job_id: JobId,
    instance: Uuid,
    view: Arc<watch::Sender<JobView>>,
    cancel: CancellationToken,
    fetches: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Random id distinguishing this instance in logs
    pub fn instance(&self) -> Uuid {
        self.instance
    }

    /// Current view snapshot
    pub fn view(&self) -> JobView {
        self.view.borrow().clone()
    }

    /// Receiver notified on every view change
    pub fn subscribe(&self) -> watch::Receiver<JobView> {
        self.view.subscribe()
    }

    pub fn state(&self) -> PollerState {
        if self.view.borrow().is_terminal() {
            PollerState::Terminal
        } else if self.cancel.is_cancelled() {
            PollerState::Cancelled
        } else {
            PollerState::Polling
        }
    }

    /// Number of fetches issued so far
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Stops polling
    ///
    /// No tick is scheduled afterwards. A fetch already in flight is left to
    /// finish, but its result is discarded: once `stop` returns the view never
    /// changes again.
    pub fn stop(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        // Taking the view's write lock waits out an update already in progress;
        // any later update sees the cancellation and backs off.
        self.view.send_if_modified(|_| false);
        debug!(instance = %self.instance, job_id = %self.job_id, "Poller stopped");
    }

    /// Whether the polling task has exited
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Waits for the polling task to exit, returning the final view
    pub async fn finished(&mut self) -> JobView {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(instance = %self.instance, "Poller task panicked: {}", e);
            }
        }
        self.view()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for PollerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollerHandle")
            .field("job_id", &self.job_id)
            .field("instance", &self.instance)
            .field("state", &self.state())
            .finish()
    }
}

/// What applying one fetch result did to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Continue,
    Terminal,
    Discarded,
}

/// State owned by the spawned polling task
struct PollTask {
    job_id: JobId,
    repository: Arc<dyn JobRepository>,
    poll_interval: Duration,
    view: Arc<watch::Sender<JobView>>,
    cancel: CancellationToken,
    fetches: Arc<AtomicU64>,
}

impl PollTask {
    async fn run(self) {
        info!("Polling job (interval: {:?})", self.poll_interval);

        let mut sequence = 0u64;

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            sequence += 1;
            self.fetches.fetch_add(1, Ordering::SeqCst);
            debug!(sequence, "Fetching job state");

            let outcome = self.fetch().await;

            match self.apply(sequence, outcome) {
                TickOutcome::Continue => {}
                TickOutcome::Terminal => {
                    info!("Job reached a terminal status; polling finished");
                    return;
                }
                TickOutcome::Discarded => break,
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = time::sleep(self.poll_interval) => {}
            }
        }

        info!("Polling cancelled");
    }

    async fn fetch(&self) -> Result<Job, PollError> {
        let payload = self.repository.fetch_job(&self.job_id).await?;
        Ok(normalize_job(&self.job_id, payload)?)
    }

    /// Applies one fetch result under the view's write lock
    fn apply(&self, sequence: u64, outcome: Result<Job, PollError>) -> TickOutcome {
        let mut result = TickOutcome::Discarded;

        self.view.send_if_modified(|view| {
            if self.cancel.is_cancelled() {
                debug!(sequence, "Discarding result that arrived after stop");
                return false;
            }

            match outcome {
                Ok(job) => {
                    let status = job.status;
                    if !view.apply_snapshot(sequence, job) {
                        debug!(sequence, "Ignoring stale snapshot");
                        result = TickOutcome::Continue;
                        return false;
                    }
                    debug!(sequence, %status, "Applied job snapshot");
                    result = if status.is_terminal() {
                        TickOutcome::Terminal
                    } else {
                        TickOutcome::Continue
                    };
                    true
                }
                Err(e) => {
                    warn!(sequence, "Poll failed, retrying next tick: {}", e);
                    view.record_failure(e.to_string());
                    result = TickOutcome::Continue;
                    true
                }
            }
        });

        result
    }
}
