//! Scripted repository for orchestrator, poller and session tests

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, oneshot};
use udaq_client::{ClientError, Result};
use udaq_core::domain::dataset::{Dataset, DatasetId};
use udaq_core::domain::job::JobId;
use udaq_core::dto::dataset::UploadFile;
use udaq_core::dto::job::JobPayload;

use crate::repository::JobRepository;

/// One scripted answer to `fetch_job`
pub enum Step {
    Reply(Result<JobPayload>),
    /// Replies after the delay has elapsed
    Delayed(Duration, Result<JobPayload>),
    /// Replies once the sender fires
    Gated(oneshot::Receiver<()>, Result<JobPayload>),
}

pub fn payload(value: Value) -> JobPayload {
    serde_json::from_value(value).expect("valid payload")
}

pub fn running(logs: &[&str]) -> Step {
    let logs = serde_json::to_string(logs).expect("encodable");
    Step::Reply(Ok(payload(json!({"status": "RUNNING", "logs": logs}))))
}

pub fn completed() -> Step {
    Step::Reply(Ok(payload(json!({
        "status": "COMPLETED",
        "logs": "[\"done\"]",
        "report": {
            "initial_quality_score": 62.5,
            "final_quality_score": 91.0,
            "issues_found": {"missing_values": 12},
            "actions_taken": ["Imputed missing values"],
            "cleaned_file_path": "/data/out/cleaned_123.csv"
        }
    }))))
}

pub fn failure(status: u16) -> Step {
    Step::Reply(Err(ClientError::api_error(status, "Bad Gateway")))
}

/// In-memory repository answering from a script
#[derive(Default)]
pub struct ScriptedRepository {
    register: Mutex<Option<Result<Dataset>>>,
    start: Mutex<Option<Result<JobId>>>,
    steps: Mutex<VecDeque<Step>>,
    pub registered: AtomicUsize,
    pub started: AtomicUsize,
    pub fetches: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    /// Signalled each time a fetch begins
    pub fetch_started: Notify,
}

impl ScriptedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_steps(steps: impl IntoIterator<Item = Step>) -> Self {
        let repo = Self::new();
        repo.steps.lock().unwrap().extend(steps);
        repo
    }

    pub fn on_register(self, result: Result<Dataset>) -> Self {
        *self.register.lock().unwrap() = Some(result);
        self
    }

    pub fn on_start(self, result: Result<JobId>) -> Self {
        *self.start.lock().unwrap() = Some(result);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

pub fn dataset(id: &str) -> Dataset {
    Dataset {
        id: DatasetId::new(id),
        name: "sales.csv".to_string(),
        file: None,
    }
}

#[async_trait]
impl JobRepository for ScriptedRepository {
    async fn register_dataset(&self, file: &UploadFile) -> Result<Dataset> {
        self.registered.fetch_add(1, Ordering::SeqCst);
        self.register.lock().unwrap().take().unwrap_or_else(|| {
            Ok(Dataset {
                id: DatasetId::new("1"),
                name: file.name.clone(),
                file: None,
            })
        })
    }

    async fn start_job(&self, _dataset_id: &DatasetId) -> Result<JobId> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.start
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(JobId::new("1")))
    }

    async fn fetch_job(&self, _job_id: &JobId) -> Result<JobPayload> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.fetch_started.notify_one();

        let step = self.steps.lock().unwrap().pop_front();
        let result = match step {
            Some(Step::Reply(result)) => result,
            Some(Step::Delayed(delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            Some(Step::Gated(gate, result)) => {
                let _ = gate.await;
                result
            }
            None => Err(ClientError::api_error(503, "script exhausted")),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
