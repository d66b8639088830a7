//! Fakes for the collaborator traits.

use anyhow::anyhow;
use async_trait::async_trait;
use speckle_core::account::{Account, AccountPicker, AccountStore, Session};
use speckle_core::dispatch::{UiDispatcher, UiJob};
use speckle_core::node::GraphHost;
use speckle_core::stream::{StreamSummary, StreamsApi, StreamsApiFactory};
use speckle_core::{Result, SpeckleError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use tokio::sync::Notify;
use uuid::Uuid;

pub fn account(email: &str) -> Account {
    Account {
        email: email.to_string(),
        server_name: "Hestia".to_string(),
        rest_api: "https://hestia.example.com/api/v1".to_string(),
        token: format!("token-{email}"),
        is_default: false,
    }
}

pub fn session(email: &str) -> Session {
    Session::from(account(email))
}

pub fn streams(ids: &[&str]) -> Vec<StreamSummary> {
    ids.iter().map(|id| StreamSummary::new(*id)).collect()
}

pub fn ids(streams: &[StreamSummary]) -> Vec<String> {
    streams.iter().map(|s| s.stream_id.clone()).collect()
}

#[derive(Default)]
pub struct FakeAccountStore {
    pub default: Option<Account>,
    pub accounts: Vec<Account>,
    pub fail: bool,
    pub reads: AtomicUsize,
}

impl FakeAccountStore {
    pub fn with_default(account: Account) -> Self {
        Self {
            default: Some(account),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountStore for FakeAccountStore {
    async fn default_account(&self) -> anyhow::Result<Option<Account>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("account database is locked"));
        }
        Ok(self.default.clone())
    }

    async fn list_accounts(&self) -> anyhow::Result<Vec<Account>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("account database is locked"));
        }
        Ok(self.accounts.clone())
    }
}

/// Picks the candidate at `choice`, or dismisses when `None`.
#[derive(Default)]
pub struct FakePicker {
    pub choice: Option<usize>,
    pub prompts: AtomicUsize,
    pub seen: Mutex<Vec<String>>,
    pub thread: Mutex<Option<ThreadId>>,
}

impl FakePicker {
    pub fn choosing(index: usize) -> Self {
        Self {
            choice: Some(index),
            ..Self::default()
        }
    }

    pub fn dismissing() -> Self {
        Self::default()
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl AccountPicker for FakePicker {
    fn pick(&self, accounts: &[Account]) -> Option<Account> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        *self.thread.lock().unwrap() = Some(std::thread::current().id());
        *self.seen.lock().unwrap() = accounts.iter().map(|a| a.email.clone()).collect();
        self.choice.and_then(|i| accounts.get(i).cloned())
    }
}

/// Streams API returning a fixed result, optionally held until released.
#[derive(Default)]
pub struct FakeStreamsApi {
    pub result: Mutex<Option<Result<Vec<StreamSummary>>>>,
    pub calls: AtomicUsize,
    pub gate: Option<Arc<Notify>>,
    pub started: Arc<Notify>,
}

impl FakeStreamsApi {
    pub fn returning(streams: Vec<StreamSummary>) -> Self {
        Self {
            result: Mutex::new(Some(Ok(streams))),
            ..Self::default()
        }
    }

    pub fn failing(error: SpeckleError) -> Self {
        Self {
            result: Mutex::new(Some(Err(error))),
            ..Self::default()
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamsApi for FakeStreamsApi {
    async fn list_streams_lean(&self) -> Result<Vec<StreamSummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Hands out the same fake API for every session.
pub struct FakeApiFactory {
    pub api: Arc<FakeStreamsApi>,
    pub sessions: Mutex<Vec<Session>>,
}

impl FakeApiFactory {
    pub fn new(api: Arc<FakeStreamsApi>) -> Self {
        Self {
            api,
            sessions: Mutex::new(Vec::new()),
        }
    }
}

impl StreamsApiFactory for FakeApiFactory {
    fn create(&self, session: &Session) -> Result<Arc<dyn StreamsApi>> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(self.api.clone())
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub requests: Mutex<Vec<Uuid>>,
}

impl GraphHost for RecordingHost {
    fn request_reevaluation(&self, node_id: Uuid) {
        self.requests.lock().unwrap().push(node_id);
    }
}

/// Holds UI jobs until the test runs them one by one.
#[derive(Default)]
pub struct QueuedUi {
    jobs: Mutex<VecDeque<UiJob>>,
    queued: Notify,
}

impl QueuedUi {
    /// Waits for the next dispatched job.
    pub async fn next_job(&self) -> UiJob {
        loop {
            if let Some(job) = self.jobs.lock().unwrap().pop_front() {
                return job;
            }
            self.queued.notified().await;
        }
    }
}

impl UiDispatcher for QueuedUi {
    fn dispatch(&self, job: UiJob) -> Result<()> {
        self.jobs.lock().unwrap().push_back(job);
        self.queued.notify_one();
        Ok(())
    }

    fn is_ui_context(&self) -> bool {
        false
    }
}
