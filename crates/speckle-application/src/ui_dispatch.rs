//! UI-affinity dispatchers.
//!
//! - [`UiThread`]: a dedicated OS thread that owns node state, standing in for
//!   a desktop host's UI thread
//! - [`InlineDispatcher`]: runs jobs on the caller, for headless hosts and tests

use speckle_core::dispatch::{UiDispatcher, UiJob};
use speckle_core::{Result, SpeckleError};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Mutex;
use std::thread::{self, JoinHandle, ThreadId};
use tokio::sync::mpsc;

/// A dedicated thread that runs UI jobs in submission order.
///
/// A job that panics is logged and the thread keeps serving later jobs.
pub struct UiThread {
    sender: Mutex<Option<mpsc::UnboundedSender<UiJob>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
    thread_id: ThreadId,
}

impl UiThread {
    /// Spawns the UI thread with the given name.
    pub fn spawn(name: impl Into<String>) -> Result<Self> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<UiJob>();

        let handle = thread::Builder::new()
            .name(name.into())
            .spawn(move || {
                while let Some(job) = receiver.blocking_recv() {
                    if catch_unwind(AssertUnwindSafe(job)).is_err() {
                        tracing::error!("UI job panicked");
                    }
                }
                tracing::debug!("UI thread stopped");
            })?;

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            thread_id: handle.thread().id(),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Stops accepting jobs, drains the queue and joins the thread.
    ///
    /// Jobs dispatched afterwards fail with [`SpeckleError::UiUnavailable`].
    pub fn shutdown(&self) {
        self.sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        let handle = self
            .handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        // Joining from the UI thread itself would deadlock.
        if let Some(handle) = handle
            && thread::current().id() != self.thread_id
            && handle.join().is_err()
        {
            tracing::error!("UI thread terminated abnormally");
        }
    }
}

impl UiDispatcher for UiThread {
    fn dispatch(&self, job: UiJob) -> Result<()> {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match sender.as_ref() {
            Some(sender) => sender.send(job).map_err(|_| SpeckleError::UiUnavailable),
            None => Err(SpeckleError::UiUnavailable),
        }
    }

    fn is_ui_context(&self) -> bool {
        thread::current().id() == self.thread_id
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Runs every job immediately on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatcher;

impl UiDispatcher for InlineDispatcher {
    fn dispatch(&self, job: UiJob) -> Result<()> {
        job();
        Ok(())
    }

    fn is_ui_context(&self) -> bool {
        true
    }
}
