//! UI-affinity dispatching.
//!
//! Node observables are owned by the host's UI context. Work that finishes
//! elsewhere (a remote fetch on a runtime worker) marshals back through a
//! [`UiDispatcher`] before touching them.

use crate::error::{Result, SpeckleError};
use tokio::sync::oneshot;

/// A unit of work to run on the UI context.
pub type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// Capability to execute work on the UI-owning context.
pub trait UiDispatcher: Send + Sync {
    /// Queues `job` for execution on the UI context.
    ///
    /// Fails with [`SpeckleError::UiUnavailable`] once the context has shut
    /// down.
    fn dispatch(&self, job: UiJob) -> Result<()>;

    /// Returns `true` when called from the UI context itself.
    fn is_ui_context(&self) -> bool;
}

/// Runs `f` on the UI context and waits for its result.
///
/// The calling task is suspended, not blocked. When already on the UI context
/// `f` runs inline.
pub async fn run_on_ui<F, R>(dispatcher: &dyn UiDispatcher, f: F) -> Result<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if dispatcher.is_ui_context() {
        return Ok(f());
    }

    let (tx, rx) = oneshot::channel();
    dispatcher.dispatch(Box::new(move || {
        let _ = tx.send(f());
    }))?;

    // A dropped sender means the job never ran or panicked on the UI context.
    rx.await.map_err(|_| SpeckleError::UiUnavailable)
}
