//! Background dispatch of retrievals
//!
//! Each dispatched retrieval runs on its own tokio task. A semaphore bounds
//! how many of them talk to partners at once; the slots are shared by all
//! tenants. The returned [`RetrievalJob`] lets a caller poll or await the
//! result. Dropping the job detaches the task: the upstream call still runs
//! to completion and its result is discarded.

use super::retrieve::{RetrievalError, RetrievalOutcome, RetrievalRequest, RetrievalWorker};
use crate::ports::progress::{NoProgress, RetrievalProgress};
use crate::ports::tenant_directory::TenantDirectory;
use crate::ports::upstream_client::UpstreamClient;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

/// Identifier of a dispatched retrieval, unique per dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(u64);

impl JobId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Handle to a retrieval running in the background
pub struct RetrievalJob {
    id: JobId,
    owner_reference: String,
    handle: JoinHandle<Result<RetrievalOutcome, RetrievalError>>,
}

impl RetrievalJob {
    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn owner_reference(&self) -> &str {
        &self.owner_reference
    }

    /// Whether the result is ready
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the result
    pub async fn wait(self) -> Result<RetrievalOutcome, RetrievalError> {
        self.handle
            .await
            .map_err(|e| RetrievalError::Aborted(e.to_string()))?
    }
}

/// Runs retrievals on background tasks with bounded concurrency
pub struct RetrievalDispatcher<D, C>
where
    D: TenantDirectory + 'static,
    C: UpstreamClient + 'static,
{
    worker: Arc<RetrievalWorker<D, C>>,
    slots: Arc<Semaphore>,
    next_id: AtomicU64,
}

impl<D, C> RetrievalDispatcher<D, C>
where
    D: TenantDirectory + 'static,
    C: UpstreamClient + 'static,
{
    /// Slot count comes from the worker's configuration
    pub fn new(worker: Arc<RetrievalWorker<D, C>>) -> Self {
        let slots = worker.config().max_concurrent.max(1);
        Self {
            worker,
            slots: Arc::new(Semaphore::new(slots)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Slots not taken by running retrievals
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Start a retrieval in the background. Must be called within a tokio runtime.
    pub fn dispatch(
        &self,
        owner_reference: impl Into<String>,
        request: RetrievalRequest,
    ) -> RetrievalJob {
        self.dispatch_with_progress(owner_reference, request, Arc::new(NoProgress))
    }

    /// Start a retrieval in the background, reporting its phases
    pub fn dispatch_with_progress(
        &self,
        owner_reference: impl Into<String>,
        request: RetrievalRequest,
        progress: Arc<dyn RetrievalProgress>,
    ) -> RetrievalJob {
        let id = JobId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let owner_reference = owner_reference.into();

        let worker = Arc::clone(&self.worker);
        let slots = Arc::clone(&self.slots);
        let owner = owner_reference.clone();

        debug!("Dispatching {} ({}) for owner {}", id, request.resource, owner);

        let handle = tokio::spawn(async move {
            let _permit = slots
                .acquire_owned()
                .await
                .map_err(|e| RetrievalError::Aborted(e.to_string()))?;
            debug!("{} acquired a retrieval slot", id);
            worker
                .execute_with_progress(&owner, request, progress.as_ref())
                .await
        });

        RetrievalJob {
            id,
            owner_reference,
            handle,
        }
    }
}
