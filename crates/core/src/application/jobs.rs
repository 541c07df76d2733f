// Job Listing Use Cases

use crate::domain::{Job, JobDetail, JobFilter, JobId, JobPatch, JobSummary, NewJob};
use crate::error::Result;
use crate::port::JobStore;
use std::sync::Arc;

/// Application facade over the job store.
///
/// Validates input before any SQL is constructed; existence and
/// uniqueness are enforced by the store itself.
pub struct JobService {
    store: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Create a job from validated input
    pub async fn create(&self, input: NewJob) -> Result<Job> {
        input.validate()?;
        tracing::debug!(title = %input.title, company = %input.company_handle, "creating job");
        self.store.create(&input).await
    }

    /// List jobs, optionally filtered by title / min_salary / has_equity
    pub async fn find_all(&self, filter: JobFilter) -> Result<Vec<JobSummary>> {
        self.store.find_all(&filter).await
    }

    /// Fetch one job with its company embedded
    pub async fn get(&self, id: JobId) -> Result<JobDetail> {
        self.store.get(id).await
    }

    /// Partially update a job; only title, salary and equity are patchable
    pub async fn update(&self, id: JobId, patch: JobPatch) -> Result<Job> {
        patch.validate()?;
        tracing::debug!(id, "updating job");
        self.store.update(id, &patch).await
    }

    /// Delete a job
    pub async fn remove(&self, id: JobId) -> Result<()> {
        tracing::debug!(id, "removing job");
        self.store.remove(id).await
    }
}
