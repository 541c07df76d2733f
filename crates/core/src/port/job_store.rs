// Job Store Port (Interface)

use crate::domain::{Job, JobDetail, JobFilter, JobId, JobPatch, JobSummary, NewJob};
use crate::error::Result;
use async_trait::async_trait;

/// Storage interface for job persistence and lookup
///
/// Implementations issue parameterized statements only; caller-influenced
/// values never appear in statement text.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a new job after duplicate-title and company-existence checks.
    /// Fails with `Duplicate` when the title is taken and `Validation`
    /// when the company handle does not exist.
    async fn create(&self, input: &NewJob) -> Result<Job>;

    /// List jobs matching the filter, ordered by title ascending
    async fn find_all(&self, filter: &JobFilter) -> Result<Vec<JobSummary>>;

    /// Fetch one job with its company embedded; `NotFound` when absent
    async fn get(&self, id: JobId) -> Result<JobDetail>;

    /// Apply a partial update; `Validation` on an empty patch,
    /// `NotFound` when no row matched
    async fn update(&self, id: JobId, patch: &JobPatch) -> Result<Job>;

    /// Delete a job; `NotFound` when no row matched
    async fn remove(&self, id: JobId) -> Result<()>;
}
