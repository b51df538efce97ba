//! The backend surface the dashboard consumes.

use crate::error::ApiError;
use std::future::Future;
use talentscout_core::{Candidate, HealthStatus, Job, JobDraft, JobProgress};

/// Operations the sourcing backend offers.
///
/// [`crate::ApiClient`] talks to the real service; tests substitute scripted
/// implementations.
pub trait Backend: Send + Sync {
    /// Submit a new job; returns it in its initial state.
    fn create_job(&self, draft: &JobDraft) -> impl Future<Output = Result<Job, ApiError>> + Send;

    /// Fetch a job's status and (possibly partial) candidates.
    fn get_job(&self, job_id: &str) -> impl Future<Output = Result<Job, ApiError>> + Send;

    /// Fetch server-reported progress. Backends without progress reporting
    /// answer [`ApiError::NotFound`].
    fn get_job_progress(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<JobProgress, ApiError>> + Send;

    /// All jobs, newest first.
    fn list_jobs(&self) -> impl Future<Output = Result<Vec<Job>, ApiError>> + Send;

    /// Detailed profile of one candidate.
    fn get_candidate_profile(
        &self,
        candidate_id: &str,
    ) -> impl Future<Output = Result<Candidate, ApiError>> + Send;

    fn health(&self) -> impl Future<Output = Result<HealthStatus, ApiError>> + Send;
}
