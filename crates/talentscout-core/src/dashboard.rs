//! Dashboard session state.
//!
//! Holds the known jobs, the single expanded job and the per-job page
//! numbers. Every change goes through [`Dashboard::apply`], so rendering is a
//! pure function of the state and can be tested without a terminal or a
//! backend.

use crate::page::{Page, StalePagePolicy, total_pages};
use crate::types::Job;
use std::collections::HashMap;

/// Whether the job list has been fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Loading,
    Ready,
    /// The last fetch failed; previously loaded jobs are kept
    Unavailable,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Replace the job list with a fresh backend listing (newest first).
    JobsLoaded {
        jobs: Vec<Job>,
        /// Expand the newest job, discarding the prior choice
        auto_expand_latest: bool,
    },
    /// The listing request failed.
    JobsUnavailable,
    /// Expand a job, or collapse it if it is the expanded one.
    ToggleJob(String),
    /// Show a given 1-based page of a job's candidate table.
    ChangePage { job_id: String, page: usize },
}

/// Totals shown in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub jobs: usize,
    pub candidates: usize,
}

/// A job as it should be drawn.
#[derive(Debug, Clone)]
pub struct JobView<'a> {
    pub job: &'a Job,
    pub expanded: bool,
    /// Candidate table page, only for the expanded job
    pub page: Option<Page<'a>>,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    jobs: Vec<Job>,
    expanded: Option<String>,
    /// The newest job is expanded by default only once per session
    default_expansion_used: bool,
    pages: HashMap<String, usize>,
    policy: StalePagePolicy,
    status: ListStatus,
}

impl Dashboard {
    pub fn new(policy: StalePagePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Apply one event and return the new state.
    pub fn apply(mut self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::JobsLoaded {
                jobs,
                auto_expand_latest,
            } => {
                self.jobs = jobs;
                self.status = ListStatus::Ready;
                if auto_expand_latest {
                    self.expanded = self.jobs.first().map(|j| j.id.clone());
                    self.default_expansion_used = true;
                } else if self.expanded.is_none() && !self.default_expansion_used {
                    if let Some(first) = self.jobs.first() {
                        self.expanded = Some(first.id.clone());
                        self.default_expansion_used = true;
                    }
                }
                self.normalize_pages();
            }
            DashboardEvent::JobsUnavailable => {
                self.status = ListStatus::Unavailable;
            }
            DashboardEvent::ToggleJob(job_id) => {
                if self.job(&job_id).is_some() {
                    self.default_expansion_used = true;
                    if self.expanded.as_deref() == Some(job_id.as_str()) {
                        self.expanded = None;
                    } else {
                        self.expanded = Some(job_id);
                    }
                }
            }
            DashboardEvent::ChangePage { job_id, page } => {
                if page > 0 && self.job(&job_id).is_some() {
                    self.pages.insert(job_id, page);
                }
            }
        }
        self
    }

    // Stored page numbers that fell out of range after a reload follow the
    // policy, so later Previous/Next steps start from the page on screen.
    fn normalize_pages(&mut self) {
        let policy = self.policy;
        for job in &self.jobs {
            if let Some(page) = self.pages.get_mut(&job.id) {
                *page = policy.resolve(*page, total_pages(job.candidates.len()));
            }
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    pub fn expanded_id(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn expanded_job(&self) -> Option<&Job> {
        self.expanded_id().and_then(|id| self.job(id))
    }

    /// Stored page for a job; 1 until the operator pages.
    pub fn page_of(&self, job_id: &str) -> usize {
        self.pages.get(job_id).copied().unwrap_or(1)
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn policy(&self) -> StalePagePolicy {
        self.policy
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            jobs: self.jobs.len(),
            candidates: self.jobs.iter().map(Job::candidate_count).sum(),
        }
    }

    /// Candidate table page for a job.
    pub fn page_for(&self, job_id: &str) -> Option<Page<'_>> {
        let job = self.job(job_id)?;
        Some(Page::build(&job.candidates, self.page_of(job_id), self.policy))
    }

    /// Project every job for rendering.
    pub fn views(&self) -> Vec<JobView<'_>> {
        self.jobs
            .iter()
            .map(|job| {
                let expanded = self.expanded.as_deref() == Some(job.id.as_str());
                JobView {
                    job,
                    expanded,
                    page: expanded
                        .then(|| Page::build(&job.candidates, self.page_of(&job.id), self.policy)),
                }
            })
            .collect()
    }

    /// Event for the Next control, if it is enabled.
    pub fn next_page(&self, job_id: &str) -> Option<DashboardEvent> {
        let page = self.page_for(job_id)?;
        page.has_next().then(|| DashboardEvent::ChangePage {
            job_id: job_id.to_string(),
            page: page.number + 1,
        })
    }

    /// Event for the Previous control, if it is enabled.
    pub fn previous_page(&self, job_id: &str) -> Option<DashboardEvent> {
        let page = self.page_for(job_id)?;
        page.has_previous().then(|| DashboardEvent::ChangePage {
            job_id: job_id.to_string(),
            page: page.number - 1,
        })
    }
}
