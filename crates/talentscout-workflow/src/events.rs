//! Messages background tasks send to the UI loop.

use crate::progress::ProgressSnapshot;
use talentscout_core::{Candidate, Job};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// Transient toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

/// How a submission workflow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEnd {
    Completed { candidates: usize },
    Failed,
    TimedOut,
    /// A poll cycle hit a transport or decode error
    Errored,
    /// The job was never created
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// Progress panel should open for a new submission.
    Started { title: String },
    Submitted { job_id: String },
    Progress(ProgressSnapshot),
    /// Candidates first appeared while the job was still processing.
    MatchingStarted { candidates: usize },
    /// Progress panel should close.
    Finished(WorkflowEnd),
    /// Blocking alert the user must dismiss.
    Alert(String),
    JobsLoaded {
        jobs: Vec<Job>,
        auto_expand_latest: bool,
    },
    JobsUnavailable(String),
    ProfileLoaded {
        candidate_id: String,
        profile: Option<Candidate>,
    },
    Notify(Notification),
}
