//! Core state for talentscout.
//!
//! Wire types for the sourcing backend, job form parsing and the dashboard
//! session state the monitor renders from.

pub mod dashboard;
pub mod form;
pub mod overlay;
pub mod page;
pub mod platform;
pub mod types;
pub mod wire;

pub use dashboard::{Dashboard, DashboardEvent, DashboardStats, JobView, ListStatus};
pub use form::{FormError, FormField, JobDraft, JobForm, split_skills};
pub use overlay::CandidateOverlay;
pub use page::{CandidateRow, PAGE_SIZE, Page, SkillTag, StalePagePolicy, total_pages};
pub use platform::{PlatformStyle, platform_style};
pub use types::{
    Candidate, HealthStatus, Job, JobProgress, JobStatus, MatchBreakdown, MatchedCandidate,
    WorkExperience,
};
