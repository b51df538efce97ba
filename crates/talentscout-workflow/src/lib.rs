//! Background workflows for talentscout.
//!
//! Submitting a job, polling it to a terminal state and projecting its
//! progress onto the four-phase display. Results reach the UI loop as
//! [`WorkflowEvent`]s.

pub mod events;
pub mod poller;
pub mod progress;
pub mod submit;

pub use events::{Notification, NotificationLevel, WorkflowEnd, WorkflowEvent};
pub use poller::{Observation, PollOutcome, PollTracker, Poller, PollerConfig};
pub use progress::{Phase, PhaseState, ProgressSnapshot, ProgressSource, step_for};
pub use submit::{SubmissionController, load_jobs, lookup_profile};
