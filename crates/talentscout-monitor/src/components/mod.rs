//! TUI components.

pub mod candidate_detail;
pub mod footer;
pub mod header;
pub mod job_form;
pub mod job_list;
pub mod progress;

pub use candidate_detail::CandidateDetail;
pub use footer::Footer;
pub use header::Header;
pub use job_form::JobFormView;
pub use job_list::JobList;
pub use progress::{ProgressPanel, WorkflowView};
