//! Projection of job progress onto the four-phase display.

use std::time::Duration;
use talentscout_core::JobProgress;

/// Nominal processing stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Scraping,
    VectorSearch,
    HardMatching,
    Balancing,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Scraping,
        Phase::VectorSearch,
        Phase::HardMatching,
        Phase::Balancing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Scraping => "Scraping",
            Self::VectorSearch => "Vector Search",
            Self::HardMatching => "Hard Matching",
            Self::Balancing => "Balancing",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Scraping => 0,
            Self::VectorSearch => 1,
            Self::HardMatching => 2,
            Self::Balancing => 3,
        }
    }

    /// How long the phase lasts on the synthetic timeline.
    fn synthetic_duration(&self) -> Duration {
        match self {
            Self::Scraping => Duration::from_secs(30),
            Self::VectorSearch => Duration::from_secs(3),
            Self::HardMatching => Duration::from_secs(5),
            Self::Balancing => Duration::from_secs(2),
        }
    }

    /// Overall percentage shown while the phase is active (synthetic mode).
    fn synthetic_percent(&self) -> u8 {
        match self {
            Self::Scraping => 40,
            Self::VectorSearch => 60,
            Self::HardMatching => 80,
            Self::Balancing => 100,
        }
    }

    fn synthetic_message(&self) -> &'static str {
        match self {
            Self::Scraping => "Scraping Naukri, LinkedIn, StackOverflow, GitHub...",
            Self::VectorSearch => "Searching Vector DB for relevant candidates...",
            Self::HardMatching => "Matching skills and experience requirements...",
            Self::Balancing => "Balancing results across sources...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseState {
    #[default]
    Waiting,
    Active,
    Completed,
}

impl PhaseState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Waiting => "Waiting...",
            Self::Active => "Processing...",
            Self::Completed => "Done",
        }
    }
}

/// Where phase state comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressSource {
    /// The backend's progress resource
    #[default]
    Server,
    /// Fixed timeline from the moment polling starts
    Synthetic,
}

/// 1-based phase number for a server step name. Unknown steps count as the
/// first phase.
pub fn step_for(step_name: &str) -> usize {
    match step_name.trim().to_ascii_lowercase().as_str() {
        "extracting" => 1,
        "searching" => 2,
        "building" => 3,
        "matching" | "completed" => 4,
        _ => 1,
    }
}

/// Everything the progress panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub phases: [PhaseState; 4],
    pub percent: u8,
    pub message: String,
    pub candidates_found: u32,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self::initializing()
    }
}

impl ProgressSnapshot {
    /// State before the first poll returns.
    pub fn initializing() -> Self {
        Self {
            phases: [PhaseState::Waiting; 4],
            percent: 0,
            message: "Initializing AI agents...".to_string(),
            candidates_found: 0,
        }
    }

    fn with_current(step: usize) -> [PhaseState; 4] {
        let mut phases = [PhaseState::Waiting; 4];
        for (i, phase) in phases.iter_mut().enumerate() {
            *phase = match (i + 1).cmp(&step) {
                std::cmp::Ordering::Less => PhaseState::Completed,
                std::cmp::Ordering::Equal => PhaseState::Active,
                std::cmp::Ordering::Greater => PhaseState::Waiting,
            };
        }
        phases
    }

    pub fn from_server(progress: &JobProgress) -> Self {
        let step = step_for(&progress.step_name);
        let mut phases = Self::with_current(step);
        if progress.step_name.eq_ignore_ascii_case("completed") {
            phases = [PhaseState::Completed; 4];
        }
        Self {
            phases,
            percent: progress.percent(),
            message: progress.message.clone(),
            candidates_found: progress.candidates_found,
        }
    }

    /// Position on the fixed timeline after `elapsed`.
    pub fn synthetic(elapsed: Duration) -> Self {
        let mut end = Duration::ZERO;
        for phase in Phase::ALL {
            end += phase.synthetic_duration();
            if elapsed < end {
                return Self {
                    phases: Self::with_current(phase.index() + 1),
                    percent: phase.synthetic_percent(),
                    message: phase.synthetic_message().to_string(),
                    candidates_found: 0,
                };
            }
        }
        Self {
            phases: [PhaseState::Completed; 4],
            percent: 100,
            message: Phase::Balancing.synthetic_message().to_string(),
            candidates_found: 0,
        }
    }

    /// Overlay the "candidates found" state once matching has begun.
    pub fn matching(mut self, candidates: usize) -> Self {
        self.percent = self.percent.max(75);
        self.message = format!("✅ Found {candidates} candidates! Now matching...");
        self.candidates_found = candidates as u32;
        self
    }

    pub fn phase_state(&self, phase: Phase) -> PhaseState {
        self.phases[phase.index()]
    }

    /// The phase currently running, if any.
    pub fn active_phase(&self) -> Option<Phase> {
        Phase::ALL
            .into_iter()
            .find(|p| self.phase_state(*p) == PhaseState::Active)
    }
}
