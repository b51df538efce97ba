//! Background status polling for a submitted job.

use crate::events::WorkflowEvent;
use crate::progress::{ProgressSnapshot, ProgressSource};
use std::time::Duration;
use talentscout_api::{ApiError, Backend};
use talentscout_core::{Job, JobProgress, JobStatus};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Configuration for the poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between status fetches.
    pub interval: Duration,
    /// Status fetches before giving up.
    pub max_attempts: u32,
    pub progress_source: ProgressSource,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            max_attempts: 180,
            progress_source: ProgressSource::Server,
        }
    }
}

/// Result of one polling run.
#[derive(Debug)]
pub enum PollOutcome {
    Completed(Job),
    Failed(Job),
    /// `max_attempts` fetches without a terminal status
    TimedOut { attempts: u32 },
    Errored(ApiError),
    Cancelled,
}

/// What a single observation means for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Processing {
        /// Set only on the first poll that saw candidates
        matching_started: Option<usize>,
    },
    Completed,
    Failed,
    Exhausted,
}

/// Bookkeeping across poll cycles, independent of timers and I/O.
#[derive(Debug, Clone)]
pub struct PollTracker {
    max_attempts: u32,
    attempts: u32,
    matching_latched: bool,
    last_count: usize,
}

impl PollTracker {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            attempts: 0,
            matching_latched: false,
            last_count: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn matching_latched(&self) -> bool {
        self.matching_latched
    }

    /// Record one fetched job state.
    pub fn observe(&mut self, job: &Job) -> Observation {
        self.attempts += 1;

        let count = job.candidate_count();
        if count < self.last_count {
            tracing::warn!(
                "Job {} candidate count shrank from {} to {}",
                job.id,
                self.last_count,
                count
            );
        }
        self.last_count = count;

        match job.status {
            JobStatus::Completed => return Observation::Completed,
            JobStatus::Failed => return Observation::Failed,
            JobStatus::Processing => {}
        }

        let matching_started = if !self.matching_latched && count > 0 {
            self.matching_latched = true;
            Some(count)
        } else {
            None
        };

        if self.attempts >= self.max_attempts && matching_started.is_none() {
            return Observation::Exhausted;
        }
        Observation::Processing { matching_started }
    }

    pub fn exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}

/// Polls one job until it reaches a terminal status, the attempt bound is
/// hit, a request fails, or the run is cancelled.
#[derive(Debug, Clone, Default)]
pub struct Poller {
    config: PollerConfig,
}

impl Poller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub async fn run<B: Backend>(
        &self,
        backend: &B,
        job_id: &str,
        cancel: &CancellationToken,
        events: &UnboundedSender<WorkflowEvent>,
    ) -> PollOutcome {
        let started = Instant::now();
        let mut source = self.config.progress_source;
        let mut tracker = PollTracker::new(self.config.max_attempts);
        let mut latched_count = None;

        // First tick completes immediately.
        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            "Polling job {} every {}ms (max {} attempts, {:?} progress)",
            job_id,
            self.config.interval.as_millis(),
            self.config.max_attempts,
            source
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                _ = ticker.tick() => {}
            }

            let cycle = tokio::select! {
                biased;
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                cycle = fetch_cycle(backend, job_id, &mut source) => cycle,
            };
            let (job, progress) = match cycle {
                Ok(cycle) => cycle,
                Err(e) => {
                    tracing::error!("Error polling job {}: {}", job_id, e);
                    return PollOutcome::Errored(e);
                }
            };

            let observation = tracker.observe(&job);
            tracing::debug!(
                "Poll {} for job {}: {:?} with {} candidates",
                tracker.attempts(),
                job_id,
                job.status,
                job.candidate_count()
            );

            match observation {
                Observation::Completed => return PollOutcome::Completed(job),
                Observation::Failed => return PollOutcome::Failed(job),
                Observation::Exhausted => {
                    tracing::warn!(
                        "Job {} still processing after {} attempts",
                        job_id,
                        tracker.attempts()
                    );
                    return PollOutcome::TimedOut {
                        attempts: tracker.attempts(),
                    };
                }
                Observation::Processing { matching_started } => {
                    if let Some(count) = matching_started {
                        tracing::info!("Job {} found {} candidates, matching", job_id, count);
                        latched_count = Some(count);
                        let _ = events.send(WorkflowEvent::MatchingStarted { candidates: count });
                    }

                    let mut snapshot = match (&source, progress) {
                        (ProgressSource::Server, Some(progress)) => {
                            ProgressSnapshot::from_server(&progress)
                        }
                        _ => {
                            let snapshot = ProgressSnapshot::synthetic(started.elapsed());
                            match latched_count {
                                Some(count) => snapshot.matching(count),
                                None => snapshot,
                            }
                        }
                    };
                    if snapshot.candidates_found == 0 {
                        snapshot.candidates_found = job.candidate_count() as u32;
                    }
                    let _ = events.send(WorkflowEvent::Progress(snapshot));

                    if tracker.exhausted() {
                        return PollOutcome::TimedOut {
                            attempts: tracker.attempts(),
                        };
                    }
                }
            }
        }
    }
}

/// Fetch status, and server progress when that source is active, concurrently.
///
/// A missing progress resource switches the run to the synthetic timeline.
async fn fetch_cycle<B: Backend>(
    backend: &B,
    job_id: &str,
    source: &mut ProgressSource,
) -> Result<(Job, Option<JobProgress>), ApiError> {
    match source {
        ProgressSource::Synthetic => Ok((backend.get_job(job_id).await?, None)),
        ProgressSource::Server => {
            let (job, progress) =
                tokio::join!(backend.get_job(job_id), backend.get_job_progress(job_id));
            let job = job?;
            match progress {
                Ok(progress) => Ok((job, Some(progress))),
                Err(e) if e.is_not_found() => {
                    tracing::warn!(
                        "No progress resource for job {}, using synthetic progress",
                        job_id
                    );
                    *source = ProgressSource::Synthetic;
                    Ok((job, None))
                }
                Err(e) => Err(e),
            }
        }
    }
}
