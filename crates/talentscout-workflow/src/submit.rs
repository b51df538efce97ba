//! Job submission: create, poll, then refresh the dashboard.

use crate::events::{Notification, WorkflowEnd, WorkflowEvent};
use crate::poller::{PollOutcome, Poller};
use crate::progress::ProgressSnapshot;
use std::sync::Arc;
use talentscout_api::Backend;
use talentscout_core::JobDraft;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

pub const MSG_POLL_ERROR: &str = "Error checking job status";
pub const MSG_JOB_FAILED: &str = "Job processing failed. Please try again.";
pub const MSG_STILL_PROCESSING: &str =
    "Job is still processing. Refresh in a minute to see results.";

/// Drives one submission from the create request to the final reload.
///
/// All UI effects are reported as [`WorkflowEvent`]s; the controller never
/// touches dashboard state.
pub struct SubmissionController<B> {
    backend: Arc<B>,
    poller: Poller,
    events: UnboundedSender<WorkflowEvent>,
}

impl<B: Backend> SubmissionController<B> {
    pub fn new(backend: Arc<B>, poller: Poller, events: UnboundedSender<WorkflowEvent>) -> Self {
        Self {
            backend,
            poller,
            events,
        }
    }

    fn emit(&self, event: WorkflowEvent) {
        // The receiver only goes away when the app is shutting down.
        let _ = self.events.send(event);
    }

    fn finish(&self, end: WorkflowEnd) -> WorkflowEnd {
        self.emit(WorkflowEvent::Finished(end));
        end
    }

    /// Submit a job and follow it to the end.
    pub async fn submit(&self, draft: JobDraft, cancel: CancellationToken) -> WorkflowEnd {
        self.emit(WorkflowEvent::Started {
            title: draft.title.clone(),
        });
        self.emit(WorkflowEvent::Progress(ProgressSnapshot::initializing()));

        let created = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Submission of '{}' cancelled", draft.title);
                return self.finish(WorkflowEnd::Cancelled);
            }
            created = self.backend.create_job(&draft) => created,
        };
        let job = match created {
            Ok(job) => job,
            Err(e) => {
                tracing::error!("Failed to create job '{}': {}", draft.title, e);
                self.finish(WorkflowEnd::Rejected);
                self.emit(WorkflowEvent::Alert(format!("Error creating job: {e}")));
                return WorkflowEnd::Rejected;
            }
        };

        tracing::info!("Submitted job {}", job.id);
        self.emit(WorkflowEvent::Submitted {
            job_id: job.id.clone(),
        });

        let outcome = self
            .poller
            .run(self.backend.as_ref(), &job.id, &cancel, &self.events)
            .await;

        match outcome {
            PollOutcome::Completed(job) => {
                let count = job.candidate_count();
                tracing::info!("Job {} completed with {} candidates", job.id, count);
                let end = self.finish(WorkflowEnd::Completed { candidates: count });
                self.emit(load_jobs(self.backend.as_ref(), true).await);
                self.emit(WorkflowEvent::Notify(Notification::success(format!(
                    "Matched {count} top candidates!"
                ))));
                end
            }
            PollOutcome::Failed(job) => {
                tracing::warn!("Job {} failed", job.id);
                let end = self.finish(WorkflowEnd::Failed);
                self.emit(WorkflowEvent::Notify(Notification::error(MSG_JOB_FAILED)));
                end
            }
            PollOutcome::TimedOut { attempts } => {
                tracing::warn!("Gave up on job {} after {} polls", job.id, attempts);
                let end = self.finish(WorkflowEnd::TimedOut);
                self.emit(WorkflowEvent::Notify(Notification::warning(
                    MSG_STILL_PROCESSING,
                )));
                self.emit(load_jobs(self.backend.as_ref(), false).await);
                end
            }
            PollOutcome::Errored(_) => {
                let end = self.finish(WorkflowEnd::Errored);
                self.emit(WorkflowEvent::Notify(Notification::error(MSG_POLL_ERROR)));
                end
            }
            PollOutcome::Cancelled => {
                tracing::info!("Stopped following job {}", job.id);
                self.finish(WorkflowEnd::Cancelled)
            }
        }
    }
}

/// Fetch the job list as a dashboard event.
pub async fn load_jobs<B: Backend>(backend: &B, auto_expand_latest: bool) -> WorkflowEvent {
    match backend.list_jobs().await {
        Ok(jobs) => {
            tracing::debug!("Loaded {} jobs", jobs.len());
            WorkflowEvent::JobsLoaded {
                jobs,
                auto_expand_latest,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to load jobs: {}", e);
            WorkflowEvent::JobsUnavailable(e.to_string())
        }
    }
}

/// Fetch a detailed profile. Failures resolve to `None` so the overlay keeps
/// the summary it already shows.
pub async fn lookup_profile<B: Backend>(backend: &B, candidate_id: &str) -> WorkflowEvent {
    let profile = match backend.get_candidate_profile(candidate_id).await {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::debug!("Profile for {} unavailable: {}", candidate_id, e);
            None
        }
    };
    WorkflowEvent::ProfileLoaded {
        candidate_id: candidate_id.to_string(),
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NotificationLevel;
    use crate::poller::PollerConfig;
    use crate::progress::{Phase, ProgressSource};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use talentscout_api::ApiError;
    use talentscout_core::{
        Candidate, CandidateOverlay, Dashboard, DashboardEvent, HealthStatus, Job, JobProgress,
        JobStatus, MatchedCandidate, StalePagePolicy,
    };
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    #[derive(Clone)]
    enum Step {
        Status(JobStatus, usize),
        Broken,
    }

    enum ProgressScript {
        Missing,
        Fixed(JobProgress),
        Broken,
    }

    /// Fake backend answering status polls from a script; the last step
    /// repeats once the script runs out.
    struct ScriptedBackend {
        script: Vec<Step>,
        progress: ProgressScript,
        create_fails: bool,
        listing: Option<Vec<Job>>,
        profile: Option<Candidate>,
        status_calls: AtomicU32,
        list_calls: AtomicU32,
        created: Mutex<Vec<JobDraft>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Step>) -> Self {
            Self {
                script,
                progress: ProgressScript::Missing,
                create_fails: false,
                listing: Some(vec![job("J1", JobStatus::Completed, 3), job("J0", JobStatus::Completed, 1)]),
                profile: None,
                status_calls: AtomicU32::new(0),
                list_calls: AtomicU32::new(0),
                created: Mutex::new(Vec::new()),
            }
        }

        fn status_calls(&self) -> u32 {
            self.status_calls.load(Ordering::SeqCst)
        }

        fn list_calls(&self) -> u32 {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    fn server_error(path: &str) -> ApiError {
        ApiError::Status {
            url: format!("http://backend{path}"),
            status: 500,
            body: "internal error".to_string(),
        }
    }

    impl Backend for ScriptedBackend {
        async fn create_job(&self, draft: &JobDraft) -> Result<Job, ApiError> {
            if self.create_fails {
                return Err(server_error("/jobs"));
            }
            self.created.lock().unwrap().push(draft.clone());
            let mut job = job("J1", JobStatus::Processing, 0);
            job.title = draft.title.clone();
            Ok(job)
        }

        async fn get_job(&self, job_id: &str) -> Result<Job, ApiError> {
            let call = self.status_calls.fetch_add(1, Ordering::SeqCst) as usize;
            let step = self
                .script
                .get(call)
                .or(self.script.last())
                .cloned()
                .unwrap_or(Step::Status(JobStatus::Processing, 0));
            match step {
                Step::Status(status, n) => Ok(job(job_id, status, n)),
                Step::Broken => Err(server_error("/jobs/J1")),
            }
        }

        async fn get_job_progress(&self, job_id: &str) -> Result<JobProgress, ApiError> {
            match &self.progress {
                ProgressScript::Missing => Err(ApiError::NotFound {
                    url: format!("http://backend/jobs/{job_id}/progress"),
                }),
                ProgressScript::Fixed(progress) => Ok(progress.clone()),
                ProgressScript::Broken => Err(server_error("/progress")),
            }
        }

        async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.listing
                .clone()
                .ok_or_else(|| server_error("/api/jobs/all"))
        }

        async fn get_candidate_profile(&self, candidate_id: &str) -> Result<Candidate, ApiError> {
            self.profile
                .clone()
                .filter(|p| p.id == candidate_id)
                .ok_or_else(|| server_error("/api/candidate/profile"))
        }

        async fn health(&self) -> Result<HealthStatus, ApiError> {
            Ok(HealthStatus {
                status: "healthy".to_string(),
                ..Default::default()
            })
        }
    }

    fn job(id: &str, status: JobStatus, candidates: usize) -> Job {
        Job {
            id: id.to_string(),
            title: "Backend Engineer".to_string(),
            status,
            candidates: (0..candidates)
                .map(|i| MatchedCandidate {
                    candidate: Candidate {
                        id: format!("c{}", i + 1),
                        name: format!("Candidate {}", i + 1),
                        ..Default::default()
                    },
                    match_score: 0.9 - i as f64 * 0.1,
                    match_breakdown: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn draft() -> JobDraft {
        JobDraft {
            title: "Backend Engineer".to_string(),
            description: "Build APIs".to_string(),
            required_skills: vec!["Go".to_string(), "Rust".to_string()],
            experience_years: 3,
            location: "Remote".to_string(),
        }
    }

    fn controller(
        backend: &Arc<ScriptedBackend>,
        config: PollerConfig,
    ) -> (
        SubmissionController<ScriptedBackend>,
        UnboundedReceiver<WorkflowEvent>,
    ) {
        let (tx, rx) = unbounded_channel();
        (
            SubmissionController::new(Arc::clone(backend), Poller::new(config), tx),
            rx,
        )
    }

    fn drain(rx: &mut UnboundedReceiver<WorkflowEvent>) -> Vec<WorkflowEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn position(events: &[WorkflowEvent], pred: impl Fn(&WorkflowEvent) -> bool) -> Option<usize> {
        events.iter().position(pred)
    }

    fn notifications(events: &[WorkflowEvent]) -> Vec<&Notification> {
        events
            .iter()
            .filter_map(|e| match e {
                WorkflowEvent::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_job_reloads_and_expands_latest() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Step::Status(JobStatus::Processing, 0),
            Step::Status(JobStatus::Processing, 1),
            Step::Status(JobStatus::Completed, 3),
        ]));
        let (controller, mut rx) = controller(&backend, PollerConfig::default());

        let end = controller.submit(draft(), CancellationToken::new()).await;
        let events = drain(&mut rx);

        assert_eq!(end, WorkflowEnd::Completed { candidates: 3 });
        assert_eq!(backend.status_calls(), 3);
        assert_eq!(backend.created.lock().unwrap()[0].required_skills, vec!["Go", "Rust"]);

        let matching: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, WorkflowEvent::MatchingStarted { .. }))
            .collect();
        assert_eq!(matching, vec![&WorkflowEvent::MatchingStarted { candidates: 1 }]);

        let finished = position(&events, |e| matches!(e, WorkflowEvent::Finished(_))).unwrap();
        let loaded = position(&events, |e| {
            matches!(e, WorkflowEvent::JobsLoaded { auto_expand_latest: true, .. })
        })
        .unwrap();
        let notified = position(&events, |e| matches!(e, WorkflowEvent::Notify(_))).unwrap();
        assert!(finished < loaded && loaded < notified);
        assert_eq!(
            notifications(&events),
            vec![&Notification::success("Matched 3 top candidates!")]
        );

        // A job the user had open is replaced by the new one.
        let mut dashboard = Dashboard::new(StalePagePolicy::Clamp).apply(DashboardEvent::JobsLoaded {
            jobs: vec![job("J0", JobStatus::Completed, 1)],
            auto_expand_latest: false,
        });
        assert_eq!(dashboard.expanded_id(), Some("J0"));
        if let WorkflowEvent::JobsLoaded {
            jobs,
            auto_expand_latest,
        } = events[loaded].clone()
        {
            dashboard = dashboard.apply(DashboardEvent::JobsLoaded {
                jobs,
                auto_expand_latest,
            });
        }
        assert_eq!(dashboard.expanded_id(), Some("J1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_synthetic_progress_shows_matching_text() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Step::Status(JobStatus::Processing, 0),
            Step::Status(JobStatus::Processing, 2),
            Step::Status(JobStatus::Completed, 2),
        ]));
        let (controller, mut rx) = controller(&backend, PollerConfig::default());
        controller.submit(draft(), CancellationToken::new()).await;

        let snapshots: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                WorkflowEvent::Progress(s) => Some(s),
                _ => None,
            })
            .collect();
        // Initializing, then one per non-terminal poll.
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[0].percent, 0);
        assert_eq!(snapshots[1].active_phase(), Some(Phase::Scraping));
        assert_eq!(snapshots[2].percent, 75);
        assert_eq!(snapshots[2].message, "✅ Found 2 candidates! Now matching...");
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_progress_drives_phases() {
        let mut backend = ScriptedBackend::new(vec![
            Step::Status(JobStatus::Processing, 0),
            Step::Status(JobStatus::Completed, 2),
        ]);
        backend.progress = ProgressScript::Fixed(JobProgress {
            step_name: "searching".to_string(),
            progress: 45.0,
            message: "Searching vector DB".to_string(),
            candidates_found: 7,
        });
        let backend = Arc::new(backend);
        let (controller, mut rx) = controller(&backend, PollerConfig::default());
        controller.submit(draft(), CancellationToken::new()).await;

        let snapshot = drain(&mut rx)
            .into_iter()
            .find_map(|e| match e {
                WorkflowEvent::Progress(s) if s.percent > 0 => Some(s),
                _ => None,
            })
            .unwrap();
        assert_eq!(snapshot.active_phase(), Some(Phase::VectorSearch));
        assert_eq!(snapshot.percent, 45);
        assert_eq!(snapshot.message, "Searching vector DB");
        assert_eq!(snapshot.candidates_found, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_failure_aborts_poll() {
        let mut backend = ScriptedBackend::new(vec![Step::Status(JobStatus::Processing, 0)]);
        backend.progress = ProgressScript::Broken;
        let backend = Arc::new(backend);
        let (controller, mut rx) = controller(&backend, PollerConfig::default());

        let end = controller.submit(draft(), CancellationToken::new()).await;
        assert_eq!(end, WorkflowEnd::Errored);
        assert_eq!(backend.status_calls(), 1);
        assert_eq!(
            notifications(&drain(&mut rx)),
            vec![&Notification::error(MSG_POLL_ERROR)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let backend = Arc::new(ScriptedBackend::new(vec![Step::Status(
            JobStatus::Processing,
            0,
        )]));
        let config = PollerConfig {
            interval: Duration::from_millis(2000),
            max_attempts: 90,
            progress_source: ProgressSource::Synthetic,
        };
        let (controller, mut rx) = controller(&backend, config);

        let start = tokio::time::Instant::now();
        let end = controller.submit(draft(), CancellationToken::new()).await;
        let elapsed = start.elapsed();
        let events = drain(&mut rx);

        assert_eq!(end, WorkflowEnd::TimedOut);
        assert_eq!(backend.status_calls(), 90);
        assert!(elapsed >= Duration::from_secs(178) && elapsed < Duration::from_secs(180));

        let warned = position(&events, |e| {
            matches!(e, WorkflowEvent::Notify(n) if n.level == NotificationLevel::Warning)
        })
        .unwrap();
        let loaded = position(&events, |e| {
            matches!(e, WorkflowEvent::JobsLoaded { auto_expand_latest: false, .. })
        })
        .unwrap();
        assert!(warned < loaded);
        assert_eq!(
            notifications(&events),
            vec![&Notification::warning(MSG_STILL_PROCESSING)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_stops_without_reload() {
        let mut script = vec![Step::Status(JobStatus::Processing, 0); 4];
        script.push(Step::Status(JobStatus::Failed, 0));
        let backend = Arc::new(ScriptedBackend::new(script));
        let (controller, mut rx) = controller(&backend, PollerConfig::default());

        let end = controller.submit(draft(), CancellationToken::new()).await;
        let events = drain(&mut rx);

        assert_eq!(end, WorkflowEnd::Failed);
        assert_eq!(backend.status_calls(), 5);
        assert_eq!(backend.list_calls(), 0);
        assert!(!events.iter().any(|e| matches!(e, WorkflowEvent::JobsLoaded { .. })));
        assert_eq!(
            notifications(&events),
            vec![&Notification::error(MSG_JOB_FAILED)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_error_is_not_retried() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Step::Status(JobStatus::Processing, 0),
            Step::Broken,
            Step::Status(JobStatus::Completed, 3),
        ]));
        let (controller, mut rx) = controller(&backend, PollerConfig::default());

        let end = controller.submit(draft(), CancellationToken::new()).await;
        let events = drain(&mut rx);

        assert_eq!(end, WorkflowEnd::Errored);
        assert_eq!(backend.status_calls(), 2);
        assert_eq!(backend.list_calls(), 0);
        assert!(events.contains(&WorkflowEvent::Finished(WorkflowEnd::Errored)));
        assert_eq!(
            notifications(&events),
            vec![&Notification::error(MSG_POLL_ERROR)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_failure_raises_alert() {
        let mut backend = ScriptedBackend::new(vec![]);
        backend.create_fails = true;
        let backend = Arc::new(backend);
        let (controller, mut rx) = controller(&backend, PollerConfig::default());

        let end = controller.submit(draft(), CancellationToken::new()).await;
        let events = drain(&mut rx);

        assert_eq!(end, WorkflowEnd::Rejected);
        assert_eq!(backend.status_calls(), 0);
        assert!(!events.iter().any(|e| matches!(e, WorkflowEvent::Submitted { .. })));
        let finished = position(&events, |e| {
            *e == WorkflowEvent::Finished(WorkflowEnd::Rejected)
        })
        .unwrap();
        let alert = position(&events, |e| matches!(e, WorkflowEvent::Alert(_))).unwrap();
        assert!(finished < alert);
        assert!(notifications(&events).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_quietly() {
        let backend = Arc::new(ScriptedBackend::new(vec![Step::Status(
            JobStatus::Processing,
            0,
        )]));
        let (controller, mut rx) = controller(&backend, PollerConfig::default());
        let cancel = CancellationToken::new();

        let (end, _) = tokio::join!(controller.submit(draft(), cancel.clone()), async {
            tokio::time::sleep(Duration::from_millis(3500)).await;
            cancel.cancel();
        });
        let events = drain(&mut rx);

        assert_eq!(end, WorkflowEnd::Cancelled);
        // Polls at 0s, 1s, 2s and 3s.
        assert_eq!(backend.status_calls(), 4);
        assert!(events.contains(&WorkflowEvent::Finished(WorkflowEnd::Cancelled)));
        assert!(notifications(&events).is_empty());
    }

    #[tokio::test]
    async fn test_load_jobs_unavailable() {
        let mut backend = ScriptedBackend::new(vec![]);
        backend.listing = None;
        assert!(matches!(
            load_jobs(&backend, false).await,
            WorkflowEvent::JobsUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_profile_failure_falls_back_to_summary() {
        let backend = ScriptedBackend::new(vec![]);
        let summary = job("J1", JobStatus::Completed, 1).candidates[0].candidate.clone();

        let mut overlay = CandidateOverlay::default();
        overlay.open(summary.clone());
        match lookup_profile(&backend, &summary.id).await {
            WorkflowEvent::ProfileLoaded {
                candidate_id,
                profile,
            } => {
                assert!(profile.is_none());
                assert!(overlay.resolve(&candidate_id, profile));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(
            overlay,
            CandidateOverlay::Ready {
                candidate: summary,
                detailed: false
            }
        );
    }

    #[tokio::test]
    async fn test_profile_lookup_success() {
        let mut backend = ScriptedBackend::new(vec![]);
        backend.profile = Some(Candidate {
            id: "c1".to_string(),
            name: "Ada".to_string(),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        });
        match lookup_profile(&backend, "c1").await {
            WorkflowEvent::ProfileLoaded { profile, .. } => {
                assert_eq!(profile.unwrap().email.as_deref(), Some("ada@example.com"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
