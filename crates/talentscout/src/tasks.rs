//! Background work started from the dashboard.

use std::sync::Arc;
use talentscout_api::Backend;
use talentscout_core::JobDraft;
use talentscout_monitor::Action;
use talentscout_workflow::{Poller, SubmissionController, WorkflowEvent, load_jobs, lookup_profile};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Spawns backend work on the runtime and reports through the event channel.
pub struct TaskRunner<B> {
    backend: Arc<B>,
    poller: Poller,
    events: UnboundedSender<WorkflowEvent>,
    runtime: Handle,
    /// Parent of every workflow token; cancelled on exit
    shutdown: CancellationToken,
    workflow: Option<CancellationToken>,
}

impl<B: Backend + 'static> TaskRunner<B> {
    pub fn new(
        backend: Arc<B>,
        poller: Poller,
        events: UnboundedSender<WorkflowEvent>,
        runtime: Handle,
    ) -> Self {
        Self {
            backend,
            poller,
            events,
            runtime,
            shutdown: CancellationToken::new(),
            workflow: None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Submit(draft) => self.submit(draft),
            Action::CancelWorkflow => self.cancel_workflow(),
            Action::Refresh => self.refresh(false),
            Action::LoadProfile(candidate_id) => self.load_profile(candidate_id),
        }
    }

    fn submit(&mut self, draft: JobDraft) {
        let cancel = self.shutdown.child_token();
        self.workflow = Some(cancel.clone());

        let controller = SubmissionController::new(
            Arc::clone(&self.backend),
            self.poller.clone(),
            self.events.clone(),
        );
        self.runtime.spawn(async move {
            let end = controller.submit(draft, cancel).await;
            tracing::debug!("Workflow ended: {:?}", end);
        });
    }

    fn cancel_workflow(&mut self) {
        if let Some(token) = self.workflow.take() {
            tracing::info!("Cancelling running workflow");
            token.cancel();
        }
    }

    /// Reload the job list.
    pub fn refresh(&self, auto_expand_latest: bool) {
        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let _ = events.send(load_jobs(backend.as_ref(), auto_expand_latest).await);
        });
    }

    fn load_profile(&self, candidate_id: String) {
        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let _ = events.send(lookup_profile(backend.as_ref(), &candidate_id).await);
        });
    }

    /// Log whether the backend answers; never fatal.
    pub fn check_health(&self) {
        let backend = Arc::clone(&self.backend);
        self.runtime.spawn(async move {
            match backend.health().await {
                Ok(health) => tracing::info!(
                    "Backend {} (database: {}, {} candidates, {} jobs)",
                    health.status,
                    health.database.as_deref().unwrap_or("unknown"),
                    health.candidates_count.unwrap_or_default(),
                    health.jobs_count.unwrap_or_default()
                ),
                Err(e) => tracing::warn!("Backend health check failed: {}", e),
            }
        });
    }

    /// Stop every running workflow.
    pub fn shutdown(&mut self) {
        self.workflow = None;
        self.shutdown.cancel();
    }
}
