//! Main TUI application.

use crate::components::{
    CandidateDetail, Footer, Header, JobFormView, JobList, ProgressPanel, WorkflowView,
    candidate_detail::contact_text,
};
use crate::ui::Theme;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::time::{Duration, Instant};
use talentscout_core::{
    CandidateOverlay, Dashboard, DashboardEvent, FormError, FormField, JobDraft, JobForm,
    StalePagePolicy,
};
use talentscout_workflow::{Notification, WorkflowEnd, WorkflowEvent};

/// How long a notification stays in the footer.
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Work the app asks the event loop to start.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Submit(JobDraft),
    CancelWorkflow,
    /// Reload the job list without changing the expansion
    Refresh,
    LoadProfile(String),
}

/// Which part of the dashboard the cursor keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Jobs,
    /// Rows of the expanded job's current page
    Candidates,
}

/// A re-run waiting for y/n.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRerun {
    pub job_id: String,
    pub title: String,
    pub draft: JobDraft,
}

/// Main application state.
pub struct App {
    pub dashboard: Dashboard,
    pub overlay: CandidateOverlay,
    pub form: JobForm,
    pub form_field: FormField,
    pub form_error: Option<FormError>,
    pub show_form: bool,
    pub workflow: Option<WorkflowView>,
    pub alert: Option<String>,
    pub confirm: Option<PendingRerun>,
    pub show_help: bool,
    pub should_quit: bool,
    pub focus: Focus,
    pub selected_job: usize,
    pub selected_candidate: usize,
    pub theme: Theme,
    api_url: String,
    status_message: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(policy: StalePagePolicy, theme: Theme, api_url: impl Into<String>) -> Self {
        Self {
            dashboard: Dashboard::new(policy),
            overlay: CandidateOverlay::default(),
            form: JobForm::default(),
            form_field: FormField::Title,
            form_error: None,
            show_form: false,
            workflow: None,
            alert: None,
            confirm: None,
            show_help: false,
            should_quit: false,
            focus: Focus::default(),
            selected_job: 0,
            selected_candidate: 0,
            theme,
            api_url: api_url.into(),
            status_message: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.status_message = Some((notification, Instant::now()));
    }

    /// Notification still within its display window.
    pub fn current_notification(&self) -> Option<&Notification> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_TIMEOUT)
            .map(|(n, _)| n)
    }

    pub fn workflow_active(&self) -> bool {
        self.workflow.is_some()
    }

    fn update_dashboard(&mut self, event: DashboardEvent) {
        self.dashboard = std::mem::take(&mut self.dashboard).apply(event);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let jobs = self.dashboard.jobs().len();
        self.selected_job = self.selected_job.min(jobs.saturating_sub(1));

        let rows = self.expanded_rows();
        if rows == 0 {
            self.focus = Focus::Jobs;
            self.selected_candidate = 0;
        } else {
            self.selected_candidate = self.selected_candidate.min(rows - 1);
        }
    }

    /// Rows on the expanded job's current page.
    fn expanded_rows(&self) -> usize {
        self.dashboard
            .expanded_id()
            .and_then(|id| self.dashboard.page_for(id))
            .map(|page| page.rows.len())
            .unwrap_or(0)
    }

    fn selected_job_id(&self) -> Option<String> {
        self.dashboard
            .jobs()
            .get(self.selected_job)
            .map(|j| j.id.clone())
    }

    /// Apply a message from a background task.
    pub fn apply_event(&mut self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::Started { title } => {
                self.workflow = Some(WorkflowView::new(title));
            }
            WorkflowEvent::Submitted { job_id } => {
                if let Some(view) = self.workflow.as_mut() {
                    view.job_id = Some(job_id);
                }
            }
            WorkflowEvent::Progress(snapshot) => {
                if let Some(view) = self.workflow.as_mut() {
                    view.progress = snapshot;
                }
            }
            WorkflowEvent::MatchingStarted { candidates } => {
                if let Some(view) = self.workflow.as_mut() {
                    view.matching = Some(candidates);
                }
            }
            WorkflowEvent::Finished(end) => {
                self.workflow = None;
                if let WorkflowEnd::Completed { .. } = end {
                    self.form.clear();
                    self.form_field = FormField::Title;
                    self.form_error = None;
                }
            }
            WorkflowEvent::Alert(message) => {
                self.alert = Some(message);
            }
            WorkflowEvent::JobsLoaded {
                jobs,
                auto_expand_latest,
            } => {
                if auto_expand_latest {
                    self.selected_job = 0;
                    self.focus = Focus::Jobs;
                }
                self.update_dashboard(DashboardEvent::JobsLoaded {
                    jobs,
                    auto_expand_latest,
                });
            }
            WorkflowEvent::JobsUnavailable(_) => {
                self.update_dashboard(DashboardEvent::JobsUnavailable);
            }
            WorkflowEvent::ProfileLoaded {
                candidate_id,
                profile,
            } => {
                self.overlay.resolve(&candidate_id, profile);
            }
            WorkflowEvent::Notify(notification) => self.notify(notification),
        }
    }

    /// Handle a key event, returning work for the event loop.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return None;
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return None;
        }

        if let Some(pending) = self.confirm.take() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.start_submission(pending.draft),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => None,
                _ => {
                    self.confirm = Some(pending);
                    None
                }
            };
        }

        if self.overlay.is_open() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => self.overlay.close(),
                KeyCode::Char('c') => self.copy_contact(),
                _ => {}
            }
            return None;
        }

        if self.show_form {
            return self.handle_form_key(key);
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc if self.workflow_active() => return Some(Action::CancelWorkflow),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('n') => {
                self.show_form = true;
                self.form_error = None;
            }
            KeyCode::Char('R') | KeyCode::F(5) => return Some(Action::Refresh),
            KeyCode::Char('r') => self.request_rerun(),
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Char('l') | KeyCode::Right => self.change_page(true),
            KeyCode::Char('h') | KeyCode::Left => self.change_page(false),
            KeyCode::Tab => self.toggle_focus(),
            KeyCode::Enter => return self.activate(),
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => self.show_form = false,
            KeyCode::Tab | KeyCode::Down => self.form_field = self.form_field.next(),
            KeyCode::BackTab | KeyCode::Up => self.form_field = self.form_field.previous(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.submit_form();
            }
            KeyCode::Enter if self.form_field == FormField::Location => return self.submit_form(),
            KeyCode::Enter => self.form_field = self.form_field.next(),
            KeyCode::Backspace => {
                self.form.field_mut(self.form_field).pop();
            }
            KeyCode::Char(c) => self.form.field_mut(self.form_field).push(c),
            _ => {}
        }
        None
    }

    fn submit_form(&mut self) -> Option<Action> {
        match JobDraft::parse(&self.form) {
            Ok(draft) => {
                self.form_error = None;
                let action = self.start_submission(draft);
                if action.is_some() {
                    self.show_form = false;
                }
                action
            }
            Err(err) => {
                self.form_field = err.field();
                self.form_error = Some(err);
                None
            }
        }
    }

    /// Only one workflow runs at a time.
    fn start_submission(&mut self, draft: JobDraft) -> Option<Action> {
        if self.workflow_active() {
            self.notify(Notification::warning(
                "A search is already running. Press Esc to stop following it first.",
            ));
            return None;
        }
        self.workflow = Some(WorkflowView::new(draft.title.clone()));
        Some(Action::Submit(draft))
    }

    fn request_rerun(&mut self) {
        let Some(job) = self.dashboard.jobs().get(self.selected_job) else {
            return;
        };
        self.confirm = Some(PendingRerun {
            job_id: job.id.clone(),
            title: job.display_title().to_string(),
            draft: JobDraft::from_job(job),
        });
    }

    fn select_next(&mut self) {
        match self.focus {
            Focus::Jobs => {
                let len = self.dashboard.jobs().len();
                if len > 0 {
                    self.selected_job = (self.selected_job + 1) % len;
                }
            }
            Focus::Candidates => {
                let rows = self.expanded_rows();
                if rows > 0 {
                    self.selected_candidate = (self.selected_candidate + 1) % rows;
                }
            }
        }
    }

    fn select_previous(&mut self) {
        match self.focus {
            Focus::Jobs => {
                let len = self.dashboard.jobs().len();
                if len > 0 {
                    self.selected_job = self.selected_job.checked_sub(1).unwrap_or(len - 1);
                }
            }
            Focus::Candidates => {
                let rows = self.expanded_rows();
                if rows > 0 {
                    self.selected_candidate =
                        self.selected_candidate.checked_sub(1).unwrap_or(rows - 1);
                }
            }
        }
    }

    /// Page the expanded job's candidate table.
    fn change_page(&mut self, forward: bool) {
        let Some(job_id) = self.dashboard.expanded_id().map(str::to_string) else {
            return;
        };
        let event = if forward {
            self.dashboard.next_page(&job_id)
        } else {
            self.dashboard.previous_page(&job_id)
        };
        if let Some(event) = event {
            self.update_dashboard(event);
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Jobs if self.expanded_rows() > 0 => {
                // Jump the job cursor to the job whose rows are focused
                if let Some(id) = self.dashboard.expanded_id()
                    && let Some(pos) = self.dashboard.jobs().iter().position(|j| j.id == id)
                {
                    self.selected_job = pos;
                }
                self.selected_candidate = 0;
                Focus::Candidates
            }
            _ => Focus::Jobs,
        };
    }

    fn activate(&mut self) -> Option<Action> {
        match self.focus {
            Focus::Jobs => {
                if let Some(job_id) = self.selected_job_id() {
                    self.update_dashboard(DashboardEvent::ToggleJob(job_id));
                }
                None
            }
            Focus::Candidates => {
                let job_id = self.dashboard.expanded_id()?;
                let page = self.dashboard.page_for(job_id)?;
                let summary = page.rows.get(self.selected_candidate)?.candidate.clone();
                let id = summary.id.clone();
                self.overlay.open(summary);
                Some(Action::LoadProfile(id))
            }
        }
    }

    /// Copy the open candidate's email, or profile URL, to clipboard.
    fn copy_contact(&mut self) {
        let Some(text) = self
            .overlay
            .candidate()
            .and_then(contact_text)
            .map(str::to_string)
        else {
            self.notify(Notification::info("No contact details to copy"));
            return;
        };

        let result = arboard::Clipboard::new().and_then(|mut c| c.set_text(text));
        match result {
            Ok(()) => self.notify(Notification::success("Copied to clipboard")),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                self.notify(Notification::error("Clipboard not available"));
            }
        }
    }

    /// Poll for terminal input and handle it.
    pub fn poll_events(&mut self, timeout: Duration) -> std::io::Result<Option<Action>> {
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(self.handle_key(key));
        }
        Ok(None)
    }

    fn key_hints(&self) -> &'static str {
        if self.show_form {
            "Tab:next field  Enter:next/submit  Ctrl-S:submit  Esc:close"
        } else if self.overlay.is_open() {
            "c:copy contact  Esc:close"
        } else if self.focus == Focus::Candidates {
            "j/k:candidate  Enter:view  h/l:page  Tab:jobs  ?:help  q:quit"
        } else {
            "n:new job  j/k:nav  Enter:expand  h/l:page  Tab:candidates  r:re-run  R:refresh  ?:help  q:quit"
        }
    }

    /// Render the UI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let progress_height = if self.workflow.is_some() {
            ProgressPanel::HEIGHT
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),               // Header
                Constraint::Length(progress_height), // Workflow progress
                Constraint::Min(5),                  // Job list
                Constraint::Length(1),               // Footer
            ])
            .split(area);

        Header::render(
            frame,
            chunks[0],
            self.dashboard.stats(),
            self.dashboard.status(),
            &self.api_url,
            &self.theme,
        );

        if let Some(view) = &self.workflow {
            ProgressPanel::render(frame, chunks[1], view, &self.theme);
        }

        let candidate_cursor = (self.focus == Focus::Candidates).then_some(self.selected_candidate);
        JobList::render(
            frame,
            chunks[2],
            &self.dashboard,
            self.selected_job,
            candidate_cursor,
            &self.theme,
        );

        Footer::render(
            frame,
            chunks[3],
            self.key_hints(),
            self.current_notification(),
            &self.theme,
        );

        if self.show_form {
            JobFormView::render(
                frame,
                centered_rect(70, 80, area),
                &self.form,
                self.form_field,
                self.form_error.as_ref(),
                &self.theme,
            );
        }

        if self.overlay.is_open() {
            CandidateDetail::render(frame, centered_rect(70, 80, area), &self.overlay, &self.theme);
        }

        if let Some(pending) = &self.confirm {
            self.render_dialog(
                frame,
                " Re-run search ",
                &format!(
                    "Re-run the candidate search for \"{}\"?\n\n[y] yes   [n] no",
                    pending.title
                ),
            );
        }

        if let Some(message) = &self.alert {
            self.render_dialog(frame, " Error ", &format!("{message}\n\n[Enter] dismiss"));
        }

        // Help overlay (on top of everything)
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_dialog(&self, frame: &mut Frame, title: &str, body: &str) {
        let area = centered_rect(50, 25, frame.area());
        frame.render_widget(Clear, area);
        let lines: Vec<Line> = body
            .lines()
            .map(|l| Line::from(Span::raw(l.to_string())))
            .collect();
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title.to_string())
                    .border_style(Style::default().fg(self.theme.warning)),
            )
            .style(Style::default().fg(self.theme.foreground));
        frame.render_widget(paragraph, area);
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let area = centered_rect(60, 70, frame.area());

        let help_text = r#"
  Keyboard Shortcuts
  ──────────────────

  Jobs
  j/k / ↑↓   Move between jobs
  Enter      Expand/collapse job
  h/l / ←→   Previous/next candidate page
  Tab        Focus candidates of the expanded job
  r          Re-run search for selected job
  R / F5     Refresh job list

  Candidates (after Tab)
  j/k / ↑↓   Move between candidates
  Enter      View candidate profile
  c          Copy contact (in profile)

  Global
  n          New job search
  Esc        Stop following running search
  ?          This help
  q / Ctrl+C Quit

  Press any key to close
"#;

        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .style(Style::default().bg(self.theme.overlay)),
            )
            .style(
                Style::default()
                    .fg(self.theme.foreground)
                    .bg(self.theme.overlay),
            );

        frame.render_widget(paragraph, area);
    }
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use talentscout_core::{Candidate, Job, JobStatus, MatchedCandidate};
    use talentscout_workflow::ProgressSnapshot;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn job(id: &str, candidates: usize) -> Job {
        Job {
            id: id.to_string(),
            title: format!("Job {id}"),
            description: "Build things".to_string(),
            required_skills: vec!["Rust".to_string()],
            experience_years: 2,
            location: "Remote".to_string(),
            status: JobStatus::Completed,
            candidates: (0..candidates)
                .map(|i| MatchedCandidate {
                    candidate: Candidate {
                        id: format!("{id}-c{i}"),
                        name: format!("Person {i}"),
                        ..Default::default()
                    },
                    match_score: 0.8,
                    match_breakdown: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn app_with(jobs: Vec<Job>) -> App {
        let mut app = App::new(StalePagePolicy::Clamp, Theme::dark(), "http://localhost:8000");
        app.apply_event(WorkflowEvent::JobsLoaded {
            jobs,
            auto_expand_latest: false,
        });
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_form_submit_returns_draft() {
        let mut app = app_with(vec![]);
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.show_form);

        type_text(&mut app, "Backend Engineer");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Build APIs");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Go, Rust,");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "3");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Remote");

        let action = app.handle_key(key(KeyCode::Enter));
        match action {
            Some(Action::Submit(draft)) => {
                assert_eq!(draft.required_skills, vec!["Go", "Rust"]);
                assert_eq!(draft.experience_years, 3);
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert!(!app.show_form);
        assert!(app.workflow_active());
    }

    #[test]
    fn test_form_error_focuses_field() {
        let mut app = app_with(vec![]);
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "Title");
        let action = app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(action.is_none());
        assert_eq!(app.form_error, Some(FormError::Missing(FormField::Description)));
        assert_eq!(app.form_field, FormField::Description);
        assert!(app.show_form);
    }

    #[test]
    fn test_second_submission_refused_while_running() {
        let mut app = app_with(vec![job("J1", 0)]);
        app.apply_event(WorkflowEvent::Started {
            title: "Job J1".to_string(),
        });
        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.confirm.is_some());
        assert!(app.handle_key(key(KeyCode::Char('y'))).is_none());
        assert!(app.current_notification().is_some());
    }

    #[test]
    fn test_rerun_requires_confirmation() {
        let mut app = app_with(vec![job("J1", 0)]);
        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.handle_key(key(KeyCode::Char('x'))).is_none());
        assert!(app.confirm.is_some());
        assert!(app.handle_key(key(KeyCode::Char('n'))).is_none());
        assert!(app.confirm.is_none());

        app.handle_key(key(KeyCode::Char('r')));
        match app.handle_key(key(KeyCode::Char('y'))) {
            Some(Action::Submit(draft)) => assert_eq!(draft, JobDraft::from_job(&job("J1", 0))),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_toggle_and_page_keys() {
        let mut app = app_with(vec![job("J1", 12), job("J2", 1)]);
        assert_eq!(app.dashboard.expanded_id(), Some("J1"));

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.dashboard.page_of("J1"), 3);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.dashboard.page_of("J1"), 2);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.dashboard.expanded_id(), None);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.dashboard.expanded_id(), Some("J2"));
    }

    #[test]
    fn test_view_candidate_opens_overlay() {
        let mut app = app_with(vec![job("J1", 3)]);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Candidates);
        app.handle_key(key(KeyCode::Down));

        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(action, Some(Action::LoadProfile("J1-c1".to_string())));
        assert!(app.overlay.is_loading());

        // Failed lookup shows the summary without a toast.
        app.apply_event(WorkflowEvent::ProfileLoaded {
            candidate_id: "J1-c1".to_string(),
            profile: None,
        });
        assert_eq!(app.overlay.candidate().unwrap().name, "Person 1");
        assert!(!app.overlay.is_loading());
        assert!(app.current_notification().is_none());

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.overlay.is_open());
    }

    #[test]
    fn test_escape_cancels_workflow() {
        let mut app = app_with(vec![]);
        app.apply_event(WorkflowEvent::Started {
            title: "Search".to_string(),
        });
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Some(Action::CancelWorkflow));
        app.apply_event(WorkflowEvent::Finished(WorkflowEnd::Cancelled));
        assert!(!app.workflow_active());
    }

    #[test]
    fn test_completed_workflow_resets_form_and_selects_latest() {
        let mut app = app_with(vec![job("J0", 1)]);
        app.form.title = "Backend Engineer".to_string();
        app.apply_event(WorkflowEvent::Started {
            title: "Backend Engineer".to_string(),
        });
        app.apply_event(WorkflowEvent::Finished(WorkflowEnd::Completed { candidates: 3 }));
        app.apply_event(WorkflowEvent::JobsLoaded {
            jobs: vec![job("J1", 3), job("J0", 1)],
            auto_expand_latest: true,
        });

        assert_eq!(app.form, JobForm::default());
        assert_eq!(app.dashboard.expanded_id(), Some("J1"));
        assert_eq!(app.selected_job, 0);
    }

    #[test]
    fn test_alert_blocks_until_dismissed() {
        let mut app = app_with(vec![job("J1", 0)]);
        app.apply_event(WorkflowEvent::Alert("Error creating job".to_string()));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.handle_key(key(KeyCode::Enter));
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_render_dashboard() {
        let mut app = app_with(vec![job("J1", 6)]);
        app.apply_event(WorkflowEvent::Started {
            title: "Data Engineer".to_string(),
        });
        app.apply_event(WorkflowEvent::Progress(ProgressSnapshot::synthetic(
            Duration::from_secs(31),
        )));
        app.apply_event(WorkflowEvent::Notify(Notification::success(
            "Matched 6 top candidates!",
        )));

        let out = screen(&app);
        assert!(out.contains("talentscout"));
        assert!(out.contains("6 candidates sourced"));
        assert!(out.contains("Vector Search"));
        assert!(out.contains("Person 4"));
        assert!(out.contains("Page 1 of 2"));
        assert!(out.contains("Matched 6 top candidates!"));
    }

    #[test]
    fn test_render_empty_and_help() {
        let mut app = app_with(vec![]);
        assert!(screen(&app).contains("No jobs yet. Create your first job above!"));
        app.handle_key(key(KeyCode::Char('?')));
        assert!(screen(&app).contains("Keyboard Shortcuts"));
    }
}
