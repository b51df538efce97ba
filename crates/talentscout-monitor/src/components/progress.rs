//! Workflow progress panel.

use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use talentscout_workflow::{Phase, PhaseState, ProgressSnapshot};

/// What the panel knows about the running submission.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowView {
    pub title: String,
    pub job_id: Option<String>,
    pub progress: ProgressSnapshot,
    /// Candidate count when matching began
    pub matching: Option<usize>,
}

impl WorkflowView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            job_id: None,
            progress: ProgressSnapshot::initializing(),
            matching: None,
        }
    }
}

pub struct ProgressPanel;

impl ProgressPanel {
    pub const HEIGHT: u16 = 7;

    pub fn render(frame: &mut Frame, area: Rect, view: &WorkflowView, theme: &Theme) {
        let job = view.job_id.as_deref().unwrap_or("submitting");
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Sourcing: {} ({}) ", view.title, job))
            .title_bottom(Line::from(" Esc: stop following ").right_aligned())
            .border_style(Style::default().fg(theme.highlight));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(phase_line(&view.progress, theme)), chunks[0]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.success))
            .percent(view.progress.percent.min(100) as u16)
            .label(format!("{}%", view.progress.percent));
        frame.render_widget(gauge, chunks[1]);

        let mut status = vec![Span::styled(
            view.progress.message.clone(),
            Style::default().fg(theme.foreground),
        )];
        if let Some(count) = view.matching {
            status.push(Span::styled(
                format!("  ({count} candidates in matching)"),
                Style::default().fg(theme.warning),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[2]);
    }
}

fn phase_line(progress: &ProgressSnapshot, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for phase in Phase::ALL {
        let state = progress.phase_state(phase);
        let (marker, style) = match state {
            PhaseState::Waiting => ("○", Style::default().fg(theme.muted)),
            PhaseState::Active => (
                "◉",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
            PhaseState::Completed => ("✓", Style::default().fg(theme.success)),
        };
        if phase.index() > 0 {
            let connector = if state == PhaseState::Waiting {
                theme.muted
            } else {
                theme.success
            };
            spans.push(Span::styled(" ── ", Style::default().fg(connector)));
        }
        spans.push(Span::styled(
            format!("{marker} {}. {} ", phase.index() + 1, phase.label()),
            style,
        ));
        spans.push(Span::styled(
            format!("[{}]", state.label()),
            Style::default().fg(theme.muted),
        ));
    }
    Line::from(spans)
}
