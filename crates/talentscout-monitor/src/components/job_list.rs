//! Job accordion with the expanded job's candidate table.

use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use talentscout_core::{CandidateRow, Dashboard, Job, JobStatus, JobView, ListStatus, Page};

pub const MSG_NO_JOBS: &str = "No jobs yet. Create your first job above!";
pub const MSG_NO_CANDIDATES: &str = "No candidates found for this job yet.";
pub const MSG_UNAVAILABLE: &str = "Unable to load jobs. Make sure the API is running.";

const INDENT: &str = "    ";

pub struct JobList;

impl JobList {
    /// Render all jobs; `selected` is the job cursor and `candidate_cursor`
    /// the highlighted row on the expanded job's current page.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        dashboard: &Dashboard,
        selected: usize,
        candidate_cursor: Option<usize>,
        theme: &Theme,
    ) {
        let (lines, focus_line) = build_lines(dashboard, selected, candidate_cursor, theme);

        let inner_height = area.height.saturating_sub(2) as usize;
        let offset = focus_line.saturating_sub(inner_height.saturating_sub(3));

        let title = format!(" Jobs ({}) ", dashboard.jobs().len());
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(
                        Style::default()
                            .fg(theme.foreground)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .scroll((offset as u16, 0));

        frame.render_widget(paragraph, area);
    }
}

/// Build the accordion lines and the index of the line holding the cursor.
pub fn build_lines(
    dashboard: &Dashboard,
    selected: usize,
    candidate_cursor: Option<usize>,
    theme: &Theme,
) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut focus_line = 0;

    let views = dashboard.views();

    if dashboard.status() == ListStatus::Unavailable {
        lines.push(Line::from(Span::styled(
            MSG_UNAVAILABLE,
            Style::default().fg(theme.error),
        )));
        if views.is_empty() {
            return (lines, 0);
        }
        lines.push(Line::from(""));
    }

    if views.is_empty() {
        let msg = match dashboard.status() {
            ListStatus::Loading => "Loading jobs...",
            _ => MSG_NO_JOBS,
        };
        lines.push(Line::from(Span::styled(msg, Style::default().fg(theme.muted))));
        return (lines, 0);
    }

    for (i, view) in views.iter().enumerate() {
        let is_selected = i == selected;
        if is_selected {
            focus_line = lines.len();
        }
        lines.push(job_line(view, is_selected, theme));

        if let Some(page) = &view.page {
            lines.push(requirements_line(view.job, theme));
            if page.rows.is_empty() && view.job.candidates.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{INDENT}{MSG_NO_CANDIDATES}"),
                    Style::default().fg(theme.muted),
                )));
            } else {
                lines.push(table_header(theme));
                for (row_index, row) in page.rows.iter().enumerate() {
                    let highlighted = candidate_cursor == Some(row_index);
                    if highlighted {
                        focus_line = lines.len();
                    }
                    lines.push(candidate_line(row, highlighted, theme));
                }
                if page.shows_controls() {
                    lines.push(pagination_line(page, theme));
                }
            }
            lines.push(Line::from(""));
        }
    }

    (lines, focus_line)
}

fn status_style(status: JobStatus, theme: &Theme) -> Style {
    match status {
        JobStatus::Processing => Style::default().fg(theme.warning),
        JobStatus::Completed => Style::default().fg(theme.success),
        JobStatus::Failed => Style::default().fg(theme.error),
    }
}

fn job_line(view: &JobView<'_>, selected: bool, theme: &Theme) -> Line<'static> {
    let job = view.job;
    let arrow = if view.expanded { "▾" } else { "▸" };
    let style = status_style(job.status, theme);

    let mut title_style = Style::default()
        .fg(theme.foreground)
        .add_modifier(Modifier::BOLD);
    if selected {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }

    let created = job
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(format!("{arrow} "), Style::default().fg(theme.muted)),
        Span::styled(format!("{} ", job.status.symbol()), style),
        Span::styled(truncate(job.display_title(), 40), title_style),
        Span::raw("  "),
        Span::styled(format!("{:?}", job.status).to_lowercase(), style),
        Span::styled(
            format!("  {} candidates", job.candidate_count()),
            Style::default().fg(theme.highlight),
        ),
        Span::styled(format!("  {created}"), Style::default().fg(theme.muted)),
    ])
}

fn requirements_line(job: &Job, theme: &Theme) -> Line<'static> {
    let skills = if job.required_skills.is_empty() {
        "-".to_string()
    } else {
        job.required_skills.join(", ")
    };
    let location = if job.location.trim().is_empty() {
        "Any location"
    } else {
        job.location.as_str()
    };
    Line::from(vec![
        Span::raw(INDENT),
        Span::styled("Skills: ", Style::default().fg(theme.muted)),
        Span::styled(skills, Style::default().fg(theme.foreground)),
        Span::styled(
            format!(" · {}+ yrs · {}", job.experience_years, location),
            Style::default().fg(theme.muted),
        ),
    ])
}

fn table_header(theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!(
            "{INDENT}{:<4} {:<22} {:<20} {:<34} {:>4} {:>6}  {}",
            "#", "Name", "Title", "Skills", "Exp", "Score", "Source"
        ),
        Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::UNDERLINED),
    ))
}

fn candidate_line(row: &CandidateRow<'_>, highlighted: bool, theme: &Theme) -> Line<'static> {
    let candidate = row.candidate;
    let mut name_style = Style::default().fg(theme.foreground);
    if highlighted {
        name_style = name_style.add_modifier(Modifier::REVERSED);
    }

    let rank = if row.top_3 {
        format!("★{:<3}", row.rank)
    } else {
        format!("{:<4}", row.rank)
    };

    let mut spans = vec![
        Span::raw(INDENT),
        Span::styled(
            rank,
            Style::default().fg(if row.top_3 {
                theme.warning
            } else {
                theme.muted
            }),
        ),
        Span::raw(" "),
        Span::styled(format!("{:<22}", truncate(&candidate.name, 22)), name_style),
        Span::raw(" "),
        Span::styled(
            format!(
                "{:<20}",
                truncate(candidate.current_title.as_deref().unwrap_or("-"), 20)
            ),
            Style::default().fg(theme.muted),
        ),
        Span::raw(" "),
    ];

    // Skills column, padded to a fixed width
    let mut width = 0;
    for tag in &row.skills {
        let text = if tag.matched {
            format!("✓{} ", tag.name)
        } else {
            format!("{} ", tag.name)
        };
        width += text.chars().count();
        let style = if tag.matched {
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };
        spans.push(Span::styled(text, style));
    }
    if row.hidden_skills > 0 {
        let more = format!("+{} ", row.hidden_skills);
        width += more.chars().count();
        spans.push(Span::styled(more, Style::default().fg(theme.muted)));
    }
    spans.push(Span::raw(" ".repeat(34usize.saturating_sub(width) + 1)));

    spans.push(Span::styled(
        format!("{:>3}y", candidate.experience_years),
        Style::default().fg(theme.foreground),
    ));
    spans.push(Span::styled(
        format!(" {:>5}%", row.score_percent),
        Style::default()
            .fg(score_color(row.score_percent, theme))
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("{} {}", row.platform.icon, candidate.platform()),
        Style::default().fg(Theme::platform(&row.platform)),
    ));

    Line::from(spans)
}

fn score_color(percent: u32, theme: &Theme) -> ratatui::style::Color {
    match percent {
        80.. => theme.success,
        50..=79 => theme.warning,
        _ => theme.error,
    }
}

fn pagination_line(page: &Page<'_>, theme: &Theme) -> Line<'static> {
    let enabled = Style::default().fg(theme.highlight);
    let disabled = Style::default().fg(theme.muted);
    Line::from(vec![
        Span::raw(INDENT),
        Span::styled(
            "◀ Prev",
            if page.has_previous() { enabled } else { disabled },
        ),
        Span::styled(
            format!("  {}  ", page.label()),
            Style::default().fg(theme.foreground),
        ),
        Span::styled("Next ▶", if page.has_next() { enabled } else { disabled }),
    ])
}

/// Shorten to `max` characters with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
