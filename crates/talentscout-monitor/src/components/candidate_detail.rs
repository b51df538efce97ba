//! Candidate detail overlay.

use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use talentscout_core::{Candidate, CandidateOverlay, platform_style};

pub struct CandidateDetail;

impl CandidateDetail {
    pub fn render(frame: &mut Frame, area: Rect, overlay: &CandidateOverlay, theme: &Theme) {
        let Some(candidate) = overlay.candidate() else {
            return;
        };

        let mut lines = build_detail_lines(candidate, theme);
        if overlay.is_loading() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Loading full profile...",
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", candidate.name))
                    .title_bottom(Line::from(" c: copy contact  Esc: close ").right_aligned())
                    .border_style(Style::default().fg(theme.highlight)),
            );
        frame.render_widget(paragraph, area);
    }
}

fn field(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(theme.muted)),
        Span::styled(value, Style::default().fg(theme.foreground)),
    ])
}

fn section(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(theme.foreground)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

/// Build detail lines for a candidate. Fields the backend left out are
/// skipped rather than shown empty.
pub fn build_detail_lines(candidate: &Candidate, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let style = platform_style(candidate.platform());

    lines.push(Line::from(vec![
        Span::styled(
            candidate.name.clone(),
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} {}", style.icon, candidate.platform()),
            Style::default().fg(Theme::platform(&style)),
        ),
    ]));
    if let Some(title) = &candidate.current_title {
        lines.push(Line::from(Span::styled(
            title.clone(),
            Style::default().fg(theme.foreground),
        )));
    }
    lines.push(Line::from(""));

    if let Some(score) = candidate.match_score {
        lines.push(field(
            "Match",
            format!("{}%", (score.clamp(0.0, 1.0) * 100.0).round()),
            theme,
        ));
    }
    lines.push(field(
        "Experience",
        format!("{} years", candidate.experience_years),
        theme,
    ));
    let optional = [
        ("Location", &candidate.location),
        ("Email", &candidate.email),
        ("Phone", &candidate.phone),
        ("Education", &candidate.education),
        ("Profile", &candidate.profile_url),
    ];
    for (label, value) in optional {
        if let Some(value) = value.as_ref().filter(|v| !v.trim().is_empty()) {
            lines.push(field(label, value.clone(), theme));
        }
    }

    if !candidate.skills.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Skills", theme));
        lines.push(Line::from(candidate.skills.join(", ")));
    }

    if let Some(summary) = &candidate.summary {
        lines.push(Line::from(""));
        lines.push(section("Summary", theme));
        lines.push(Line::from(summary.clone()));
    }

    if let Some(reasoning) = &candidate.reasoning {
        lines.push(Line::from(""));
        lines.push(section("Why this match", theme));
        lines.push(Line::from(reasoning.clone()));
    }

    if !candidate.experience.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Work history", theme));
        for entry in &candidate.experience {
            let role = entry.title.as_deref().unwrap_or("Role");
            let company = entry
                .company
                .as_deref()
                .map(|c| format!(" @ {c}"))
                .unwrap_or_default();
            let duration = entry
                .duration
                .as_deref()
                .map(|d| format!(" ({d})"))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(theme.highlight)),
                Span::styled(
                    format!("{role}{company}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(duration, Style::default().fg(theme.muted)),
            ]));
            if let Some(description) = &entry.description {
                lines.push(Line::from(format!("  {description}")));
            }
        }
    }

    lines
}

/// Text to put on the clipboard: email, else the profile URL.
pub fn contact_text(candidate: &Candidate) -> Option<&str> {
    candidate
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .or(candidate
            .profile_url
            .as_deref()
            .filter(|u| !u.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentscout_core::WorkExperience;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_summary_only_skips_missing_fields() {
        let candidate = Candidate {
            id: "c1".to_string(),
            name: "Ada".to_string(),
            experience_years: 4,
            ..Default::default()
        };
        let out = text(&build_detail_lines(&candidate, &Theme::dark()));
        assert!(out.contains("Ada"));
        assert!(out.contains("🌐 Unknown"));
        assert!(out.contains("4 years"));
        assert!(!out.contains("Email"));
        assert!(!out.contains("Work history"));
    }

    #[test]
    fn test_detailed_profile() {
        let candidate = Candidate {
            id: "c1".to_string(),
            name: "Ada".to_string(),
            source_portal: Some("GitHub".to_string()),
            email: Some("ada@example.com".to_string()),
            match_score: Some(0.874),
            experience: vec![WorkExperience {
                title: Some("Engineer".to_string()),
                company: Some("Analytical Engines".to_string()),
                duration: Some("2 years".to_string()),
                description: None,
            }],
            ..Default::default()
        };
        let out = text(&build_detail_lines(&candidate, &Theme::dark()));
        assert!(out.contains("💻 GitHub"));
        assert!(out.contains("ada@example.com"));
        assert!(out.contains("87%"));
        assert!(out.contains("Engineer @ Analytical Engines (2 years)"));
    }

    #[test]
    fn test_contact_text_prefers_email() {
        let mut candidate = Candidate {
            profile_url: Some("https://github.com/ada".to_string()),
            ..Default::default()
        };
        assert_eq!(contact_text(&candidate), Some("https://github.com/ada"));
        candidate.email = Some("ada@example.com".to_string());
        assert_eq!(contact_text(&candidate), Some("ada@example.com"));
        candidate.email = Some("  ".to_string());
        candidate.profile_url = None;
        assert_eq!(contact_text(&candidate), None);
    }
}
