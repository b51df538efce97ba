//! Header with dashboard totals and clock.

use crate::ui::Theme;
use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use talentscout_core::{DashboardStats, ListStatus};

pub struct Header;

impl Header {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        stats: DashboardStats,
        status: ListStatus,
        api_url: &str,
        theme: &Theme,
    ) {
        let datetime = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let (status_text, status_color) = match status {
            ListStatus::Loading => ("● connecting", theme.warning),
            ListStatus::Ready => ("● online", theme.success),
            ListStatus::Unavailable => ("● offline", theme.error),
        };

        // Keep the URL from pushing the clock off a narrow terminal
        let max_url_len = (area.width as usize).saturating_sub(60);
        let url_display = if api_url.chars().count() > max_url_len && max_url_len > 3 {
            let skip = api_url.chars().count() - max_url_len + 1;
            format!("…{}", api_url.chars().skip(skip).collect::<String>())
        } else {
            api_url.to_string()
        };

        let title = Line::from(vec![
            Span::raw("🎯 talentscout"),
            Span::styled(" │ ", Style::default().fg(theme.muted)),
            Span::styled(url_display, Style::default().fg(theme.highlight)),
            Span::raw(" "),
            Span::styled(status_text, Style::default().fg(status_color)),
        ]);

        let datetime_line = Line::from(Span::styled(datetime, Style::default().fg(theme.warning)))
            .alignment(Alignment::Right);

        let totals = Line::from(vec![
            Span::styled(
                stats.jobs.to_string(),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" jobs  ", Style::default().fg(theme.muted)),
            Span::styled(
                stats.candidates.to_string(),
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" candidates sourced", Style::default().fg(theme.muted)),
        ]);

        let paragraph = Paragraph::new(totals).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_top(datetime_line),
        );

        frame.render_widget(paragraph, area);
    }
}
