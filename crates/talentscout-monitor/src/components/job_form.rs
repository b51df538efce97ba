//! Job creation form.

use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use talentscout_core::{FormError, FormField, JobForm};

pub struct JobFormView;

impl JobFormView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        form: &JobForm,
        active: FormField,
        error: Option<&FormError>,
        theme: &Theme,
    ) {
        let mut lines = vec![Line::from("")];

        for field in FormField::ALL {
            let is_active = field == active;
            let label_style = if is_active {
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            lines.push(Line::from(Span::styled(
                format!("  {}", field.label()),
                label_style,
            )));

            let cursor = if is_active { "▏" } else { "" };
            let mut value_spans = vec![
                Span::raw("  > "),
                Span::styled(
                    form.field(field).to_string(),
                    Style::default().fg(theme.foreground),
                ),
                Span::styled(cursor, Style::default().fg(theme.highlight)),
            ];
            if let Some(err) = error.filter(|e| e.field() == field) {
                value_spans.push(Span::styled(
                    format!("   ✗ {err}"),
                    Style::default().fg(theme.error),
                ));
            }
            lines.push(Line::from(value_spans));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "  Tab/↓ next field  Shift-Tab/↑ previous  Enter submit on last field  Ctrl-S submit  Esc close",
            Style::default().fg(theme.muted),
        )));

        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" 🚀 New Job Search ")
                    .border_style(Style::default().fg(theme.highlight)),
            );
        frame.render_widget(paragraph, area);
    }
}
