//! Footer component with keyboard shortcuts and status messages.

use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use talentscout_workflow::Notification;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Footer {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        hints: &str,
        notification: Option<&Notification>,
        theme: &Theme,
    ) {
        let version = format!("v{}", VERSION);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(version.len() as u16 + 1),
            ])
            .split(area);

        let left_content = match notification {
            Some(n) => Line::from(Span::styled(
                n.message.clone(),
                Style::default()
                    .fg(theme.notification(n.level))
                    .add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(
                hints.to_string(),
                Style::default().fg(theme.muted),
            )),
        };

        frame.render_widget(Paragraph::new(left_content), chunks[0]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                version,
                Style::default().fg(theme.muted),
            ))),
            chunks[1],
        );
    }
}
