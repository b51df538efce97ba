//! Color themes.

use ratatui::style::Color;
use talentscout_core::PlatformStyle;
use talentscout_workflow::NotificationLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub highlight: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub overlay: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            foreground: Color::White,
            muted: Color::DarkGray,
            highlight: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            overlay: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            muted: Color::Gray,
            highlight: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Magenta,
            overlay: Color::Gray,
        }
    }

    /// Theme by name; anything other than "light" is dark.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn notification(&self, level: NotificationLevel) -> Color {
        match level {
            NotificationLevel::Success => self.success,
            NotificationLevel::Error => self.error,
            NotificationLevel::Warning => self.warning,
            NotificationLevel::Info => self.highlight,
        }
    }

    pub fn platform(style: &PlatformStyle) -> Color {
        let (r, g, b) = style.color;
        Color::Rgb(r, g, b)
    }
}
