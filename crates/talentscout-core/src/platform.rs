//! Display metadata for source platforms.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How a source platform is drawn in tables and the detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformStyle {
    /// Badge background as RGB
    pub color: (u8, u8, u8),
    pub icon: &'static str,
}

const DEFAULT_STYLE: PlatformStyle = PlatformStyle {
    color: (0x05, 0x55, 0xC8),
    icon: "🌐",
};

static PLATFORMS: Lazy<HashMap<&'static str, PlatformStyle>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        "LinkedIn",
        PlatformStyle {
            color: (0x0A, 0x66, 0xC2),
            icon: "💼",
        },
    );
    map.insert(
        "Indeed",
        PlatformStyle {
            color: (0x21, 0x64, 0xF3),
            icon: "🔍",
        },
    );
    let stack_overflow = PlatformStyle {
        color: (0xF4, 0x80, 0x24),
        icon: "📚",
    };
    map.insert("Stack Overflow", stack_overflow);
    map.insert("StackOverflow", stack_overflow);
    map.insert(
        "Glassdoor",
        PlatformStyle {
            color: (0x0C, 0xAA, 0x41),
            icon: "🏢",
        },
    );
    let github = PlatformStyle {
        color: (0x18, 0x17, 0x17),
        icon: "💻",
    };
    map.insert("GitHub", github);
    map.insert("GitHub Jobs", github);
    map
});

/// Look up the style for a platform name. Unknown platforms get a neutral badge.
pub fn platform_style(name: &str) -> PlatformStyle {
    PLATFORMS.get(name).copied().unwrap_or(DEFAULT_STYLE)
}
