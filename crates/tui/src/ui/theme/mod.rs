//! Theme styling for the tag editor.
//!
//! Widgets never hard-code colors. They ask the active [`Theme`] for semantic
//! roles and use the builders in [`theme_helpers`].

use std::env;

use tracing::debug;

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::{NordTheme, NordThemeHighContrast};
pub use roles::Theme;

/// Environment variable selecting the palette variant.
pub const THEME_ENV: &str = "TUI_THEME";

/// Select the palette from `TUI_THEME`; anything unrecognized falls back to Nord.
pub fn load() -> Box<dyn Theme> {
    let requested = env::var(THEME_ENV).unwrap_or_default();
    match requested.trim().to_ascii_lowercase().as_str() {
        "nord-high-contrast" | "nord_hc" | "high-contrast" => Box::new(NordThemeHighContrast::new()),
        "" | "nord" => Box::new(NordTheme::new()),
        other => {
            debug!(theme = other, "unknown theme requested; using nord");
            Box::new(NordTheme::new())
        }
    }
}
