//! Terminal dashboard for talentscout.

pub mod app;
pub mod components;
pub mod ui;

pub use app::{Action, App, Focus};
pub use ui::Theme;
