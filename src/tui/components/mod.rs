// Components module - reusable UI building blocks
//
// Shell components drawn around the dropdown:
// - Title bar: App name, dropdown label and menu state
// - Logs panel: System log entries
// - Status bar: Uptime, events, focus hints
// - Toast: Transient event notifications

pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use logs_panel::LogsPanel;
pub use toast::Toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Render the logs panel (convenience wrapper)
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &mut App) {
    logs_panel::render(f, area, app);
}
