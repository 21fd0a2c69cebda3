// Status bar component
//
// Renders session facts at the bottom: uptime, menu state, event count,
// the focused component's key hints and the active theme.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Below this width the bar drops labels and the spritemap
const WIDE_MIN_WIDTH: u16 = 100;

/// Build the status line for a bar `width` cells wide
pub fn status_text(app: &App, width: u16) -> String {
    let dropdown = &app.dropdown;
    let state = if dropdown.is_expanded() { "open" } else { "closed" };
    let hint = app.focus_hint().unwrap_or("");

    if width < WIDE_MIN_WIDTH {
        return format!(
            " {} │ {} │ ⚡{} │ {}",
            app.uptime(),
            state,
            app.event_count,
            hint
        );
    }

    let last = app
        .last_event
        .map(|name| format!(" (last: {})", name))
        .unwrap_or_default();
    let search = if dropdown.search_value().is_empty() {
        String::new()
    } else {
        format!(" │ search: {}", dropdown.search_value())
    };
    let sprites = dropdown
        .props()
        .spritemap
        .as_deref()
        .map(|path| format!(" │ sprites: {}", path))
        .unwrap_or_default();

    format!(
        " {} │ menu: {} │ events: {}{}{} │ {} │ theme: {}{} │ Tab:focus q:quit",
        app.uptime(),
        state,
        app.event_count,
        last,
        search,
        hint,
        app.theme.name,
        sprites,
    )
}

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(status_text(app, area.width))
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::LogBuffer;

    #[test]
    fn wide_bar_names_menu_state_and_theme() {
        let mut config = Config::default();
        config.theme = "nord".to_string();
        let mut app = App::with_config(LogBuffer::new(), config);
        app.last_event = Some("expandedChanged");
        app.event_count = 3;

        let text = status_text(&app, 120);
        assert!(text.contains("menu: closed"), "{}", text);
        assert!(text.contains("events: 3 (last: expandedChanged)"), "{}", text);
        assert!(text.contains("theme: nord"), "{}", text);
        assert!(text.contains("Enter:open"), "{}", text);
    }

    #[test]
    fn narrow_bar_is_compact() {
        let app = App::with_config(LogBuffer::new(), Config::default());
        let text = status_text(&app, 60);
        assert!(!text.contains("theme:"), "{}", text);
        assert!(text.contains("closed"), "{}", text);
    }
}
