// Title bar component
//
// Renders the app title with the dropdown's label and menu type.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let props = app.dropdown.props();
    let indicator = if app.dropdown.is_expanded() { "●" } else { "◦" };
    let title_text = format!(
        " ▾ tui-dropdown ──── {} {} ({})",
        indicator,
        props.label,
        props.menu_type.as_str()
    );

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(format!(" v{} ", crate::config::VERSION)).right_aligned()),
        );

    f.render_widget(title, area);
}
