// UI rendering logic
//
// Splits the screen into title, dropdown stage, log strip and status bar.
// The dropdown is laid out against the whole frame so its menu may spill
// over the log strip, and is drawn after the chrome so it stays on top.

use super::app::App;
use super::components;
use super::traits::{Component, RenderContext};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Height of the log strip, borders included
const LOGS_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),           // Title bar
            Constraint::Min(3),              // Dropdown stage
            Constraint::Length(LOGS_HEIGHT), // System logs
            Constraint::Length(2),           // Status bar
        ])
        .split(f.area());

    components::render_title(f, chunks[0], app);
    components::render_logs_panel(f, chunks[2], app);
    components::render_status(f, chunks[3], app);

    let screen = f.area();
    let stage = dropdown_stage(chunks[1]);
    app.dropdown.layout(stage, screen);

    let ctx = RenderContext::new(&app.theme, app.focus, app.animation_frame);
    app.dropdown.render(f, stage, &ctx);

    if let Some(toast) = &app.toast {
        toast.render(f, screen, &app.theme);
    }
}

/// Area the dropdown trigger is anchored in
fn dropdown_stage(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(2),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use ratatui::{backend::TestBackend, layout::Position, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn draws_trigger_and_opens_menu_over_the_logs() {
        let mut app = App::with_config(LogBuffer::new(), Config::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let rows = screen(&terminal);
        assert!(rows[3].contains("Fruit"), "{:#?}", rows);
        assert!(rows.iter().all(|row| !row.contains("Banana")));

        let trigger = app.dropdown.current_layout().trigger;
        app.ensure_attached();
        app.handle_click(Position::new(trigger.x, trigger.y));
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let rows = screen(&terminal);
        assert!(rows.iter().any(|row| row.contains("Banana")), "{:#?}", rows);
        let menu = app.dropdown.current_layout().menu;
        assert!(menu.bottom() <= 30);
    }
}
