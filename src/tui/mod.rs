// TUI module - Terminal User Interface
//
// This module hosts one dropdown in a terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks)
// - Rendering the UI
// - Receiving dropdown events and surfacing them in the log strip

pub mod app;
pub mod components;
pub mod traits;
pub mod ui;

use crate::config::Config;
use crate::dropdown::DropdownEvent;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Position, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::Handled;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. The event loop handles terminal input and dropdown events.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::with_config(log_buffer, config);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    app.connect_events(event_tx);

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// This loop handles three types of events:
/// 1. Keyboard and mouse input
/// 2. Timer ticks (cursor blink, toast expiry)
/// 3. Dropdown events forwarded by the subscription
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<DropdownEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        // The dropdown measures its menu on attach, which needs a first layout
        app.ensure_attached();

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            // Dropdown events
            Some(event) = event_rx.recv() => {
                app.handle_dropdown_event(event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Global → Focused component → Fallback
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: keys that work everywhere
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 2: focused component
    if app.dispatch_key(key_event) == Handled::Yes {
        return;
    }

    // Layer 3: unhandled keys
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            true
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus_next();
            true
        }
        // q quits unless it is being typed into the search field
        KeyCode::Char('q') if !app.is_typing() => {
            app.should_quit = true;
            true
        }
        _ => false,
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.handle_click(Position::new(mouse_event.column, mouse_event.row));
        }
        MouseEventKind::ScrollUp => {
            app.dispatch_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        }
        MouseEventKind::ScrollDown => {
            app.dispatch_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogBuffer;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_is_typed_into_search_instead_of_quitting() {
        let mut app = App::with_config(LogBuffer::new(), Config::default());
        assert!(app.dropdown.props().searchable);

        handle_key_event(&mut app, press(KeyCode::Enter));
        assert!(app.dropdown.is_expanded());

        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.dropdown.search_value(), "q");

        handle_key_event(&mut app, press(KeyCode::Esc));
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn tab_moves_focus_and_t_cycles_theme() {
        let mut app = App::with_config(LogBuffer::new(), Config::default());
        let before = app.theme.name.clone();

        handle_key_event(&mut app, press(KeyCode::Tab));
        assert!(app.is_focused(traits::ComponentId::Logs));

        handle_key_event(&mut app, press(KeyCode::Char('t')));
        assert_ne!(app.theme.name, before);
    }

    #[test]
    fn wheel_scrolls_the_focused_component() {
        let mut app = App::with_config(LogBuffer::new(), Config::default());
        handle_key_event(&mut app, press(KeyCode::Enter));
        let before = app.dropdown.highlighted().map(|p| p.to_vec());

        handle_mouse_event(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_ne!(app.dropdown.highlighted().map(|p| p.to_vec()), before);
    }
}
