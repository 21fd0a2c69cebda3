//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer below the dropdown, so events
//! and diagnostics from the dropdown are visible while interacting with it.
//!
//! The panel receives entries at render time rather than owning the buffer,
//! which stays shared with the tracing layer.

use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Rows moved by PageUp/PageDown
const PAGE_SIZE: usize = 5;

/// Logs panel component
///
/// Follows the newest entry until the user scrolls back; scrolling to the
/// bottom again resumes following.
#[derive(Debug, Default)]
pub struct LogsPanel {
    /// Entries hidden below the viewport (0 = following the tail)
    offset_from_bottom: usize,

    /// Entry count seen at the last sync, for clamping
    entry_count: usize,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the newest entry is pinned to the bottom
    pub fn is_following(&self) -> bool {
        self.offset_from_bottom == 0
    }

    /// Sync with the current buffer length (call each frame)
    pub fn sync_entries(&mut self, entry_count: usize) {
        self.entry_count = entry_count;
        self.offset_from_bottom = self
            .offset_from_bottom
            .min(entry_count.saturating_sub(1));
    }

    /// Index range of entries visible in `height` rows
    pub fn visible_range(&self, height: usize) -> (usize, usize) {
        let end = self.entry_count.saturating_sub(self.offset_from_bottom);
        (end.saturating_sub(height), end)
    }

    fn scroll_up(&mut self, rows: usize) {
        self.offset_from_bottom =
            (self.offset_from_bottom + rows).min(self.entry_count.saturating_sub(1));
    }

    fn scroll_down(&mut self, rows: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(rows);
    }

    /// Render the given entries inside a bordered block
    pub fn render_with_entries(
        &self,
        f: &mut Frame,
        area: Rect,
        entries: &[LogEntry],
        theme: &Theme,
        focused: bool,
    ) {
        let height = area.height.saturating_sub(2) as usize;
        let (start, end) = self.visible_range(height);

        let items: Vec<ListItem> = entries
            .iter()
            .skip(start)
            .take(end - start)
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, theme))
            })
            .collect();

        let border_color = if focused {
            theme.panel_logs
        } else {
            theme.border
        };
        let title = if self.is_following() {
            " Logs "
        } else {
            " Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

        f.render_widget(list, area);
    }
}

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        // Entries come through render_with_entries; this draws the frame only
        let border_color = if ctx.is_focused(self.id()) {
            ctx.theme.panel_logs
        } else {
            ctx.theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Logs ");

        f.render_widget(block, area);
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up(1);
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down(1);
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.scroll_up(PAGE_SIZE);
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.scroll_down(PAGE_SIZE);
                Handled::Yes
            }
            KeyCode::Home => {
                self.offset_from_bottom = self.entry_count.saturating_sub(1);
                Handled::Yes
            }
            KeyCode::End | KeyCode::Esc if !self.is_following() => {
                self.offset_from_bottom = 0;
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focusable(&self) -> bool {
        true
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  End:follow")
    }
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.item_active),
        LogLevel::Info => Style::default().fg(theme.item),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

/// Render the logs panel owned by App
pub fn render(f: &mut Frame, area: Rect, app: &mut crate::tui::app::App) {
    let entries = app.log_buffer.get_all();
    let focused = app.is_focused(ComponentId::Logs);

    app.logs_panel.sync_entries(entries.len());
    app.logs_panel
        .render_with_entries(f, area, &entries, &app.theme, focused);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            target: "tui_dropdown".to_string(),
            message: message.to_string(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn follows_the_tail_until_scrolled() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(10);
        assert_eq!(panel.visible_range(3), (7, 10));

        panel.handle_key(key(KeyCode::Up));
        assert!(!panel.is_following());
        assert_eq!(panel.visible_range(3), (6, 9));

        assert_eq!(panel.handle_key(key(KeyCode::End)), Handled::Yes);
        assert!(panel.is_following());
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::No);
    }

    #[test]
    fn scrolling_stops_at_the_first_entry() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(4);
        panel.handle_key(key(KeyCode::PageUp));
        assert_eq!(panel.visible_range(2), (0, 1));
    }

    #[test]
    fn renders_newest_entries() {
        let entries: Vec<_> = ["first", "second", "third"].into_iter().map(entry).collect();
        let mut panel = LogsPanel::new();
        panel.sync_entries(entries.len());

        let mut terminal = Terminal::new(TestBackend::new(50, 4)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                panel.render_with_entries(f, area, &entries, &Theme::default(), false)
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..4)
            .map(|y| (0..50).map(|x| buffer[(x, y)].symbol()).collect())
            .collect();
        assert!(rows[1].contains("second"), "{:?}", rows);
        assert!(rows[2].contains("third"), "{:?}", rows);
    }
}
