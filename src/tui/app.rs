// TUI application state
//
// Owns the document the dropdown registers its click listeners on, the
// dropdown itself, and the surrounding chrome (log strip, toast, status bar).

use super::components::{LogsPanel, Toast};
use super::traits::{ComponentId, Handled, Interactive};
use crate::config::Config;
use crate::dropdown::{ClickEvent, Document, DropdownBase, DropdownEvent, SubscriptionId};
use crate::logging::LogBuffer;
use crate::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::layout::Position;
use std::time::Instant;
use tokio::sync::mpsc;

/// Main application state for the TUI
pub struct App {
    /// Click listener registry shared with the dropdown
    pub document: Document,

    /// The hosted dropdown
    pub dropdown: DropdownBase,

    /// Whether the app should quit
    pub should_quit: bool,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Log buffer for system logs
    pub log_buffer: LogBuffer,

    /// Log strip below the dropdown
    pub logs_panel: LogsPanel,

    /// Active toast notification, if any
    pub toast: Option<Toast>,

    /// Component receiving keyboard input
    pub focus: ComponentId,

    /// Color theme
    pub theme: Theme,

    /// Animation frame counter (cursor blink)
    pub animation_frame: usize,

    /// Dropdown events received so far
    pub event_count: usize,

    /// Name of the most recent dropdown event
    pub last_event: Option<&'static str>,

    /// Forwarding subscription on the dropdown, once connected
    subscription: Option<SubscriptionId>,
}

impl App {
    /// Create the app from loaded configuration
    pub fn with_config(log_buffer: LogBuffer, config: Config) -> Self {
        let document = Document::new();
        let dropdown = DropdownBase::new(config.dropdown, &document);
        Self {
            document,
            dropdown,
            should_quit: false,
            start_time: Instant::now(),
            log_buffer,
            logs_panel: LogsPanel::new(),
            toast: None,
            focus: ComponentId::Dropdown,
            theme: Theme::by_name(&config.theme),
            animation_frame: 0,
            event_count: 0,
            last_event: None,
            subscription: None,
        }
    }

    /// Forward every dropdown event into `tx`
    ///
    /// Subscribers run inside the dropdown's own call stack, so the loop
    /// picks events up from the channel instead of mutating the app there.
    pub fn connect_events(&mut self, tx: mpsc::UnboundedSender<DropdownEvent>) {
        if let Some(previous) = self.subscription.take() {
            self.dropdown.off(previous);
        }
        let id = self.dropdown.on(move |event| {
            // Receiver gone means the loop is shutting down
            let _ = tx.send(event.clone());
        });
        self.subscription = Some(id);
    }

    /// Record a dropdown event: log it and surface it as a toast
    pub fn handle_dropdown_event(&mut self, event: DropdownEvent) {
        self.event_count += 1;
        self.last_event = Some(event.name());

        match serde_json::to_string(&event) {
            Ok(payload) => tracing::debug!(payload = %payload, "Dropdown event payload"),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize dropdown event"),
        }

        let message = match &event {
            DropdownEvent::ItemsFiltered { filtered_items, .. } => {
                tracing::info!(
                    event = event.name(),
                    matches = filtered_items.len(),
                    "Items filtered"
                );
                return;
            }
            DropdownEvent::ExpandedChanged { expanded } => {
                tracing::info!(event = event.name(), expanded, "Menu toggled");
                return;
            }
            DropdownEvent::ItemSelected { item } => {
                let label = item.label.as_deref().unwrap_or("(unlabeled)");
                tracing::info!(event = event.name(), label, "Item selected");
                match item.is_checked() {
                    Some(true) => format!("✓ {}", label),
                    Some(false) => format!("✗ {}", label),
                    None => format!("Selected {}", label),
                }
            }
            DropdownEvent::ButtonClicked { kind } => {
                tracing::info!(event = event.name(), kind = kind.as_str(), "Button clicked");
                format!("Button: {}", kind.as_str())
            }
        };
        self.show_toast(message);
    }

    /// Show a toast notification
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Attach the dropdown once it has been laid out at least once
    pub fn ensure_attached(&mut self) {
        if self.dropdown.lifecycle() == crate::dropdown::Lifecycle::Created {
            self.dropdown.attached();
        }
    }

    /// Tear the dropdown down before leaving the loop
    pub fn shutdown(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.dropdown.off(id);
        }
        self.dropdown.detached();
    }

    /// Advance animation frame and expire the toast
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Cycle focus between focusable components
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next_focus();
    }

    /// Switch to the next built-in theme
    pub fn cycle_theme(&mut self) {
        let names = Theme::NAMES;
        let current = names
            .iter()
            .position(|name| *name == self.theme.name)
            .unwrap_or(0);
        let next = names[(current + 1) % names.len()];
        self.theme = Theme::by_name(next);
        tracing::info!(theme = next, "Theme changed");
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    /// Route a key to the focused component
    pub fn dispatch_key(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            ComponentId::Dropdown => self.dropdown.handle_key(key),
            ComponentId::Logs => self.logs_panel.handle_key(key),
            _ => Handled::No,
        }
    }

    /// Hint for the status bar, from whichever component has focus
    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            ComponentId::Dropdown => self.dropdown.focus_hint(),
            ComponentId::Logs => self.logs_panel.focus_hint(),
            _ => None,
        }
    }

    /// Whether typed characters belong to the dropdown's search field
    pub fn is_typing(&self) -> bool {
        self.focus == ComponentId::Dropdown
            && self.dropdown.is_expanded()
            && self.dropdown.props().searchable
    }

    /// Left click at a terminal cell
    ///
    /// Document listeners see the click first, as a document-level capture
    /// listener would, then the dropdown's own hit testing runs.
    pub fn handle_click(&mut self, position: Position) {
        let event = ClickEvent::at(position.x, position.y);
        let owner = self.dropdown.owner_id();
        for notified in self.document.dispatch_click(&event) {
            if notified == owner {
                self.dropdown.handle_doc_click(&event);
            }
        }

        if self.dropdown.handle_click(position).was_handled() {
            self.focus = ComponentId::Dropdown;
        }
    }

    /// Format uptime as HH:MM:SS
    pub fn uptime(&self) -> String {
        let elapsed = self.start_time.elapsed();
        let seconds = elapsed.as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::layout::Rect;

    fn app() -> App {
        let mut config = Config::default();
        config.dropdown.searchable = false;
        App::with_config(LogBuffer::new(), config)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn viewport() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn events_reach_the_channel() {
        let mut app = app();
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.connect_events(tx);

        app.dispatch_key(key(KeyCode::Enter));
        let event = rx.try_recv().unwrap();
        assert_eq!(event, DropdownEvent::ExpandedChanged { expanded: true });

        app.handle_dropdown_event(event);
        assert_eq!(app.event_count, 1);
        assert_eq!(app.last_event, Some("expandedChanged"));
        assert!(app.toast.is_none());
    }

    #[test]
    fn click_outside_closes_the_menu() {
        let mut app = app();
        app.dropdown.layout(Rect::new(2, 2, 30, 1), viewport());
        app.ensure_attached();

        let trigger = app.dropdown.current_layout().trigger;
        app.handle_click(Position::new(trigger.x, trigger.y));
        assert!(app.dropdown.is_expanded());
        assert_eq!(app.document.listener_count(), 1);

        app.handle_click(Position::new(79, 23));
        assert!(!app.dropdown.is_expanded());
        assert_eq!(app.document.listener_count(), 0);
    }

    #[test]
    fn focus_routes_keys_to_the_logs_panel() {
        let mut app = app();
        app.focus_next();
        assert!(app.is_focused(ComponentId::Logs));

        app.dispatch_key(key(KeyCode::Enter));
        assert!(!app.dropdown.is_expanded());
    }

    #[test]
    fn shutdown_detaches_and_releases_listeners() {
        let mut app = app();
        app.dropdown.layout(Rect::new(2, 2, 30, 1), viewport());
        app.ensure_attached();
        app.dropdown.toggle();
        assert_eq!(app.document.listener_count(), 1);

        app.shutdown();
        assert_eq!(app.document.listener_count(), 0);
        assert_eq!(app.dropdown.lifecycle(), crate::dropdown::Lifecycle::Detached);
    }
}
