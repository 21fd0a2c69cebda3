//! Core component trait - the foundation of the UI system
//!
//! Every UI element that can be rendered implements `Component`.
//! This trait provides identity and rendering capability.

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Unique identifier for a component
///
/// Used for:
/// - Focus tracking (which component receives input)
/// - Event routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// The dropdown under test
    Dropdown,
    /// System logs panel
    Logs,
    /// Toast notification (non-focusable)
    Toast,
    /// Status bar (non-focusable)
    StatusBar,
}

impl ComponentId {
    /// Whether this component can receive focus
    pub fn is_focusable(&self) -> bool {
        matches!(self, ComponentId::Dropdown | ComponentId::Logs)
    }

    /// Cycle to next focusable component (Tab behavior)
    pub fn next_focus(self) -> Self {
        match self {
            Self::Dropdown => Self::Logs,
            Self::Logs => Self::Dropdown,
            other => other, // Non-focusable stays put
        }
    }
}

/// Immutable context passed to components during rendering
///
/// Components only see what they need - no access to mutable app state.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,

    /// Animation frame counter (for blinking cursors)
    pub animation_frame: usize,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context
    pub fn new(theme: &'a Theme, focus: ComponentId, animation_frame: usize) -> Self {
        Self {
            theme,
            focus,
            animation_frame,
        }
    }

    /// Check if a component is currently focused
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }
}

/// Base trait for all UI components
///
/// A component is anything that can render itself to the terminal.
/// This is the minimum contract - interactive components also implement
/// [`Interactive`](super::Interactive).
pub trait Component {
    /// Unique identifier for this component
    fn id(&self) -> ComponentId;

    /// Render the component to the given area
    ///
    /// # Arguments
    ///
    /// * `f` - The frame to render to
    /// * `area` - The rectangular area allocated for this component
    /// * `ctx` - Immutable render context (theme, focus, animations)
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_between_focusable_components() {
        assert_eq!(ComponentId::Dropdown.next_focus(), ComponentId::Logs);
        assert_eq!(ComponentId::Logs.next_focus(), ComponentId::Dropdown);
        assert_eq!(ComponentId::Toast.next_focus(), ComponentId::Toast);
        assert!(!ComponentId::StatusBar.is_focusable());
    }
}
