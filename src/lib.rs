// tui-dropdown - a dropdown widget for ratatui terminal UIs
//
// Architecture:
// - Dropdown: the widget itself (state, search, alignment, layout, drawing)
// - TUI: host event loop embedding one dropdown, with a log strip and status bar
// - Config: layered env > file > defaults configuration, including the dropdown
// - Logging: in-memory tracing layer feeding the log strip

pub mod config;
pub mod dropdown;
pub mod logging;
pub mod theme;
pub mod tui;
