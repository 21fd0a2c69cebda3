// Theme support for the TUI
//
// Provides color palettes that can be configured via config file.
// "auto" uses terminal's ANSI palette, named themes use true color (RGB).

use crate::dropdown::TriggerStyle;
use ratatui::style::Color;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Trigger colors
    pub trigger: Color,
    pub trigger_primary: Color,
    pub trigger_secondary: Color,
    pub link: Color,
    /// Text drawn on filled (primary/secondary) triggers
    pub trigger_text: Color,

    // Menu colors
    pub menu_border: Color,
    pub item: Color,
    pub item_active: Color,
    pub item_disabled: Color,
    pub header: Color,
    pub muted: Color,
    pub search: Color,
    pub highlight: Color,

    // UI element colors
    pub error: Color,
    pub status_bar: Color,
    pub title: Color,
    pub border: Color,
    pub panel_logs: Color,
}

impl Theme {
    /// Names accepted by [`Theme::by_name`]
    pub const NAMES: [&'static str; 4] = ["auto", "dracula", "nord", "gruvbox"];

    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            _ => Self::auto(), // "auto" or unknown
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            trigger: Color::White,
            trigger_primary: Color::Blue,
            trigger_secondary: Color::DarkGray,
            link: Color::Cyan,
            trigger_text: Color::White,
            menu_border: Color::White,
            item: Color::Reset,
            item_active: Color::Cyan,
            item_disabled: Color::DarkGray,
            header: Color::Yellow,
            muted: Color::Gray,
            search: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            status_bar: Color::Green,
            title: Color::Cyan,
            border: Color::White,
            panel_logs: Color::DarkGray,
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            trigger: Color::Rgb(0xf8, 0xf8, 0xf2),           // foreground
            trigger_primary: Color::Rgb(0xbd, 0x93, 0xf9),   // purple
            trigger_secondary: Color::Rgb(0x44, 0x47, 0x5a), // current line
            link: Color::Rgb(0x8b, 0xe9, 0xfd),              // cyan
            trigger_text: Color::Rgb(0x28, 0x2a, 0x36),      // background
            menu_border: Color::Rgb(0xbd, 0x93, 0xf9),       // purple
            item: Color::Rgb(0xf8, 0xf8, 0xf2),              // foreground
            item_active: Color::Rgb(0x50, 0xfa, 0x7b),       // green
            item_disabled: Color::Rgb(0x62, 0x72, 0xa4),     // comment
            header: Color::Rgb(0xff, 0x79, 0xc6),            // pink
            muted: Color::Rgb(0x62, 0x72, 0xa4),             // comment
            search: Color::Rgb(0x8b, 0xe9, 0xfd),            // cyan
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c),         // yellow
            error: Color::Rgb(0xff, 0x55, 0x55),             // red
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b),        // green
            title: Color::Rgb(0x8b, 0xe9, 0xfd),             // cyan
            border: Color::Rgb(0x62, 0x72, 0xa4),            // comment
            panel_logs: Color::Rgb(0x62, 0x72, 0xa4),        // comment
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            trigger: Color::Rgb(0xd8, 0xde, 0xe9),           // snow storm
            trigger_primary: Color::Rgb(0x5e, 0x81, 0xac),   // frost dark blue
            trigger_secondary: Color::Rgb(0x4c, 0x56, 0x6a), // polar night
            link: Color::Rgb(0x88, 0xc0, 0xd0),              // frost cyan
            trigger_text: Color::Rgb(0xec, 0xef, 0xf4),      // snow storm
            menu_border: Color::Rgb(0x81, 0xa1, 0xc1),       // frost blue
            item: Color::Rgb(0xd8, 0xde, 0xe9),              // snow storm
            item_active: Color::Rgb(0xa3, 0xbe, 0x8c),       // aurora green
            item_disabled: Color::Rgb(0x4c, 0x56, 0x6a),     // polar night
            header: Color::Rgb(0xb4, 0x8e, 0xad),            // aurora purple
            muted: Color::Rgb(0x61, 0x6e, 0x88),             // comment
            search: Color::Rgb(0x88, 0xc0, 0xd0),            // frost cyan
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),         // aurora yellow
            error: Color::Rgb(0xbf, 0x61, 0x6a),             // aurora red
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),        // green
            title: Color::Rgb(0x88, 0xc0, 0xd0),             // frost cyan
            border: Color::Rgb(0x4c, 0x56, 0x6a),            // polar night
            panel_logs: Color::Rgb(0x4c, 0x56, 0x6a),        // polar night
        }
    }

    /// Gruvbox theme - https://github.com/morhetz/gruvbox
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            trigger: Color::Rgb(0xeb, 0xdb, 0xb2),           // fg
            trigger_primary: Color::Rgb(0x45, 0x85, 0x88),   // blue
            trigger_secondary: Color::Rgb(0x50, 0x49, 0x45), // bg2
            link: Color::Rgb(0x83, 0xa5, 0x98),              // aqua
            trigger_text: Color::Rgb(0xfb, 0xf1, 0xc7),      // fg0
            menu_border: Color::Rgb(0x92, 0x83, 0x74),       // gray
            item: Color::Rgb(0xeb, 0xdb, 0xb2),              // fg
            item_active: Color::Rgb(0xb8, 0xbb, 0x26),       // green
            item_disabled: Color::Rgb(0x66, 0x5c, 0x54),     // bg3
            header: Color::Rgb(0xfe, 0x80, 0x19),            // orange
            muted: Color::Rgb(0x92, 0x83, 0x74),             // gray
            search: Color::Rgb(0x83, 0xa5, 0x98),            // aqua
            highlight: Color::Rgb(0xfa, 0xbd, 0x2f),         // yellow
            error: Color::Rgb(0xfb, 0x49, 0x34),             // red
            status_bar: Color::Rgb(0xb8, 0xbb, 0x26),        // green
            title: Color::Rgb(0x83, 0xa5, 0x98),             // aqua
            border: Color::Rgb(0x92, 0x83, 0x74),            // gray
            panel_logs: Color::Rgb(0x92, 0x83, 0x74),        // gray
        }
    }
}

impl Theme {
    /// Colors of the trigger for a style: (foreground, background)
    ///
    /// Only primary and secondary triggers are filled; the others draw text
    /// on the terminal background.
    pub fn trigger_colors(&self, style: TriggerStyle) -> (Color, Option<Color>) {
        match style {
            TriggerStyle::Primary => (self.trigger_text, Some(self.trigger_primary)),
            TriggerStyle::Secondary => (self.trigger_text, Some(self.trigger_secondary)),
            TriggerStyle::Link => (self.link, None),
            TriggerStyle::Borderless | TriggerStyle::Unstyled => (self.trigger, None),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_auto() {
        assert_eq!(Theme::by_name("solarized").name, "auto");
        assert_eq!(Theme::by_name("Dracula").name, "dracula");
        for name in Theme::NAMES {
            assert_eq!(Theme::by_name(name).name, name);
        }
    }

    #[test]
    fn only_boxed_styles_are_filled() {
        let theme = Theme::nord();
        assert!(theme.trigger_colors(TriggerStyle::Primary).1.is_some());
        assert!(theme.trigger_colors(TriggerStyle::Secondary).1.is_some());
        assert_eq!(theme.trigger_colors(TriggerStyle::Link), (theme.link, None));
        assert!(theme.trigger_colors(TriggerStyle::Unstyled).1.is_none());
    }
}
