//! Dropdown drawing
//!
//! Paints a [`DropdownLayout`] onto a frame. All geometry comes from the
//! layout; this module only decides glyphs and colors.

use super::item::{item_at, Item};
use super::layout::{row_text, trigger_text, DropdownLayout, MenuRow};
use super::props::{ButtonStyle, DropdownProps, TriggerStyle};
use super::search::SearchBox;
use crate::theme::Theme;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Interaction state the drawing depends on
#[derive(Debug, Clone, Copy)]
pub struct MenuView<'a> {
    pub highlighted: Option<&'a [usize]>,
    pub search: &'a SearchBox,
    /// Whether the component has keyboard focus (shows the search cursor)
    pub focused: bool,
}

fn trigger_style(style: TriggerStyle, expanded: bool, theme: &Theme) -> Style {
    let (fg, bg) = theme.trigger_colors(style);
    let mut out = Style::default().fg(fg);
    if let Some(bg) = bg {
        out = out.bg(bg);
    }
    if style == TriggerStyle::Link {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    if expanded {
        out = out.add_modifier(Modifier::BOLD);
    }
    out
}

fn item_style(item: &Item, highlighted: bool, theme: &Theme) -> Style {
    let style = if item.disabled {
        Style::default().fg(theme.item_disabled)
    } else if item.active || item.is_checked() == Some(true) {
        Style::default().fg(theme.item_active)
    } else {
        Style::default().fg(theme.item)
    };

    if highlighted && !item.disabled {
        style.fg(theme.highlight).add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

fn row_style(row: &MenuRow, props: &DropdownProps, view: &MenuView, theme: &Theme) -> Style {
    match row {
        MenuRow::Item { path, .. } => item_at(&props.items, path)
            .map(|item| item_style(item, view.highlighted == Some(path.as_slice()), theme))
            .unwrap_or_default(),
        MenuRow::Header { .. } => Style::default()
            .fg(theme.header)
            .add_modifier(Modifier::BOLD),
        MenuRow::Search => Style::default().fg(theme.search),
        MenuRow::HelpText | MenuRow::Caption | MenuRow::Empty => Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::ITALIC),
        MenuRow::Divider => Style::default().fg(theme.muted),
        MenuRow::Button => {
            let style = match props.button.as_ref().map(|b| b.style) {
                Some(ButtonStyle::Secondary) => TriggerStyle::Secondary,
                _ => TriggerStyle::Primary,
            };
            trigger_style(style, false, theme)
        }
    }
}

/// Draw the trigger and, when expanded, the menu on top of everything else
pub fn draw(
    f: &mut Frame,
    layout: &DropdownLayout,
    props: &DropdownProps,
    view: MenuView,
    theme: &Theme,
) {
    if layout.trigger.area() > 0 {
        let trigger = Paragraph::new(trigger_text(props))
            .style(trigger_style(props.style, props.expanded, theme));
        f.render_widget(trigger, layout.trigger);
    }

    if !props.expanded || layout.menu.area() == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.menu_border));

    // Clear first so the menu paints over whatever sits below the trigger
    f.render_widget(Clear, layout.menu);
    f.render_widget(block, layout.menu);

    for (row, area) in &layout.rows {
        let style = row_style(row, props, &view, theme);
        let text = match row {
            MenuRow::Divider => "─".repeat(usize::from(area.width)),
            other => row_text(other, props, view.search.value()),
        };
        f.render_widget(Paragraph::new(text).style(style), *area);

        if *row == MenuRow::Search && view.focused {
            place_search_cursor(f, *area, view.search);
        }
    }
}

fn place_search_cursor(f: &mut Frame, area: Rect, search: &SearchBox) {
    let before: String = search.value().chars().take(search.cursor()).collect();
    // "⌕ " prefix
    let offset = 2 + u16::try_from(before.width()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(offset).min(area.right().saturating_sub(1));
    f.set_cursor_position(Position::new(x, area.y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dropdown::item::Item;
    use crate::dropdown::layout::compute;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn line(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    fn render(props: &DropdownProps, highlighted: Option<&[usize]>) -> Buffer {
        let backend = TestBackend::new(30, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let search = SearchBox::new();
        terminal
            .draw(|f| {
                let layout = compute(props, None, false, "", f.area(), f.area());
                let view = MenuView {
                    highlighted,
                    search: &search,
                    focused: true,
                };
                draw(f, &layout, props, view, &Theme::auto());
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn closed_dropdown_draws_only_the_trigger() {
        let props = DropdownProps::new("Fruit", vec![Item::new("Apple")]);
        let buffer = render(&props, None);
        assert!(line(&buffer, 0).starts_with("Fruit ▾"));
        assert!(line(&buffer, 1).trim().is_empty());
    }

    #[test]
    fn open_dropdown_draws_menu_rows() {
        let props = DropdownProps::new(
            "Fruit",
            vec![Item::new("Apple"), Item::separator(), Item::checkbox("Lime", true)],
        )
        .with_style(TriggerStyle::Primary)
        .expanded(true);
        let buffer = render(&props, Some(&[0]));

        assert!(line(&buffer, 0).starts_with("[ Fruit ▾ ]"));
        assert!(line(&buffer, 1).starts_with("┌"));
        assert!(line(&buffer, 2).contains("Apple"));
        assert!(line(&buffer, 3).contains("───"));
        assert!(line(&buffer, 4).contains("[x] Lime"));
        assert!(buffer[(1, 2)].modifier.contains(Modifier::REVERSED));
    }
}
