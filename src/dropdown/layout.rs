//! Dropdown layout
//!
//! Turns properties and the aligned position into screen rectangles and the
//! classed [`RenderTree`] the component queries afterwards. Pure: drawing
//! happens in `render`, from the rows computed here.
//!
//! The menu is always laid out, even while closed, so it can be measured
//! before it is shown; closed menus produce hidden nodes.

use super::align::{fit_to_viewport, AlignedPosition};
use super::item::{item_at, Item, ItemKind, ItemPath};
use super::props::{DropdownProps, IndicatorsPosition};
use super::tree::{Node, RenderTree};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Narrowest menu, so short labels still get a usable popup
const MIN_MENU_WIDTH: u16 = 12;

/// Width reserved for the search field
const SEARCH_WIDTH: u16 = 20;

/// Borders plus one column of padding on each side
const MENU_CHROME_WIDTH: u16 = 4;

/// Top and bottom borders
const MENU_CHROME_HEIGHT: u16 = 2;

/// What a menu row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRow {
    HelpText,
    Search,
    /// Selectable (or disabled) entry
    Item { path: ItemPath, depth: u16 },
    /// Header items and group labels
    Header { path: ItemPath, depth: u16 },
    Divider,
    /// Shown when a search matched nothing
    Empty,
    Caption,
    Button,
}

/// Result of laying out a dropdown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownLayout {
    pub tree: RenderTree,
    pub trigger: Rect,
    pub menu: Rect,
    /// Rows that fit inside the menu, with their areas
    pub rows: Vec<(MenuRow, Rect)>,
}

/// Glyph drawn for a spritemap symbol
pub fn icon_glyph(symbol: &str) -> &'static str {
    match symbol {
        "check" | "check-circle" => "✓",
        "times" | "times-circle" => "×",
        "plus" => "+",
        "minus" => "−",
        "star" | "star-o" => "★",
        "angle-right" => "›",
        "angle-left" => "‹",
        "info-circle" => "ℹ",
        "warning" | "exclamation-circle" => "!",
        _ => "•",
    }
}

/// Text of the trigger button
pub fn trigger_text(props: &DropdownProps) -> String {
    if props.style.is_boxed() {
        format!("[ {} ▾ ]", props.label)
    } else {
        format!("{} ▾", props.label)
    }
}

/// Label of an item row, including check marks and indicator glyphs
pub fn item_text(item: &Item, depth: u16, indicators: Option<IndicatorsPosition>) -> String {
    let indent = "  ".repeat(usize::from(depth));
    let label = item.label.as_deref().unwrap_or_default();

    let label = match &item.kind {
        ItemKind::Checkbox { checked, .. } => {
            format!("[{}] {}", if *checked { "x" } else { " " }, label)
        }
        ItemKind::Radio { checked, .. } => {
            format!("({}) {}", if *checked { "•" } else { " " }, label)
        }
        ItemKind::Button => format!("[ {} ]", label),
        _ => label.to_string(),
    };

    let Some(icon) = &item.icon else {
        return format!("{}{}", indent, label);
    };
    let glyph = icon_glyph(&icon.symbol);
    match icon.alignment.or(indicators).unwrap_or(IndicatorsPosition::Left) {
        IndicatorsPosition::Left => format!("{}{} {}", indent, glyph, label),
        IndicatorsPosition::Right => format!("{}{} {}", indent, label, glyph),
    }
}

/// Text a row displays; dividers and the search field are drawn specially
pub fn row_text(row: &MenuRow, props: &DropdownProps, search_value: &str) -> String {
    match row {
        MenuRow::HelpText => props.help_text.clone().unwrap_or_default(),
        MenuRow::Search => format!("⌕ {}", search_value),
        MenuRow::Item { path, depth } => item_at(&props.items, path)
            .map(|item| item_text(item, *depth, props.indicators_position))
            .unwrap_or_default(),
        MenuRow::Header { path, depth } => item_at(&props.items, path)
            .and_then(|item| item.label.as_deref())
            .map(|label| format!("{}{}", "  ".repeat(usize::from(*depth)), label))
            .unwrap_or_default(),
        MenuRow::Divider => String::new(),
        MenuRow::Empty => "No results found".to_string(),
        MenuRow::Caption => props.caption.clone().unwrap_or_default(),
        MenuRow::Button => props
            .button
            .as_ref()
            .map(|b| format!("[ {} ]", b.label))
            .unwrap_or_default(),
    }
}

fn push_item_rows(items: &[Item], prefix: &mut ItemPath, depth: u16, rows: &mut Vec<MenuRow>) {
    for (i, item) in items.iter().enumerate() {
        prefix.push(i);
        match &item.kind {
            ItemKind::Separator => rows.push(MenuRow::Divider),
            ItemKind::Header => rows.push(MenuRow::Header {
                path: prefix.clone(),
                depth,
            }),
            ItemKind::Group { items } | ItemKind::RadioGroup { items, .. } => {
                let nested_depth = if item.label.is_some() {
                    rows.push(MenuRow::Header {
                        path: prefix.clone(),
                        depth,
                    });
                    depth + 1
                } else {
                    depth
                };
                push_item_rows(items, prefix, nested_depth, rows);
            }
            _ => rows.push(MenuRow::Item {
                path: prefix.clone(),
                depth,
            }),
        }
        prefix.pop();
    }
}

/// Rows of the menu in display order
pub fn menu_rows(props: &DropdownProps, filtering: bool) -> Vec<MenuRow> {
    let mut rows = Vec::new();
    if props.help_text.is_some() {
        rows.push(MenuRow::HelpText);
    }
    if props.searchable {
        rows.push(MenuRow::Search);
    }
    push_item_rows(&props.items, &mut Vec::new(), 0, &mut rows);
    if filtering && props.items.is_empty() {
        rows.push(MenuRow::Empty);
    }
    if props.caption.is_some() {
        rows.push(MenuRow::Caption);
    }
    if props.button.is_some() {
        rows.push(MenuRow::Button);
    }
    rows
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

fn row_node(row: &MenuRow, props: &DropdownProps, area: Rect) -> Node {
    match row {
        MenuRow::HelpText => Node::new(&["dropdown-help"], area),
        MenuRow::Search => Node::new(&["dropdown-search", "form-control"], area),
        MenuRow::Header { .. } => Node::new(&["dropdown-header"], area),
        MenuRow::Divider => Node::new(&["dropdown-divider"], area),
        MenuRow::Empty => Node::new(&["dropdown-empty"], area),
        MenuRow::Caption => Node::new(&["dropdown-caption"], area),
        MenuRow::Button => {
            let style = props.button.as_ref().map(|b| b.style.as_str()).unwrap_or("primary");
            Node::new(&["dropdown-section", "btn"], area).with_extra_classes(&format!("btn-{}", style))
        }
        MenuRow::Item { path, .. } => {
            let mut node = Node::new(&["dropdown-item"], area).with_item(path.clone());
            if let Some(item) = item_at(&props.items, path) {
                node = node.with_extra_classes(&format!("dropdown-item-{}", item.kind.type_name()));
                if item.active {
                    node = node.with_extra_classes("active");
                }
                if item.disabled {
                    node = node.with_extra_classes("disabled");
                }
            }
            node
        }
    }
}

/// Lay out a dropdown whose trigger sits at the top-left of `area`
pub fn compute(
    props: &DropdownProps,
    aligned: Option<&AlignedPosition>,
    filtering: bool,
    search_value: &str,
    area: Rect,
    viewport: Rect,
) -> DropdownLayout {
    let trigger_label = trigger_text(props);
    let trigger = Rect::new(
        area.x,
        area.y,
        text_width(&trigger_label).min(area.width),
        1.min(area.height),
    );

    let rows = menu_rows(props, filtering);
    let content_width = rows
        .iter()
        .map(|row| match row {
            MenuRow::Search => SEARCH_WIDTH,
            other => text_width(&row_text(other, props, search_value)),
        })
        .max()
        .unwrap_or(0);
    let menu_width = (content_width.saturating_add(MENU_CHROME_WIDTH))
        .max(trigger.width)
        .max(MIN_MENU_WIDTH);
    let menu_height = u16::try_from(rows.len())
        .unwrap_or(u16::MAX)
        .saturating_add(MENU_CHROME_HEIGHT);

    // Unaligned menus drop straight down from the trigger
    let (x, y) = aligned
        .map(|a| (a.area.x, a.area.y))
        .unwrap_or((trigger.x, trigger.bottom()));
    let menu = fit_to_viewport(Rect::new(x, y, menu_width, menu_height), viewport);

    let expanded = props.expanded;
    let mut tree = RenderTree::new(viewport);

    let mut container = Node::new(&["dropdown"], trigger);
    if expanded {
        container = container.with_extra_classes("show");
    }
    tree.push(container);

    let mut toggle = Node::new(&["dropdown-toggle", "btn"], trigger)
        .with_extra_classes(&format!("btn-{}", props.style.as_str()));
    if let Some(classes) = &props.trigger_classes {
        toggle = toggle.with_extra_classes(classes);
    }
    tree.push(toggle);

    let mut menu_node = Node::new(&["dropdown-menu"], menu)
        .with_extra_classes(&format!("dropdown-menu-{}", props.menu_type.as_str()));
    if let Some(position) = props.indicators_position {
        menu_node =
            menu_node.with_extra_classes(&format!("dropdown-menu-indicator-{}", position.as_str()));
    }
    if expanded {
        menu_node = menu_node.with_extra_classes("show");
    } else {
        menu_node = menu_node.hidden();
    }
    tree.push(menu_node);

    let inner_width = menu.width.saturating_sub(2);
    let inner_height = usize::from(menu.height.saturating_sub(MENU_CHROME_HEIGHT));
    let mut placed = Vec::with_capacity(rows.len().min(inner_height));
    for (offset, row) in (0u16..).zip(rows.into_iter().take(inner_height)) {
        let row_area = Rect::new(menu.x + 1, menu.y + 1 + offset, inner_width, 1);
        let node = row_node(&row, props, row_area);
        tree.push(if expanded { node } else { node.hidden() });
        placed.push((row, row_area));
    }

    DropdownLayout {
        tree,
        trigger,
        menu,
        rows: placed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dropdown::align::Placement;
    use crate::dropdown::props::{ButtonConfig, TriggerStyle};
    use ratatui::layout::Position;

    const VIEWPORT: Rect = Rect::new(0, 0, 80, 24);

    fn props() -> DropdownProps {
        DropdownProps::new(
            "Fruit",
            vec![
                Item::header("Fresh"),
                Item::new("Apple"),
                Item::separator(),
                Item::group("Citrus", vec![Item::new("Lemon"), Item::checkbox("Lime", true)]),
            ],
        )
    }

    #[test]
    fn rows_flatten_groups_with_headers() {
        let rows = menu_rows(&props(), false);
        assert_eq!(
            rows,
            vec![
                MenuRow::Header { path: vec![0], depth: 0 },
                MenuRow::Item { path: vec![1], depth: 0 },
                MenuRow::Divider,
                MenuRow::Header { path: vec![3], depth: 0 },
                MenuRow::Item { path: vec![3, 0], depth: 1 },
                MenuRow::Item { path: vec![3, 1], depth: 1 },
            ]
        );
    }

    #[test]
    fn optional_rows_follow_props() {
        let props = props()
            .with_help_text("Pick")
            .searchable(true)
            .with_caption("4 fruits")
            .with_button(ButtonConfig::new("Done"));
        let rows = menu_rows(&props, false);
        assert_eq!(rows.first(), Some(&MenuRow::HelpText));
        assert_eq!(rows.get(1), Some(&MenuRow::Search));
        assert_eq!(rows[rows.len() - 2], MenuRow::Caption);
        assert_eq!(rows.last(), Some(&MenuRow::Button));
    }

    #[test]
    fn empty_search_result_gets_a_placeholder_row() {
        let props = DropdownProps::new("Fruit", vec![]);
        assert!(menu_rows(&props, false).is_empty());
        assert_eq!(menu_rows(&props, true), vec![MenuRow::Empty]);
    }

    #[test]
    fn item_text_shows_state_and_indicators() {
        assert_eq!(item_text(&Item::checkbox("Lime", true), 1, None), "  [x] Lime");
        assert_eq!(item_text(&Item::radio("Small", "s"), 0, None), "( ) Small");
        let starred = Item::new("Fav").with_icon("star");
        assert_eq!(item_text(&starred, 0, None), "★ Fav");
        assert_eq!(
            item_text(&starred, 0, Some(IndicatorsPosition::Right)),
            "Fav ★"
        );
    }

    #[test]
    fn closed_menu_is_laid_out_but_hidden() {
        let layout = compute(&props(), None, false, "", Rect::new(4, 2, 40, 10), VIEWPORT);
        assert_eq!(layout.trigger, Rect::new(4, 2, 7, 1));
        let menu = layout.tree.query_selector(".dropdown-menu").unwrap();
        assert!(!menu.visible);
        assert_eq!(menu.area.y, 3);
        assert!(!layout.tree.contains(Position::new(5, 4)));
        assert!(layout.tree.contains(Position::new(5, 2)));
    }

    #[test]
    fn open_menu_rows_are_hit_testable() {
        let props = props().expanded(true).with_style(TriggerStyle::Primary);
        let layout = compute(&props, None, false, "", Rect::new(0, 0, 40, 10), VIEWPORT);
        assert!(layout.tree.query_selector(".btn-primary").is_some());

        let (_, apple_area) = &layout.rows[1];
        let hit = layout
            .tree
            .hit_test(Position::new(apple_area.x + 1, apple_area.y))
            .unwrap();
        assert_eq!(hit.item, Some(vec![1]));
        assert!(hit.has_class("dropdown-item-item"));
    }

    #[test]
    fn aligned_position_moves_the_menu() {
        let aligned = AlignedPosition {
            placement: Placement::TopLeft,
            area: Rect::new(30, 1, 14, 8),
        };
        let layout = compute(&props(), Some(&aligned), false, "", Rect::new(0, 12, 40, 10), VIEWPORT);
        assert_eq!((layout.menu.x, layout.menu.y), (30, 1));
    }

    #[test]
    fn tall_menus_are_clamped_to_the_viewport() {
        let many: Vec<Item> = (0..40).map(|i| Item::new(format!("Item {}", i))).collect();
        let props = DropdownProps::new("Many", many).expanded(true);
        let layout = compute(&props, None, false, "", Rect::new(0, 0, 40, 24), VIEWPORT);
        assert_eq!(layout.menu.height, 24);
        assert_eq!(layout.rows.len(), 22);
    }
}
