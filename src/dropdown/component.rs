//! Dropdown component
//!
//! [`DropdownBase`] owns the dropdown's properties and interaction state:
//! opening and closing, click-outside dismissal through the host's
//! [`Document`], search filtering, menu alignment and item activation.
//!
//! # Lifecycle
//!
//! ```text
//! new()  ──▶ Created ──attached()──▶ Attached ──detached()──▶ Detached
//! ```
//!
//! The host calls [`DropdownBase::layout`] before every draw and
//! [`DropdownBase::attached`] once the first layout exists, so the alignment
//! target can be measured.

use super::align::{Align, AlignedPosition, Aligner, Placement};
use super::events::{DropdownEvent, EventEmitter, SubscriptionId};
use super::item::{children_at_mut, item_at, selectable_paths, Item, ItemKind, ItemPath};
use super::layout::{self, DropdownLayout};
use super::listeners::{ClickEvent, Document, ListenerGroup, OwnerId, Phase};
use super::props::{ButtonConfig, DropdownProps, PropsError, TriggerStyle};
use super::render::{self, MenuView};
use super::search::{ItemSearch, SearchBox};
use super::tree::RenderTree;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};
use ratatui::Frame;
use std::sync::Arc;

/// Menu body, measured for alignment
const MENU_SELECTOR: &str = ".dropdown-menu";

/// Where the component is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Attached,
    Detached,
}

/// A toggleable menu anchored to a trigger
pub struct DropdownBase {
    owner: OwnerId,
    props: DropdownProps,
    document: Document,
    /// Listeners registered while the menu is open
    event_handler: ListenerGroup,
    emitter: EventEmitter,
    aligner: Box<dyn Aligner>,
    aligned_position: Option<AlignedPosition>,
    search: ItemSearch,
    search_box: SearchBox,
    highlighted: Option<ItemPath>,
    layout: DropdownLayout,
    /// Area and viewport of the last layout
    bounds: Option<(Rect, Rect)>,
    lifecycle: Lifecycle,
}

impl DropdownBase {
    pub fn new(props: DropdownProps, document: &Document) -> Self {
        let owner = OwnerId::next();
        tracing::debug!(
            owner = ?owner,
            label = %props.label,
            items = props.items.len(),
            "Dropdown created"
        );

        Self {
            owner,
            props,
            document: document.clone(),
            event_handler: ListenerGroup::new(),
            emitter: EventEmitter::new(),
            aligner: Box::new(Align::default()),
            aligned_position: None,
            search: ItemSearch::new(),
            search_box: SearchBox::new(),
            highlighted: None,
            layout: DropdownLayout::default(),
            bounds: None,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Replace the alignment strategy
    pub fn with_aligner(mut self, aligner: impl Aligner + 'static) -> Self {
        self.aligner = Box::new(aligner);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn owner_id(&self) -> OwnerId {
        self.owner
    }

    pub fn props(&self) -> &DropdownProps {
        &self.props
    }

    /// Items currently displayed (a filtered view while searching)
    pub fn items(&self) -> &Arc<[Item]> {
        &self.props.items
    }

    pub fn is_expanded(&self) -> bool {
        self.props.expanded
    }

    /// Last computed menu alignment; kept after the menu closes
    pub fn aligned_position(&self) -> Option<&AlignedPosition> {
        self.aligned_position.as_ref()
    }

    /// Unfiltered items captured by the first search
    pub fn original_items(&self) -> Option<&Arc<[Item]>> {
        self.search.original()
    }

    /// Rendered subtree of the last layout
    pub fn render_tree(&self) -> &RenderTree {
        &self.layout.tree
    }

    pub fn current_layout(&self) -> &DropdownLayout {
        &self.layout
    }

    pub fn highlighted(&self) -> Option<&[usize]> {
        self.highlighted.as_deref()
    }

    pub fn search_value(&self) -> &str {
        self.search_box.value()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Number of document listeners currently held
    pub fn listener_count(&self) -> usize {
        self.event_handler.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events and lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Subscribe to every event this dropdown emits
    pub fn on(&mut self, handler: impl FnMut(&DropdownEvent) + 'static) -> SubscriptionId {
        self.emitter.on(handler)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.emitter.off(id)
    }

    /// Mounted by the host; aligns an initially open menu
    pub fn attached(&mut self) {
        self.lifecycle = Lifecycle::Attached;
        tracing::debug!(owner = ?self.owner, "Dropdown attached");
        self.sync_expanded(self.props.expanded);
    }

    /// Unmounted by the host; releases every document listener
    pub fn detached(&mut self) {
        self.event_handler.remove_all_listeners();
        self.lifecycle = Lifecycle::Detached;
        tracing::debug!(owner = ?self.owner, "Dropdown detached");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Open / close
    // ─────────────────────────────────────────────────────────────────────────

    /// Open when closed, close when open
    pub fn toggle(&mut self) {
        if self.props.expanded {
            self.set_expanded(false);
        } else {
            self.set_expanded(true);
            self.event_handler
                .add(self.document.on_click(self.owner, Phase::Capture));
        }
    }

    pub fn close(&mut self) {
        self.set_expanded(false);
        self.event_handler.remove_all_listeners();
    }

    /// Document click listener: closes the menu unless the click hit it
    ///
    /// Containment is checked against the current layout, not the one that
    /// existed when the menu opened.
    pub fn handle_doc_click(&mut self, event: &ClickEvent) -> Handled {
        if self.layout.tree.contains(event.target) {
            return Handled::No;
        }
        tracing::trace!(x = event.target.x, y = event.target.y, "Click outside dropdown");
        self.close();
        Handled::Yes
    }

    /// Alignment observer for `expanded`
    ///
    /// Runs on every change of `expanded` and once at attach time.
    pub fn sync_expanded(&mut self, expanded: bool) {
        if !expanded {
            return;
        }
        let Some(selector) = self.props.align_element_selector.as_deref() else {
            return;
        };

        let tree = &self.layout.tree;
        let Some(target) = tree.query_selector(selector) else {
            tracing::debug!(selector, "Alignment target not rendered");
            return;
        };
        let Some(menu) = tree.query_selector(MENU_SELECTOR) else {
            tracing::debug!("Dropdown menu not rendered");
            return;
        };

        let aligned = self
            .aligner
            .align(menu.area, target.area, tree.viewport, Placement::BottomLeft);
        tracing::debug!(placement = ?aligned.placement, area = ?aligned.area, "Menu aligned");
        self.aligned_position = Some(aligned);
        self.relayout();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    /// Filter items by `value`; an empty value restores the original list
    pub fn handle_search(&mut self, value: &str) {
        // The highlight follows its item, which may move or be filtered out
        let anchor = self
            .highlighted
            .as_deref()
            .and_then(|path| self.search.snapshot_path(path));
        let outcome = self.search.apply(&self.props.items, value);
        self.props.items = Arc::clone(&outcome.filtered);
        self.highlighted = anchor.and_then(|path| self.search.displayed_path(&path));
        self.keep_highlight_valid();
        self.relayout();

        self.emitter.emit(DropdownEvent::ItemsFiltered {
            original_items: outcome.original,
            filtered_items: outcome.filtered,
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Host setters
    // ─────────────────────────────────────────────────────────────────────────

    /// Set `expanded`; observers only run when the value changes
    pub fn set_expanded(&mut self, expanded: bool) {
        if self.props.expanded == expanded {
            return;
        }
        self.props.expanded = expanded;
        if !expanded {
            self.highlighted = None;
            self.event_handler.remove_all_listeners();
        }
        self.relayout();
        self.sync_expanded(expanded);
        self.emitter.emit(DropdownEvent::ExpandedChanged { expanded });
    }

    /// Replace the items; any search snapshot is discarded
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.props.items = items.into();
        self.search.reset();
        self.search_box.clear();
        self.highlighted = None;
        self.relayout();
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.props.label = label.into();
        self.relayout();
    }

    pub fn set_style(&mut self, style: TriggerStyle) {
        self.props.style = style;
        self.relayout();
    }

    pub fn set_searchable(&mut self, searchable: bool) {
        self.props.searchable = searchable;
        self.relayout();
    }

    pub fn set_caption(&mut self, caption: Option<String>) {
        self.props.caption = caption;
        self.relayout();
    }

    pub fn set_help_text(&mut self, help_text: Option<String>) {
        self.props.help_text = help_text;
        self.relayout();
    }

    pub fn set_button(&mut self, button: Option<ButtonConfig>) {
        self.props.button = button;
        self.relayout();
    }

    pub fn set_align_element_selector(&mut self, selector: Option<&str>) -> Result<(), PropsError> {
        self.props.align_element_selector = super::props::normalize_selector(selector)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout and input
    // ─────────────────────────────────────────────────────────────────────────

    /// Lay out into `area`; the menu may extend anywhere inside `viewport`
    pub fn layout(&mut self, area: Rect, viewport: Rect) {
        self.bounds = Some((area, viewport));
        self.relayout();
    }

    fn relayout(&mut self) {
        let Some((area, viewport)) = self.bounds else {
            return;
        };
        self.layout = layout::compute(
            &self.props,
            self.aligned_position.as_ref(),
            self.search.is_filtering(),
            self.search_box.value(),
            area,
            viewport,
        );
    }

    /// Mouse-down at `position`, after document listeners have run
    pub fn handle_click(&mut self, position: Position) -> Handled {
        let Some(node) = self.layout.tree.hit_test(position) else {
            return Handled::No;
        };

        if node.has_class("dropdown-toggle") {
            self.toggle();
        } else if let Some(path) = node.item.clone() {
            self.highlighted = Some(path.clone());
            self.activate(&path);
        } else if node.has_class("dropdown-section") {
            self.press_button();
        }
        Handled::Yes
    }

    /// Activate the item at `path` in the displayed list
    pub fn activate(&mut self, path: &[usize]) {
        let Some(item) = item_at(&self.props.items, path).cloned() else {
            return;
        };
        if !item.is_selectable() {
            tracing::debug!(label = ?item.label, "Ignoring activation of unselectable item");
            return;
        }

        let selected = match item.kind {
            ItemKind::Checkbox { .. } | ItemKind::Radio { .. } => self.update_checked(path),
            _ => Some(item),
        };

        if let Some(item) = selected {
            self.relayout();
            self.emitter.emit(DropdownEvent::ItemSelected { item });
        }
    }

    /// Toggle a checkbox or select a radio, in the displayed list and the search snapshot
    fn update_checked(&mut self, path: &[usize]) -> Option<Item> {
        let mut items = self.props.items.to_vec();
        let updated = apply_check(&mut items, path)?;
        let items: Arc<[Item]> = items.into();

        let snapshot: Option<Arc<[Item]>> = match self.search.original() {
            Some(original) if Arc::ptr_eq(original, &self.props.items) => Some(Arc::clone(&items)),
            Some(original) => self.search.snapshot_path(path).and_then(|snapshot_path| {
                let mut snapshot = original.to_vec();
                apply_check(&mut snapshot, &snapshot_path).map(|_| snapshot.into())
            }),
            None => None,
        };
        if let Some(snapshot) = snapshot {
            self.search.replace_original(snapshot);
        }

        self.props.items = items;
        Some(updated)
    }

    /// Press the footer button
    pub fn press_button(&mut self) {
        if let Some(button) = &self.props.button {
            let kind = button.kind;
            self.emitter.emit(DropdownEvent::ButtonClicked { kind });
        }
    }

    fn move_highlight(&mut self, forward: bool) {
        let paths = selectable_paths(&self.props.items);
        if paths.is_empty() {
            self.highlighted = None;
            return;
        }

        let current = self
            .highlighted
            .as_ref()
            .and_then(|h| paths.iter().position(|p| p == h));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => paths.len() - 1,
            (Some(i), true) => (i + 1) % paths.len(),
            (Some(i), false) => (i + paths.len() - 1) % paths.len(),
        };
        self.highlighted = paths.into_iter().nth(next);
    }

    fn keep_highlight_valid(&mut self) {
        if let Some(path) = &self.highlighted {
            if !item_at(&self.props.items, path).is_some_and(Item::is_selectable) {
                self.highlighted = None;
            }
        }
    }

    fn activate_highlighted(&mut self) {
        if let Some(path) = self.highlighted.clone() {
            self.activate(&path);
        } else if self.props.button.is_some() && selectable_paths(&self.props.items).is_empty() {
            self.press_button();
        }
    }
}

/// Apply a checkbox toggle or radio selection at `path`; returns the updated item
fn apply_check(items: &mut Vec<Item>, path: &[usize]) -> Option<Item> {
    let (index, parent) = path.split_last()?;
    let siblings = children_at_mut(items, parent)?;

    match siblings.get(*index)?.kind {
        ItemKind::Checkbox { .. } => {
            if let ItemKind::Checkbox { checked, .. } = &mut siblings.get_mut(*index)?.kind {
                *checked = !*checked;
            }
        }
        ItemKind::Radio { .. } => {
            // Radios sharing a parent list are one group
            for (i, sibling) in siblings.iter_mut().enumerate() {
                if let ItemKind::Radio { checked, .. } = &mut sibling.kind {
                    *checked = i == *index;
                }
            }
        }
        _ => return None,
    }

    siblings.get(*index).cloned()
}

impl std::fmt::Debug for DropdownBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownBase")
            .field("owner", &self.owner)
            .field("label", &self.props.label)
            .field("expanded", &self.props.expanded)
            .field("items", &self.props.items.len())
            .field("listeners", &self.event_handler.len())
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}

impl Component for DropdownBase {
    fn id(&self) -> ComponentId {
        ComponentId::Dropdown
    }

    fn render(&self, f: &mut Frame, _area: Rect, ctx: &RenderContext) {
        let view = MenuView {
            highlighted: self.highlighted(),
            search: &self.search_box,
            focused: ctx.is_focused(self.id()),
        };
        render::draw(f, &self.layout, &self.props, view, ctx.theme);
    }
}

impl Interactive for DropdownBase {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if !self.props.expanded {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    self.toggle();
                    Handled::Yes
                }
                _ => Handled::No,
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.close();
                Handled::Yes
            }
            KeyCode::Up => {
                self.move_highlight(false);
                Handled::Yes
            }
            KeyCode::Down => {
                self.move_highlight(true);
                Handled::Yes
            }
            KeyCode::Enter => {
                self.activate_highlighted();
                Handled::Yes
            }
            KeyCode::Char(' ') if !self.props.searchable => {
                self.activate_highlighted();
                Handled::Yes
            }
            code @ (KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End)
                if self.props.searchable =>
            {
                if self.search_box.handle_key(code) {
                    let value = self.search_box.value().to_string();
                    self.handle_search(&value);
                } else {
                    self.relayout();
                }
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        if !self.props.expanded {
            Some("Enter:open")
        } else if self.props.searchable {
            Some("type:search  ↑↓:move  Enter:select  Esc:close")
        } else {
            Some("↑↓:move  Enter/Space:select  Esc:close")
        }
    }
}
