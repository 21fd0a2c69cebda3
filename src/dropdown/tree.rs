//! Rendered subtree of a component
//!
//! Layout produces a flat list of classed rectangles in paint order: the
//! component's stand-in for its DOM subtree. Queries use the small selector
//! subset components rely on (`.class`, `.a.b`, `#id`).

use super::item::ItemPath;
use ratatui::layout::{Position, Rect};

/// Parsed element selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every listed class must be present
    Classes(Vec<String>),
    Id(String),
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Selector {
    /// Parse a selector; returns `None` for anything outside the supported subset
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(id) = input.strip_prefix('#') {
            return is_ident(id).then(|| Selector::Id(id.to_string()));
        }
        let classes = input.strip_prefix('.')?;
        let classes: Vec<String> = classes.split('.').map(str::to_string).collect();
        classes
            .iter()
            .all(|c| is_ident(c))
            .then_some(Selector::Classes(classes))
    }

    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Selector::Classes(classes) => classes.iter().all(|c| node.has_class(c)),
            Selector::Id(id) => node.id.as_deref() == Some(id.as_str()),
        }
    }
}

/// One element of the rendered subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub area: Rect,
    /// Hidden nodes are laid out (so they can be measured) but never hit
    pub visible: bool,
    /// Item rendered by this node, for item rows
    pub item: Option<ItemPath>,
}

impl Node {
    pub fn new(classes: &[&str], area: Rect) -> Self {
        Self {
            id: None,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            area,
            visible: true,
            item: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add whitespace-separated classes
    pub fn with_extra_classes(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn with_item(mut self, path: ItemPath) -> Self {
        self.item = Some(path);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn hit(&self, position: Position) -> bool {
        self.visible && self.area.contains(position)
    }
}

/// Elements laid out by the last render, in paint order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTree {
    /// Screen area available to the component (the "window")
    pub viewport: Rect,
    nodes: Vec<Node>,
}

impl RenderTree {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node in document order matching `selector`, hidden nodes included
    pub fn query_selector(&self, selector: &str) -> Option<&Node> {
        let selector = Selector::parse(selector)?;
        self.nodes.iter().find(|node| selector.matches(node))
    }

    /// Whether `position` falls on any visible node
    pub fn contains(&self, position: Position) -> bool {
        self.nodes.iter().any(|node| node.hit(position))
    }

    /// Topmost visible node under `position`
    pub fn hit_test(&self, position: Position) -> Option<&Node> {
        // Later nodes paint over earlier ones
        self.nodes.iter().rev().find(|node| node.hit(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> RenderTree {
        let mut tree = RenderTree::new(Rect::new(0, 0, 80, 24));
        tree.push(Node::new(&["dropdown"], Rect::new(2, 2, 10, 1)));
        tree.push(
            Node::new(&["dropdown-toggle", "btn"], Rect::new(2, 2, 10, 1))
                .with_id("trigger")
                .with_extra_classes("extra  wide"),
        );
        tree.push(Node::new(&["dropdown-menu"], Rect::new(2, 3, 20, 5)).hidden());
        tree
    }

    #[test]
    fn selector_subset() {
        assert_eq!(
            Selector::parse(".a.b"),
            Some(Selector::Classes(vec!["a".into(), "b".into()]))
        );
        assert_eq!(Selector::parse("#x"), Some(Selector::Id("x".into())));
        assert_eq!(Selector::parse("div"), None);
        assert_eq!(Selector::parse(".a .b"), None);
        assert_eq!(Selector::parse("."), None);
        assert_eq!(Selector::parse("#"), None);
    }

    #[test]
    fn query_finds_hidden_nodes() {
        let tree = tree();
        assert!(tree.query_selector(".dropdown-menu").is_some());
        assert_eq!(
            tree.query_selector("#trigger").map(|n| n.area),
            Some(Rect::new(2, 2, 10, 1))
        );
        assert!(tree.query_selector(".btn.wide").is_some());
        assert!(tree.query_selector(".missing").is_none());
        assert!(tree.query_selector("not a selector").is_none());
    }

    #[test]
    fn containment_ignores_hidden_nodes() {
        let tree = tree();
        assert!(tree.contains(Position::new(3, 2)));
        // Inside the hidden menu only
        assert!(!tree.contains(Position::new(3, 5)));
        assert!(!tree.contains(Position::new(40, 20)));
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let tree = tree();
        let hit = tree.hit_test(Position::new(2, 2)).unwrap();
        assert!(hit.has_class("dropdown-toggle"));
    }
}
