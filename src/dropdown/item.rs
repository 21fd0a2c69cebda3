//! Menu items
//!
//! Items arrive from hosts in a permissive shape ([`RawItem`], tagged by a
//! `type` string) and are validated into [`Item`], whose [`ItemKind`] only
//! admits the shapes each item type actually supports.

use super::props::{IndicatorsPosition, PropsError};
use serde::{Deserialize, Serialize};

/// Indicator symbol drawn next to an item label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Symbol name inside the spritemap
    pub symbol: String,
    /// Side of the label the symbol sits on; falls back to the menu's indicators position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<IndicatorsPosition>,
}

/// Validated item variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// Plain selectable entry
    Item,
    /// Visual divider
    Separator,
    /// Non-selectable section label
    Header,
    /// Labelled section holding nested items
    Group { items: Vec<Item> },
    /// Set of radios sharing one input name
    #[serde(rename = "radiogroup")]
    RadioGroup {
        name: Option<String>,
        items: Vec<Item>,
    },
    Checkbox {
        checked: bool,
        name: Option<String>,
        value: Option<String>,
    },
    Radio { checked: bool, value: Option<String> },
    Button,
}

impl ItemKind {
    /// Type name as written in item definitions
    pub fn type_name(&self) -> &'static str {
        match self {
            ItemKind::Item => "item",
            ItemKind::Separator => "separator",
            ItemKind::Header => "header",
            ItemKind::Group { .. } => "group",
            ItemKind::RadioGroup { .. } => "radiogroup",
            ItemKind::Checkbox { .. } => "checkbox",
            ItemKind::Radio { .. } => "radio",
            ItemKind::Button => "button",
        }
    }

    /// Nested items of groups
    pub fn children(&self) -> Option<&[Item]> {
        match self {
            ItemKind::Group { items } | ItemKind::RadioGroup { items, .. } => Some(items),
            _ => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Item>> {
        match self {
            ItemKind::Group { items } | ItemKind::RadioGroup { items, .. } => Some(items),
            _ => None,
        }
    }
}

/// One entry of a dropdown menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub active: bool,
    pub disabled: bool,
}

impl Item {
    fn with_kind(label: Option<String>, kind: ItemKind) -> Self {
        Self {
            label,
            kind,
            href: None,
            icon: None,
            active: false,
            disabled: false,
        }
    }

    pub fn new(label: impl Into<String>) -> Self {
        Self::with_kind(Some(label.into()), ItemKind::Item)
    }

    pub fn separator() -> Self {
        Self::with_kind(None, ItemKind::Separator)
    }

    pub fn header(label: impl Into<String>) -> Self {
        Self::with_kind(Some(label.into()), ItemKind::Header)
    }

    pub fn group(label: impl Into<String>, items: Vec<Item>) -> Self {
        Self::with_kind(Some(label.into()), ItemKind::Group { items })
    }

    pub fn radio_group(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self::with_kind(
            None,
            ItemKind::RadioGroup {
                name: Some(name.into()),
                items,
            },
        )
    }

    pub fn checkbox(label: impl Into<String>, checked: bool) -> Self {
        Self::with_kind(
            Some(label.into()),
            ItemKind::Checkbox {
                checked,
                name: None,
                value: None,
            },
        )
    }

    pub fn radio(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_kind(
            Some(label.into()),
            ItemKind::Radio {
                checked: false,
                value: Some(value.into()),
            },
        )
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::with_kind(Some(label.into()), ItemKind::Button)
    }

    pub fn with_icon(mut self, symbol: impl Into<String>) -> Self {
        self.icon = Some(Icon {
            symbol: symbol.into(),
            alignment: None,
        });
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Separators and headers never take part in search or selection
    pub fn is_structural(&self) -> bool {
        matches!(self.kind, ItemKind::Separator | ItemKind::Header)
    }

    /// Whether the item can be highlighted and activated
    pub fn is_selectable(&self) -> bool {
        !self.disabled
            && matches!(
                self.kind,
                ItemKind::Item | ItemKind::Checkbox { .. } | ItemKind::Radio { .. } | ItemKind::Button
            )
    }

    /// Checked state of checkboxes and radios
    pub fn is_checked(&self) -> Option<bool> {
        match self.kind {
            ItemKind::Checkbox { checked, .. } | ItemKind::Radio { checked, .. } => Some(checked),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Item paths
// ─────────────────────────────────────────────────────────────────────────────

/// Position of an item in a (possibly nested) list: one index per level
pub type ItemPath = Vec<usize>;

/// Look up the item at `path`
pub fn item_at<'a>(items: &'a [Item], path: &[usize]) -> Option<&'a Item> {
    let (first, rest) = path.split_first()?;
    let item = items.get(*first)?;
    if rest.is_empty() {
        Some(item)
    } else {
        item_at(item.kind.children()?, rest)
    }
}

/// Mutable access to the children of the group at `path` (the top-level list for an empty path)
pub fn children_at_mut<'a>(items: &'a mut Vec<Item>, path: &[usize]) -> Option<&'a mut Vec<Item>> {
    match path.split_first() {
        None => Some(items),
        Some((first, rest)) => {
            let nested = items.get_mut(*first)?.kind.children_mut()?;
            children_at_mut(nested, rest)
        }
    }
}

/// Paths of every selectable item in display order (group children included)
pub fn selectable_paths(items: &[Item]) -> Vec<ItemPath> {
    fn walk(items: &[Item], prefix: &mut ItemPath, out: &mut Vec<ItemPath>) {
        for (i, item) in items.iter().enumerate() {
            prefix.push(i);
            if item.is_selectable() {
                out.push(prefix.clone());
            }
            if let Some(children) = item.kind.children() {
                walk(children, prefix, out);
            }
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    walk(items, &mut Vec::new(), &mut out);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw items (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Item type tag as written in config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Item,
    Separator,
    Header,
    Group,
    Radiogroup,
    Checkbox,
    Radio,
    Button,
}

/// Item as loaded from config, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ItemType,
    pub href: Option<String>,
    pub icon: Option<Icon>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub checked: bool,
    #[serde(alias = "inputName")]
    pub input_name: Option<String>,
    #[serde(alias = "inputValue")]
    pub input_value: Option<String>,
    pub items: Option<Vec<RawItem>>,
}

/// Validate a list of raw items
pub fn validate_items(raw: Vec<RawItem>) -> Result<Vec<Item>, PropsError> {
    validate_list(raw, "items")
}

fn validate_list(raw: Vec<RawItem>, prefix: &str) -> Result<Vec<Item>, PropsError> {
    raw.into_iter()
        .enumerate()
        .map(|(i, item)| validate_item(item, &format!("{}[{}]", prefix, i)))
        .collect()
}

fn validate_item(raw: RawItem, path: &str) -> Result<Item, PropsError> {
    let invalid = |reason: &str| PropsError::InvalidItem {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let is_group = matches!(raw.kind, ItemType::Group | ItemType::Radiogroup);
    if !is_group && raw.items.is_some() {
        return Err(invalid("only group and radiogroup items may contain nested items"));
    }

    let needs_label = matches!(
        raw.kind,
        ItemType::Item | ItemType::Header | ItemType::Checkbox | ItemType::Radio | ItemType::Button
    );
    if needs_label && raw.label.is_none() {
        return Err(invalid("label is required"));
    }

    let nested_path = format!("{}.items", path);
    let kind = match raw.kind {
        ItemType::Item => ItemKind::Item,
        ItemType::Separator => ItemKind::Separator,
        ItemType::Header => ItemKind::Header,
        ItemType::Button => ItemKind::Button,
        ItemType::Checkbox => ItemKind::Checkbox {
            checked: raw.checked,
            name: raw.input_name,
            value: raw.input_value,
        },
        ItemType::Radio => ItemKind::Radio {
            checked: raw.checked,
            value: raw.input_value,
        },
        ItemType::Group => {
            let nested = raw.items.filter(|items| !items.is_empty());
            let nested = nested.ok_or_else(|| invalid("group requires nested items"))?;
            ItemKind::Group {
                items: validate_list(nested, &nested_path)?,
            }
        }
        ItemType::Radiogroup => {
            let nested = raw.items.filter(|items| !items.is_empty());
            let nested = nested.ok_or_else(|| invalid("radiogroup requires nested items"))?;
            let items = validate_list(nested, &nested_path)?;
            if items
                .iter()
                .any(|item| !matches!(item.kind, ItemKind::Radio { .. }))
            {
                return Err(invalid("radiogroup may only contain radio items"));
            }
            if items.iter().filter(|item| item.is_checked() == Some(true)).count() > 1 {
                return Err(invalid("radiogroup may have at most one checked radio"));
            }
            ItemKind::RadioGroup {
                name: raw.input_name,
                items,
            }
        }
    };

    Ok(Item {
        label: raw.label,
        kind,
        href: raw.href,
        icon: raw.icon,
        active: raw.active,
        disabled: raw.disabled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        items: Vec<RawItem>,
    }

    fn parse(toml_str: &str) -> Result<Vec<Item>, PropsError> {
        let wrapper: Wrapper = toml::from_str(toml_str).expect("raw items should parse");
        validate_items(wrapper.items)
    }

    #[test]
    fn missing_type_means_plain_item() {
        let items = parse("[[items]]\nlabel = \"Apple\"").unwrap();
        assert_eq!(items, vec![Item::new("Apple")]);
    }

    #[test]
    fn groups_validate_nested_items() {
        let items = parse(
            r#"
[[items]]
type = "group"
label = "Fruit"

[[items.items]]
label = "Apple"

[[items.items]]
type = "separator"
"#,
        )
        .unwrap();
        assert_eq!(
            items[0].kind.children().map(|c| c.len()),
            Some(2),
            "group should keep both children"
        );

        let err = parse("[[items]]\ntype = \"group\"\nlabel = \"Empty\"").unwrap_err();
        assert_eq!(
            err,
            PropsError::InvalidItem {
                path: "items[0]".to_string(),
                reason: "group requires nested items".to_string(),
            }
        );
    }

    #[test]
    fn nested_errors_report_full_path() {
        let err = parse(
            r#"
[[items]]
label = "Ok"

[[items]]
type = "radiogroup"

[[items.items]]
type = "radio"
"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PropsError::InvalidItem {
                path: "items[1].items[0]".to_string(),
                reason: "label is required".to_string(),
            }
        );
    }

    #[test]
    fn radiogroup_rejects_non_radio_children() {
        let err = parse(
            r#"
[[items]]
type = "radiogroup"

[[items.items]]
type = "checkbox"
label = "Nope"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, PropsError::InvalidItem { .. }));
    }

    #[test]
    fn only_groups_nest() {
        let err = parse("[[items]]\nlabel = \"Leaf\"\nitems = []").unwrap_err();
        assert!(err.to_string().contains("nested items"));
    }

    #[test]
    fn selectable_paths_skip_structural_and_disabled() {
        let items = vec![
            Item::header("Fruit"),
            Item::new("Apple"),
            Item::separator(),
            Item::new("Banana").disabled(),
            Item::radio_group("size", vec![Item::radio("Small", "s"), Item::radio("Large", "l")]),
        ];
        assert_eq!(
            selectable_paths(&items),
            vec![vec![1], vec![4, 0], vec![4, 1]]
        );
    }

    #[test]
    fn path_lookup() {
        let items = vec![
            Item::new("Apple"),
            Item::group("More", vec![Item::new("Kiwi"), Item::checkbox("Ripe", true)]),
        ];
        let ripe = item_at(&items, &[1, 1]).unwrap();
        assert_eq!(ripe.is_checked(), Some(true));
        let mut owned = items.clone();
        let group = children_at_mut(&mut owned, &[1]).unwrap();
        assert_eq!(group.len(), 2);
        assert!(item_at(&items, &[0, 0]).is_none());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Item::separator()).unwrap();
        assert_eq!(json["type"], "separator");
        let json = serde_json::to_value(Item::checkbox("Ripe", true)).unwrap();
        assert_eq!(json["type"], "checkbox");
        assert_eq!(json["checked"], true);
    }
}
