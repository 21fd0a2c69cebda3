//! Dropdown property schema
//!
//! Every property a host can set on a dropdown is a typed field here.
//! Enum-valued properties only accept the option sets listed on each type;
//! deserializing an unknown value fails with serde's "unknown variant" error
//! naming the accepted values.
//!
//! Loosely-typed input (config files) arrives as [`RawDropdownProps`] and is
//! validated into [`DropdownProps`] through `TryFrom`, which reports missing
//! required properties and malformed items as [`PropsError`].

use super::item::{validate_items, Item, RawItem};
use super::tree::Selector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Selector used to align the menu when the host doesn't provide one
pub const DEFAULT_ALIGN_ELEMENT_SELECTOR: &str = ".dropdown-toggle";

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Validation failure for dropdown properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropsError {
    /// A required property was not provided
    MissingRequired(&'static str),
    /// A property value is outside its accepted set
    InvalidValue {
        property: &'static str,
        value: String,
        reason: &'static str,
    },
    /// An item (or nested item) has an invalid shape
    InvalidItem { path: String, reason: String },
}

impl fmt::Display for PropsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropsError::MissingRequired(property) => {
                write!(f, "missing required property `{}`", property)
            }
            PropsError::InvalidValue {
                property,
                value,
                reason,
            } => write!(f, "invalid value {:?} for `{}`: {}", value, property, reason),
            PropsError::InvalidItem { path, reason } => {
                write!(f, "invalid item at {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for PropsError {}

// ─────────────────────────────────────────────────────────────────────────────
// Option sets
// ─────────────────────────────────────────────────────────────────────────────

/// Style of the trigger button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerStyle {
    Borderless,
    Link,
    Primary,
    Secondary,
    #[default]
    Unstyled,
}

impl TriggerStyle {
    pub const OPTIONS: [&'static str; 5] = ["borderless", "link", "primary", "secondary", "unstyled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Borderless => "borderless",
            Self::Link => "link",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Unstyled => "unstyled",
        }
    }

    /// Whether the trigger is drawn with button brackets
    pub fn is_boxed(&self) -> bool {
        matches!(self, Self::Primary | Self::Secondary)
    }
}

/// Kind of menu: a plain list of links or a form with inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuType {
    Form,
    #[default]
    List,
}

impl MenuType {
    pub const OPTIONS: [&'static str; 2] = ["form", "list"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::List => "list",
        }
    }
}

/// Side on which item indicator symbols are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorsPosition {
    Left,
    Right,
}

impl IndicatorsPosition {
    pub const OPTIONS: [&'static str; 2] = ["left", "right"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Style of the footer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
}

impl ButtonStyle {
    pub const OPTIONS: [&'static str; 2] = ["primary", "secondary"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Behaviour of the footer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    #[default]
    Button,
    Reset,
    Submit,
}

impl ButtonType {
    pub const OPTIONS: [&'static str; 3] = ["button", "reset", "submit"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Reset => "reset",
            Self::Submit => "submit",
        }
    }
}

/// Button placed at the dropdown footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonConfig {
    pub label: String,
    pub style: ButtonStyle,
    #[serde(rename = "type")]
    pub kind: ButtonType,
}

impl ButtonConfig {
    /// Primary `button`-type button with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: ButtonStyle::default(),
            kind: ButtonType::default(),
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_kind(mut self, kind: ButtonType) -> Self {
        self.kind = kind;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validated properties
// ─────────────────────────────────────────────────────────────────────────────

/// Host-facing properties of a dropdown
///
/// `items` doubles as the displayed list: searching replaces it with a
/// filtered view. The aligned menu position is component-internal and
/// deliberately absent here.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownProps {
    /// Label of the trigger button
    pub label: String,
    /// Menu items currently displayed
    pub items: Arc<[Item]>,
    /// Whether the menu is open
    pub expanded: bool,
    /// Caption shown at the bottom of the open menu
    pub caption: Option<String>,
    /// Help text shown at the top of the open menu
    pub help_text: Option<String>,
    /// Path to the SVG spritemap holding icons; forwarded to the renderer untouched
    pub spritemap: Option<String>,
    pub style: TriggerStyle,
    /// Extra classes applied to the trigger element
    pub trigger_classes: Option<String>,
    pub menu_type: MenuType,
    /// Whether the menu has a search field
    pub searchable: bool,
    pub indicators_position: Option<IndicatorsPosition>,
    pub button: Option<ButtonConfig>,
    /// Element the menu is aligned to; `None` disables alignment
    pub align_element_selector: Option<String>,
}

impl DropdownProps {
    /// Properties with every optional value at its default
    pub fn new(label: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            label: label.into(),
            items: items.into(),
            expanded: false,
            caption: None,
            help_text: None,
            spritemap: None,
            style: TriggerStyle::default(),
            trigger_classes: None,
            menu_type: MenuType::default(),
            searchable: false,
            indicators_position: None,
            button: None,
            align_element_selector: Some(DEFAULT_ALIGN_ELEMENT_SELECTOR.to_string()),
        }
    }

    pub fn with_style(mut self, style: TriggerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_menu_type(mut self, menu_type: MenuType) -> Self {
        self.menu_type = menu_type;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn with_spritemap(mut self, spritemap: impl Into<String>) -> Self {
        self.spritemap = Some(spritemap.into());
        self
    }

    pub fn with_trigger_classes(mut self, classes: impl Into<String>) -> Self {
        self.trigger_classes = Some(classes.into());
        self
    }

    pub fn with_indicators_position(mut self, position: IndicatorsPosition) -> Self {
        self.indicators_position = Some(position);
        self
    }

    pub fn with_button(mut self, button: ButtonConfig) -> Self {
        self.button = Some(button);
        self
    }

    /// Set the alignment selector; `None` or an empty string disables alignment
    pub fn with_align_element_selector(mut self, selector: Option<&str>) -> Result<Self, PropsError> {
        self.align_element_selector = normalize_selector(selector)?;
        Ok(self)
    }
}

/// Validate a selector string, treating blank input as "not configured"
pub(crate) fn normalize_selector(selector: Option<&str>) -> Result<Option<String>, PropsError> {
    let Some(selector) = selector.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if Selector::parse(selector).is_none() {
        return Err(PropsError::InvalidValue {
            property: "align_element_selector",
            value: selector.to_string(),
            reason: "expected a class (.name), compound class (.a.b) or id (#name) selector",
        });
    }
    Ok(Some(selector.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw properties (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Footer button as loaded from config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawButton {
    pub label: Option<String>,
    pub style: Option<ButtonStyle>,
    #[serde(rename = "type")]
    pub kind: Option<ButtonType>,
}

/// Dropdown properties as loaded from config, before validation
///
/// Keys are snake_case; the camelCase names hosts commonly use are accepted
/// as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDropdownProps {
    pub label: Option<String>,
    pub items: Option<Vec<RawItem>>,
    pub expanded: Option<bool>,
    pub caption: Option<String>,
    #[serde(alias = "helpText")]
    pub help_text: Option<String>,
    pub spritemap: Option<String>,
    pub style: Option<TriggerStyle>,
    #[serde(alias = "triggerClasses")]
    pub trigger_classes: Option<String>,
    #[serde(rename = "type")]
    pub menu_type: Option<MenuType>,
    pub searchable: Option<bool>,
    #[serde(alias = "indicatorsPosition")]
    pub indicators_position: Option<IndicatorsPosition>,
    pub button: Option<RawButton>,
    #[serde(alias = "alignElementSelector")]
    pub align_element_selector: Option<String>,
}

impl TryFrom<RawDropdownProps> for DropdownProps {
    type Error = PropsError;

    fn try_from(raw: RawDropdownProps) -> Result<Self, Self::Error> {
        let label = raw.label.ok_or(PropsError::MissingRequired("label"))?;
        let items = validate_items(raw.items.ok_or(PropsError::MissingRequired("items"))?)?;

        let button = raw
            .button
            .map(|b| -> Result<ButtonConfig, PropsError> {
                Ok(ButtonConfig {
                    label: b.label.ok_or(PropsError::MissingRequired("button.label"))?,
                    style: b.style.unwrap_or_default(),
                    kind: b.kind.unwrap_or_default(),
                })
            })
            .transpose()?;

        // An absent key means "use the default"; an explicit empty string disables alignment
        let align_element_selector = match raw.align_element_selector.as_deref() {
            None => Some(DEFAULT_ALIGN_ELEMENT_SELECTOR.to_string()),
            Some(selector) => normalize_selector(Some(selector))?,
        };

        Ok(Self {
            label,
            items: items.into(),
            expanded: raw.expanded.unwrap_or(false),
            caption: raw.caption,
            help_text: raw.help_text,
            spritemap: raw.spritemap,
            style: raw.style.unwrap_or_default(),
            trigger_classes: raw.trigger_classes,
            menu_type: raw.menu_type.unwrap_or_default(),
            searchable: raw.searchable.unwrap_or(false),
            indicators_position: raw.indicators_position,
            button,
            align_element_selector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> Result<DropdownProps, PropsError> {
        let raw: RawDropdownProps = toml::from_str(toml_str).expect("raw props should parse");
        DropdownProps::try_from(raw)
    }

    #[test]
    fn defaults_match_schema() {
        let props = DropdownProps::new("Menu", vec![Item::new("One")]);
        assert!(!props.expanded);
        assert!(!props.searchable);
        assert_eq!(props.style, TriggerStyle::Unstyled);
        assert_eq!(props.menu_type, MenuType::List);
        assert_eq!(props.indicators_position, None);
        assert_eq!(
            props.align_element_selector.as_deref(),
            Some(DEFAULT_ALIGN_ELEMENT_SELECTOR)
        );
    }

    #[test]
    fn label_and_items_are_required() {
        assert_eq!(
            parse("items = []").unwrap_err(),
            PropsError::MissingRequired("label")
        );
        assert_eq!(
            parse("label = \"Menu\"").unwrap_err(),
            PropsError::MissingRequired("items")
        );
    }

    #[test]
    fn unknown_enum_value_is_rejected_by_deserialization() {
        let result: Result<RawDropdownProps, _> = toml::from_str("style = \"fancy\"");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("fancy"), "error should name the value: {}", err);
    }

    #[test]
    fn button_defaults_and_required_label() {
        let props = parse(
            r#"
label = "Menu"
items = []
[button]
label = "Apply"
"#,
        )
        .unwrap();
        let button = props.button.unwrap();
        assert_eq!(button.style, ButtonStyle::Primary);
        assert_eq!(button.kind, ButtonType::Button);

        let err = parse(
            r#"
label = "Menu"
items = []
[button]
style = "secondary"
"#,
        )
        .unwrap_err();
        assert_eq!(err, PropsError::MissingRequired("button.label"));
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let props = parse(
            r#"
label = "Menu"
items = []
helpText = "Pick one"
indicatorsPosition = "right"
alignElementSelector = ".my-trigger"
"#,
        )
        .unwrap();
        assert_eq!(props.help_text.as_deref(), Some("Pick one"));
        assert_eq!(props.indicators_position, Some(IndicatorsPosition::Right));
        assert_eq!(props.align_element_selector.as_deref(), Some(".my-trigger"));
    }

    #[test]
    fn empty_selector_disables_alignment() {
        let props = parse("label = \"Menu\"\nitems = []\nalign_element_selector = \"\"").unwrap();
        assert_eq!(props.align_element_selector, None);
    }

    #[test]
    fn malformed_selector_is_rejected() {
        let err = parse("label = \"Menu\"\nitems = []\nalign_element_selector = \"div > a\"")
            .unwrap_err();
        assert!(matches!(
            err,
            PropsError::InvalidValue {
                property: "align_element_selector",
                ..
            }
        ));
    }
}
