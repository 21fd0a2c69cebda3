//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use crate::dropdown::{
    ButtonStyle, ButtonType, DropdownProps, IndicatorsPosition, Item, ItemKind, MenuType,
    TriggerStyle,
};

/// TOML string literal with proper escaping
fn quote(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// `key = "value"`, or a commented-out example when unset
fn optional_line(key: &str, value: Option<&str>, example: &str) -> String {
    match value {
        Some(value) => format!("{} = {}\n", key, quote(value)),
        None => format!("# {} = {}\n", key, quote(example)),
    }
}

impl Config {
    /// Serialize one item (and its nested items) as array-of-tables entries
    fn item_to_toml(item: &Item, table: &str, output: &mut String) {
        output.push_str(&format!("\n[[{}]]\n", table));
        output.push_str(&format!("type = \"{}\"\n", item.kind.type_name()));
        if let Some(label) = &item.label {
            output.push_str(&format!("label = {}\n", quote(label)));
        }
        if let Some(href) = &item.href {
            output.push_str(&format!("href = {}\n", quote(href)));
        }
        if let Some(icon) = &item.icon {
            match icon.alignment {
                Some(alignment) => output.push_str(&format!(
                    "icon = {{ symbol = {}, alignment = \"{}\" }}\n",
                    quote(&icon.symbol),
                    alignment.as_str()
                )),
                None => output.push_str(&format!("icon = {{ symbol = {} }}\n", quote(&icon.symbol))),
            }
        }
        if item.active {
            output.push_str("active = true\n");
        }
        if item.disabled {
            output.push_str("disabled = true\n");
        }

        match &item.kind {
            ItemKind::Checkbox {
                checked,
                name,
                value,
            } => {
                if *checked {
                    output.push_str("checked = true\n");
                }
                if let Some(name) = name {
                    output.push_str(&format!("input_name = {}\n", quote(name)));
                }
                if let Some(value) = value {
                    output.push_str(&format!("input_value = {}\n", quote(value)));
                }
            }
            ItemKind::Radio { checked, value } => {
                if *checked {
                    output.push_str("checked = true\n");
                }
                if let Some(value) = value {
                    output.push_str(&format!("input_value = {}\n", quote(value)));
                }
            }
            ItemKind::RadioGroup {
                name: Some(name), ..
            } => {
                output.push_str(&format!("input_name = {}\n", quote(name)));
            }
            _ => {}
        }

        // Nested tables must follow every key of their parent entry
        if let Some(children) = item.kind.children() {
            let nested = format!("{}.items", table);
            for child in children {
                Self::item_to_toml(child, &nested, output);
            }
        }
    }

    /// Serialize the [dropdown] section with its button and items
    pub(super) fn dropdown_to_toml(dropdown: &DropdownProps) -> String {
        let mut output = String::from("[dropdown]\n");
        output.push_str(&format!("label = {}\n", quote(&dropdown.label)));
        output.push_str(&format!(
            "style = \"{}\"  # {}\n",
            dropdown.style.as_str(),
            TriggerStyle::OPTIONS.join(", ")
        ));
        output.push_str(&format!(
            "type = \"{}\"  # {}\n",
            dropdown.menu_type.as_str(),
            MenuType::OPTIONS.join(", ")
        ));
        output.push_str(&format!("searchable = {}\n", dropdown.searchable));
        output.push_str(&format!("expanded = {}\n", dropdown.expanded));
        output.push_str(&optional_line(
            "help_text",
            dropdown.help_text.as_deref(),
            "Shown above the items",
        ));
        output.push_str(&optional_line(
            "caption",
            dropdown.caption.as_deref(),
            "Shown below the items",
        ));
        output.push_str(&optional_line(
            "trigger_classes",
            dropdown.trigger_classes.as_deref(),
            "wide",
        ));
        output.push_str(&optional_line(
            "spritemap",
            dropdown.spritemap.as_deref(),
            "icons.svg",
        ));
        let positions = IndicatorsPosition::OPTIONS.join(", ");
        match dropdown.indicators_position {
            Some(position) => output.push_str(&format!(
                "indicators_position = \"{}\"  # {}\n",
                position.as_str(),
                positions
            )),
            None => output.push_str(&format!(
                "# indicators_position = \"left\"  # {}\n",
                positions
            )),
        }
        // Empty string disables menu alignment
        output.push_str(&format!(
            "align_element_selector = {}\n",
            quote(dropdown.align_element_selector.as_deref().unwrap_or(""))
        ));

        match &dropdown.button {
            Some(button) => {
                output.push_str("\n[dropdown.button]\n");
                output.push_str(&format!("label = {}\n", quote(&button.label)));
                output.push_str(&format!(
                    "style = \"{}\"  # {}\n",
                    button.style.as_str(),
                    ButtonStyle::OPTIONS.join(", ")
                ));
                output.push_str(&format!(
                    "type = \"{}\"  # {}\n",
                    button.kind.as_str(),
                    ButtonType::OPTIONS.join(", ")
                ));
            }
            None => {
                output.push_str("\n# [dropdown.button]\n# label = \"Apply\"\n");
            }
        }

        for item in dropdown.items.iter() {
            Self::item_to_toml(item, "dropdown.items", &mut output);
        }
        output
    }

    /// Render the full config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# tui-dropdown configuration

# Theme: auto, dracula, nord, gruvbox
theme = {theme}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to the in-app log strip)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}

# ─────────────────────────────────────────────────────────────────────────────
# DROPDOWN
# ─────────────────────────────────────────────────────────────────────────────
# Item types: item, separator, header, group, radiogroup, checkbox, radio, button
# Groups and radiogroups hold nested [[...items]] tables.
{dropdown}"#,
            theme = quote(&self.theme),
            log_level = quote(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quote(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quote(&self.logging.file_prefix),
            dropdown = Self::dropdown_to_toml(&self.dropdown),
        )
    }
}
