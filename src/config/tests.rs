//! Configuration tests
//!
//! These tests guard the config file format: the generated template must
//! parse back into the same configuration, and broken sections must fail
//! loudly instead of falling back to defaults.

use super::*;
use crate::dropdown::{IndicatorsPosition, ItemKind, TriggerStyle};

fn parse(toml_str: &str) -> Result<Config> {
    let file: FileConfig = toml::from_str(toml_str)?;
    Config::resolve(file, EnvOverrides::default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that the serialized default config parses back to the same values.
/// This catches TOML syntax errors like a nested `[[...items]]` table emitted
/// before its parent's keys.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed = parse(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let parsed = parsed.unwrap();
    assert_eq!(parsed.theme, config.theme);
    assert_eq!(parsed.logging.level, config.logging.level);
    assert_eq!(parsed.dropdown, config.dropdown);
}

/// Values that only appear when set (icons, selectors, flags) survive too
#[test]
fn test_config_roundtrip_customized_dropdown() {
    let mut config = Config::default();
    config.theme = "nord".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;
    config.dropdown = Config::sample_dropdown()
        .with_style(TriggerStyle::Link)
        .with_indicators_position(IndicatorsPosition::Right)
        .with_trigger_classes("wide \"quoted\"")
        .with_align_element_selector(None)
        .unwrap();

    let parsed = parse(&config.to_toml()).expect("customized config should round-trip");
    assert_eq!(parsed.theme, "nord");
    assert!(parsed.logging.file_enabled);
    assert_eq!(parsed.logging.file_rotation, LogRotation::Hourly);
    assert_eq!(parsed.dropdown, config.dropdown);
    assert_eq!(parsed.dropdown.align_element_selector, None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_sections_use_defaults() {
    let config = parse("").unwrap();
    assert_eq!(config.theme, "auto");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.dropdown, Config::sample_dropdown());
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
theme = "dracula"

[logging]
level = "warn"
"#,
    )
    .unwrap();
    let env = EnvOverrides {
        theme: Some("gruvbox".to_string()),
        log_level: Some("trace".to_string()),
    };

    let config = Config::resolve(file, env).unwrap();
    assert_eq!(config.theme, "gruvbox");
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.logging.filter_directive(), "tui_dropdown=trace");
}

// ─────────────────────────────────────────────────────────────────────────────
// Dropdown section
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_dropdown_section_with_nested_items() {
    let config = parse(
        r#"
[dropdown]
label = "Sort"
style = "primary"
searchable = true

[[dropdown.items]]
label = "Name"

[[dropdown.items]]
type = "radiogroup"
input_name = "order"

[[dropdown.items.items]]
type = "radio"
label = "Ascending"
checked = true

[[dropdown.items.items]]
type = "radio"
label = "Descending"
"#,
    )
    .unwrap();

    let dropdown = &config.dropdown;
    assert_eq!(dropdown.label, "Sort");
    assert_eq!(dropdown.style, TriggerStyle::Primary);
    assert!(dropdown.searchable);
    match &dropdown.items[1].kind {
        ItemKind::RadioGroup { name, items } => {
            assert_eq!(name.as_deref(), Some("order"));
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].is_checked(), Some(true));
        }
        other => panic!("expected radiogroup, got {:?}", other),
    }
}

#[test]
fn test_invalid_dropdown_section_is_an_error() {
    let err = parse(
        r#"
[dropdown]
label = "Broken"

[[dropdown.items]]
type = "group"
label = "Empty group"
"#,
    )
    .unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("Invalid [dropdown] section"), "{}", message);
    assert!(message.contains("items[0]"), "{}", message);
}

#[test]
fn test_unknown_style_is_a_parse_error() {
    let result: Result<FileConfig, _> = toml::from_str("[dropdown]\nlabel = \"x\"\nstyle = \"fancy\"\n");
    assert!(result.is_err());
}

#[test]
fn test_missing_config_file_is_not_an_error() {
    let path = std::env::temp_dir().join("tui-dropdown-does-not-exist.toml");
    assert!(Config::load_file_config(&path).unwrap().is_none());
}

#[test]
fn test_template_lists_option_sets() {
    let toml = Config::default().to_toml();
    assert!(
        toml.contains("# borderless, link, primary, secondary, unstyled"),
        "{}",
        toml
    );
    assert!(toml.contains("# form, list"), "{}", toml);
    assert!(toml.contains("indicators_position = \"left\"  # left, right"), "{}", toml);
    assert!(toml.contains("# button, reset, submit"), "{}", toml);
}
