//! Colour menu entries built from `[value, label, ...]` colour maps.

use serde::Serialize;
use serde_json::Value;

/// Map value for the "remove colour" entry.
pub const REMOVE_COLOR: &str = "remove";
/// Map value for the "custom colour" entry.
pub const CUSTOM_COLOR: &str = "custom";

/// One entry of a colour picker menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorChoice {
    pub text: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ColorChoice {
    pub fn remove() -> Self {
        Self {
            text: Some("Remove color".into()),
            value: REMOVE_COLOR.into(),
            icon: Some("color-swatch-remove-color".into()),
        }
    }

    pub fn custom() -> Self {
        Self {
            text: Some("Custom color".into()),
            value: CUSTOM_COLOR.into(),
            icon: Some("color-picker".into()),
        }
    }

    pub fn color(value: &str, label: Option<&str>) -> Self {
        Self {
            text: label.map(str::to_owned),
            value: as_hex_color(value),
            icon: None,
        }
    }
}

/// Bare 6-digit hex values get a `#` and are upper-cased. Everything else
/// passes through untouched.
pub fn as_hex_color(color: &str) -> String {
    if color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit()) {
        format!("#{}", color.to_ascii_uppercase())
    } else {
        color.to_owned()
    }
}

/// Menu entries for a flat colour map. Pairs whose value is not a string are
/// skipped; a trailing value without a label gets no text.
pub fn map_colors(map: &[Value]) -> Vec<ColorChoice> {
    map.chunks(2)
        .filter_map(|pair| {
            let value = pair.first()?.as_str()?;
            let label = pair.get(1).and_then(Value::as_str);
            Some(match value {
                REMOVE_COLOR => ColorChoice::remove(),
                CUSTOM_COLOR => ColorChoice::custom(),
                _ => ColorChoice::color(value, label),
            })
        })
        .collect()
}
