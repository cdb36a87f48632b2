//! Typed table plugin settings.
//!
//! [`TableSettings::from_params`] reads parameters the way the editor does
//! at runtime: a missing or mistyped value silently becomes the default.
//! [`TableSettings::resolve`] is the strict variant used when loading a
//! configuration file, reporting every bad parameter at once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::colors::{ColorChoice, map_colors};
use crate::combine::{consolidate_arr, consolidate_obj};
use crate::error::SettingsError;
use crate::params::{EditorParams, value_kind};

/// Parameter names.
pub mod param {
    pub const SIZING_MODE: &str = "table_sizing_mode";
    pub const RESPONSIVE_WIDTH: &str = "table_responsive_width";
    pub const DEFAULT_ATTRIBUTES: &str = "table_default_attributes";
    pub const DEFAULT_STYLES: &str = "table_default_styles";
    pub const RESIZE_BARS: &str = "table_resize_bars";
    pub const TAB_NAVIGATION: &str = "table_tab_navigation";
    pub const CELL_ADVTAB: &str = "table_cell_advtab";
    pub const ROW_ADVTAB: &str = "table_row_advtab";
    pub const TABLE_ADVTAB: &str = "table_advtab";
    pub const APPEARANCE_OPTIONS: &str = "table_appearance_options";
    pub const GRID: &str = "table_grid";
    pub const STYLE_BY_CSS: &str = "table_style_by_css";
    pub const NORMALIZE_BORDER: &str = "table_normalize_border";
    pub const CELL_CLASS_LIST: &str = "table_cell_class_list";
    pub const ROW_CLASS_LIST: &str = "table_row_class_list";
    pub const TABLE_CLASS_LIST: &str = "table_class_list";
    pub const BORDER_WIDTHS: &str = "table_border_widths";
    pub const BORDER_STYLES: &str = "table_border_styles";
    pub const TOOLBAR: &str = "table_toolbar";
    pub const USE_COLGROUPS: &str = "table_use_colgroups";
    pub const HEADER_TYPE: &str = "table_header_type";
    pub const COLUMN_RESIZING: &str = "table_column_resizing";
    pub const CLONE_ELEMENTS: &str = "table_clone_elements";
    pub const OBJECT_RESIZING: &str = "object_resizing";
    pub const CELL_BACKGROUND_COLOR_MAP: &str = "table_cell_background_color_map";
    pub const CELL_BORDER_COLOR_MAP: &str = "table_cell_border_color_map";
}

pub const DEFAULT_TOOLBAR: &str = "tableprops tabledelete | tableinsertrowbefore tableinsertrowafter tabledeleterow | tableinsertcolbefore tableinsertcolafter tabledeletecol";

/// How new tables are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSizingMode {
    Fixed,
    Relative,
    Responsive,
    #[default]
    Auto,
}

impl TableSizingMode {
    pub const KEYWORDS: &'static [&'static str] = &["fixed", "relative", "responsive", "auto"];

    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "fixed" => Some(Self::Fixed),
            "relative" => Some(Self::Relative),
            "responsive" => Some(Self::Responsive),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Where header rows go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableHeaderType {
    #[default]
    Section,
    Cells,
    SectionCells,
    Auto,
}

impl TableHeaderType {
    pub const KEYWORDS: &'static [&'static str] = &["section", "cells", "sectionCells", "auto"];

    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "section" => Some(Self::Section),
            "cells" => Some(Self::Cells),
            "sectionCells" => Some(Self::SectionCells),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

/// What happens to the table width when a column is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnResizing {
    #[default]
    PreserveTable,
    ResizeTable,
}

impl ColumnResizing {
    pub const KEYWORDS: &'static [&'static str] = &["preservetable", "resizetable"];

    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "preservetable" => Some(Self::PreserveTable),
            "resizetable" => Some(Self::ResizeTable),
            _ => None,
        }
    }
}

/// A `{title, value}` entry of a class or border list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassListItem {
    pub title: String,
    pub value: String,
}

impl ClassListItem {
    pub fn new(title: &str, value: &str) -> Self {
        Self {
            title: title.to_owned(),
            value: value.to_owned(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self::new(
            obj.get("title")?.as_str()?,
            obj.get("value")?.as_str()?,
        ))
    }
}

pub type StringMap = BTreeMap<String, String>;

fn default_attributes() -> StringMap {
    StringMap::from([("border".to_owned(), "1".to_owned())])
}

fn default_styles() -> StringMap {
    StringMap::from([
        ("border-collapse".to_owned(), "collapse".to_owned()),
        ("width".to_owned(), "100%".to_owned()),
    ])
}

fn default_border_widths() -> Vec<ClassListItem> {
    ["1px", "2px", "3px", "4px", "5px"]
        .into_iter()
        .map(|w| ClassListItem::new(w, w))
        .collect()
}

fn default_border_styles() -> Vec<ClassListItem> {
    [
        ("Solid", "solid"),
        ("Dashed", "dashed"),
        ("Dotted", "dotted"),
        ("Double", "double"),
    ]
    .into_iter()
    .map(|(title, value)| ClassListItem::new(title, value))
    .collect()
}

/// Attribute/style values may be written as numbers or booleans too.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_map(map: &Map<String, Value>) -> StringMap {
    map.iter()
        .filter_map(|(k, v)| Some((k.clone(), scalar_string(v)?)))
        .collect()
}

fn class_list(params: &EditorParams, name: &str) -> Option<Vec<ClassListItem>> {
    params
        .get_array(name)
        .map(|items| items.iter().filter_map(ClassListItem::from_value).collect())
}

fn color_map(params: &EditorParams, name: &str) -> Vec<ColorChoice> {
    params
        .get(name)
        .and_then(Value::as_array)
        .map(|map| map_colors(map))
        .unwrap_or_default()
}

/// Resolved table plugin settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSettings {
    sizing_mode: TableSizingMode,
    responsive_width: Option<bool>,
    default_attributes: StringMap,
    default_styles: StringMap,
    resize_bars: bool,
    tab_navigation: bool,
    advanced_cell_tab: bool,
    advanced_row_tab: bool,
    advanced_table_tab: bool,
    appearance_options: bool,
    table_grid: bool,
    style_with_css: bool,
    normalize_border: bool,
    cell_class_list: Vec<ClassListItem>,
    row_class_list: Vec<ClassListItem>,
    table_class_list: Vec<ClassListItem>,
    border_widths: Vec<ClassListItem>,
    border_styles: Vec<ClassListItem>,
    toolbar: String,
    use_column_group: bool,
    header_type: TableHeaderType,
    column_resizing: ColumnResizing,
    clone_elements: Option<Vec<String>>,
    object_resizing: bool,
    cell_background_colors: Vec<ColorChoice>,
    cell_border_colors: Vec<ColorChoice>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self::from_params(&EditorParams::new(), 0)
    }
}

impl TableSettings {
    /// Read settings leniently. `body_width` is the editor body's width in
    /// pixels, used for the default table width when pixel sizing is forced.
    pub fn from_params(params: &EditorParams, body_width: u32) -> Self {
        let sizing_mode = params
            .get(param::SIZING_MODE)
            .and_then(Value::as_str)
            .and_then(TableSizingMode::parse)
            .unwrap_or_default();
        let responsive_width = params.get(param::RESPONSIVE_WIDTH).and_then(Value::as_bool);

        let mut settings = Self {
            sizing_mode,
            responsive_width,
            default_attributes: params
                .get_object(param::DEFAULT_ATTRIBUTES)
                .map(string_map)
                .unwrap_or_else(default_attributes),
            default_styles: StringMap::new(),
            resize_bars: params.get_bool(param::RESIZE_BARS, true),
            tab_navigation: params.get_bool(param::TAB_NAVIGATION, true),
            advanced_cell_tab: params.get_bool(param::CELL_ADVTAB, true),
            advanced_row_tab: params.get_bool(param::ROW_ADVTAB, true),
            advanced_table_tab: params.get_bool(param::TABLE_ADVTAB, true),
            appearance_options: params.get_bool(param::APPEARANCE_OPTIONS, true),
            table_grid: params.get_bool(param::GRID, true),
            style_with_css: params.get_bool(param::STYLE_BY_CSS, false),
            normalize_border: params.get_bool(param::NORMALIZE_BORDER, false),
            cell_class_list: class_list(params, param::CELL_CLASS_LIST).unwrap_or_default(),
            row_class_list: class_list(params, param::ROW_CLASS_LIST).unwrap_or_default(),
            table_class_list: class_list(params, param::TABLE_CLASS_LIST).unwrap_or_default(),
            border_widths: class_list(params, param::BORDER_WIDTHS)
                .unwrap_or_else(default_border_widths),
            border_styles: class_list(params, param::BORDER_STYLES)
                .unwrap_or_else(default_border_styles),
            toolbar: params.get_str(param::TOOLBAR, DEFAULT_TOOLBAR).to_owned(),
            use_column_group: params.get_bool(param::USE_COLGROUPS, false),
            header_type: TableHeaderType::parse(params.get_str(param::HEADER_TYPE, "section"))
                .unwrap_or_default(),
            column_resizing: ColumnResizing::parse(
                params.get_str(param::COLUMN_RESIZING, "preservetable"),
            )
            .unwrap_or_default(),
            clone_elements: clone_elements(params.get(param::CLONE_ELEMENTS)),
            object_resizing: match params.get(param::OBJECT_RESIZING) {
                None => true,
                Some(Value::Bool(b)) => *b,
                Some(Value::String(s)) => s == "table",
                Some(Value::Null) => false,
                Some(_) => true,
            },
            cell_background_colors: color_map(params, param::CELL_BACKGROUND_COLOR_MAP),
            cell_border_colors: color_map(params, param::CELL_BORDER_COLOR_MAP),
        };

        settings.default_styles = params
            .get_object(param::DEFAULT_STYLES)
            .map(string_map)
            .unwrap_or_else(|| settings.determine_default_styles(body_width));
        settings
    }

    /// Validate every table parameter, then read them.
    ///
    /// Unrelated parameters are ignored. All problems are reported together.
    pub fn resolve(params: &EditorParams, body_width: u32) -> Result<Self, Vec<SettingsError>> {
        use param::*;

        let checks = vec![
            check_choice(params, SIZING_MODE, TableSizingMode::KEYWORDS),
            check_bool(params, RESPONSIVE_WIDTH),
            check_string_map(params, DEFAULT_ATTRIBUTES),
            check_string_map(params, DEFAULT_STYLES),
            check_bool(params, RESIZE_BARS),
            check_bool(params, TAB_NAVIGATION),
            check_bool(params, CELL_ADVTAB),
            check_bool(params, ROW_ADVTAB),
            check_bool(params, TABLE_ADVTAB),
            check_bool(params, APPEARANCE_OPTIONS),
            check_bool(params, GRID),
            check_bool(params, STYLE_BY_CSS),
            check_bool(params, NORMALIZE_BORDER),
            check_class_list(params, CELL_CLASS_LIST),
            check_class_list(params, ROW_CLASS_LIST),
            check_class_list(params, TABLE_CLASS_LIST),
            check_class_list(params, BORDER_WIDTHS),
            check_class_list(params, BORDER_STYLES),
            check_string(params, TOOLBAR),
            check_bool(params, USE_COLGROUPS),
            check_choice(params, HEADER_TYPE, TableHeaderType::KEYWORDS),
            check_choice(params, COLUMN_RESIZING, ColumnResizing::KEYWORDS),
            check_clone_elements(params),
            check_object_resizing(params),
            check_color_map(params, CELL_BACKGROUND_COLOR_MAP),
            check_color_map(params, CELL_BORDER_COLOR_MAP),
        ];

        match consolidate_obj(checks, Map::new()) {
            Ok(validated) => {
                tracing::debug!(params = validated.len(), "resolve: table params accepted");
                Ok(Self::from_params(&EditorParams::from(validated), body_width))
            }
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "resolve: table params rejected");
                Err(errors)
            }
        }
    }

    fn determine_default_styles(&self, body_width: u32) -> StringMap {
        let mut styles = default_styles();
        if self.is_pixels_forced() {
            styles.insert("width".to_owned(), format!("{body_width}px"));
        } else if self.is_responsive_forced() {
            styles.remove("width");
        }
        styles
    }

    pub fn table_sizing_mode(&self) -> TableSizingMode {
        self.sizing_mode
    }

    pub fn default_attributes(&self) -> &StringMap {
        &self.default_attributes
    }

    pub fn default_styles(&self) -> &StringMap {
        &self.default_styles
    }

    pub fn has_table_resize_bars(&self) -> bool {
        self.resize_bars
    }

    pub fn has_tab_navigation(&self) -> bool {
        self.tab_navigation
    }

    pub fn has_advanced_cell_tab(&self) -> bool {
        self.advanced_cell_tab
    }

    pub fn has_advanced_row_tab(&self) -> bool {
        self.advanced_row_tab
    }

    pub fn has_advanced_table_tab(&self) -> bool {
        self.advanced_table_tab
    }

    pub fn has_appearance_options(&self) -> bool {
        self.appearance_options
    }

    pub fn has_table_grid(&self) -> bool {
        self.table_grid
    }

    pub fn should_style_with_css(&self) -> bool {
        self.style_with_css
    }

    pub fn should_normalize_border(&self) -> bool {
        self.normalize_border
    }

    pub fn cell_class_list(&self) -> &[ClassListItem] {
        &self.cell_class_list
    }

    pub fn row_class_list(&self) -> &[ClassListItem] {
        &self.row_class_list
    }

    pub fn table_class_list(&self) -> &[ClassListItem] {
        &self.table_class_list
    }

    pub fn border_widths(&self) -> &[ClassListItem] {
        &self.border_widths
    }

    pub fn border_styles(&self) -> &[ClassListItem] {
        &self.border_styles
    }

    /// Relative sizing, or `table_responsive_width: true`.
    pub fn is_percentages_forced(&self) -> bool {
        self.sizing_mode == TableSizingMode::Relative || self.responsive_width == Some(true)
    }

    /// Fixed sizing, or `table_responsive_width: false`.
    pub fn is_pixels_forced(&self) -> bool {
        self.sizing_mode == TableSizingMode::Fixed || self.responsive_width == Some(false)
    }

    pub fn is_responsive_forced(&self) -> bool {
        self.sizing_mode == TableSizingMode::Responsive
    }

    pub fn toolbar(&self) -> &str {
        &self.toolbar
    }

    pub fn use_column_group(&self) -> bool {
        self.use_column_group
    }

    pub fn table_header_type(&self) -> TableHeaderType {
        self.header_type
    }

    pub fn column_resizing(&self) -> ColumnResizing {
        self.column_resizing
    }

    pub fn is_preserve_table_column_resizing(&self) -> bool {
        self.column_resizing == ColumnResizing::PreserveTable
    }

    pub fn is_resize_table_column_resizing(&self) -> bool {
        self.column_resizing == ColumnResizing::ResizeTable
    }

    /// Tags copied onto new cells, if configured.
    pub fn clone_elements(&self) -> Option<&[String]> {
        self.clone_elements.as_deref()
    }

    pub fn has_object_resizing(&self) -> bool {
        self.object_resizing
    }

    pub fn table_cell_background_colors(&self) -> &[ColorChoice] {
        &self.cell_background_colors
    }

    pub fn table_cell_border_colors(&self) -> &[ColorChoice] {
        &self.cell_border_colors
    }
}

/// A string splits on spaces and commas; an array keeps its strings.
fn clone_elements(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::String(s) => Some(
            s.split([' ', ','])
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect(),
        ),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
        ),
        _ => None,
    }
}

// === Strict validation ===

type Checked = Result<Map<String, Value>, Vec<SettingsError>>;

/// The validated `{name: value}` pair, ready to merge.
fn accept(name: &str, value: &Value) -> Checked {
    let mut map = Map::new();
    map.insert(name.to_owned(), value.clone());
    Ok(map)
}

fn invalid_type(name: &str, expected: &'static str, value: &Value) -> Vec<SettingsError> {
    vec![SettingsError::InvalidType {
        param: name.to_owned(),
        expected,
        found: value_kind(value),
    }]
}

fn check_bool(params: &EditorParams, name: &str) -> Checked {
    match params.get(name) {
        None => Ok(Map::new()),
        Some(value @ Value::Bool(_)) => accept(name, value),
        Some(value) => Err(invalid_type(name, "a boolean", value)),
    }
}

fn check_string(params: &EditorParams, name: &str) -> Checked {
    match params.get(name) {
        None => Ok(Map::new()),
        Some(value @ Value::String(_)) => accept(name, value),
        Some(value) => Err(invalid_type(name, "a string", value)),
    }
}

fn check_choice(params: &EditorParams, name: &str, allowed: &[&str]) -> Checked {
    match params.get(name) {
        None => Ok(Map::new()),
        Some(value @ Value::String(s)) if allowed.contains(&s.as_str()) => accept(name, value),
        Some(Value::String(s)) => Err(vec![SettingsError::InvalidChoice {
            param: name.to_owned(),
            value: s.clone(),
            allowed: allowed.join(", "),
        }]),
        Some(value) => Err(invalid_type(name, "a string", value)),
    }
}

fn check_string_map(params: &EditorParams, name: &str) -> Checked {
    let Some(value) = params.get(name) else {
        return Ok(Map::new());
    };
    let Some(map) = value.as_object() else {
        return Err(invalid_type(name, "an object", value));
    };
    let entries = map.iter().map(|(key, v)| match scalar_string(v) {
        Some(_) => Ok(()),
        None => Err(invalid_type(
            &format!("{name}.{key}"),
            "a string, number or boolean",
            v,
        )),
    });
    consolidate_arr(entries)?;
    accept(name, value)
}

fn check_class_list(params: &EditorParams, name: &str) -> Checked {
    let Some(value) = params.get(name) else {
        return Ok(Map::new());
    };
    let Some(items) = value.as_array() else {
        return Err(invalid_type(name, "an array", value));
    };
    let entries = items.iter().enumerate().map(|(index, item)| {
        ClassListItem::from_value(item).ok_or_else(|| {
            vec![SettingsError::InvalidItem {
                param: name.to_owned(),
                index,
                reason: "expected an object with string `title` and `value`".to_owned(),
            }]
        })
    });
    consolidate_arr(entries)?;
    accept(name, value)
}

fn check_clone_elements(params: &EditorParams) -> Checked {
    let name = param::CLONE_ELEMENTS;
    match params.get(name) {
        None => Ok(Map::new()),
        Some(value @ Value::String(_)) => accept(name, value),
        Some(value @ Value::Array(items)) => {
            let entries = items.iter().enumerate().map(|(index, item)| {
                if item.is_string() {
                    Ok(())
                } else {
                    Err(vec![SettingsError::InvalidItem {
                        param: name.to_owned(),
                        index,
                        reason: format!("expected a tag name, found {}", value_kind(item)),
                    }])
                }
            });
            consolidate_arr(entries)?;
            accept(name, value)
        }
        Some(value) => Err(invalid_type(name, "a string or an array", value)),
    }
}

fn check_object_resizing(params: &EditorParams) -> Checked {
    let name = param::OBJECT_RESIZING;
    match params.get(name) {
        None => Ok(Map::new()),
        Some(value @ (Value::Bool(_) | Value::String(_))) => accept(name, value),
        Some(value) => Err(invalid_type(name, "a boolean or a string", value)),
    }
}

fn check_color_map(params: &EditorParams, name: &str) -> Checked {
    let Some(value) = params.get(name) else {
        return Ok(Map::new());
    };
    let Some(items) = value.as_array() else {
        return Err(invalid_type(name, "an array", value));
    };
    let entries = items.iter().enumerate().map(|(index, item)| {
        if item.is_string() {
            Ok(())
        } else {
            Err(vec![SettingsError::InvalidItem {
                param: name.to_owned(),
                index,
                reason: format!("expected a string, found {}", value_kind(item)),
            }])
        }
    });
    let mut errors = consolidate_arr(entries).err().unwrap_or_default();
    if items.len() % 2 != 0 {
        errors.push(SettingsError::OddColorMap {
            param: name.to_owned(),
            len: items.len(),
        });
    }
    if errors.is_empty() {
        accept(name, value)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> EditorParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults() {
        let s = TableSettings::default();
        assert_eq!(s.table_sizing_mode(), TableSizingMode::Auto);
        assert_eq!(s.default_attributes(), &default_attributes());
        assert_eq!(
            s.default_styles().get("width").map(String::as_str),
            Some("100%")
        );
        assert!(s.has_table_resize_bars());
        assert!(s.has_tab_navigation());
        assert!(s.has_advanced_cell_tab() && s.has_advanced_row_tab() && s.has_advanced_table_tab());
        assert!(s.has_appearance_options());
        assert!(s.has_table_grid());
        assert!(!s.should_style_with_css());
        assert!(!s.should_normalize_border());
        assert!(s.cell_class_list().is_empty());
        assert_eq!(s.border_widths().len(), 5);
        assert_eq!(s.border_styles()[3], ClassListItem::new("Double", "double"));
        assert_eq!(s.toolbar(), DEFAULT_TOOLBAR);
        assert!(!s.use_column_group());
        assert_eq!(s.table_header_type(), TableHeaderType::Section);
        assert!(s.is_preserve_table_column_resizing());
        assert_eq!(s.clone_elements(), None);
        assert!(s.has_object_resizing());
        assert!(s.table_cell_background_colors().is_empty());
        assert!(!s.is_pixels_forced() && !s.is_percentages_forced() && !s.is_responsive_forced());
    }

    #[test]
    fn test_forced_sizing_changes_default_width() {
        let fixed = TableSettings::from_params(&params(json!({"table_sizing_mode": "fixed"})), 640);
        assert!(fixed.is_pixels_forced());
        assert_eq!(fixed.default_styles().get("width").map(String::as_str), Some("640px"));

        let legacy = TableSettings::from_params(&params(json!({"table_responsive_width": false})), 320);
        assert!(legacy.is_pixels_forced());
        assert_eq!(legacy.default_styles().get("width").map(String::as_str), Some("320px"));

        let responsive =
            TableSettings::from_params(&params(json!({"table_sizing_mode": "responsive"})), 640);
        assert!(responsive.is_responsive_forced());
        assert!(!responsive.default_styles().contains_key("width"));
        assert!(responsive.default_styles().contains_key("border-collapse"));

        let relative = TableSettings::from_params(&params(json!({"table_responsive_width": true})), 640);
        assert!(relative.is_percentages_forced());
        assert_eq!(relative.default_styles().get("width").map(String::as_str), Some("100%"));
    }

    #[test]
    fn test_explicit_default_styles_win() {
        let s = TableSettings::from_params(
            &params(json!({"table_sizing_mode": "fixed", "table_default_styles": {"width": "50%"}})),
            640,
        );
        assert_eq!(
            s.default_styles(),
            &StringMap::from([("width".to_owned(), "50%".to_owned())])
        );
    }

    #[test]
    fn test_lenient_fallbacks() {
        let s = TableSettings::from_params(
            &params(json!({
                "table_grid": "no",
                "table_header_type": "rows",
                "table_column_resizing": "resizetable",
                "table_default_attributes": ["border"],
                "table_class_list": [{"title": "Plain", "value": "plain"}, {"title": 3}],
                "object_resizing": "img",
                "table_clone_elements": "strong, em span"
            })),
            0,
        );
        assert!(s.has_table_grid());
        assert_eq!(s.table_header_type(), TableHeaderType::Section);
        assert!(s.is_resize_table_column_resizing());
        assert_eq!(s.default_attributes(), &default_attributes());
        assert_eq!(s.table_class_list(), &[ClassListItem::new("Plain", "plain")]);
        assert!(!s.has_object_resizing());
        assert_eq!(
            s.clone_elements(),
            Some(&["strong".to_owned(), "em".to_owned(), "span".to_owned()][..])
        );
    }

    #[test]
    fn test_resolve_accepts_valid_params() {
        let s = TableSettings::resolve(
            &params(json!({
                "table_sizing_mode": "relative",
                "table_header_type": "sectionCells",
                "table_default_attributes": {"border": 0, "cellpadding": "2"},
                "table_cell_background_color_map": ["000000", "Black", "remove", ""],
                "object_resizing": "table",
                "plugins": "table lists"
            })),
            800,
        )
        .unwrap();
        assert!(s.is_percentages_forced());
        assert_eq!(s.table_header_type(), TableHeaderType::SectionCells);
        assert_eq!(s.default_attributes().get("border").map(String::as_str), Some("0"));
        assert_eq!(s.table_cell_background_colors()[0].value, "#000000");
        assert_eq!(s.table_cell_background_colors()[1], ColorChoice::remove());
        assert!(s.has_object_resizing());
    }

    #[test]
    fn test_resolve_reports_every_error() {
        let errors = TableSettings::resolve(
            &params(json!({
                "table_sizing_mode": "stretchy",
                "table_grid": 1,
                "table_default_styles": {"width": null},
                "table_class_list": [{"title": "ok", "value": "ok"}, "bad", {"value": "x"}],
                "table_cell_border_color_map": ["FF0000"],
                "table_clone_elements": 5
            })),
            800,
        )
        .unwrap_err();

        let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "`stretchy` is not a valid `table_sizing_mode` (expected one of: fixed, relative, responsive, auto)",
                "`table_default_styles.width` must be a string, number or boolean, found null",
                "`table_grid` must be a boolean, found a number",
                "`table_class_list[1]`: expected an object with string `title` and `value`",
                "`table_class_list[2]`: expected an object with string `title` and `value`",
                "`table_clone_elements` must be a string or an array, found a number",
                "`table_cell_border_color_map` has 1 entries; colour maps need value/label pairs",
            ]
        );
    }

    #[test]
    fn test_serialized_settings() {
        let s = TableSettings::from_params(
            &params(json!({
                "table_sizing_mode": "fixed",
                "table_border_styles": [{"title": "None", "value": "none"}],
                "table_column_resizing": "resizetable"
            })),
            500,
        );
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["sizing_mode"], json!("fixed"));
        assert_eq!(value["column_resizing"], json!("resizetable"));
        assert_eq!(value["header_type"], json!("section"));
        assert_eq!(value["default_styles"]["width"], json!("500px"));
        insta::assert_snapshot!(
            value["border_styles"].to_string(),
            @r#"[{"title":"None","value":"none"}]"#
        );
    }
}
