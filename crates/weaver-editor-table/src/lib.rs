//! Table plugin configuration for the weaver editor.
//!
//! Editor parameters arrive as a loose JSON object ([`EditorParams`]),
//! either from the host or from a `.json`/`.toml` file via [`ParamStore`].
//! [`TableSettings`] turns them into typed table settings, and the
//! [`combine`] helpers gather every validation problem into one report.

pub mod colors;
pub mod combine;
pub mod error;
pub mod params;
pub mod settings;
pub mod store;

pub use colors::{CUSTOM_COLOR, ColorChoice, REMOVE_COLOR, as_hex_color, map_colors};
pub use combine::{consolidate_arr, consolidate_obj, deep_merge, partition};
pub use error::{ParamStoreError, SettingsError};
pub use params::EditorParams;
pub use settings::{
    ClassListItem, ColumnResizing, DEFAULT_TOOLBAR, StringMap, TableHeaderType, TableSettings,
    TableSizingMode, param,
};
pub use store::{Loader, ParamStore, Saver};
