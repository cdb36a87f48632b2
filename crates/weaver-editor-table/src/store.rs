//! Loading and saving editor parameters from disk.

use std::path::{Path, PathBuf};

use crate::error::ParamStoreError;
use crate::params::EditorParams;

/// The trait for loading editor parameters.
pub trait Loader {
    fn load(&self) -> Result<EditorParams, ParamStoreError>;
}

/// The trait for saving editor parameters.
pub trait Saver {
    fn save(&self, params: &EditorParams) -> Result<(), ParamStoreError>;
}

/// An implementation of [`Loader`] and [`Saver`] backed by a parameter file.
///
/// The format follows the file extension: `.json` or `.toml`.
#[derive(Debug, Clone)]
pub struct ParamStore {
    path: PathBuf,
}

impl ParamStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for ParamStore {
    fn load(&self) -> Result<EditorParams, ParamStoreError> {
        let params: EditorParams = match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&std::fs::read_to_string(&self.path)?)?,
            Some("toml") => toml::from_str(&std::fs::read_to_string(&self.path)?)?,
            _ => return Err(ParamStoreError::UnsupportedFormat(self.path.clone())),
        };
        tracing::debug!(path = %self.path.display(), params = params.len(), "loaded editor params");
        Ok(params)
    }
}

impl Saver for ParamStore {
    fn save(&self, params: &EditorParams) -> Result<(), ParamStoreError> {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(std::fs::write(
                &self.path,
                serde_json::to_string_pretty(params)?,
            )?),
            Some("toml") => Ok(std::fs::write(&self.path, toml::to_string_pretty(params)?)?),
            _ => Err(ParamStoreError::UnsupportedFormat(self.path.clone())),
        }
    }
}
