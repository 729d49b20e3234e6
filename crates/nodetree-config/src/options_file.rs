//! Freeze options files.
//!
//! ```toml
//! pass_through = ["NodeReroute", "FunctionNodeReroute"]
//! cycle_policy = "truncate"   # or "reject"
//! ```
//!
//! Both keys are optional; missing keys take the values of
//! [`FreezeOptions::default()`].

use std::path::{Path, PathBuf};

use nodetree_core::FreezeOptions;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validation::validate_options;

/// On-disk form of [`FreezeOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsFile {
    /// The options themselves.
    #[serde(flatten)]
    pub freeze: FreezeOptions,
}

impl OptionsFile {
    /// Wrap existing options.
    pub fn new(freeze: FreezeOptions) -> Self {
        Self { freeze }
    }

    /// Load and validate options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate options from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let file: OptionsFile = toml::from_str(toml_str)?;
        validate_options(&file.freeze)?;
        Ok(file)
    }

    /// Convert the options to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the options to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Unwrap into the core options.
    pub fn into_freeze_options(self) -> FreezeOptions {
        self.freeze
    }
}

/// Where [`resolve_options`] found its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsSource {
    /// Loaded from this file.
    File(PathBuf),
    /// No file found; built-in defaults.
    Defaults,
}

/// Options from `explicit` if given, else from the first existing file in
/// `fallbacks`, else [`FreezeOptions::default()`].
///
/// An explicit path that cannot be read is an error; missing fallbacks are
/// skipped.
pub fn resolve_options(
    explicit: Option<&Path>,
    fallbacks: &[PathBuf],
) -> Result<(FreezeOptions, OptionsSource), ConfigError> {
    if let Some(path) = explicit {
        let options = OptionsFile::load(path)?.into_freeze_options();
        return Ok((options, OptionsSource::File(path.to_path_buf())));
    }
    for path in fallbacks {
        if path.is_file() {
            let options = OptionsFile::load(path)?.into_freeze_options();
            return Ok((options, OptionsSource::File(path.clone())));
        }
    }
    Ok((FreezeOptions::default(), OptionsSource::Defaults))
}
