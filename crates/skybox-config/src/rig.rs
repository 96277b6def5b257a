//! Rig configuration file format and operations.

use serde::{Deserialize, Serialize};
use skybox_core::{ChannelCatalog, GroupLayout};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::validate_rig;

/// One test rig: which fields are sensor channels and how a recording file
/// is laid out.
///
/// # TOML Format
///
/// ```toml
/// name = "flume"
/// description = "Two-gauge wave flume"
/// primary_block = "Data"
/// secondary_marker = "Aux"
/// timing_channel = "LED-chan100"
/// channels = ["WG01", "WG02", "LED-chan100"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RigConfig {
    /// Name of the rig.
    pub name: String,

    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Exact name of the primary data block in a recording file.
    #[serde(default = "default_primary_block")]
    pub primary_block: String,

    /// Substring marking secondary data blocks. Empty disables them.
    #[serde(default = "default_secondary_marker")]
    pub secondary_marker: String,

    /// Channel carrying the LED timing signal, if the rig has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing_channel: Option<String>,

    /// Channel names, in display order.
    #[serde(default)]
    pub channels: Vec<String>,
}

fn default_primary_block() -> String {
    GroupLayout::default().primary
}

fn default_secondary_marker() -> String {
    GroupLayout::default().secondary_marker
}

impl RigConfig {
    /// Create an empty rig with the default group layout.
    pub fn new(name: impl Into<String>) -> Self {
        let layout = GroupLayout::default();
        Self {
            name: name.into(),
            description: None,
            primary_block: layout.primary,
            secondary_marker: layout.secondary_marker,
            timing_channel: None,
            channels: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the timing channel.
    pub fn with_timing_channel(mut self, channel: impl Into<String>) -> Self {
        self.timing_channel = Some(channel.into());
        self
    }

    /// Append channels.
    pub fn with_channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels.extend(channels.into_iter().map(Into::into));
        self
    }

    /// Load and validate a rig from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let rig = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), rig = %rig.name, channels = rig.channels.len(), "loaded rig");
        Ok(rig)
    }

    /// Parse and validate a rig from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let rig: RigConfig = toml::from_str(toml_str)?;
        validate_rig(&rig)?;
        Ok(rig)
    }

    /// Save the rig to a TOML file, creating parent directories.
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

    /// Convert the rig to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The channel catalog handed to the normalizer.
    pub fn catalog(&self) -> ChannelCatalog {
        self.channels.iter().map(String::as_str).collect()
    }

    /// The group layout handed to the group loader.
    pub fn layout(&self) -> GroupLayout {
        GroupLayout {
            primary: self.primary_block.clone(),
            secondary_marker: self.secondary_marker.clone(),
        }
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns true if the rig lists no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
