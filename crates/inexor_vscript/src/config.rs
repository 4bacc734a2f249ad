// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default highlight window for recently triggered nodes
pub const DEFAULT_HIGHLIGHT_MS: u64 = 200;

/// Default number of buffered console lines
pub const DEFAULT_MAX_OUTPUT_LINES: usize = 256;

/// Graph engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Execute outgoing nodes when a timer fires
    pub propagate_on_fire: bool,
    /// How long a node stays highlighted after running, in milliseconds
    pub highlight_ms: u64,
    /// Allow a node to link to itself
    pub allow_self_links: bool,
    /// Console lines kept before the oldest are dropped
    pub max_output_lines: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            propagate_on_fire: true,
            highlight_ms: DEFAULT_HIGHLIGHT_MS,
            allow_self_links: false,
            max_output_lines: DEFAULT_MAX_OUTPUT_LINES,
        }
    }
}

impl EngineConfig {
    /// Load settings from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&content)?)
    }

    /// Save settings to a RON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.propagate_on_fire);
        assert!(!config.allow_self_links);
        assert_eq!(config.highlight_ms, 200);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EngineConfig = ron::from_str("(highlight_ms: 500)").unwrap();
        assert_eq!(config.highlight_ms, 500);
        assert!(config.propagate_on_fire);
        assert_eq!(config.max_output_lines, DEFAULT_MAX_OUTPUT_LINES);
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig {
            propagate_on_fire: false,
            ..EngineConfig::default()
        };
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: EngineConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, config);
    }
}
