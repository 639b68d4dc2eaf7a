//! Output configuration.
//!
//! This module contains the `OutputConfig` struct which controls how
//! per-line HTML fragments are written to the sink.

use serde::{Deserialize, Serialize};

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputConfig {
    /// Terminate every written fragment with a newline.
    /// Default: true
    #[serde(default = "default_true")]
    pub newline: bool,

    /// Do not write fragments that are empty strings.
    /// Default: false
    #[serde(default)]
    pub skip_empty: bool,

    /// Emit closing tags for blocks still open at end of input.
    /// Default: true
    #[serde(default = "default_true")]
    pub close_open_blocks: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            newline: true,
            skip_empty: false,
            close_open_blocks: true,
        }
    }
}

/// `[output]` keys set by an override. Keys left out stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputOverride {
    pub newline: Option<bool>,
    pub skip_empty: Option<bool>,
    pub close_open_blocks: Option<bool>,
}

impl OutputConfig {
    /// Apply the keys that `other` sets; everything else is kept.
    pub fn merge(&mut self, other: &OutputOverride) {
        if let Some(newline) = other.newline {
            self.newline = newline;
        }
        if let Some(skip_empty) = other.skip_empty {
            self.skip_empty = skip_empty;
        }
        if let Some(close_open_blocks) = other.close_open_blocks {
            self.close_open_blocks = close_open_blocks;
        }
    }

    /// Whether a fragment should be written at all.
    pub fn should_write(&self, fragment: &str) -> bool {
        !(self.skip_empty && fragment.is_empty())
    }
}

fn default_true() -> bool {
    true
}
