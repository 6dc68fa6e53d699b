use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_RESERVED_CLASS_PREFIX: &str = "element-selector-";
pub const DEFAULT_OVERLAY_CLASS: &str = "element-selector-overlay";
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u64 = 500;
pub const DEFAULT_ANCHOR_CLASS_LIMIT: usize = 2;
pub const DEFAULT_NOTABLE_ATTRIBUTES: &[&str] = &[
    "id",
    "class",
    "data-testid",
    "data-id",
    "role",
    "type",
    "name",
    "href",
];

/// Engine settings. Every field has a default, so a partial TOML table is enough.
///
/// ```toml
/// reserved_class_prefix = "picker-"
/// debounce_window_ms = 250
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Classes starting with this prefix belong to the engine's own UI and never take part
    /// in structural comparison. An empty prefix reserves nothing.
    pub reserved_class_prefix: String,
    /// Nodes inside an element carrying this class cannot be selected.
    pub overlay_class: Option<String>,
    pub debounce_window_ms: u64,
    /// How many classes an anchor segment may carry after its positional qualifier.
    pub anchor_class_limit: usize,
    /// Attributes copied into a selection's metadata when present.
    pub notable_attributes: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reserved_class_prefix: DEFAULT_RESERVED_CLASS_PREFIX.to_string(),
            overlay_class: Some(DEFAULT_OVERLAY_CLASS.to_string()),
            debounce_window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
            anchor_class_limit: DEFAULT_ANCHOR_CLASS_LIMIT,
            notable_attributes: DEFAULT_NOTABLE_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(ConfigError::Parse)
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }
}
