/// Widget configuration supplied by the host page
use serde::{Deserialize, Serialize};

use crate::case_path::{CasePattern, DEFAULT_CASE_PATH_PATTERN};
use crate::error::{Result, WidgetError};

pub const DEFAULT_STORAGE_KEY: &str = "visitedCasePages";
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// localStorage key holding the record list
    pub storage_key: String,
    /// Maximum number of records kept
    pub capacity: usize,
    /// Regex with one capture group producing the case id
    pub case_path_pattern: String,
    pub panel_title: String,
    pub confirm_message: String,
    /// id of the element the widget mounts into
    pub root_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            capacity: DEFAULT_CAPACITY,
            case_path_pattern: DEFAULT_CASE_PATH_PATTERN.to_string(),
            panel_title: "Visited Cases".to_string(),
            confirm_message: "Are you sure you want to clear all visited cases?".to_string(),
            root_id: "visited-cases-root".to_string(),
        }
    }
}

impl Config {
    /// Parse a config object handed over from JavaScript.
    /// `undefined` and `null` mean "all defaults".
    pub fn from_js(value: wasm_bindgen::JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Config::default());
        }

        let config: Config = serde_wasm_bindgen::from_value(value)
            .map_err(|e| WidgetError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(WidgetError::InvalidConfig("storageKey must not be empty".to_string()));
        }
        if self.capacity == 0 {
            return Err(WidgetError::InvalidConfig("capacity must be at least 1".to_string()));
        }
        if self.root_id.trim().is_empty() {
            return Err(WidgetError::InvalidConfig("rootId must not be empty".to_string()));
        }
        self.case_pattern()?;
        Ok(())
    }

    pub fn case_pattern(&self) -> Result<CasePattern> {
        CasePattern::new(&self.case_path_pattern)
    }
}
