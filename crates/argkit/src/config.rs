//! Configuration surface for the parser and the help layout.
//!
//! Both structs can be built in code (every field has a default) or loaded
//! from a JSON document with kebab-case keys, e.g.
//!
//! ```json
//! { "line-length": 100, "indentation": "    " }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_LINE_LENGTH: usize = 80;
pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_UNKNOWN_OPTION_MESSAGE: &str = "Unknown option(s): ";

/// Column parameters used by [`crate::TextLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// Prefix written at the start of every rendered line.
    pub indentation: String,
    /// Gap between the label column and the description column.
    pub spacing: String,
    /// Total width of a rendered line.
    pub line_length: usize,
    /// Upper bound for indentation + label column + spacing.
    pub maximum_left_length: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            indentation: "  ".to_string(),
            spacing: "  ".to_string(),
            line_length: DEFAULT_LINE_LENGTH,
            maximum_left_length: DEFAULT_LINE_LENGTH / 2,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Same layout with a different total width; the label column keeps
    /// taking at most half of it.
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self.maximum_left_length = line_length / 2;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    /// Shown in the usage and version lines. Taken from `argv[0]` when empty.
    pub program_name: String,
    pub description: String,
    pub version: String,
    /// Prefix of the message listing unrecognized options.
    pub unknown_option_message: String,
    pub layout: LayoutConfig,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            program_name: String::new(),
            description: String::new(),
            version: DEFAULT_VERSION.to_string(),
            unknown_option_message: DEFAULT_UNKNOWN_OPTION_MESSAGE.to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

impl ParserConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
