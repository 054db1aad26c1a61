use crate::error::{BalanceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default bound on nested parentheses in a single formula
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 16;

/// Default arrow used when rendering a balanced equation
pub const DEFAULT_ARROW: &str = "→";

/// Options that control parsing and rendering
///
/// Missing keys in a TOML file fall back to their defaults:
/// ```toml
/// max_nesting_depth = 8
/// arrow = "->"
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Deepest allowed group nesting, `Ca(OH)2` has depth 1
    pub max_nesting_depth: usize,
    /// Arrow placed between the two sides of a rendered equation
    pub arrow: String,
}
impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            arrow: DEFAULT_ARROW.to_string(),
        }
    }
}
impl BalanceConfig {
    /// Create configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum group nesting depth
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Set the rendering arrow
    pub fn with_arrow(mut self, arrow: impl Into<String>) -> Self {
        self.arrow = arrow.into();
        self
    }

    /// Parse configuration from a TOML string
    /// # Example
    /// ```
    /// use chembal::BalanceConfig;
    ///
    /// let config = BalanceConfig::from_toml_str("max_nesting_depth = 4").unwrap();
    /// assert_eq!(config.max_nesting_depth, 4);
    /// assert_eq!(config.arrow, "→");
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| BalanceError::config(e.to_string()))
    }

    /// Read configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| BalanceError::config(format!("cannot read '{}': {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }
}
