use anyhow::{Context, Result};
use chembal::BalanceConfig;
use log::debug;

use crate::cli::ParserOptions;

pub const ASCII_ARROW: &str = "->";

/// Loads the config file (if any), then applies command-line overrides.
pub fn build_config(options: &ParserOptions) -> Result<BalanceConfig> {
    let mut config = match &options.config {
        Some(path) => {
            let config = BalanceConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load configuration from '{}'", path.display()))?;
            debug!("loaded configuration from {}", path.display());
            config
        }
        None => BalanceConfig::default(),
    };

    if let Some(depth) = options.max_depth {
        config = config.with_max_nesting_depth(depth);
    }
    if options.ascii {
        config = config.with_arrow(ASCII_ARROW);
    }
    Ok(config)
}
