//! Game configuration loader.

use std::path::Path;

use vale_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Every field is optional; missing ones keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.hit_chance.min > config.hit_chance.max {
            anyhow::bail!(
                "hit_chance.min ({}) exceeds hit_chance.max ({})",
                config.hit_chance.min,
                config.hit_chance.max
            );
        }
        if config.great_slam.splash_divisor == 0 {
            anyhow::bail!("great_slam.splash_divisor must be positive");
        }

        Ok(config)
    }
}
