//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use vale_core::{
    Env, GameConfig, GameEnv, GameState, GridAtlas, PcgRng, Scenario, TemplateCatalog,
};

use crate::loaders::{ActorLoader, ConfigLoader, LoadResult, MapLoader, ScenarioLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actors.ron
/// ├── maps/
/// │   ├── abandoned_village.ron
/// │   └── ancient_woods.ron
/// └── scenarios/
///     └── default.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    ///
    /// A missing file means the built-in defaults.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the actor catalog from `actors.ron`.
    pub fn load_templates(&self) -> LoadResult<TemplateCatalog> {
        ActorLoader::load(&self.data_dir.join("actors.ron"))
    }

    /// Load every map under `maps/` into one atlas.
    pub fn load_atlas(&self) -> LoadResult<GridAtlas> {
        MapLoader::load_atlas(&self.data_dir.join("maps"))
    }

    /// Load `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    /// Load config, templates and maps together.
    pub fn load_content(&self) -> LoadResult<GameContent> {
        if !self.data_dir.is_dir() {
            anyhow::bail!(
                "Content data directory not found: {}",
                self.data_dir.display()
            );
        }

        let content = GameContent {
            config: self.load_config()?,
            templates: self.load_templates()?,
            atlas: self.load_atlas()?,
        };
        tracing::info!(
            data_dir = %self.data_dir.display(),
            templates = content.templates.len(),
            maps = content.atlas.map_ids().count(),
            "content loaded"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Everything the engine reads during a run.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: GameConfig,
    pub templates: TemplateCatalog,
    pub atlas: GridAtlas,
}

impl GameContent {
    /// Oracle bundle over this content, with the stateless PCG roller.
    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(&self.atlas, &self.templates, &PcgRng, &self.config).as_game_env()
    }

    /// Builds the initial state for `scenario` against this content.
    pub fn build(&self, scenario: &Scenario) -> LoadResult<GameState> {
        scenario
            .build(&self.env())
            .map_err(|e| anyhow::anyhow!("Failed to build scenario: {}", e))
    }
}
