//! Traits describing read-only world data.
//!
//! Oracles expose static map geometry, actor templates, randomness and rule
//! tunables. The [`Env`] aggregate bundles them so the engine can reach
//! everything it needs without hard coupling to concrete implementations.
mod map;
mod rng;
mod templates;

pub use map::{GridAtlas, GridMap, MapDimensions, MapOracle, Neighbors, StaticTile, TerrainKind};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use templates::{ActorTemplate, ActorTemplateBuilder, TemplateCatalog, TemplateOracle};

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

/// Raised when an operation needs an oracle the environment was built without.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("map oracle not available")]
    MapNotAvailable,

    #[error("template oracle not available")]
    TemplatesNotAvailable,

    #[error("rng oracle not available")]
    RngNotAvailable,

    #[error("game config not available")]
    ConfigNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            Self::TemplatesNotAvailable => "ORACLE_TEMPLATES_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            Self::ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
        }
    }
}

/// Aggregates read-only oracles required by behaviours, actions and the engine.
pub struct Env<'a, M, T, R>
where
    M: MapOracle + ?Sized,
    T: TemplateOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    templates: Option<&'a T>,
    rng: Option<&'a R>,
    config: Option<&'a GameConfig>,
}

// Manual impls: derives would demand `M: Clone`, which trait objects never are.
impl<M, T, R> Clone for Env<'_, M, T, R>
where
    M: MapOracle + ?Sized,
    T: TemplateOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, T, R> Copy for Env<'_, M, T, R>
where
    M: MapOracle + ?Sized,
    T: TemplateOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn MapOracle + 'a, dyn TemplateOracle + 'a, dyn RngOracle + 'a>;

impl<'a, M, T, R> Env<'a, M, T, R>
where
    M: MapOracle + ?Sized,
    T: TemplateOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        templates: Option<&'a T>,
        rng: Option<&'a R>,
        config: Option<&'a GameConfig>,
    ) -> Self {
        Self {
            map,
            templates,
            rng,
            config,
        }
    }

    pub fn with_all(map: &'a M, templates: &'a T, rng: &'a R, config: &'a GameConfig) -> Self {
        Self::new(Some(map), Some(templates), Some(rng), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            templates: None,
            rng: None,
            config: None,
        }
    }

    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::TemplatesNotAvailable` if no template oracle was provided.
    pub fn templates(&self) -> Result<&'a T, OracleError> {
        self.templates.ok_or(OracleError::TemplatesNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config was provided.
    pub fn config(&self) -> Result<&'a GameConfig, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }
}

impl<'a, M, T, R> Env<'a, M, T, R>
where
    M: MapOracle + 'a,
    T: TemplateOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let templates: Option<&'a dyn TemplateOracle> = self.templates.map(|t| t as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, templates, rng, self.config)
    }
}
