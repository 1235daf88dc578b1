#![allow(dead_code)]

use vale_core::{
    ActorBehaviour, ActorTemplate, Capabilities, Env, GameConfig, GameEnv, GridAtlas, GridMap,
    MapDimensions, MapId, PcgRng, TemplateCatalog, TerrainKind,
};

/// One open map plus a catalog and default rules.
pub struct World {
    pub atlas: GridAtlas,
    pub catalog: TemplateCatalog,
    pub config: GameConfig,
}

impl World {
    pub fn open(width: u32, height: u32) -> Self {
        let map = GridMap::filled(MapDimensions::new(width, height), TerrainKind::Dirt);
        Self {
            atlas: GridAtlas::new().with_map(MapId(0), map),
            catalog: TemplateCatalog::new(),
            config: GameConfig::default(),
        }
    }

    pub fn with_templates(mut self, templates: impl IntoIterator<Item = ActorTemplate>) -> Self {
        for template in templates {
            self.catalog.insert(template);
        }
        self
    }

    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(&self.atlas, &self.catalog, &PcgRng, &self.config).as_game_env()
    }
}

pub fn player() -> ActorTemplate {
    ActorTemplate::builder("player")
        .health(100)
        .stamina(100)
        .intrinsic_weapon(5, 100)
        .with(Capabilities::PLAYER | Capabilities::HOSTILE_TO_ENEMY)
        .build()
}

pub fn undead() -> ActorTemplate {
    ActorTemplate::builder("wandering_undead")
        .health(100)
        .intrinsic_weapon(30, 100)
        .with(Capabilities::ENEMY)
        .behaviours([
            ActorBehaviour::Attacking,
            ActorBehaviour::Follow,
            ActorBehaviour::Wander,
        ])
        .build()
}
