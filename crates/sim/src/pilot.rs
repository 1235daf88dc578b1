//! Automatic player for headless runs.

use behaviour_order::{BehaviourOrder, Ranked};
use vale_core::{
    Action, ActionProvider, ActorBehaviour, ConsumeAction, EntityId, GameEnv, GameState,
    ItemKind, ProposalContext,
};

/// Plays the player's turns with the same behaviours NPCs use.
///
/// Drinks a healing vial when health drops below `heal_below_percent`,
/// otherwise fights whatever is in reach and wanders.
#[derive(Clone, Debug)]
pub struct Pilot {
    order: BehaviourOrder<ActorBehaviour>,
    heal_below_percent: u32,
}

impl Pilot {
    pub fn new(behaviours: impl IntoIterator<Item = ActorBehaviour>) -> Self {
        Self {
            order: behaviours.into_iter().collect(),
            heal_below_percent: 30,
        }
    }

    pub fn heal_below(mut self, percent: u32) -> Self {
        self.heal_below_percent = percent;
        self
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new([ActorBehaviour::Attacking, ActorBehaviour::Wander])
    }
}

impl ActionProvider for Pilot {
    fn next_action(&mut self, state: &GameState, env: &GameEnv<'_>, actor: EntityId) -> Action {
        let Some(player) = state.actor(actor) else {
            return Action::do_nothing(actor);
        };

        let health = player.ledger.health();
        let wounded = health.current < health.percent_of_max(self.heal_below_percent);
        if wounded && player.inventory.has_item(ItemKind::HealingVial) {
            tracing::debug!(%actor, hp = health.current, "pilot drinks a vial");
            return ConsumeAction::item(actor, ItemKind::HealingVial).into();
        }

        let ctx = ProposalContext::new(player, state, *env);
        match self.order.propose_ranked::<_, Action>(&ctx) {
            Some(Ranked { proposal, .. }) => proposal,
            None => Action::do_nothing(actor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vale_core::{
        ActionKind, ActorTemplate, Attribute, Capabilities, Env, GameConfig, GridAtlas, GridMap,
        Item, Location, MapDimensions, MapId, PcgRng, TemplateCatalog, TerrainKind,
        WeatherController,
    };

    struct World {
        atlas: GridAtlas,
        catalog: TemplateCatalog,
        config: GameConfig,
    }

    impl World {
        fn new() -> Self {
            let map = GridMap::filled(MapDimensions::new(5, 5), TerrainKind::Dirt);
            Self {
                atlas: GridAtlas::new().with_map(MapId(0), map),
                catalog: TemplateCatalog::new(),
                config: GameConfig::default(),
            }
        }

        fn env(&self) -> GameEnv<'_> {
            Env::with_all(&self.atlas, &self.catalog, &PcgRng, &self.config).as_game_env()
        }
    }

    fn player() -> ActorTemplate {
        ActorTemplate::builder("player")
            .health(100)
            .intrinsic_weapon(10, 100)
            .with(Capabilities::PLAYER | Capabilities::HOSTILE_TO_ENEMY)
            .item(Item::new(ItemKind::HealingVial))
            .build()
    }

    fn undead() -> ActorTemplate {
        ActorTemplate::builder("wandering_undead")
            .health(100)
            .with(Capabilities::ENEMY)
            .build()
    }

    #[test]
    fn attacks_what_is_adjacent() {
        let world = World::new();
        let mut state = GameState::new(3, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &player(), Location::at(0, 2, 2))
            .unwrap();
        state
            .spawn_actor(&world.atlas, &undead(), Location::at(0, 3, 2))
            .unwrap();

        let action = Pilot::default().next_action(&state, &world.env(), id);
        assert_eq!(action.kind(), ActionKind::Attack);
    }

    #[test]
    fn wanders_when_alone() {
        let world = World::new();
        let mut state = GameState::new(3, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &player(), Location::at(0, 2, 2))
            .unwrap();

        let action = Pilot::default().next_action(&state, &world.env(), id);
        assert_eq!(action.kind(), ActionKind::Move);
    }

    #[test]
    fn heals_before_fighting_when_wounded() {
        let world = World::new();
        let mut state = GameState::new(3, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &player(), Location::at(0, 2, 2))
            .unwrap();
        state
            .spawn_actor(&world.atlas, &undead(), Location::at(0, 3, 2))
            .unwrap();
        state.actor_mut(id).unwrap().ledger.adjust(Attribute::Health, -80);

        let mut pilot = Pilot::default().heal_below(50);
        assert_eq!(
            pilot.next_action(&state, &world.env(), id).kind(),
            ActionKind::Consume
        );

        state
            .actor_mut(id)
            .unwrap()
            .inventory
            .remove_item(ItemKind::HealingVial);
        assert_eq!(
            pilot.next_action(&state, &world.env(), id).kind(),
            ActionKind::Attack
        );
    }

    #[test]
    fn missing_actor_idles() {
        let world = World::new();
        let state = GameState::new(3, WeatherController::default());
        let action = Pilot::default().next_action(&state, &world.env(), EntityId(9));
        assert_eq!(action.kind(), ActionKind::DoNothing);
    }
}
