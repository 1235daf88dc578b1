//! Inventory-facing actions: consuming, dropping and upgrading.
//!
//! These only use the inventory capability surface (`has_item`,
//! `remove_item`, `add`, balance). Where items come from is not their concern.

use super::{ActionError, ActionTransition, Effect, living_actor};
use crate::config::GameConfig;
use crate::env::{GameEnv, MapOracle, TerrainKind};
use crate::state::{ActorState, Attribute, Capabilities, EntityId, GameState, ItemKind};

/// What a [`ConsumeAction`] draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumeSource {
    /// One unit of an inventory item.
    Inventory(ItemKind),
    /// The puddle the actor stands in.
    Puddle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumeAction {
    pub actor: EntityId,
    pub source: ConsumeSource,
}

impl ConsumeAction {
    pub fn item(actor: EntityId, kind: ItemKind) -> Self {
        Self {
            actor,
            source: ConsumeSource::Inventory(kind),
        }
    }

    pub fn puddle(actor: EntityId) -> Self {
        Self {
            actor,
            source: ConsumeSource::Puddle,
        }
    }

    fn check_item(actor: &ActorState, kind: ItemKind) -> Result<(), ActionError> {
        if !kind.is_consumable() {
            return Err(ActionError::NotConsumable(kind));
        }
        if !actor.inventory.has_item(kind) {
            return Err(ActionError::ItemMissing(kind));
        }
        let full = match kind {
            ItemKind::HealingVial => actor.ledger.health().is_full(),
            ItemKind::RefreshingFlask => actor.ledger.stamina().is_full(),
            _ => false,
        };
        if full {
            return Err(ActionError::NoEffect);
        }
        Ok(())
    }

    fn check_puddle<M>(map: &M, actor: &ActorState) -> Result<(), ActionError>
    where
        M: MapOracle + ?Sized,
    {
        match map.tile(actor.location).map(|tile| tile.terrain()) {
            Some(TerrainKind::Puddle) => Ok(()),
            _ => Err(ActionError::NotOnPuddle),
        }
    }

    fn consume_item(
        actor: &mut ActorState,
        kind: ItemKind,
        config: &GameConfig,
    ) -> Result<Vec<Effect>, ActionError> {
        let item = actor
            .inventory
            .remove_item(kind)
            .ok_or(ActionError::ItemMissing(kind))?;
        let id = actor.id;
        let params = &config.consumables;
        let mut effects = vec![Effect::ItemConsumed { actor: id, item: kind }];

        match kind {
            ItemKind::HealingVial => {
                let percent = if item.upgraded {
                    params.healing_vial_upgraded_percent
                } else {
                    params.healing_vial_percent
                };
                let amount = actor.ledger.health().percent_of_max(percent);
                let outcome = actor.ledger.adjust(Attribute::Health, i64::from(amount));
                effects.push(Effect::Healed {
                    target: id,
                    amount: outcome.applied(),
                });
            }
            ItemKind::RefreshingFlask => {
                let percent = if item.upgraded {
                    params.refreshing_flask_upgraded_percent
                } else {
                    params.refreshing_flask_percent
                };
                let amount = actor.ledger.stamina().percent_of_max(percent);
                let outcome = actor.ledger.adjust(Attribute::Stamina, i64::from(amount));
                effects.push(Effect::StaminaRestored {
                    actor: id,
                    amount: outcome.applied(),
                });
            }
            ItemKind::Bloodberry => {
                actor
                    .ledger
                    .adjust_maximum(Attribute::Health, i64::from(params.bloodberry_max_health));
                effects.push(Effect::MaxHealthRaised {
                    actor: id,
                    amount: params.bloodberry_max_health,
                });
            }
            ItemKind::Runes => {
                actor.inventory.credit(item.amount);
                effects.push(Effect::RunesCredited {
                    actor: id,
                    amount: item.amount,
                });
            }
            ItemKind::OldKey => return Err(ActionError::NotConsumable(kind)),
        }
        Ok(effects)
    }

    fn drink(actor: &mut ActorState, config: &GameConfig) -> Vec<Effect> {
        let params = &config.consumables;
        let id = actor.id;
        let stamina = actor.ledger.stamina().percent_of_max(params.puddle_stamina_percent);

        let healed = actor
            .ledger
            .adjust(Attribute::Health, i64::from(params.puddle_health));
        let restored = actor.ledger.adjust(Attribute::Stamina, i64::from(stamina));

        let mut effects = Vec::new();
        if healed.applied() > 0 {
            effects.push(Effect::Healed {
                target: id,
                amount: healed.applied(),
            });
        }
        if restored.applied() > 0 {
            effects.push(Effect::StaminaRestored {
                actor: id,
                amount: restored.applied(),
            });
        }
        effects
    }
}

impl ActionTransition for ConsumeAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        match self.source {
            ConsumeSource::Inventory(kind) => Self::check_item(actor, kind),
            ConsumeSource::Puddle => Self::check_puddle(env.map()?, actor),
        }
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        let config = env.config()?;
        let actor = state
            .actor_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        match self.source {
            ConsumeSource::Inventory(kind) => Self::consume_item(actor, kind, config),
            ConsumeSource::Puddle => Ok(Self::drink(actor, config)),
        }
    }
}

/// Puts one inventory item on the ground under the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropAction {
    pub actor: EntityId,
    pub item: ItemKind,
}

impl DropAction {
    pub fn new(actor: EntityId, item: ItemKind) -> Self {
        Self { actor, item }
    }
}

impl ActionTransition for DropAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        if !actor.inventory.has_item(self.item) {
            return Err(ActionError::ItemMissing(self.item));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        let actor = state
            .actor_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let item = actor
            .inventory
            .remove_item(self.item)
            .ok_or(ActionError::ItemMissing(self.item))?;
        let at = actor.location;
        state.world.drop_items(at, [item]);
        Ok(vec![Effect::ItemDropped {
            actor: self.actor,
            item: self.item,
            at,
        }])
    }
}

/// What a smith works on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpgradeTarget {
    /// The held weapon. May be upgraded repeatedly.
    Weapon,
    /// One unit of a consumable. A one-time potency upgrade.
    Item(ItemKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeAction {
    pub actor: EntityId,
    pub target: UpgradeTarget,
}

impl UpgradeAction {
    pub fn new(actor: EntityId, target: UpgradeTarget) -> Self {
        Self { actor, target }
    }

    fn price(actor: &ActorState, target: UpgradeTarget, config: &GameConfig) -> Result<u32, ActionError> {
        match target {
            UpgradeTarget::Weapon => actor
                .weapon
                .and_then(|weapon| weapon.upgrade_price(&config.upgrades))
                .ok_or(ActionError::NotUpgradable),
            UpgradeTarget::Item(kind) => {
                let price = kind
                    .upgrade_price(&config.upgrades)
                    .ok_or(ActionError::NotUpgradable)?;
                if !actor.inventory.has_item(kind) {
                    return Err(ActionError::ItemMissing(kind));
                }
                let pending = actor
                    .inventory
                    .items()
                    .iter()
                    .any(|item| item.kind == kind && !item.upgraded);
                if !pending {
                    return Err(ActionError::AlreadyUpgraded);
                }
                Ok(price)
            }
        }
    }
}

impl ActionTransition for UpgradeAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        let smith_nearby = state.actors().any(|other| {
            other.id != actor.id
                && other.is_alive()
                && other.has(Capabilities::SMITH)
                && other.location.is_adjacent(actor.location)
        });
        if !smith_nearby {
            return Err(ActionError::NoSmithNearby);
        }

        let required = Self::price(actor, self.target, env.config()?)?;
        let available = actor.inventory.balance();
        if available < required {
            return Err(ActionError::InsufficientRunes {
                required,
                available,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        let config = env.config()?;
        let actor = state
            .actor_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let price = Self::price(actor, self.target, config)?;
        if !actor.inventory.debit(price) {
            return Err(ActionError::InsufficientRunes {
                required: price,
                available: actor.inventory.balance(),
            });
        }

        match self.target {
            UpgradeTarget::Weapon => {
                let weapon = actor.weapon.as_mut().ok_or(ActionError::NotUpgradable)?;
                weapon.upgrade(config);
            }
            UpgradeTarget::Item(kind) => {
                let item = actor
                    .inventory
                    .items_mut()
                    .iter_mut()
                    .find(|item| item.kind == kind && !item.upgraded)
                    .ok_or(ActionError::AlreadyUpgraded)?;
                item.upgraded = true;
            }
        }

        Ok(vec![
            Effect::RunesSpent {
                actor: self.actor,
                amount: price,
            },
            Effect::Upgraded {
                actor: self.actor,
                target: self.target,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::env::{
        ActorTemplate, Env, GridAtlas, GridMap, MapDimensions, PcgRng, TemplateCatalog,
    };
    use crate::state::{Item, Location, MapId, Weapon};
    use crate::weather::WeatherController;

    struct Fixture {
        atlas: GridAtlas,
        catalog: TemplateCatalog,
        config: GameConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut map = GridMap::filled(MapDimensions::new(4, 4), TerrainKind::Floor);
            map.set(Location::at(0, 3, 3).position, TerrainKind::Puddle);
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
            .health(150)
            .stamina(200)
            .weapon(Weapon::broadsword())
            .with(Capabilities::PLAYER | Capabilities::HOSTILE_TO_ENEMY)
            .item(Item::new(ItemKind::HealingVial))
            .item(Item::new(ItemKind::HealingVial))
            .item(Item::new(ItemKind::Bloodberry))
            .item(Item::runes(1200))
            .build()
    }

    #[test]
    fn vial_is_refused_at_full_health() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = GameState::new(1, WeatherController::default());
        let id = state
            .spawn_actor(&fixture.atlas, &player(), Location::at(0, 0, 0))
            .unwrap();

        let drink = Action::from(ConsumeAction::item(id, ItemKind::HealingVial));
        assert_eq!(
            drink.execute(&mut state, &env).failure,
            Some(ActionError::NoEffect)
        );

        state
            .actor_mut(id)
            .unwrap()
            .ledger
            .adjust(Attribute::Health, -100);
        let outcome = drink.execute(&mut state, &env);
        assert!(outcome.is_performed());
        let actor = state.actor(id).unwrap();
        assert_eq!(actor.ledger.health().current, 65);
        assert_eq!(
            actor
                .inventory
                .items()
                .iter()
                .filter(|item| item.kind == ItemKind::HealingVial)
                .count(),
            1
        );
    }

    #[test]
    fn missing_item_is_a_no_op() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = GameState::new(1, WeatherController::default());
        let id = state
            .spawn_actor(&fixture.atlas, &player(), Location::at(0, 0, 0))
            .unwrap();

        let before = state.clone();
        let outcome =
            Action::from(ConsumeAction::item(id, ItemKind::RefreshingFlask)).execute(&mut state, &env);
        assert_eq!(
            outcome.failure,
            Some(ActionError::ItemMissing(ItemKind::RefreshingFlask))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn bloodberry_and_runes() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = GameState::new(1, WeatherController::default());
        let id = state
            .spawn_actor(&fixture.atlas, &player(), Location::at(0, 0, 0))
            .unwrap();

        Action::from(ConsumeAction::item(id, ItemKind::Bloodberry)).execute(&mut state, &env);
        Action::from(ConsumeAction::item(id, ItemKind::Runes)).execute(&mut state, &env);
        let actor = state.actor(id).unwrap();
        assert_eq!(actor.ledger.health().maximum, 155);
        assert_eq!(actor.inventory.balance(), 1200);
    }

    #[test]
    fn puddle_only_where_there_is_one() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = GameState::new(1, WeatherController::default());
        let id = state
            .spawn_actor(&fixture.atlas, &player(), Location::at(0, 3, 3))
            .unwrap();
        state
            .actor_mut(id)
            .unwrap()
            .ledger
            .adjust(Attribute::Stamina, -50);

        let outcome = Action::from(ConsumeAction::puddle(id)).execute(&mut state, &env);
        assert!(outcome.is_performed());
        assert_eq!(state.actor(id).unwrap().ledger.stamina().current, 152);

        let dry = state
            .spawn_actor(&fixture.atlas, &player(), Location::at(0, 0, 0))
            .unwrap();
        assert_eq!(
            Action::from(ConsumeAction::puddle(dry))
                .execute(&mut state, &env)
                .failure,
            Some(ActionError::NotOnPuddle)
        );
    }

    #[test]
    fn drop_leaves_item_on_the_ground() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = GameState::new(1, WeatherController::default());
        let at = Location::at(0, 1, 1);
        let id = state.spawn_actor(&fixture.atlas, &player(), at).unwrap();

        let outcome = Action::from(DropAction::new(id, ItemKind::Bloodberry)).execute(&mut state, &env);
        assert!(outcome.is_performed());
        assert_eq!(state.world.items_at(at), &[Item::new(ItemKind::Bloodberry)]);
        assert!(!state.actor(id).unwrap().inventory.has_item(ItemKind::Bloodberry));
    }

    #[test]
    fn upgrades_need_a_smith_and_runes() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = GameState::new(1, WeatherController::default());
        let id = state
            .spawn_actor(&fixture.atlas, &player(), Location::at(0, 1, 1))
            .unwrap();
        Action::from(ConsumeAction::item(id, ItemKind::Runes)).execute(&mut state, &env);

        let sharpen = Action::from(UpgradeAction::new(id, UpgradeTarget::Weapon));
        assert_eq!(
            sharpen.execute(&mut state, &env).failure,
            Some(ActionError::NoSmithNearby)
        );

        let smith = ActorTemplate::builder("blacksmith")
            .capabilities(Capabilities::SMITH)
            .build();
        state
            .spawn_actor(&fixture.atlas, &smith, Location::at(0, 2, 1))
            .unwrap();

        assert!(sharpen.execute(&mut state, &env).is_performed());
        let actor = state.actor(id).unwrap();
        assert_eq!(actor.weapon.map(|weapon| weapon.damage), Some(120));
        assert_eq!(actor.inventory.balance(), 200);

        assert_eq!(
            sharpen.execute(&mut state, &env).failure,
            Some(ActionError::InsufficientRunes {
                required: 1000,
                available: 200
            })
        );

        let vial = Action::from(UpgradeAction::new(id, UpgradeTarget::Item(ItemKind::HealingVial)));
        assert_eq!(
            vial.execute(&mut state, &env).failure,
            Some(ActionError::InsufficientRunes {
                required: 250,
                available: 200
            })
        );
    }
}
