use behaviour_order::BehaviourOrder;
use bitflags::bitflags;

use super::common::{EntityId, Location};
use super::item::{Inventory, Item, Weapon};
use super::ledger::AttributeLedger;
use crate::behaviour::ActorBehaviour;
use super::status::Status;
use crate::weather::{Weather, WeatherAffinity};

bitflags! {
    /// What an actor is and what it may do.
    ///
    /// Hostility is symmetric between `ENEMY` and `HOSTILE_TO_ENEMY`: enemies
    /// attack anything hostile to them and vice versa. Enemies never fight
    /// each other.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Capabilities: u16 {
        const PLAYER             = 1 << 0;
        const ENEMY              = 1 << 1;
        const HOSTILE_TO_ENEMY   = 1 << 2;
        const TARGETABLE         = 1 << 3;
        const CAN_ACT            = 1 << 4;
        /// Created by a spawnable ground; removed by map resets.
        const SPAWNED            = 1 << 5;
        /// Restored to full health by map resets.
        const BOSS               = 1 << 6;
        const VOID_IMMUNE        = 1 << 7;
        /// Receives weather affinity statuses.
        const HOSTILE_TO_WEATHER = 1 << 8;
        /// Its defeat settles the weather.
        const WEATHER_CONTROLLER = 1 << 9;
        /// Offers upgrades to adjacent actors.
        const SMITH              = 1 << 10;
        const INTERACT_WITH_GATE = 1 << 11;
    }
}

impl Capabilities {
    pub fn is_hostile_to(self, other: Capabilities) -> bool {
        (self.contains(Self::ENEMY) && other.contains(Self::HOSTILE_TO_ENEMY))
            || (self.contains(Self::HOSTILE_TO_ENEMY) && other.contains(Self::ENEMY))
    }
}

/// One roll on a defeated actor's loot table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: Item,
    /// Percent chance to drop.
    pub chance: u32,
}

/// Runtime state of one actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    /// Template this actor was built from.
    pub template: String,
    pub location: Location,
    pub ledger: AttributeLedger,
    pub inventory: Inventory,
    pub capabilities: Capabilities,
    /// Highest priority first. Empty for actors driven by external input.
    pub behaviours: BehaviourOrder<ActorBehaviour>,
    pub intrinsic_weapon: Weapon,
    pub weapon: Option<Weapon>,
    /// Actor this one tracks with [`ActorBehaviour::Follow`].
    pub follow_target: Option<EntityId>,
    /// Runes dropped on defeat.
    pub bounty: u32,
    pub loot: Vec<LootEntry>,
    pub affinity: Option<WeatherAffinity>,
}

impl ActorState {
    pub fn is_alive(&self) -> bool {
        !self.ledger.is_defeated()
    }

    pub fn has(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn is_player(&self) -> bool {
        self.has(Capabilities::PLAYER)
    }

    /// The weapon attacks use: the held one if any, else the intrinsic one.
    pub fn active_weapon(&self) -> Weapon {
        self.weapon.unwrap_or(self.intrinsic_weapon)
    }

    pub fn is_hostile_to(&self, other: &ActorState) -> bool {
        self.capabilities.is_hostile_to(other.capabilities)
    }

    /// Affinity status this actor should carry while `weather` holds.
    pub fn weather_status(&self, weather: Weather) -> Option<Status> {
        if !self.has(Capabilities::HOSTILE_TO_WEATHER) {
            return None;
        }
        self.affinity?.status_for(weather)
    }

    /// Whether `other` is a living, targetable enemy of this actor.
    pub fn can_target(&self, other: &ActorState) -> bool {
        other.id != self.id
            && other.is_alive()
            && other.has(Capabilities::TARGETABLE)
            && self.is_hostile_to(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostility_is_symmetric_and_excludes_allies() {
        let enemy = Capabilities::ENEMY | Capabilities::TARGETABLE;
        let player = Capabilities::PLAYER | Capabilities::HOSTILE_TO_ENEMY;

        assert!(enemy.is_hostile_to(player));
        assert!(player.is_hostile_to(enemy));
        assert!(!enemy.is_hostile_to(enemy));
        assert!(!player.is_hostile_to(Capabilities::SMITH));
    }
}
