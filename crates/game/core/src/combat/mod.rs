//! Combat resolution.
//!
//! Pure functions plus [`AttackProfile`], the snapshot of an attacker's
//! weapon after its active statuses have been folded in. Actions build a
//! profile at execute time, never at proposal time, so a focus that expired
//! in between is not applied.

pub mod damage;
pub mod hit;

pub use damage::{calculate_damage, splash_damage};
pub use hit::{calculate_hit_chance, check_hit};

use crate::config::GameConfig;
use crate::state::{ActorState, StatusKind, Weapon};

/// Which of an actor's weapons an attack uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponSlot {
    /// The held weapon, falling back to the intrinsic one when empty-handed.
    #[default]
    Held,
    Intrinsic,
}

/// Effective attack parameters for one swing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackProfile {
    pub weapon: Weapon,
    /// 100 = unmodified.
    pub multiplier_percent: u32,
    /// Clamped hit chance in percent.
    pub hit_chance: u32,
}

impl AttackProfile {
    pub fn for_actor(actor: &ActorState, slot: WeaponSlot, config: &GameConfig) -> Self {
        let (weapon, held) = match (slot, actor.weapon) {
            (WeaponSlot::Held, Some(weapon)) => (weapon, true),
            _ => (actor.intrinsic_weapon, false),
        };

        // Flat bonuses add up first and multipliers scale the sum, so the
        // order statuses were applied in never changes the result.
        let mut bonus_percent: u32 = 0;
        let mut multiplier: u32 = 1;
        let mut hit_rate = weapon.hit_rate;
        for status in actor.ledger.statuses().iter() {
            match status.kind {
                StatusKind::Focused {
                    bonus_percent: bonus,
                    hit_rate: focused_rate,
                } if held => {
                    bonus_percent = bonus_percent.saturating_add(bonus);
                    hit_rate = focused_rate;
                }
                StatusKind::Empowered { multiplier: factor } => {
                    multiplier = multiplier.saturating_mul(factor);
                }
                _ => {}
            }
        }
        let multiplier_percent = (100 + bonus_percent).saturating_mul(multiplier);

        Self {
            weapon,
            multiplier_percent,
            hit_chance: calculate_hit_chance(hit_rate, &config.hit_chance),
        }
    }

    pub fn damage_against(&self, defense: u32, config: &GameConfig) -> u32 {
        calculate_damage(
            self.weapon.damage,
            self.multiplier_percent,
            defense,
            config.min_damage,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ActorTemplate;
    use crate::state::{EntityId, Location, Status};

    fn swordsman() -> ActorState {
        ActorTemplate::builder("swordsman")
            .intrinsic_weapon(15, 80)
            .weapon(Weapon::broadsword())
            .build()
            .instantiate(EntityId(1), Location::default())
    }

    #[test]
    fn focus_only_boosts_held_weapon() {
        let config = GameConfig::default();
        let mut actor = swordsman();
        actor.ledger.apply_status(Status::for_turns(
            StatusKind::Focused {
                bonus_percent: 10,
                hit_rate: 90,
            },
            5,
        ));

        let held = AttackProfile::for_actor(&actor, WeaponSlot::Held, &config);
        assert_eq!(held.multiplier_percent, 110);
        assert_eq!(held.hit_chance, 90);
        assert_eq!(held.damage_against(0, &config), 121);

        let bare = AttackProfile::for_actor(&actor, WeaponSlot::Intrinsic, &config);
        assert_eq!(bare.multiplier_percent, 100);
        assert_eq!(bare.hit_chance, 80);
    }

    #[test]
    fn status_order_does_not_change_the_multiplier() {
        let config = GameConfig::default();
        let focus = Status::for_turns(
            StatusKind::Focused {
                bonus_percent: 10,
                hit_rate: 90,
            },
            5,
        );
        let empower = Status::until_weather_changes(StatusKind::Empowered { multiplier: 3 });

        let mut focus_first = swordsman();
        focus_first.ledger.apply_status(focus);
        focus_first.ledger.apply_status(empower);
        let mut empower_first = swordsman();
        empower_first.ledger.apply_status(empower);
        empower_first.ledger.apply_status(focus);

        let a = AttackProfile::for_actor(&focus_first, WeaponSlot::Held, &config);
        let b = AttackProfile::for_actor(&empower_first, WeaponSlot::Held, &config);
        assert_eq!(a.multiplier_percent, 330);
        assert_eq!(a, b);
    }

    #[test]
    fn empowered_multiplies() {
        let config = GameConfig::default();
        let mut wolf = ActorTemplate::builder("red_wolf")
            .intrinsic_weapon(15, 80)
            .build()
            .instantiate(EntityId(2), Location::default());
        wolf.ledger
            .apply_status(Status::until_weather_changes(StatusKind::Empowered {
                multiplier: 3,
            }));

        let profile = AttackProfile::for_actor(&wolf, WeaponSlot::Held, &config);
        assert_eq!(profile.damage_against(5, &config), 40);
    }
}
