//! Weapon and ability focus.
//!
//! Decides *which* attack an actor commits to once it has a target. The held
//! weapon's skill is preferred whenever the actor can afford it and the skill
//! would actually execute right now; otherwise a plain attack is made with the
//! held weapon (or the intrinsic one when empty-handed).
//!
//! | Held weapon  | Skill       | Used when                               |
//! |--------------|-------------|-----------------------------------------|
//! | Broadsword   | Focus       | not already focused                     |
//! | Great Knife  | StabAndStep | a safe step away from the target exists |
//! | Giant Hammer | GreatSlam   | the splash would hit someone            |
//!
//! Stamina and range are checked through the actions' own preconditions, so
//! this module never duplicates them.

use crate::action::{
    Action, AttackAction, FocusAction, GreatSlamAction, StabAndStepAction, splash_victims,
};
use crate::behaviour::ProposalContext;
use crate::state::{EntityId, StatusName, WeaponSkill};

/// Builds the attack `ctx.actor` should make against `target`.
pub fn choose_attack(ctx: &ProposalContext<'_>, target: EntityId) -> Action {
    let actor = ctx.actor;
    let plain: Action = AttackAction::new(actor.id, target).into();

    let Some(skill) = actor.weapon.and_then(|weapon| weapon.skill()) else {
        return plain;
    };

    let special: Option<Action> = match skill {
        WeaponSkill::Focus => (!actor.ledger.statuses().has(StatusName::Focused))
            .then(|| FocusAction::new(actor.id).into()),
        WeaponSkill::StabAndStep => Some(StabAndStepAction::new(actor.id, target).into()),
        WeaponSkill::GreatSlam => has_bystanders(ctx, target)
            .then(|| GreatSlamAction::new(actor.id, target).into()),
    };

    special
        .filter(|action| action.can_execute(ctx.state, &ctx.env))
        .unwrap_or(plain)
}

fn has_bystanders(ctx: &ProposalContext<'_>, target: EntityId) -> bool {
    ctx.state.actor(target).is_some_and(|target| {
        !splash_victims(ctx.state, ctx.actor.id, target.id, target.location).is_empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::behaviour::fixtures::{World, hunter};
    use crate::env::ActorTemplate;
    use crate::state::{Attribute, Capabilities, GameState, Location, Status, StatusKind, Weapon};
    use crate::weather::WeatherController;

    fn armed(weapon: Weapon) -> ActorTemplate {
        ActorTemplate::builder("armed")
            .health(100)
            .stamina(100)
            .weapon(weapon)
            .with(Capabilities::PLAYER | Capabilities::HOSTILE_TO_ENEMY)
            .build()
    }

    fn decide(weapon: Weapon, stamina: u32, focused: bool) -> ActionKind {
        let world = World::open(6, 6);
        let env = world.env();
        let mut state = GameState::new(5, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &armed(weapon), Location::at(0, 2, 2))
            .unwrap();
        state
            .actor_mut(id)
            .unwrap()
            .ledger
            .adjust(Attribute::Stamina, i64::from(stamina) - 100);
        let foe = state
            .spawn_actor(&world.atlas, &hunter(), Location::at(0, 3, 2))
            .unwrap();
        if focused {
            state
                .actor_mut(id)
                .unwrap()
                .ledger
                .apply_status(Status::for_turns(
                    StatusKind::Focused {
                        bonus_percent: 10,
                        hit_rate: 90,
                    },
                    3,
                ));
        }

        let ctx = ProposalContext::new(state.actor(id).unwrap(), &state, env);
        choose_attack(&ctx, foe).kind()
    }

    #[test]
    fn broadsword_focuses_once_then_swings() {
        assert_eq!(decide(Weapon::broadsword(), 100, false), ActionKind::Focus);
        assert_eq!(decide(Weapon::broadsword(), 100, true), ActionKind::Attack);
    }

    #[test]
    fn skill_falls_back_when_stamina_is_short() {
        assert_eq!(decide(Weapon::broadsword(), 0, false), ActionKind::Attack);
        assert_eq!(decide(Weapon::great_knife(), 100, false), ActionKind::StabAndStep);
        assert_eq!(decide(Weapon::great_knife(), 0, false), ActionKind::Attack);
    }

    fn hammer_beside(bystander: ActorTemplate) -> ActionKind {
        let world = World::open(6, 6);
        let env = world.env();
        let mut state = GameState::new(5, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &armed(Weapon::giant_hammer()), Location::at(0, 2, 2))
            .unwrap();
        let foe = state
            .spawn_actor(&world.atlas, &hunter(), Location::at(0, 3, 2))
            .unwrap();
        state
            .spawn_actor(&world.atlas, &bystander, Location::at(0, 4, 2))
            .unwrap();

        let ctx = ProposalContext::new(state.actor(id).unwrap(), &state, env);
        choose_attack(&ctx, foe).kind()
    }

    #[test]
    fn hammer_slams_only_into_a_crowd() {
        assert_eq!(decide(Weapon::giant_hammer(), 100, false), ActionKind::Attack);
        assert_eq!(hammer_beside(hunter()), ActionKind::GreatSlam);
    }

    #[test]
    fn hammer_ignores_untargetable_neighbours() {
        let smith = ActorTemplate::builder("blacksmith")
            .health(100)
            .capabilities(Capabilities::SMITH)
            .build();
        assert_eq!(hammer_beside(smith), ActionKind::Attack);
    }
}
