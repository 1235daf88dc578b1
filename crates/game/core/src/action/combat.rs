//! Attack family: plain attacks and the three weapon skills.
//!
//! Every swing goes through [`strike`], which builds an [`AttackProfile`] from
//! the attacker's state at execute time, rolls to hit, applies damage through
//! the target's ledger and opens a wound when the weapon bleeds.

use super::{
    ActionError, ActionTransition, Effect, check_enterable, living_actor, reachable_target,
    spend_stamina, stamina_cost,
};
use crate::combat::{AttackProfile, WeaponSlot, calculate_damage, check_hit, splash_damage};
use crate::env::{GameEnv, RollContext, compute_seed};
use crate::state::{
    ActorState, Attribute, Capabilities, Direction, EntityId, GameState, Location, Status,
    StatusKind, WeaponSkill,
};

/// Result of one swing against one target.
pub(crate) struct Strike {
    pub hit: bool,
    /// Damage computed for the swing before the ledger clamped it.
    pub damage: u32,
    pub effects: Vec<Effect>,
}

/// Rolls and resolves a single attack. Preconditions are the caller's job.
pub(crate) fn strike(
    state: &mut GameState,
    env: &GameEnv<'_>,
    attacker: EntityId,
    target: EntityId,
    slot: WeaponSlot,
    salt: u32,
) -> Result<Strike, ActionError> {
    let config = env.config()?;
    let rng = env.rng()?;

    let profile = {
        let actor = living_actor(state, attacker)?;
        AttackProfile::for_actor(actor, slot, config)
    };
    let defense = state
        .actor(target)
        .ok_or(ActionError::TargetNotFound(target))?
        .ledger
        .defense();

    let seed = compute_seed(state.seed, state.nonce, attacker.0, RollContext::Hit, salt);
    let roll = rng.roll_d100(seed);
    if !check_hit(profile.hit_chance, roll) {
        return Ok(Strike {
            hit: false,
            damage: 0,
            effects: vec![Effect::Missed {
                target,
                roll,
                hit_chance: profile.hit_chance,
            }],
        });
    }

    let damage = profile.damage_against(defense, config);
    let mut effects = Vec::new();
    let victim = state
        .actor_mut(target)
        .ok_or(ActionError::TargetNotFound(target))?;
    let outcome = victim.ledger.adjust(Attribute::Health, -i64::from(damage));
    effects.push(Effect::Damaged {
        target,
        amount: outcome.applied(),
        remaining: outcome.current,
        defeated: outcome.crossed_zero,
    });

    if profile.weapon.causes_bleeding() && victim.is_alive() {
        let bleed = Status::for_turns(
            StatusKind::Bleeding {
                amount: config.bleed.damage_per_turn,
            },
            config.bleed.duration,
        );
        let application = victim.ledger.apply_status(bleed);
        effects.push(Effect::StatusApplied {
            target,
            status: bleed.name(),
            application,
        });
    }

    Ok(Strike {
        hit: true,
        damage,
        effects,
    })
}

/// The held weapon must grant `skill`.
fn require_skill(actor: &ActorState, skill: WeaponSkill) -> Result<(), ActionError> {
    match actor.weapon.and_then(|weapon| weapon.skill()) {
        Some(held) if held == skill => Ok(()),
        _ => Err(ActionError::WrongWeapon { required: skill }),
    }
}

// ============================================================================
// Attack
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: EntityId,
    pub target: EntityId,
    pub slot: WeaponSlot,
}

impl AttackAction {
    pub fn new(actor: EntityId, target: EntityId) -> Self {
        Self {
            actor,
            target,
            slot: WeaponSlot::Held,
        }
    }

    pub fn with_slot(mut self, slot: WeaponSlot) -> Self {
        self.slot = slot;
        self
    }
}

impl ActionTransition for AttackAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let attacker = living_actor(state, self.actor)?;
        reachable_target(state, attacker, self.target, env.config()?.attack_range)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        Ok(strike(state, env, self.actor, self.target, self.slot, 0)?.effects)
    }
}

// ============================================================================
// Focus
// ============================================================================

/// Broadsword stance: spends stamina and grants (or deepens) `Focused`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FocusAction {
    pub actor: EntityId,
}

impl FocusAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for FocusAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        require_skill(actor, WeaponSkill::Focus)?;
        stamina_cost(actor, env.config()?.focus.stamina_cost_percent)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        let params = env.config()?.focus;
        let cost = stamina_cost(living_actor(state, self.actor)?, params.stamina_cost_percent)?;
        let spent = spend_stamina(state, self.actor, cost)?;

        let focus = Status::for_turns(
            StatusKind::Focused {
                bonus_percent: params.damage_bonus_percent,
                hit_rate: params.hit_rate,
            },
            params.duration,
        );
        let actor = state
            .actor_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let application = actor.ledger.apply_status(focus);

        Ok(vec![
            spent,
            Effect::StatusApplied {
                target: self.actor,
                status: focus.name(),
                application,
            },
        ])
    }
}

// ============================================================================
// StabAndStep
// ============================================================================

/// Great Knife skill: stab the target, then step away from it.
///
/// With `step: None` the first safe neighbour in [`Direction::ALL`] order is
/// taken. Safe means enterable, not lethal, and not adjacent to the target
/// unless the stab felled it. If no such step exists the whole action is
/// rolled back, including the stamina and the damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabAndStepAction {
    pub actor: EntityId,
    pub target: EntityId,
    pub step: Option<Direction>,
}

impl StabAndStepAction {
    pub fn new(actor: EntityId, target: EntityId) -> Self {
        Self {
            actor,
            target,
            step: None,
        }
    }

    pub fn stepping(mut self, direction: Direction) -> Self {
        self.step = Some(direction);
        self
    }

    fn is_safe(
        state: &GameState,
        env: &GameEnv<'_>,
        actor: &ActorState,
        destination: Location,
        threat: Option<Location>,
    ) -> Result<(), ActionError> {
        check_enterable(state, env, actor, destination, false)?;
        if threat.is_some_and(|threat| destination.is_adjacent(threat)) {
            return Err(ActionError::StepAdjacentToTarget { destination });
        }
        Ok(())
    }

    /// Where the step lands, given where the (still standing) target is.
    fn resolve_step(
        &self,
        state: &GameState,
        env: &GameEnv<'_>,
        threat: Option<Location>,
    ) -> Result<Location, ActionError> {
        let actor = living_actor(state, self.actor)?;
        if let Some(direction) = self.step {
            let destination = actor.location.step(direction);
            Self::is_safe(state, env, actor, destination, threat)?;
            return Ok(destination);
        }

        let mut last_error = None;
        for (_, destination) in env.map()?.neighbors(actor.location) {
            match Self::is_safe(state, env, actor, destination, threat) {
                Ok(()) => return Ok(destination),
                Err(error) => last_error = Some(error),
            }
        }
        Err(last_error.unwrap_or(ActionError::Blocked {
            destination: actor.location,
        }))
    }
}

impl ActionTransition for StabAndStepAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let attacker = living_actor(state, self.actor)?;
        require_skill(attacker, WeaponSkill::StabAndStep)?;
        let config = env.config()?;
        stamina_cost(attacker, config.stab_and_step.stamina_cost_percent)?;
        reachable_target(state, attacker, self.target, config.attack_range)?;

        // The target may fall, so only terrain and occupancy are checked here.
        self.resolve_step(state, env, None)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        let percent = env.config()?.stab_and_step.stamina_cost_percent;
        let cost = stamina_cost(living_actor(state, self.actor)?, percent)?;
        let mut effects = vec![spend_stamina(state, self.actor, cost)?];

        let stab = strike(state, env, self.actor, self.target, WeaponSlot::Held, 0)?;
        effects.extend(stab.effects);

        let threat = state
            .actor(self.target)
            .filter(|target| target.is_alive())
            .map(|target| target.location);
        let destination = self.resolve_step(state, env, threat)?;
        let from = living_actor(state, self.actor)?.location;
        state.relocate(self.actor, destination)?;
        effects.push(Effect::Moved {
            actor: self.actor,
            from,
            to: destination,
        });
        Ok(effects)
    }
}

// ============================================================================
// GreatSlam
// ============================================================================

/// Giant Hammer skill: a full hit on the target and a splash on everyone
/// standing next to it. The splash only lands when the primary blow does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreatSlamAction {
    pub actor: EntityId,
    pub target: EntityId,
}

impl GreatSlamAction {
    pub fn new(actor: EntityId, target: EntityId) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for GreatSlamAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let attacker = living_actor(state, self.actor)?;
        require_skill(attacker, WeaponSkill::GreatSlam)?;
        let config = env.config()?;
        stamina_cost(attacker, config.great_slam.stamina_cost_percent)?;
        reachable_target(state, attacker, self.target, config.attack_range)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        let config = env.config()?;
        let cost = stamina_cost(
            living_actor(state, self.actor)?,
            config.great_slam.stamina_cost_percent,
        )?;
        let mut effects = vec![spend_stamina(state, self.actor, cost)?];

        let epicentre = state
            .actor(self.target)
            .ok_or(ActionError::TargetNotFound(self.target))?
            .location;
        let slam = strike(state, env, self.actor, self.target, WeaponSlot::Held, 0)?;
        effects.extend(slam.effects);
        if !slam.hit {
            return Ok(effects);
        }

        let splash = splash_damage(slam.damage, config.great_slam.splash_divisor);
        let bystanders = splash_victims(state, self.actor, self.target, epicentre);

        for id in bystanders {
            let Some(bystander) = state.actor_mut(id) else {
                continue;
            };
            let amount = calculate_damage(splash, 100, bystander.ledger.defense(), config.min_damage);
            let outcome = bystander.ledger.adjust(Attribute::Health, -i64::from(amount));
            effects.push(Effect::Damaged {
                target: id,
                amount: outcome.applied(),
                remaining: outcome.current,
                defeated: outcome.crossed_zero,
            });
        }
        Ok(effects)
    }
}

/// Living, targetable actors next to `epicentre` other than the attacker and
/// the primary target.
pub(crate) fn splash_victims(
    state: &GameState,
    attacker: EntityId,
    target: EntityId,
    epicentre: Location,
) -> Vec<EntityId> {
    state
        .actors()
        .filter(|other| {
            other.id != attacker
                && other.id != target
                && other.is_alive()
                && other.has(Capabilities::TARGETABLE)
                && other.location.is_adjacent(epicentre)
        })
        .map(|other| other.id)
        .collect()
}
