//! Action domain.
//!
//! An [`Action`] is a one-shot intent built either by a behaviour or by
//! external input. Both paths go through the same contract:
//!
//! - [`Action::can_execute`] runs the precondition check alone
//! - [`Action::execute`] re-validates against the current state, applies, and
//!   reports an [`ActionOutcome`]
//!
//! A failed precondition yields a no-op outcome carrying the reason. If
//! `apply` itself fails half way (e.g. the step of a compound attack is
//! refused), the state is restored from a checkpoint taken before `apply`, so
//! no action ever leaves a partial effect behind.

mod combat;
mod error;
mod item;
mod movement;
mod outcome;

pub use combat::{AttackAction, FocusAction, GreatSlamAction, StabAndStepAction};
pub(crate) use combat::splash_victims;
pub use error::ActionError;
pub use item::{ConsumeAction, ConsumeSource, DropAction, UpgradeAction, UpgradeTarget};
pub use movement::{MoveAction, MoveMapAction, UnlockDoorAction};
pub use outcome::{ActionKind, ActionOutcome, Effect};

use crate::env::GameEnv;
use crate::state::{ActorState, Attribute, Capabilities, EntityId, GameState, Location};

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    /// Returns the entity performing this action.
    fn actor(&self) -> EntityId;

    /// Validates preconditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    ///
    /// Called only after `pre_validate` succeeded on the same state.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError>;
}

/// Explicit no-op turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoNothingAction {
    pub actor: EntityId,
}

impl ActionTransition for DoNothingAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(&self, _state: &mut GameState, _env: &GameEnv<'_>) -> Result<Vec<Effect>, ActionError> {
        Ok(Vec::new())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Attack(AttackAction),
    Focus(FocusAction),
    StabAndStep(StabAndStepAction),
    GreatSlam(GreatSlamAction),
    Consume(ConsumeAction),
    Drop(DropAction),
    UnlockDoor(UnlockDoorAction),
    MoveMap(MoveMapAction),
    Upgrade(UpgradeAction),
    Move(MoveAction),
    DoNothing(DoNothingAction),
}

impl Action {
    pub fn do_nothing(actor: EntityId) -> Self {
        Action::DoNothing(DoNothingAction { actor })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Attack(_) => ActionKind::Attack,
            Action::Focus(_) => ActionKind::Focus,
            Action::StabAndStep(_) => ActionKind::StabAndStep,
            Action::GreatSlam(_) => ActionKind::GreatSlam,
            Action::Consume(_) => ActionKind::Consume,
            Action::Drop(_) => ActionKind::Drop,
            Action::UnlockDoor(_) => ActionKind::UnlockDoor,
            Action::MoveMap(_) => ActionKind::MoveMap,
            Action::Upgrade(_) => ActionKind::Upgrade,
            Action::Move(_) => ActionKind::Move,
            Action::DoNothing(_) => ActionKind::DoNothing,
        }
    }

    pub fn actor(&self) -> EntityId {
        self.transition().actor()
    }

    fn transition(&self) -> &dyn ActionTransition {
        match self {
            Action::Attack(action) => action,
            Action::Focus(action) => action,
            Action::StabAndStep(action) => action,
            Action::GreatSlam(action) => action,
            Action::Consume(action) => action,
            Action::Drop(action) => action,
            Action::UnlockDoor(action) => action,
            Action::MoveMap(action) => action,
            Action::Upgrade(action) => action,
            Action::Move(action) => action,
            Action::DoNothing(action) => action,
        }
    }

    /// Checks preconditions without touching state.
    pub fn can_execute(&self, state: &GameState, env: &GameEnv<'_>) -> bool {
        self.transition().pre_validate(state, env).is_ok()
    }

    /// Re-validates, then applies atomically.
    pub fn execute(&self, state: &mut GameState, env: &GameEnv<'_>) -> ActionOutcome {
        let transition = self.transition();
        let actor = transition.actor();

        if let Err(reason) = transition.pre_validate(state, env) {
            return ActionOutcome::no_op(actor, self.kind(), reason);
        }

        let checkpoint = state.clone();
        match transition.apply(state, env) {
            Ok(effects) => ActionOutcome::performed(actor, self.kind(), effects),
            Err(reason) => {
                *state = checkpoint;
                ActionOutcome::no_op(actor, self.kind(), reason)
            }
        }
    }
}

macro_rules! impl_from_action {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_action! {
    Attack => AttackAction,
    Focus => FocusAction,
    StabAndStep => StabAndStepAction,
    GreatSlam => GreatSlamAction,
    Consume => ConsumeAction,
    Drop => DropAction,
    UnlockDoor => UnlockDoorAction,
    MoveMap => MoveMapAction,
    Upgrade => UpgradeAction,
    Move => MoveAction,
    DoNothing => DoNothingAction,
}

// ============================================================================
// Shared validation helpers
// ============================================================================

/// The acting actor, which must exist and be standing.
pub(crate) fn living_actor(state: &GameState, id: EntityId) -> Result<&ActorState, ActionError> {
    let actor = state.actor(id).ok_or(ActionError::ActorNotFound(id))?;
    if !actor.is_alive() {
        return Err(ActionError::ActorDefeated(id));
    }
    Ok(actor)
}

/// A living target the attacker is hostile to and can reach.
pub(crate) fn reachable_target<'s>(
    state: &'s GameState,
    attacker: &ActorState,
    target: EntityId,
    range: u32,
) -> Result<&'s ActorState, ActionError> {
    let victim = state
        .actor(target)
        .filter(|actor| actor.is_alive())
        .ok_or(ActionError::TargetNotFound(target))?;
    if !attacker.can_target(victim) {
        return Err(ActionError::TargetNotHostile(target));
    }
    match attacker.location.chebyshev(victim.location) {
        Some(distance) if distance <= range => Ok(victim),
        _ => Err(ActionError::TargetOutOfRange { target }),
    }
}

/// Stamina cost expressed as a percent of the actor's maximum.
pub(crate) fn stamina_cost(actor: &ActorState, percent: u32) -> Result<u32, ActionError> {
    let meter = actor.ledger.stamina();
    let required = meter.percent_of_max(percent);
    if meter.current < required {
        return Err(ActionError::InsufficientStamina {
            required,
            available: meter.current,
        });
    }
    Ok(required)
}

pub(crate) fn spend_stamina(
    state: &mut GameState,
    actor: EntityId,
    amount: u32,
) -> Result<Effect, ActionError> {
    let ledger = &mut state
        .actor_mut(actor)
        .ok_or(ActionError::ActorNotFound(actor))?
        .ledger;
    let outcome = ledger.adjust(Attribute::Stamina, -i64::from(amount));
    Ok(Effect::StaminaSpent {
        actor,
        amount: outcome.applied(),
    })
}

/// Whether `actor` may end a turn on `destination`.
pub(crate) fn check_enterable(
    state: &GameState,
    env: &GameEnv<'_>,
    actor: &ActorState,
    destination: Location,
    allow_lethal: bool,
) -> Result<(), ActionError> {
    let map = env.map()?;
    let view = state
        .tile_view(map, destination)
        .ok_or(ActionError::OutOfBounds { destination })?;
    if !view.is_passable() {
        return Err(ActionError::Blocked { destination });
    }
    if view.is_occupied() {
        return Err(ActionError::Occupied { destination });
    }
    if !allow_lethal && view.is_lethal() && !actor.has(Capabilities::VOID_IMMUNE) {
        return Err(ActionError::Lethal { destination });
    }
    Ok(())
}
