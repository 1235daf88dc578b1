use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, ItemKind, Location, StateError, WeaponSkill};

/// Why an action was refused or rolled back.
///
/// Every variant ends up inside a no-op [`crate::action::ActionOutcome`];
/// none of them aborts a tick.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {0} is defeated")]
    ActorDefeated(EntityId),

    #[error("it is {expected}'s turn, not {got}'s")]
    NotActorsTurn { expected: EntityId, got: EntityId },

    #[error("target {0} not found")]
    TargetNotFound(EntityId),

    #[error("target {0} is not a valid enemy")]
    TargetNotHostile(EntityId),

    #[error("target {target} is out of range")]
    TargetOutOfRange { target: EntityId },

    #[error("needs {required} stamina, has {available}")]
    InsufficientStamina { required: u32, available: u32 },

    #[error("held weapon does not provide {required}")]
    WrongWeapon { required: WeaponSkill },

    #[error("no {0} in inventory")]
    ItemMissing(ItemKind),

    #[error("{0} cannot be consumed")]
    NotConsumable(ItemKind),

    #[error("consuming would have no effect")]
    NoEffect,

    #[error("actor is not standing in a puddle")]
    NotOnPuddle,

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Location },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Location },

    #[error("destination {destination} is occupied")]
    Occupied { destination: Location },

    #[error("destination {destination} is lethal")]
    Lethal { destination: Location },

    #[error("step to {destination} stays next to the target")]
    StepAdjacentToTarget { destination: Location },

    #[error("actor {0} cannot use gates")]
    CannotUseGates(EntityId),

    #[error("no gate at {0}")]
    NotAGate(Location),

    #[error("gate at {0} is not within reach")]
    GateOutOfReach(Location),

    #[error("gate at {0} is locked")]
    GateLocked(Location),

    #[error("gate at {0} is already unlocked")]
    GateAlreadyUnlocked(Location),

    #[error("gate at {0} leads nowhere")]
    NoGateLink(Location),

    #[error("no smith within reach")]
    NoSmithNearby,

    #[error("nothing to upgrade")]
    NotUpgradable,

    #[error("already upgraded")]
    AlreadyUpgraded,

    #[error("needs {required} runes, has {available}")]
    InsufficientRunes { required: u32, available: u32 },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TargetOutOfRange { .. }
            | Self::InsufficientStamina { .. }
            | Self::Occupied { .. }
            | Self::GateLocked(_)
            | Self::NoSmithNearby
            | Self::InsufficientRunes { .. }
            | Self::NoEffect => ErrorSeverity::Recoverable,
            Self::Oracle(error) => error.severity(),
            Self::State(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            Self::ActorDefeated(_) => "ACTION_ACTOR_DEFEATED",
            Self::NotActorsTurn { .. } => "ACTION_NOT_ACTORS_TURN",
            Self::TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            Self::TargetNotHostile(_) => "ACTION_TARGET_NOT_HOSTILE",
            Self::TargetOutOfRange { .. } => "ACTION_TARGET_OUT_OF_RANGE",
            Self::InsufficientStamina { .. } => "ACTION_INSUFFICIENT_STAMINA",
            Self::WrongWeapon { .. } => "ACTION_WRONG_WEAPON",
            Self::ItemMissing(_) => "ACTION_ITEM_MISSING",
            Self::NotConsumable(_) => "ACTION_NOT_CONSUMABLE",
            Self::NoEffect => "ACTION_NO_EFFECT",
            Self::NotOnPuddle => "ACTION_NOT_ON_PUDDLE",
            Self::OutOfBounds { .. } => "ACTION_OUT_OF_BOUNDS",
            Self::Blocked { .. } => "ACTION_BLOCKED",
            Self::Occupied { .. } => "ACTION_OCCUPIED",
            Self::Lethal { .. } => "ACTION_LETHAL",
            Self::StepAdjacentToTarget { .. } => "ACTION_STEP_ADJACENT_TO_TARGET",
            Self::CannotUseGates(_) => "ACTION_CANNOT_USE_GATES",
            Self::NotAGate(_) => "ACTION_NOT_A_GATE",
            Self::GateOutOfReach(_) => "ACTION_GATE_OUT_OF_REACH",
            Self::GateLocked(_) => "ACTION_GATE_LOCKED",
            Self::GateAlreadyUnlocked(_) => "ACTION_GATE_ALREADY_UNLOCKED",
            Self::NoGateLink(_) => "ACTION_NO_GATE_LINK",
            Self::NoSmithNearby => "ACTION_NO_SMITH_NEARBY",
            Self::NotUpgradable => "ACTION_NOT_UPGRADABLE",
            Self::AlreadyUpgraded => "ACTION_ALREADY_UPGRADED",
            Self::InsufficientRunes { .. } => "ACTION_INSUFFICIENT_RUNES",
            Self::Oracle(error) => error.error_code(),
            Self::State(error) => error.error_code(),
        }
    }
}
