//! Structured action outcome records.
//!
//! Records carry identifiers and magnitudes only. Turning them into
//! sentences is the job of whatever displays them.

use super::ActionError;
use super::item::UpgradeTarget;
use crate::state::{EntityId, ItemKind, Location, StatusApplication, StatusName};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Attack,
    Focus,
    StabAndStep,
    GreatSlam,
    Consume,
    Drop,
    UnlockDoor,
    MoveMap,
    Upgrade,
    Move,
    DoNothing,
}

/// One state change made by an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    Moved {
        actor: EntityId,
        from: Location,
        to: Location,
    },
    Traveled {
        actor: EntityId,
        from: Location,
        to: Location,
    },
    Missed {
        target: EntityId,
        roll: u32,
        hit_chance: u32,
    },
    Damaged {
        target: EntityId,
        amount: u32,
        remaining: u32,
        defeated: bool,
    },
    Healed {
        target: EntityId,
        amount: u32,
    },
    StaminaSpent {
        actor: EntityId,
        amount: u32,
    },
    StaminaRestored {
        actor: EntityId,
        amount: u32,
    },
    MaxHealthRaised {
        actor: EntityId,
        amount: u32,
    },
    StatusApplied {
        target: EntityId,
        status: StatusName,
        application: StatusApplication,
    },
    ItemConsumed {
        actor: EntityId,
        item: ItemKind,
    },
    ItemDropped {
        actor: EntityId,
        item: ItemKind,
        at: Location,
    },
    RunesCredited {
        actor: EntityId,
        amount: u32,
    },
    RunesSpent {
        actor: EntityId,
        amount: u32,
    },
    GateUnlocked {
        gate: Location,
    },
    Upgraded {
        actor: EntityId,
        target: UpgradeTarget,
    },
}

/// Result of executing one action: either performed with its effects, or a
/// no-op with the reason it was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub actor: EntityId,
    pub kind: ActionKind,
    pub effects: Vec<Effect>,
    /// `Some` when the action did nothing.
    pub failure: Option<ActionError>,
}

impl ActionOutcome {
    pub fn performed(actor: EntityId, kind: ActionKind, effects: Vec<Effect>) -> Self {
        Self {
            actor,
            kind,
            effects,
            failure: None,
        }
    }

    pub fn no_op(actor: EntityId, kind: ActionKind, reason: ActionError) -> Self {
        Self {
            actor,
            kind,
            effects: Vec::new(),
            failure: Some(reason),
        }
    }

    pub fn is_performed(&self) -> bool {
        self.failure.is_none()
    }

    /// Total health removed from `target` by this action.
    pub fn damage_to(&self, target: EntityId) -> u32 {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Damaged {
                    target: hit, amount, ..
                } if *hit == target => Some(*amount),
                _ => None,
            })
            .sum()
    }
}
