//! NPC decision making.
//!
//! Each actor carries a [`BehaviourOrder`](behaviour_order::BehaviourOrder)
//! of [`ActorBehaviour`]s. On its turn the engine builds a read-only
//! [`ProposalContext`] and takes the first proposal in priority order. A
//! behaviour only ever returns an [`Action`]; executing it is the engine's
//! job, so evaluating behaviours cannot change the world.
//!
//! The conventional order is `[Attacking, Follow, Wander]`.

mod attacking;
mod follow;
mod wander;

use behaviour_order::Behaviour;

use crate::action::Action;
use crate::env::{GameEnv, Neighbors};
use crate::state::{ActorState, Capabilities, GameState};

/// Selection logic an actor can be configured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorBehaviour {
    /// Attack the nearest hostile actor within attack range.
    Attacking,
    /// Step toward the tracked actor while it stays within the tracking radius.
    Follow,
    /// Step onto a random eligible neighbour.
    Wander,
}

/// Everything a behaviour may look at. All borrows are shared.
#[derive(Clone, Copy)]
pub struct ProposalContext<'a> {
    pub actor: &'a ActorState,
    pub state: &'a GameState,
    pub env: GameEnv<'a>,
}

impl<'a> ProposalContext<'a> {
    pub fn new(actor: &'a ActorState, state: &'a GameState, env: GameEnv<'a>) -> Self {
        Self { actor, state, env }
    }

    /// Neighbours this actor could step onto this turn: in bounds, passable,
    /// free, and not lethal unless the actor is immune.
    pub fn eligible_steps(&self) -> Neighbors {
        let Ok(map) = self.env.map() else {
            return Neighbors::new();
        };
        let immune = self.actor.has(Capabilities::VOID_IMMUNE);
        map.neighbors(self.actor.location)
            .into_iter()
            .filter(|(_, next)| {
                self.state.tile_view(map, *next).is_some_and(|view| {
                    view.is_enterable() && (immune || !view.is_lethal())
                })
            })
            .collect()
    }
}

impl<'a> Behaviour<ProposalContext<'a>, Action> for ActorBehaviour {
    fn propose(&self, ctx: &ProposalContext<'a>) -> Option<Action> {
        match self {
            ActorBehaviour::Attacking => attacking::propose(ctx),
            ActorBehaviour::Follow => follow::propose(ctx),
            ActorBehaviour::Wander => wander::propose(ctx),
        }
    }
}
