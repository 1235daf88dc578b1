//! World driver.
//!
//! The [`GameEngine`] is the only place that mutates [`GameState`] on behalf
//! of actors. It asks behaviours (or an [`ActionProvider`] for the player)
//! for an action, runs it through [`Action::execute`], and turns the
//! consequences into [`GameEvent`]s.
//!
//! One call to [`GameEngine::run_tick`] is one world tick:
//!
//! 1. the weather advances
//! 2. every living actor that can act takes exactly one turn, in creation
//!    order: statuses tick, then it acts
//! 3. spawnable grounds run
//!
//! Every actor observes the world as left by the actors before it. Nothing in
//! a tick can fail: refused actions become no-op outcomes and skipped spawns
//! become events.
//!
//! [`GameEvent`]: crate::events::GameEvent

mod input;
mod reset;
mod turns;

pub use input::{ActionProvider, IdleInput, ScriptedInput};

use behaviour_order::Ranked;

use crate::action::{Action, ActionError, ActionOutcome};
use crate::behaviour::ProposalContext;
use crate::env::GameEnv;
use crate::error::GameError;
use crate::state::{EntityId, GameState};

pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes one action and bumps the nonce, whether or not it did anything.
    pub fn execute(&mut self, env: GameEnv<'_>, action: &Action) -> ActionOutcome {
        let outcome = action.execute(self.state, &env);
        self.finish(outcome)
    }

    /// Executes `action` as `turn`'s move for this turn.
    ///
    /// An action belonging to anyone else is refused, so a provider can never
    /// hand another actor a second turn.
    pub fn execute_turn(
        &mut self,
        env: GameEnv<'_>,
        turn: EntityId,
        action: &Action,
    ) -> ActionOutcome {
        let got = action.actor();
        if got != turn {
            let reason = ActionError::NotActorsTurn {
                expected: turn,
                got,
            };
            return self.finish(ActionOutcome::no_op(turn, action.kind(), reason));
        }
        self.execute(env, action)
    }

    fn finish(&mut self, outcome: ActionOutcome) -> ActionOutcome {
        self.state.nonce += 1;

        if let Some(reason) = &outcome.failure {
            tracing::debug!(
                actor = %outcome.actor,
                kind = %outcome.kind,
                code = reason.error_code(),
                %reason,
                "action refused"
            );
        }
        outcome
    }

    /// The action `actor`'s behaviours settle on, or doing nothing.
    pub fn decide(&self, env: GameEnv<'_>, actor: EntityId) -> Action {
        let Some(state) = self.state.actor(actor) else {
            return Action::do_nothing(actor);
        };
        let ctx = ProposalContext::new(state, self.state, env);

        match state.behaviours.propose_ranked::<_, Action>(&ctx) {
            Some(Ranked { rank, proposal }) => {
                if let Some(behaviour) = state.behaviours.get(rank) {
                    tracing::debug!(%actor, rank, %behaviour, kind = %proposal.kind(), "behaviour chosen");
                }
                proposal
            }
            None => {
                tracing::trace!(%actor, "no behaviour proposed anything");
                Action::do_nothing(actor)
            }
        }
    }
}
