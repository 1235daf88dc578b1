//! Action sources for actors that have no behaviours of their own.

use std::collections::VecDeque;

use crate::action::Action;
use crate::env::GameEnv;
use crate::state::{EntityId, GameState};

/// Supplies the player's action for a turn.
///
/// Whatever is returned goes through the same validation as an NPC proposal,
/// so a provider may hand back stale or impossible actions freely. An action
/// for anyone other than `actor` is refused and the turn is spent.
pub trait ActionProvider {
    fn next_action(&mut self, state: &GameState, env: &GameEnv<'_>, actor: EntityId) -> Action;
}

/// Skips every turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleInput;

impl ActionProvider for IdleInput {
    fn next_action(&mut self, _state: &GameState, _env: &GameEnv<'_>, actor: EntityId) -> Action {
        Action::do_nothing(actor)
    }
}

/// Replays a fixed queue of actions, then idles.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Action>,
}

impl ScriptedInput {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ActionProvider for ScriptedInput {
    fn next_action(&mut self, _state: &GameState, _env: &GameEnv<'_>, actor: EntityId) -> Action {
        self.queue
            .pop_front()
            .unwrap_or_else(|| Action::do_nothing(actor))
    }
}

impl<F> ActionProvider for F
where
    F: FnMut(&GameState, &GameEnv<'_>, EntityId) -> Action,
{
    fn next_action(&mut self, state: &GameState, env: &GameEnv<'_>, actor: EntityId) -> Action {
        self(state, env, actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, MoveAction};
    use crate::env::Env;
    use crate::state::Direction;
    use crate::weather::WeatherController;

    #[test]
    fn script_runs_dry_into_idling() {
        let state = GameState::new(0, WeatherController::default());
        let env: GameEnv<'_> = Env::empty();
        let mut input = ScriptedInput::new([MoveAction::new(EntityId::PLAYER, Direction::East).into()]);

        let first = input.next_action(&state, &env, EntityId::PLAYER);
        assert_eq!(first.kind(), ActionKind::Move);
        assert_eq!(input.remaining(), 0);
        let second = input.next_action(&state, &env, EntityId::PLAYER);
        assert_eq!(second, Action::do_nothing(EntityId::PLAYER));
    }
}
