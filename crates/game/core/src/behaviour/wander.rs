use super::ProposalContext;
use crate::action::{Action, MoveAction};
use crate::env::{RollContext, compute_seed};

/// Uniform pick among the eligible neighbours.
pub(super) fn propose(ctx: &ProposalContext<'_>) -> Option<Action> {
    let steps = ctx.eligible_steps();
    if steps.is_empty() {
        return None;
    }

    let rng = ctx.env.rng().ok()?;
    let seed = compute_seed(
        ctx.state.seed,
        ctx.state.nonce,
        ctx.actor.id.0,
        RollContext::Wander,
        0,
    );
    let (direction, _) = steps[rng.pick(seed, steps.len())];
    Some(MoveAction::new(ctx.actor.id, direction).into())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{World, hunter};
    use super::*;
    use crate::env::TerrainKind;
    use crate::state::{GameState, Location, MapId};
    use crate::weather::WeatherController;

    #[test]
    fn boxed_in_actor_stays_put() {
        let mut world = World::open(3, 3);
        if let Some(map) = world.atlas.map_mut(MapId(0)) {
            for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2)] {
                map.set(Location::at(0, x, y).position, TerrainKind::Wall);
            }
            map.set(Location::at(0, 2, 2).position, TerrainKind::Void);
        }
        let env = world.env();
        let mut state = GameState::new(3, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &hunter(), Location::at(0, 1, 1))
            .unwrap();

        let ctx = ProposalContext::new(state.actor(id).unwrap(), &state, env);
        assert!(ctx.eligible_steps().is_empty());
        assert_eq!(propose(&ctx), None);
    }

    #[test]
    fn same_seed_same_step() {
        let world = World::open(5, 5);
        let env = world.env();
        let mut state = GameState::new(42, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &hunter(), Location::at(0, 2, 2))
            .unwrap();

        let ctx = ProposalContext::new(state.actor(id).unwrap(), &state, env);
        let first = propose(&ctx);
        assert!(first.is_some());
        assert_eq!(first, propose(&ctx));
    }
}
