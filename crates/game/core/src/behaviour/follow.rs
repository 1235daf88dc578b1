use super::ProposalContext;
use crate::action::{Action, MoveAction};

/// Greedy step toward the tracked actor.
///
/// Only steps that strictly shorten the Manhattan distance count. Among
/// equally good steps the first in [`Direction::ALL`] order wins: north,
/// east, south, west, then north-east, south-east, south-west, north-west.
///
/// [`Direction::ALL`]: crate::state::Direction::ALL
pub(super) fn propose(ctx: &ProposalContext<'_>) -> Option<Action> {
    let radius = ctx.env.config().ok()?.tracking_radius;
    let actor = ctx.actor;
    let target = ctx
        .state
        .actor(actor.follow_target?)
        .filter(|target| target.is_alive())?;

    let current = actor.location.manhattan(target.location)?;
    if current > radius {
        return None;
    }

    ctx.eligible_steps()
        .into_iter()
        .filter_map(|(direction, next)| {
            let distance = next.manhattan(target.location)?;
            (distance < current).then_some((distance, direction))
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, direction)| MoveAction::new(actor.id, direction).into())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{World, hunter, prey};
    use super::*;
    use crate::env::TerrainKind;
    use crate::state::{Direction, GameState, Location};
    use crate::weather::WeatherController;

    fn step_of(action: Option<Action>) -> Option<Direction> {
        match action? {
            Action::Move(step) => Some(step.direction),
            _ => None,
        }
    }

    #[test]
    fn ties_resolve_in_direction_order() {
        let world = World::open(9, 9);
        let env = world.env();
        let mut state = GameState::new(3, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &hunter(), Location::at(0, 2, 2))
            .unwrap();
        let target = state
            .spawn_actor(&world.atlas, &prey(), Location::at(0, 6, 6))
            .unwrap();
        state.actor_mut(id).unwrap().follow_target = Some(target);

        // The diagonal closes two tiles at once.
        let ctx = ProposalContext::new(state.actor(id).unwrap(), &state, env);
        assert_eq!(step_of(propose(&ctx)), Some(Direction::SouthEast));

        // Straight line: only east gets closer.
        let mut state = GameState::new(3, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &hunter(), Location::at(0, 2, 2))
            .unwrap();
        let target = state
            .spawn_actor(&world.atlas, &prey(), Location::at(0, 6, 2))
            .unwrap();
        state.actor_mut(id).unwrap().follow_target = Some(target);
        let ctx = ProposalContext::new(state.actor(id).unwrap(), &state, env);
        assert_eq!(step_of(propose(&ctx)), Some(Direction::East));
    }

    #[test]
    fn equal_gains_prefer_cardinals_in_order() {
        let mut world = World::open(9, 9);
        if let Some(map) = world.atlas.map_mut(crate::state::MapId(0)) {
            map.set(Location::at(0, 3, 3).position, TerrainKind::Wall);
        }
        let env = world.env();
        let mut state = GameState::new(3, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &hunter(), Location::at(0, 2, 2))
            .unwrap();
        let target = state
            .spawn_actor(&world.atlas, &prey(), Location::at(0, 6, 6))
            .unwrap();
        state.actor_mut(id).unwrap().follow_target = Some(target);

        // With the diagonal walled off, east and south tie; east comes first.
        let ctx = ProposalContext::new(state.actor(id).unwrap(), &state, env);
        assert_eq!(step_of(propose(&ctx)), Some(Direction::East));
    }

    #[test]
    fn out_of_radius_or_absent_target_is_ignored() {
        let mut world = World::open(20, 3);
        world.config.tracking_radius = 5;
        let env = world.env();
        let mut state = GameState::new(3, WeatherController::default());
        let id = state
            .spawn_actor(&world.atlas, &hunter(), Location::at(0, 0, 1))
            .unwrap();
        let target = state
            .spawn_actor(&world.atlas, &prey(), Location::at(0, 10, 1))
            .unwrap();

        let ctx = ProposalContext::new(state.actor(id).unwrap(), &state, env);
        assert_eq!(propose(&ctx), None);

        state.actor_mut(id).unwrap().follow_target = Some(target);
        let ctx = ProposalContext::new(state.actor(id).unwrap(), &state, env);
        assert_eq!(propose(&ctx), None);
    }
}
