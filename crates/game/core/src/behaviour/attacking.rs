use super::ProposalContext;
use crate::action::Action;
use crate::focus;

/// Nearest hostile within attack range (Chebyshev). Ties go to the actor
/// created first.
pub(super) fn propose(ctx: &ProposalContext<'_>) -> Option<Action> {
    let range = ctx.env.config().ok()?.attack_range;
    let actor = ctx.actor;

    let target = ctx
        .state
        .actors()
        .filter(|other| actor.can_target(other))
        .filter_map(|other| {
            let distance = actor.location.chebyshev(other.location)?;
            (distance <= range).then_some((distance, other))
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, target)| target)?;

    Some(focus::choose_attack(ctx, target.id))
}
