//! Ordered behaviour evaluation.

use crate::Behaviour;

/// A proposal together with the rank of the behaviour that produced it.
///
/// Rank 0 is the highest priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ranked<P> {
    pub rank: usize,
    pub proposal: P,
}

/// Evaluates behaviours in a fixed priority order.
///
/// # Semantics
///
/// Behaviours are queried from index 0 upward:
/// - The first behaviour returning `Some` wins and evaluation **stops**
/// - Behaviours returning `None` are skipped
/// - If every behaviour returns `None`, the order returns `None`
///
/// This is the short-circuited OR of a selector, except that the winner's
/// value is returned instead of a bare success flag. An empty order is legal
/// and always returns `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BehaviourOrder<B> {
    behaviours: Vec<B>,
}

impl<B> BehaviourOrder<B> {
    /// Creates an order whose priority follows the given sequence.
    pub fn new(behaviours: Vec<B>) -> Self {
        Self { behaviours }
    }

    pub fn empty() -> Self {
        Self {
            behaviours: Vec::new(),
        }
    }

    /// Appends a behaviour with a lower priority than every existing one.
    pub fn push(&mut self, behaviour: B) {
        self.behaviours.push(behaviour);
    }

    /// Inserts a behaviour at `rank`, shifting lower priorities down.
    ///
    /// A rank past the end appends.
    pub fn insert(&mut self, rank: usize, behaviour: B) {
        let rank = rank.min(self.behaviours.len());
        self.behaviours.insert(rank, behaviour);
    }

    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&B> {
        self.behaviours.get(rank)
    }

    /// Iterates behaviours from highest to lowest priority.
    pub fn iter(&self) -> impl Iterator<Item = &B> {
        self.behaviours.iter()
    }

    /// Returns the rank of the first behaviour equal to `behaviour`.
    pub fn rank_of(&self, behaviour: &B) -> Option<usize>
    where
        B: PartialEq,
    {
        self.behaviours.iter().position(|b| b == behaviour)
    }

    pub fn contains(&self, behaviour: &B) -> bool
    where
        B: PartialEq,
    {
        self.rank_of(behaviour).is_some()
    }

    /// Returns the first proposal in priority order along with its rank.
    pub fn propose_ranked<C, P>(&self, ctx: &C) -> Option<Ranked<P>>
    where
        C: ?Sized,
        B: Behaviour<C, P>,
    {
        self.behaviours
            .iter()
            .enumerate()
            .find_map(|(rank, behaviour)| {
                behaviour
                    .propose(ctx)
                    .map(|proposal| Ranked { rank, proposal })
            })
    }
}

impl<B> Default for BehaviourOrder<B> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B> From<Vec<B>> for BehaviourOrder<B> {
    fn from(behaviours: Vec<B>) -> Self {
        Self::new(behaviours)
    }
}

impl<B> FromIterator<B> for BehaviourOrder<B> {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<C, P, B> Behaviour<C, P> for BehaviourOrder<B>
where
    C: ?Sized,
    B: Behaviour<C, P>,
{
    fn propose(&self, ctx: &C) -> Option<P> {
        self.propose_ranked(ctx).map(|ranked| ranked.proposal)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Ctx {
        value: i32,
        calls: AtomicUsize,
    }

    impl Ctx {
        fn new(value: i32) -> Self {
            Self {
                value,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Rule {
        AbovePositive(&'static str),
        Always(&'static str),
        Never,
    }

    impl Behaviour<Ctx, &'static str> for Rule {
        fn propose(&self, ctx: &Ctx) -> Option<&'static str> {
            ctx.calls.fetch_add(1, Ordering::Relaxed);
            match self {
                Rule::AbovePositive(tag) => (ctx.value > 0).then_some(*tag),
                Rule::Always(tag) => Some(*tag),
                Rule::Never => None,
            }
        }
    }

    #[test]
    fn first_proposal_wins() {
        let order = BehaviourOrder::new(vec![
            Rule::AbovePositive("attack"),
            Rule::Always("wander"),
        ]);

        let ctx = Ctx::new(1);
        assert_eq!(
            order.propose_ranked(&ctx),
            Some(Ranked {
                rank: 0,
                proposal: "attack"
            })
        );
        // Lower priorities are never consulted once a proposal is found
        assert_eq!(ctx.calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn falls_through_to_lower_priority() {
        let order = BehaviourOrder::new(vec![
            Rule::Never,
            Rule::AbovePositive("follow"),
            Rule::Always("wander"),
        ]);

        let ctx = Ctx::new(-3);
        assert_eq!(order.propose(&ctx), Some("wander"));
        assert_eq!(ctx.calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn none_when_every_behaviour_declines() {
        let order = BehaviourOrder::new(vec![Rule::Never, Rule::AbovePositive("x")]);
        assert_eq!(order.propose(&Ctx::new(0)), None);
    }

    #[test]
    fn empty_order_is_idle() {
        let order: BehaviourOrder<Rule> = BehaviourOrder::empty();
        assert!(order.is_empty());
        assert_eq!(order.propose(&Ctx::new(5)), None);
    }

    #[test]
    fn insert_changes_priority() {
        let mut order = BehaviourOrder::new(vec![Rule::Always("wander")]);
        order.insert(0, Rule::AbovePositive("attack"));
        order.push(Rule::Never);

        assert_eq!(order.rank_of(&Rule::AbovePositive("attack")), Some(0));
        assert_eq!(order.rank_of(&Rule::Always("wander")), Some(1));
        assert_eq!(order.len(), 3);
        assert_eq!(order.propose(&Ctx::new(2)), Some("attack"));
    }

    #[test]
    fn nested_orders_compose() {
        let inner = BehaviourOrder::new(vec![Rule::Never, Rule::AbovePositive("inner")]);
        let outer: Vec<Box<dyn Behaviour<Ctx, &'static str>>> =
            vec![Box::new(inner), Box::new(Rule::Always("outer"))];
        let outer = BehaviourOrder::new(outer);

        assert_eq!(outer.propose(&Ctx::new(1)), Some("inner"));
        assert_eq!(outer.propose(&Ctx::new(0)), Some("outer"));
    }
}
