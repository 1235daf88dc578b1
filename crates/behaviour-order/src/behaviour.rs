//! Core behaviour trait.
//!
//! A behaviour inspects a context `C` and either proposes a value `P` or
//! declines. The context is borrowed immutably so that calling a behaviour can
//! never change the world it looks at.

/// A decision capability that may propose a `P` for a context `C`.
pub trait Behaviour<C: ?Sized, P>: Send + Sync {
    /// Returns a proposal, or `None` when this behaviour has nothing to offer.
    fn propose(&self, ctx: &C) -> Option<P>;
}

/// Blanket implementation for boxed behaviours.
///
/// Lets `Box<dyn Behaviour<C, P>>` participate in a [`crate::BehaviourOrder`]
/// alongside concrete types.
impl<C: ?Sized, P> Behaviour<C, P> for Box<dyn Behaviour<C, P>> {
    #[inline]
    fn propose(&self, ctx: &C) -> Option<P> {
        (**self).propose(ctx)
    }
}

impl<C: ?Sized, P, B> Behaviour<C, P> for &B
where
    B: Behaviour<C, P> + ?Sized,
{
    #[inline]
    fn propose(&self, ctx: &C) -> Option<P> {
        (**self).propose(ctx)
    }
}
