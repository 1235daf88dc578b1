//! Builder utilities for heterogeneous behaviour orders.
//!
//! Instead of writing `BehaviourOrder::new(vec![Box::new(a) as Box<dyn ...>, ...])`
//! you can use `order(vec![boxed(a), boxed(b)])`.

use crate::{Behaviour, BehaviourOrder};

/// Boxes a behaviour for use in a dynamic order.
#[inline]
pub fn boxed<C, P, B>(behaviour: B) -> Box<dyn Behaviour<C, P>>
where
    C: ?Sized + 'static,
    P: 'static,
    B: Behaviour<C, P> + 'static,
{
    Box::new(behaviour)
}

/// Creates an order from boxed behaviours, highest priority first.
#[inline]
pub fn order<C, P>(
    behaviours: Vec<Box<dyn Behaviour<C, P>>>,
) -> BehaviourOrder<Box<dyn Behaviour<C, P>>>
where
    C: ?Sized + 'static,
    P: 'static,
{
    BehaviourOrder::new(behaviours)
}

/// Wraps a closure as a behaviour.
pub fn from_fn<C, P, F>(f: F) -> FnBehaviour<F>
where
    C: ?Sized,
    F: Fn(&C) -> Option<P> + Send + Sync,
{
    FnBehaviour(f)
}

/// Behaviour backed by a closure. See [`from_fn`].
pub struct FnBehaviour<F>(F);

impl<C, P, F> Behaviour<C, P> for FnBehaviour<F>
where
    C: ?Sized,
    F: Fn(&C) -> Option<P> + Send + Sync,
{
    fn propose(&self, ctx: &C) -> Option<P> {
        (self.0)(ctx)
    }
}
