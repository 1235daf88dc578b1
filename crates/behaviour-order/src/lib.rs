//! Priority-ordered behaviour evaluation for turn-based actors.
//!
//! A [`BehaviourOrder`] holds a fixed list of [`Behaviour`]s. Evaluation walks
//! the list from the highest priority (index 0) to the lowest and commits to
//! the first behaviour that proposes something. Nothing else is consulted once
//! a proposal is found.
//!
//! - **Read-only**: behaviours receive `&C`, never `&mut C`
//! - **Bounded**: evaluation visits each behaviour at most once
//! - **At most one proposal** per evaluation
//!
//! # Architecture
//!
//! - [`Behaviour`]: core trait, `propose(&ctx) -> Option<P>`
//! - [`BehaviourOrder`]: ordered evaluator (construction order = priority)
//! - [`Ranked`]: a proposal tagged with the rank of the behaviour that made it
//! - [`builder`]: helpers for boxed, heterogeneous orders

pub mod behaviour;
pub mod builder;
pub mod order;

pub use behaviour::Behaviour;
pub use order::{BehaviourOrder, Ranked};
