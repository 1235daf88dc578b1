//! Status effect system for actors.
//!
//! Statuses are named modifiers with their own expiry. Different names
//! coexist; applying a name that is already present refreshes it in place,
//! keeping its original position in the application order. `Focused` is the
//! one status with merge semantics: re-applying it stacks the damage bonus.
//!
//! # Expiry
//!
//! - [`StatusExpiry::Turns`] counts down once per ledger tick
//! - [`StatusExpiry::UntilWeatherChanges`] lasts until the weather controller
//!   moves to a different weather

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Stable name of a status. Two statuses with the same name never coexist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusName {
    Regenerating,
    Bleeding,
    Focused,
    Empowered,
}

/// Status payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Heals `amount` every tick and once more on expiry.
    Regenerating { amount: u32 },
    /// Deals `amount` damage every tick.
    Bleeding { amount: u32 },
    /// Outgoing damage raised by `bonus_percent`; held weapon hits at `hit_rate`.
    Focused { bonus_percent: u32, hit_rate: u32 },
    /// Outgoing damage multiplied by `multiplier`.
    Empowered { multiplier: u32 },
}

impl StatusKind {
    pub const fn name(&self) -> StatusName {
        match self {
            StatusKind::Regenerating { .. } => StatusName::Regenerating,
            StatusKind::Bleeding { .. } => StatusName::Bleeding,
            StatusKind::Focused { .. } => StatusName::Focused,
            StatusKind::Empowered { .. } => StatusName::Empowered,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusExpiry {
    /// Remaining ledger ticks.
    Turns(u32),
    UntilWeatherChanges,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    pub kind: StatusKind,
    pub expiry: StatusExpiry,
}

impl Status {
    pub const fn new(kind: StatusKind, expiry: StatusExpiry) -> Self {
        Self { kind, expiry }
    }

    pub const fn for_turns(kind: StatusKind, turns: u32) -> Self {
        Self::new(kind, StatusExpiry::Turns(turns))
    }

    pub const fn until_weather_changes(kind: StatusKind) -> Self {
        Self::new(kind, StatusExpiry::UntilWeatherChanges)
    }

    pub const fn name(&self) -> StatusName {
        self.kind.name()
    }

    /// Combines `incoming` into an existing status of the same name.
    fn merge(self, incoming: Status) -> (Status, StatusApplication) {
        match (self.kind, incoming.kind) {
            (
                StatusKind::Focused { bonus_percent, .. },
                StatusKind::Focused {
                    bonus_percent: extra,
                    hit_rate,
                },
            ) => (
                Status::new(
                    StatusKind::Focused {
                        bonus_percent: bonus_percent + extra,
                        hit_rate,
                    },
                    incoming.expiry,
                ),
                StatusApplication::Merged,
            ),
            _ => (incoming, StatusApplication::Refreshed),
        }
    }
}

/// What [`StatusSet::apply`] did with an incoming status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusApplication {
    Inserted,
    Refreshed,
    Merged,
    /// The set is full; the status was dropped.
    Rejected,
}

/// Active statuses in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSet {
    entries: ArrayVec<Status, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusSet {
    pub fn empty() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    pub fn apply(&mut self, status: Status) -> StatusApplication {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|s| s.name() == status.name())
        {
            let (merged, application) = existing.merge(status);
            *existing = merged;
            return application;
        }

        if self.entries.try_push(status).is_err() {
            return StatusApplication::Rejected;
        }
        StatusApplication::Inserted
    }

    pub fn get(&self, name: StatusName) -> Option<&Status> {
        self.entries.iter().find(|s| s.name() == name)
    }

    pub fn has(&self, name: StatusName) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: StatusName) -> Option<Status> {
        let index = self.entries.iter().position(|s| s.name() == name)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts down turn-bounded statuses and returns them in application
    /// order, each paired with whether it just expired. Expired entries are
    /// removed from the set.
    pub(crate) fn advance(&mut self) -> Vec<(Status, bool)> {
        let mut advanced = Vec::with_capacity(self.entries.len());
        for status in self.entries.iter_mut() {
            let expired = match &mut status.expiry {
                StatusExpiry::Turns(remaining) => {
                    *remaining = remaining.saturating_sub(1);
                    *remaining == 0
                }
                StatusExpiry::UntilWeatherChanges => false,
            };
            advanced.push((*status, expired));
        }
        self.entries.retain(|s| s.expiry != StatusExpiry::Turns(0));
        advanced
    }

    /// Removes every weather-bound status, returning them in application order.
    pub(crate) fn drain_weather_bound(&mut self) -> Vec<Status> {
        let drained: Vec<Status> = self
            .entries
            .iter()
            .filter(|s| s.expiry == StatusExpiry::UntilWeatherChanges)
            .copied()
            .collect();
        self.entries
            .retain(|s| s.expiry != StatusExpiry::UntilWeatherChanges);
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGEN: StatusKind = StatusKind::Regenerating { amount: 2 };
    const BLEED: StatusKind = StatusKind::Bleeding { amount: 3 };

    #[test]
    fn same_name_refreshes_in_place() {
        let mut set = StatusSet::empty();
        set.apply(Status::for_turns(REGEN, 2));
        set.apply(Status::for_turns(BLEED, 2));

        let application = set.apply(Status::for_turns(StatusKind::Regenerating { amount: 7 }, 4));
        assert_eq!(application, StatusApplication::Refreshed);

        let names: Vec<_> = set.iter().map(Status::name).collect();
        assert_eq!(names, vec![StatusName::Regenerating, StatusName::Bleeding]);
        assert_eq!(
            set.get(StatusName::Regenerating).map(|s| s.expiry),
            Some(StatusExpiry::Turns(4))
        );
    }

    #[test]
    fn focused_stacks_bonus() {
        let mut set = StatusSet::empty();
        let focus = StatusKind::Focused {
            bonus_percent: 10,
            hit_rate: 90,
        };
        assert_eq!(set.apply(Status::for_turns(focus, 5)), StatusApplication::Inserted);
        set.advance();
        assert_eq!(set.apply(Status::for_turns(focus, 5)), StatusApplication::Merged);

        let status = set.get(StatusName::Focused).copied();
        assert_eq!(
            status,
            Some(Status::for_turns(
                StatusKind::Focused {
                    bonus_percent: 20,
                    hit_rate: 90
                },
                5
            ))
        );
    }

    #[test]
    fn full_set_rejects() {
        let mut set = StatusSet::empty();
        // Fewer names than slots exist, so fill the backing storage directly
        for _ in 0..GameConfig::MAX_STATUS_EFFECTS {
            set.entries.push(Status::for_turns(BLEED, 1));
        }
        assert_eq!(
            set.apply(Status::for_turns(REGEN, 1)),
            StatusApplication::Rejected
        );
    }

    #[test]
    fn weather_bound_statuses_survive_ticks() {
        let mut set = StatusSet::empty();
        set.apply(Status::until_weather_changes(StatusKind::Empowered {
            multiplier: 3,
        }));
        for _ in 0..10 {
            set.advance();
        }
        assert!(set.has(StatusName::Empowered));

        let drained = set.drain_weather_bound();
        assert_eq!(drained.len(), 1);
        assert!(set.is_empty());
    }
}
