//! Per-actor attribute ledger.
//!
//! Health and stamina are clamped meters. Every adjustment reports whether
//! the value crossed zero, and a health crossing marks the ledger defeated on
//! the spot. A defeated ledger is frozen: further adjustments are no-ops that
//! report no crossing, so the defeat signal fires exactly once.

use super::status::{
    Status, StatusApplication, StatusExpiry, StatusKind, StatusName, StatusSet,
};

/// Adjustable attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Health,
    Stamina,
}

/// Integer meter clamped to `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub const fn new(current: u32, maximum: u32) -> Self {
        let current = if current > maximum { maximum } else { current };
        Self { current, maximum }
    }

    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// `percent` of the maximum, rounded down.
    pub const fn percent_of_max(&self, percent: u32) -> u32 {
        ((self.maximum as u64 * percent as u64) / 100) as u32
    }

    fn shift(&mut self, delta: i64) {
        let next = (self.current as i64 + delta).clamp(0, self.maximum as i64);
        self.current = next as u32;
    }
}

/// Result of a single [`AttributeLedger::adjust`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustOutcome {
    pub attribute: Attribute,
    pub previous: u32,
    pub current: u32,
    /// The value went from positive to zero in this adjustment.
    pub crossed_zero: bool,
}

impl AdjustOutcome {
    pub fn applied(&self) -> u32 {
        self.previous.abs_diff(self.current)
    }
}

/// Per-tick or terminal effect produced by a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffect {
    Healed { amount: u32 },
    Damaged { amount: u32, defeated: bool },
}

/// One entry in the ledger's status log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEvent {
    Ticked {
        status: StatusName,
        effect: Option<StatusEffect>,
    },
    Expired {
        status: StatusName,
        terminal: Option<StatusEffect>,
    },
}

impl StatusEvent {
    pub const fn status(&self) -> StatusName {
        match self {
            StatusEvent::Ticked { status, .. } | StatusEvent::Expired { status, .. } => *status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeLedger {
    health: ResourceMeter,
    stamina: ResourceMeter,
    defense: u32,
    statuses: StatusSet,
    defeated: bool,
}

impl AttributeLedger {
    pub fn new(max_health: u32, max_stamina: u32, defense: u32) -> Self {
        Self {
            health: ResourceMeter::full(max_health),
            stamina: ResourceMeter::full(max_stamina),
            defense,
            statuses: StatusSet::empty(),
            defeated: max_health == 0,
        }
    }

    pub fn health(&self) -> ResourceMeter {
        self.health
    }

    pub fn stamina(&self) -> ResourceMeter {
        self.stamina
    }

    pub fn meter(&self, attribute: Attribute) -> ResourceMeter {
        match attribute {
            Attribute::Health => self.health,
            Attribute::Stamina => self.stamina,
        }
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn statuses(&self) -> &StatusSet {
        &self.statuses
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Shifts `attribute` by `delta`, clamped to `[0, max]`.
    ///
    /// Health reaching zero marks the ledger defeated immediately. On a
    /// defeated ledger this is a no-op.
    pub fn adjust(&mut self, attribute: Attribute, delta: i64) -> AdjustOutcome {
        let meter = match attribute {
            Attribute::Health => &mut self.health,
            Attribute::Stamina => &mut self.stamina,
        };
        let previous = meter.current;

        if self.defeated {
            return AdjustOutcome {
                attribute,
                previous,
                current: previous,
                crossed_zero: false,
            };
        }

        meter.shift(delta);
        let current = meter.current;
        let crossed_zero = previous > 0 && current == 0;

        if attribute == Attribute::Health && crossed_zero {
            self.defeated = true;
        }

        AdjustOutcome {
            attribute,
            previous,
            current,
            crossed_zero,
        }
    }

    /// Raises (or lowers) the maximum and moves the current value with it.
    pub fn adjust_maximum(&mut self, attribute: Attribute, delta: i64) -> AdjustOutcome {
        let meter = match attribute {
            Attribute::Health => &mut self.health,
            Attribute::Stamina => &mut self.stamina,
        };
        let previous = meter.current;
        if self.defeated {
            return AdjustOutcome {
                attribute,
                previous,
                current: previous,
                crossed_zero: false,
            };
        }

        let maximum = (meter.maximum as i64 + delta).clamp(0, u32::MAX as i64) as u32;
        meter.maximum = maximum;
        meter.shift(delta);
        let current = meter.current;
        let crossed_zero = previous > 0 && current == 0;
        if attribute == Attribute::Health && crossed_zero {
            self.defeated = true;
        }

        AdjustOutcome {
            attribute,
            previous,
            current,
            crossed_zero,
        }
    }

    /// Refills both meters. Used by map resets on bosses that are still standing.
    pub fn restore(&mut self) {
        if self.defeated {
            return;
        }
        self.health.current = self.health.maximum;
        self.stamina.current = self.stamina.maximum;
    }

    /// Marks the ledger defeated regardless of health (lethal terrain).
    pub fn defeat(&mut self) -> AdjustOutcome {
        let current = self.health.current;
        self.adjust(Attribute::Health, -(current as i64) - 1)
    }

    /// Inserts or refreshes a named status.
    pub fn apply_status(&mut self, status: Status) -> StatusApplication {
        if self.defeated {
            return StatusApplication::Rejected;
        }
        self.statuses.apply(status)
    }

    pub fn remove_status(&mut self, name: StatusName) -> Option<Status> {
        self.statuses.remove(name)
    }

    /// Advances every status by one turn, in application order.
    ///
    /// Each status applies its per-tick effect, then, if it ran out, its
    /// terminal effect. The returned log preserves that order, so a status
    /// applied earlier is always fully resolved before a later one.
    pub fn tick(&mut self) -> Vec<StatusEvent> {
        let mut log = Vec::new();
        for (status, expired) in self.statuses.advance() {
            let effect = self.per_tick_effect(status.kind);
            log.push(StatusEvent::Ticked {
                status: status.name(),
                effect,
            });
            if expired {
                let terminal = self.terminal_effect(status.kind);
                log.push(StatusEvent::Expired {
                    status: status.name(),
                    terminal,
                });
            }
        }
        log
    }

    /// Ends every weather-bound status, applying terminal effects in
    /// application order.
    pub fn expire_weather_bound(&mut self) -> Vec<StatusEvent> {
        self.statuses
            .drain_weather_bound()
            .into_iter()
            .map(|status| StatusEvent::Expired {
                status: status.name(),
                terminal: self.terminal_effect(status.kind),
            })
            .collect()
    }

    fn per_tick_effect(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        match kind {
            StatusKind::Regenerating { amount } => self.heal(amount),
            StatusKind::Bleeding { amount } => {
                let outcome = self.adjust(Attribute::Health, -(amount as i64));
                (outcome.applied() > 0).then_some(StatusEffect::Damaged {
                    amount: outcome.applied(),
                    defeated: outcome.crossed_zero,
                })
            }
            StatusKind::Focused { .. } | StatusKind::Empowered { .. } => None,
        }
    }

    fn terminal_effect(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        match kind {
            StatusKind::Regenerating { amount } => self.heal(amount),
            _ => None,
        }
    }

    fn heal(&mut self, amount: u32) -> Option<StatusEffect> {
        let outcome = self.adjust(Attribute::Health, amount as i64);
        (outcome.applied() > 0).then_some(StatusEffect::Healed {
            amount: outcome.applied(),
        })
    }

    /// Remaining turns of a status, if it is turn-bounded.
    pub fn remaining_turns(&self, name: StatusName) -> Option<u32> {
        match self.statuses.get(name)?.expiry {
            StatusExpiry::Turns(turns) => Some(turns),
            StatusExpiry::UntilWeatherChanges => None,
        }
    }
}
