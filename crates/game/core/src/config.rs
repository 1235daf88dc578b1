/// Game configuration constants and tunable parameters.
///
/// Compile-time capacities are associated constants; everything else is a
/// runtime tunable that content files may override field by field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Chebyshev distance within which an attacker may strike a target.
    pub attack_range: u32,
    /// Manhattan distance within which a follower keeps tracking its target.
    pub tracking_radius: u32,
    /// Ticks per weather phase while a weather controller is alive.
    pub weather_switch_period: u32,
    /// Percent of max stamina the player regains before each of its turns.
    pub stamina_regen_percent: u32,
    pub hit_chance: HitChanceParams,
    pub min_damage: u32,
    pub focus: FocusParams,
    pub stab_and_step: StabAndStepParams,
    pub great_slam: GreatSlamParams,
    pub bleed: BleedParams,
    pub consumables: ConsumableParams,
    pub upgrades: UpgradeParams,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Eight-way grid: every tile has at most eight neighbours.
    pub const MAX_NEIGHBORS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_RANGE: u32 = 1;
    pub const DEFAULT_TRACKING_RADIUS: u32 = 10;
    pub const DEFAULT_WEATHER_SWITCH_PERIOD: u32 = 3;
    pub const DEFAULT_STAMINA_REGEN_PERCENT: u32 = 1;

    pub const fn new() -> Self {
        Self {
            attack_range: Self::DEFAULT_ATTACK_RANGE,
            tracking_radius: Self::DEFAULT_TRACKING_RADIUS,
            weather_switch_period: Self::DEFAULT_WEATHER_SWITCH_PERIOD,
            stamina_regen_percent: Self::DEFAULT_STAMINA_REGEN_PERCENT,
            hit_chance: HitChanceParams::new(),
            min_damage: 0,
            focus: FocusParams::new(),
            stab_and_step: StabAndStepParams::new(),
            great_slam: GreatSlamParams::new(),
            bleed: BleedParams::new(),
            consumables: ConsumableParams::new(),
            upgrades: UpgradeParams::new(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp applied to every computed hit chance (percent).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitChanceParams {
    pub min: u32,
    pub max: u32,
}

impl HitChanceParams {
    pub const fn new() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl Default for HitChanceParams {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FocusParams {
    pub stamina_cost_percent: u32,
    pub duration: u32,
    /// Added to the damage multiplier on every activation.
    pub damage_bonus_percent: u32,
    /// Hit rate used by the held weapon while focused.
    pub hit_rate: u32,
}

impl FocusParams {
    pub const fn new() -> Self {
        Self {
            stamina_cost_percent: 20,
            duration: 5,
            damage_bonus_percent: 10,
            hit_rate: 90,
        }
    }
}

impl Default for FocusParams {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StabAndStepParams {
    pub stamina_cost_percent: u32,
}

impl StabAndStepParams {
    pub const fn new() -> Self {
        Self {
            stamina_cost_percent: 25,
        }
    }
}

impl Default for StabAndStepParams {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GreatSlamParams {
    pub stamina_cost_percent: u32,
    /// Splash damage = primary damage / divisor.
    pub splash_divisor: u32,
}

impl GreatSlamParams {
    pub const fn new() -> Self {
        Self {
            stamina_cost_percent: 5,
            splash_divisor: 2,
        }
    }
}

impl Default for GreatSlamParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Bleeding applied by blades on hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BleedParams {
    pub damage_per_turn: u32,
    pub duration: u32,
}

impl BleedParams {
    pub const fn new() -> Self {
        Self {
            damage_per_turn: 5,
            duration: 3,
        }
    }
}

impl Default for BleedParams {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsumableParams {
    pub healing_vial_percent: u32,
    pub healing_vial_upgraded_percent: u32,
    pub refreshing_flask_percent: u32,
    pub refreshing_flask_upgraded_percent: u32,
    pub bloodberry_max_health: u32,
    pub puddle_health: u32,
    pub puddle_stamina_percent: u32,
}

impl ConsumableParams {
    pub const fn new() -> Self {
        Self {
            healing_vial_percent: 10,
            healing_vial_upgraded_percent: 80,
            refreshing_flask_percent: 20,
            refreshing_flask_upgraded_percent: 100,
            bloodberry_max_health: 5,
            puddle_health: 1,
            puddle_stamina_percent: 1,
        }
    }
}

impl Default for ConsumableParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Rune prices and per-upgrade increments offered by smiths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UpgradeParams {
    pub healing_vial_price: u32,
    pub refreshing_flask_price: u32,
    pub broadsword_price: u32,
    pub great_knife_price: u32,
    pub broadsword_damage_step: u32,
    pub great_knife_hit_step: u32,
}

impl UpgradeParams {
    pub const fn new() -> Self {
        Self {
            healing_vial_price: 250,
            refreshing_flask_price: 175,
            broadsword_price: 1000,
            great_knife_price: 2000,
            broadsword_damage_step: 10,
            great_knife_hit_step: 1,
        }
    }
}

impl Default for UpgradeParams {
    fn default() -> Self {
        Self::new()
    }
}
