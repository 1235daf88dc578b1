//! Process-wide weather.
//!
//! A single [`WeatherController`] inside [`crate::state::GameState`] owns the
//! current weather. It advances exactly once per tick, before any actor
//! moves, and nothing else writes to it.
//!
//! While cycling, the weather alternates Sunny and Rainy phases of
//! `switch_period` ticks each, starting with Sunny on the first tick. Once
//! settled (the controlling boss fell) it stays put.

use crate::state::{Status, StatusKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    #[default]
    Clear,
    Sunny,
    Rainy,
}

/// A status an actor gains while a given weather holds.
///
/// The status is weather-bound: it expires on the next weather change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherAffinity {
    pub weather: Weather,
    pub status: StatusKind,
}

impl WeatherAffinity {
    pub fn status_for(&self, weather: Weather) -> Option<Status> {
        (self.weather == weather).then(|| Status::until_weather_changes(self.status))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherMode {
    Cycling { switch_period: u32, elapsed: u64 },
    Settled,
}

/// Change reported by [`WeatherController::advance`] and
/// [`WeatherController::settle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherTransition {
    pub from: Weather,
    pub to: Weather,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherController {
    current: Weather,
    mode: WeatherMode,
}

impl WeatherController {
    /// Weather that never changes on its own.
    pub const fn fixed(weather: Weather) -> Self {
        Self {
            current: weather,
            mode: WeatherMode::Settled,
        }
    }

    /// Alternating Sunny/Rainy phases. A period of zero is treated as one.
    pub const fn cycling(switch_period: u32) -> Self {
        let switch_period = if switch_period == 0 { 1 } else { switch_period };
        Self {
            current: Weather::Clear,
            mode: WeatherMode::Cycling {
                switch_period,
                elapsed: 0,
            },
        }
    }

    pub fn current(&self) -> Weather {
        self.current
    }

    pub fn mode(&self) -> WeatherMode {
        self.mode
    }

    pub fn is_cycling(&self) -> bool {
        matches!(self.mode, WeatherMode::Cycling { .. })
    }

    /// Runs the transition rule for one tick.
    pub fn advance(&mut self) -> Option<WeatherTransition> {
        let WeatherMode::Cycling {
            switch_period,
            elapsed,
        } = &mut self.mode
        else {
            return None;
        };

        let phase = *elapsed / u64::from(*switch_period);
        *elapsed += 1;
        let next = if phase % 2 == 0 {
            Weather::Sunny
        } else {
            Weather::Rainy
        };
        self.change_to(next)
    }

    /// Stops cycling and fixes the weather.
    pub fn settle(&mut self, weather: Weather) -> Option<WeatherTransition> {
        self.mode = WeatherMode::Settled;
        self.change_to(weather)
    }

    fn change_to(&mut self, next: Weather) -> Option<WeatherTransition> {
        if next == self.current {
            return None;
        }
        let transition = WeatherTransition {
            from: self.current,
            to: next,
        };
        self.current = next;
        Some(transition)
    }
}

impl Default for WeatherController {
    fn default() -> Self {
        Self::fixed(Weather::Clear)
    }
}
