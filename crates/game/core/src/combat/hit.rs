//! Hit chance and accuracy calculations.

use crate::config::HitChanceParams;

/// Clamp a raw hit rate into the configured bounds.
///
/// # Formula
///
/// ```text
/// hit_chance = clamp(hit_rate, min, max)
/// ```
pub fn calculate_hit_chance(hit_rate: u32, params: &HitChanceParams) -> u32 {
    hit_rate.clamp(params.min, params.max.max(params.min))
}

/// An attack hits when a d100 roll (1-100) does not exceed the hit chance.
pub fn check_hit(hit_chance: u32, roll: u32) -> bool {
    roll <= hit_chance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_bounds() {
        let params = HitChanceParams { min: 5, max: 95 };
        assert_eq!(calculate_hit_chance(0, &params), 5);
        assert_eq!(calculate_hit_chance(150, &params), 95);
        assert_eq!(calculate_hit_chance(60, &params), 60);
    }

    #[test]
    fn certain_hit_never_misses() {
        for roll in 1..=100 {
            assert!(check_hit(100, roll));
        }
        assert!(!check_hit(0, 1));
    }
}
