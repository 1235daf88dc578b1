//! Damage calculation.

/// Calculate damage dealt by one hit.
///
/// # Formula
///
/// ```text
/// scaled  = base * multiplier_percent / 100
/// reduced = scaled - defense        (saturating)
/// final   = max(reduced, minimum)
/// ```
///
/// `multiplier_percent` is 100 for an unmodified attack.
pub fn calculate_damage(base: u32, multiplier_percent: u32, defense: u32, minimum: u32) -> u32 {
    let scaled = (u64::from(base) * u64::from(multiplier_percent) / 100).min(u64::from(u32::MAX));
    (scaled as u32).saturating_sub(defense).max(minimum)
}

/// Secondary damage dealt to bystanders, e.g. around a slam.
pub fn splash_damage(primary: u32, divisor: u32) -> u32 {
    primary / divisor.max(1)
}
