//! Deterministic, stateless random draws.
//!
//! Every draw is a pure function of a seed. Seeds are derived from the run
//! seed, a sequence number, the acting entity and a [`RollContext`], so two
//! different kinds of roll made in the same turn never share a value and a
//! replay with the same inputs reproduces every outcome.

/// RNG oracle. Implementations must map equal seeds to equal values.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&self, seed: u64, len: usize) -> usize {
        (self.next_u32(seed) as usize) % len.max(1)
    }

    /// True with `percent` chance (values of 100 and above always succeed).
    fn chance(&self, seed: u64, percent: u32) -> bool {
        self.roll_d100(seed) <= percent
    }
}

/// PCG-XSH-RR: one LCG step followed by an xorshift and a random rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Distinguishes independent rolls that share a sequence number and actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Hit = 0,
    Wander = 1,
    SpawnChance = 2,
    SpawnTemplate = 3,
    Loot = 4,
    /// Secondary targets of area attacks: `Splash as u32 + index`.
    Splash = 16,
}

/// Mixes the run seed, a sequence number, an actor id and a roll context.
///
/// `salt` separates repeated rolls of the same context within one action
/// (splash targets, loot entries).
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: RollContext, salt: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= ((context as u32).wrapping_add(salt) as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche (murmur3 fmix64)
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
