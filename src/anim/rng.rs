//! Seeded pseudo-random streams, private to each element.
//!
//! Effects never read a shared global random source. Each element owns an
//! `EffectRng` built from its registration seed; every derived stream is a
//! pure function of (seed, salt), so a fixed seed reproduces the exact same
//! visual sequence tick for tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;

const TICK_MIX: u64 = 0x9e37_79b9_7f4a_7c15;
const LAYOUT_MIX: u64 = 0xd1b5_4a32_d192_ed03;

/// Factory for an element's deterministic random streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectRng {
    seed: u64,
}

impl EffectRng {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Stream for per-tick decisions (glitch bursts, rain glyphs). Re-seeded
    /// from the tick so output depends only on the tick, never on how many
    /// draws earlier ticks made.
    pub fn at_tick(&self, tick: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ tick.wrapping_mul(TICK_MIX))
    }

    /// Stream for static layout choices (particle homes, column speeds).
    /// Stable across the element's whole lifetime.
    pub fn layout(&self, salt: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ salt.wrapping_mul(LAYOUT_MIX).rotate_left(17))
    }
}
