use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of uniform randomness for layout and render decorations.
///
/// The layout only needs uniform floats in `[0, 1)`; everything else is
/// derived from that. Implement this to drive placement from a custom or
/// recorded sequence.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform float in `[low, high)`. Returns `low` when the range is empty.
    fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        if !(high > low) {
            return low;
        }
        let value = low + self.next_f32() * (high - low);
        // Rounding can land exactly on `high` for wide ranges.
        if value >= high { low } else { value }
    }

    /// Uniform integer in `low..=high`.
    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = (high - low + 1) as f32;
        let offset = (self.next_f32() * span).floor() as u32;
        low + offset.min(high - low)
    }
}

/// Small xorshift64* generator. Seedable for reproducible layouts.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        // splitmix64 scramble so that small or zero seeds still give a
        // well-mixed, non-zero state.
        let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        Self {
            state: if z == 0 { 0x2545_F491_4F6C_DD1D } else { z },
        }
    }

    /// Seeded from the process hash keys and the wall clock.
    pub fn from_entropy() -> Self {
        let mut hasher = RandomState::new().build_hasher();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        hasher.write_u128(nanos);
        Self::new(hasher.finish())
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl RandomSource for SeededRng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}
