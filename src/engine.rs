//! Combined L'Ecuyer generator with a Bays-Durham shuffle table.
//!
//! Two multiplicative congruential sub-generators are stepped with Schrage's
//! method so every intermediate product fits in 32 bits. The first one also
//! refills a 32-entry table; the output is a table entry minus the second
//! sub-generator, reduced into `[1, M1 - 1)`.

use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{RandomError, Result};

const IM1: i64 = 2_147_483_563;
const IM2: i64 = 2_147_483_399;
const IMM1: i64 = IM1 - 1;
const IA1: i64 = 40_014;
const IA2: i64 = 40_692;
const IQ1: i64 = 53_668;
const IQ2: i64 = 52_774;
const IR1: i64 = 12_211;
const IR2: i64 = 3_791;
const NTAB: usize = 32;
const NDIV: i64 = 1 + IMM1 / NTAB as i64;
const AM: f64 = 1.0 / IM1 as f64;
const EPS: f64 = 1.2e-7;
const RNMX: f64 = 1.0 - EPS;

/// Smallest accepted seed; anything below is clamped up to it.
pub const MIN_SEED: i64 = 1;
/// Largest accepted seed; anything above is clamped down to it.
pub const MAX_SEED: i64 = u32::MAX as i64;

/// 2^32 as a float, used to turn a draw into a full 32-bit word.
const WORD_SCALE: f64 = 4_294_967_296.0;

/// One Schrage step: `a * s mod m` without overflowing 32 bits.
#[inline]
fn schrage(s: i64, a: i64, q: i64, r: i64, m: i64) -> i64 {
    let k = s / q;
    let s = a * (s - k * q) - k * r;
    if s < 0 {
        s + m
    } else {
        s
    }
}

/// Seedable generator producing uniform floats in the open interval (0, 1).
///
/// Not cryptographically secure. Two engines built from the same seed emit
/// the same sequence; cloning an engine forks an independent copy of its
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EngineState")]
pub struct Engine {
    seed: i64,
    s1: i64,
    s2: i64,
    table: [i64; NTAB],
    y: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cached_normal: Option<f64>,
}

impl Engine {
    /// Create an engine from `seed`, clamped to `[MIN_SEED, MAX_SEED]`.
    ///
    /// Seeds above `2^32 - 1` are clamped rather than fed through Schrage's
    /// step unreduced, so they produce the `MAX_SEED` stream instead of the
    /// saturated output an unclamped generator would give.
    pub fn new(seed: i64) -> Self {
        let mut engine = Self {
            seed: MIN_SEED,
            s1: MIN_SEED,
            s2: MIN_SEED,
            table: [0; NTAB],
            y: 0,
            cached_normal: None,
        };
        engine.seed(seed);
        engine
    }

    /// Reseed in place. Equivalent to replacing `self` with `Engine::new(seed)`,
    /// so any cached normal deviate is dropped as well.
    pub fn seed(&mut self, seed: i64) {
        let seed = seed.clamp(MIN_SEED, MAX_SEED);
        self.seed = seed;
        self.s1 = seed;
        self.s2 = seed;
        self.table = [0; NTAB];
        self.cached_normal = None;

        // Warm up the first sub-generator; the last NTAB outputs fill the table.
        for j in (0..NTAB + 8).rev() {
            self.s1 = schrage(self.s1, IA1, IQ1, IR1, IM1);
            if j < NTAB {
                self.table[j] = self.s1;
            }
        }
        self.y = self.table[0];

        trace!(seed, "engine seeded");
    }

    /// The (clamped) seed this engine was last seeded with.
    pub fn initial_seed(&self) -> i64 {
        self.seed
    }

    /// Draw a uniform float strictly inside (0, 1).
    pub fn draw(&mut self) -> f64 {
        self.s1 = schrage(self.s1, IA1, IQ1, IR1, IM1);
        self.s2 = schrage(self.s2, IA2, IQ2, IR2, IM2);

        let j = (self.y / NDIV) as usize;
        self.y = self.table[j] - self.s2;
        self.table[j] = self.s1;
        if self.y < 1 {
            self.y += IMM1;
        }

        (AM * self.y as f64).min(RNMX)
    }

    /// Uniform integer in `[0, n)`. Fails with `InvalidArgument` when `n` is zero.
    pub fn next_int(&mut self, n: u64) -> Result<u64> {
        if n == 0 {
            return Err(RandomError::InvalidArgument(
                "integer bound must be positive".to_string(),
            ));
        }
        Ok((self.draw() * n as f64) as u64)
    }

    /// Uniform index in `[0, n)` for a known non-zero `n`.
    #[inline]
    pub(crate) fn below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        (self.draw() * n as f64) as usize
    }

    /// A uniform 32-bit word, `floor(draw() * 2^32)`.
    #[inline]
    pub fn next_word(&mut self) -> u32 {
        (self.draw() * WORD_SCALE) as u32
    }
}

/// Serialized form of [`Engine`], checked before it becomes a live engine.
#[derive(Deserialize)]
struct EngineState {
    seed: i64,
    s1: i64,
    s2: i64,
    table: [i64; NTAB],
    y: i64,
    #[serde(default)]
    cached_normal: Option<f64>,
}

impl TryFrom<EngineState> for Engine {
    type Error = RandomError;

    fn try_from(state: EngineState) -> Result<Self> {
        if !(MIN_SEED..=MAX_SEED).contains(&state.seed) {
            return Err(RandomError::InvariantViolation(format!(
                "seed {} outside [{MIN_SEED}, {MAX_SEED}]",
                state.seed
            )));
        }
        if !(0..IM1).contains(&state.s1) || !(1..=MAX_SEED).contains(&state.s2) {
            return Err(RandomError::InvariantViolation(
                "sub-generator state out of range".to_string(),
            ));
        }
        if state.table.iter().any(|v| !(0..IM1).contains(v)) {
            return Err(RandomError::InvariantViolation(
                "shuffle table entry out of range".to_string(),
            ));
        }
        if !(0..IM1).contains(&state.y) {
            return Err(RandomError::InvariantViolation(format!(
                "output state {} out of range",
                state.y
            )));
        }
        Ok(Self {
            seed: state.seed,
            s1: state.s1,
            s2: state.s2,
            table: state.table,
            y: state.y,
            cached_normal: state.cached_normal,
        })
    }
}

impl RngCore for Engine {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_word());
        let lo = u64::from(self.next_word());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Engine {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from(u32::from_le_bytes(seed)))
    }

    /// Seeds directly (clamped), without the default seed expansion, so the
    /// trait path matches `Engine::new`.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(i64::try_from(state).unwrap_or(MAX_SEED))
    }
}
