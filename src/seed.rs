use tracing::debug;

use crate::engine::Engine;

/// Something that hands out seeds for new engines.
pub trait SeedSource {
    fn next_seed(&mut self) -> i64;
}

/// Non-deterministic seeds in `[0, 2^32)` from the thread-local system RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySeed;

impl SeedSource for EntropySeed {
    fn next_seed(&mut self) -> i64 {
        i64::from(rand::random::<u32>())
    }
}

/// Always returns the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSeed(pub i64);

impl SeedSource for FixedSeed {
    fn next_seed(&mut self) -> i64 {
        self.0
    }
}

impl Engine {
    /// A fresh non-deterministic seed. Record it to replay the sequence later.
    pub fn new_seed() -> i64 {
        EntropySeed.next_seed()
    }

    pub fn from_source<S: SeedSource + ?Sized>(source: &mut S) -> Self {
        let seed = source.next_seed();
        debug!(seed, "seeding engine from source");
        Self::new(seed)
    }

    /// Engine seeded from [`EntropySeed`]; `initial_seed()` reports the seed used.
    pub fn from_entropy_seed() -> Self {
        Self::from_source(&mut EntropySeed)
    }
}
