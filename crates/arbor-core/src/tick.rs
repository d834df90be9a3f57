use crate::{rng, SplitMix64};

/// Per-frame values handed down to every task of every tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Monotonic frame counter, starting at 0 for the first scheduler tick.
    pub tick: u64,
    /// Elapsed seconds since the previous tick. Never negative.
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds,
            seed,
        }
    }

    /// Deterministic RNG for a given stream; identical inputs give identical sequences.
    pub fn rng_for(&self, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, self.tick, stream);
        SplitMix64::new(seed)
    }
}
